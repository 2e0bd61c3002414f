use ratatui::{prelude::*, widgets::*};

use crate::{
    app::{AppState, View},
    format::big_text_rows,
    mode::{MenuChoice, Mode},
    orientation::display_scale,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub prepare_color: Color,
    pub round_color: Color,
    pub rest_color: Color,
    pub border_color: Color,
    pub accent_color: Color,
}

pub fn get_theme(name: &str) -> Theme {
    match name {
        "nord" => Theme {
            prepare_color: Color::Rgb(235, 203, 139),
            round_color: Color::Rgb(136, 192, 208),
            rest_color: Color::Rgb(163, 190, 140),
            border_color: Color::Rgb(94, 129, 172),
            accent_color: Color::Rgb(180, 142, 173),
        },
        "dracula" => Theme {
            prepare_color: Color::Rgb(241, 250, 140),
            round_color: Color::Rgb(255, 85, 85),
            rest_color: Color::Rgb(80, 250, 123),
            border_color: Color::Rgb(98, 114, 164),
            accent_color: Color::Rgb(189, 147, 249),
        },
        _ => Theme {
            prepare_color: Color::Rgb(255, 165, 0),
            round_color: Color::Rgb(255, 215, 0),
            rest_color: Color::Rgb(120, 200, 120),
            border_color: Color::Rgb(68, 68, 68),
            accent_color: Color::Rgb(255, 215, 0),
        },
    }
}

// ============================================================================
// UI Rendering
// ============================================================================

pub fn render_ui(f: &mut Frame, app: &AppState) {
    render_timer(f, app);
    match app.current_view {
        View::Menu => render_menu(f, app),
        View::Help => render_help(f, app),
        View::Timer => {}
    }
}

fn render_timer(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(f.size());

    let header = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.border_color))
        .title(Span::styled(" 🥋 ROLLTIMER ", Style::default()
            .fg(app.theme.accent_color).add_modifier(Modifier::BOLD)))
        .title(block::Title::from(Span::styled(
            format!(" {} ", chrono::Local::now().format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        )).alignment(Alignment::Right));
    f.render_widget(header, chunks[0]);

    // Landscape puts the controls beside the clock, portrait stacks them below.
    let (clock_area, controls_area) = if app.orientation.is_landscape() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(chunks[1]);
        (cols[0], cols[1])
    } else {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(8)])
            .split(chunks[1]);
        (rows[0], rows[1])
    };

    render_clock(f, app, clock_area);
    render_controls(f, app, controls_area);
}

fn render_clock(f: &mut Frame, app: &AppState, area: Rect) {
    let display = app.engine.snapshot();
    let color = app.mode_color();
    let digits = big_text_rows(&display.text, display_scale(app.orientation));

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(digits.len() as u16), Constraint::Length(1),
            Constraint::Length(1), Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(format!("{} {}", display.mode.icon(), display.header.to_uppercase()))
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[1]
    );

    let lines: Vec<Line> = digits.into_iter().map(Line::from).collect();
    f.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[2]
    );

    let status = if display.running {
        format!("{} RUNNING", if app.animation_frame < 10 { "●" } else { "○" })
    } else {
        "⏸  PAUSED".to_string()
    };
    let status = match display.mode {
        Mode::Preparing => format!("{}  •  next: {}", status, app.engine.state().queued_mode.header()),
        Mode::Resting if app.engine.remaining_secs() == 0 => format!("{}  •  rest complete", status),
        _ => status,
    };
    f.render_widget(
        Paragraph::new(status)
            .style(Style::default()
                .fg(if display.running { Color::Green } else { Color::Yellow })
                .add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[4]
    );

    if !display.mode.counts_up() {
        f.render_widget(
            Gauge::default()
                .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
                .gauge_style(Style::default().fg(color).bg(Color::Black))
                .percent((app.progress_ratio() * 100.0) as u16),
            sections[6]
        );
    }
}

fn render_controls(f: &mut Frame, app: &AppState, area: Rect) {
    let play = if app.engine.running() { " Pause" } else { " Play" };
    let controls = vec![
        Line::from(""),
        Line::from(vec![span_key("Space", app), Span::raw(play)]),
        Line::from(vec![span_key("R", app), Span::raw(" Reset")]),
        Line::from(vec![span_key("M", app), Span::raw(" Modes")]),
        Line::from(vec![span_key("H", app), Span::raw(" Help")]),
        Line::from(vec![span_key("Q", app), Span::raw(" Quit")]),
    ];
    f.render_widget(
        Paragraph::new(controls)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        area
    );
}

fn span_key<'a>(text: &'a str, app: &AppState) -> Span<'a> {
    Span::styled(text, Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD))
}

fn render_menu(f: &mut Frame, app: &AppState) {
    let area = centered_rect(50, 50, f.size());

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  ↑↓/jk: Navigate  •  Enter: Start  •  Esc: Close",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))),
    ];

    for (i, choice) in MenuChoice::ALL.iter().enumerate() {
        let selected = app.menu_selection == *choice;
        let (prefix, style) = if selected {
            ("  > ", Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD))
        } else {
            ("    ", Style::default().fg(Color::Gray))
        };
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(format!("{}. {}", i + 1, choice.label()), style),
        ]));
        lines.push(Line::from(vec![
            Span::raw("       "),
            Span::styled(choice.description(), Style::default().fg(Color::DarkGray)),
        ]));
    }

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .block(Block::default()
                .title(" Select Mode ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme.border_color))),
        area
    );
}

fn render_help(f: &mut Frame, app: &AppState) {
    let area = centered_rect(60, 70, f.size());

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled("⌨️  KEYBOARD SHORTCUTS", Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("  Timer:"),
        help_line("Space / P", "Play or pause"),
        help_line("R", "Reset the current mode"),
        Line::from(""),
        Line::from("  Modes:"),
        help_line("M", "Open the mode menu"),
        help_line("1", "Roll: prepare, round, rest"),
        help_line("2", "Hell rounds: prepare, then repeating rounds"),
        help_line("3", "Stopwatch"),
        Line::from(""),
        Line::from("  General:"),
        help_line("H / ?", "Toggle help"),
        help_line("Q / Esc", "Quit / Go back"),
        help_line("Ctrl+C", "Force quit"),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Theme: "),
            Span::styled(app.theme_name.as_str(), Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD)),
            Span::styled("  (set with --theme)", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(Span::styled("💡 Widen the terminal for larger digits",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))),
    ];

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(help_text)
            .alignment(Alignment::Left)
            .block(Block::default()
                .title(" Help ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme.border_color))),
        area
    );
}

fn help_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw("    "),
        Span::styled(key, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!("  {}", desc)),
    ])
}

fn centered_rect(w: u16, h: u16, r: Rect) -> Rect {
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - h) / 2),
            Constraint::Percentage(h),
            Constraint::Percentage((100 - h) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - w) / 2),
            Constraint::Percentage(w),
            Constraint::Percentage((100 - w) / 2),
        ])
        .split(v[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn timer_screen_shows_header_and_status() {
        let app = AppState::new(Config { notifications: false, ..Config::default() });
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal.draw(|f| render_ui(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("GET READY"));
        assert!(text.contains("PAUSED"));
        assert!(text.contains("next: Combat"));
    }

    #[test]
    fn menu_lists_every_choice() {
        let mut app = AppState::new(Config { notifications: false, ..Config::default() });
        app.current_view = View::Menu;
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render_ui(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        for choice in MenuChoice::ALL {
            assert!(text.contains(choice.label()));
        }
    }

    #[test]
    fn help_shows_active_theme() {
        let mut app = AppState::new(Config { notifications: false, theme: "nord".into(), ..Config::default() });
        app.current_view = View::Help;
        let mut terminal = Terminal::new(TestBackend::new(100, 50)).unwrap();
        terminal.draw(|f| render_ui(f, &app)).unwrap();

        assert!(buffer_text(&terminal).contains("Theme: nord"));
    }

    #[test]
    fn unknown_theme_falls_back_to_gold() {
        assert_eq!(get_theme("nope"), get_theme("gold"));
        assert_ne!(get_theme("nord"), get_theme("gold"));
    }
}
