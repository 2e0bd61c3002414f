use crate::mode::Mode;

/// `M:SS` for countdowns, `MM:SS` for the stopwatch.
pub fn format_display(secs: u64, mode: Mode) -> String {
    let (m, s) = (secs / 60, secs % 60);
    if mode.counts_up() {
        format!("{:02}:{:02}", m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

// 3x5 block glyphs, one string per row.
const GLYPH_HEIGHT: usize = 5;

fn glyph(c: char) -> [&'static str; GLYPH_HEIGHT] {
    match c {
        '0' => ["███", "█ █", "█ █", "█ █", "███"],
        '1' => ["  █", "  █", "  █", "  █", "  █"],
        '2' => ["███", "  █", "███", "█  ", "███"],
        '3' => ["███", "  █", "███", "  █", "███"],
        '4' => ["█ █", "█ █", "███", "  █", "  █"],
        '5' => ["███", "█  ", "███", "  █", "███"],
        '6' => ["███", "█  ", "███", "█ █", "███"],
        '7' => ["███", "  █", "  █", "  █", "  █"],
        '8' => ["███", "█ █", "███", "█ █", "███"],
        '9' => ["███", "█ █", "███", "  █", "███"],
        ':' => [" ", "█", " ", "█", " "],
        _ => [" ", " ", " ", " ", " "],
    }
}

/// Renders `text` as rows of block glyphs, each cell repeated `scale` times
/// in both directions.
pub fn big_text_rows(text: &str, scale: u16) -> Vec<String> {
    let scale = scale.max(1) as usize;
    let mut rows = Vec::with_capacity(GLYPH_HEIGHT * scale);

    for r in 0..GLYPH_HEIGHT {
        let mut line = String::new();
        for (i, c) in text.chars().enumerate() {
            if i > 0 {
                line.push_str(&" ".repeat(scale));
            }
            for cell in glyph(c)[r].chars() {
                for _ in 0..scale {
                    line.push(cell);
                }
            }
        }
        for _ in 0..scale {
            rows.push(line.clone());
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_minutes_are_not_padded() {
        assert_eq!(format_display(360, Mode::Rolling), "6:00");
        assert_eq!(format_display(65, Mode::Resting), "1:05");
        assert_eq!(format_display(5, Mode::Preparing), "0:05");
        assert_eq!(format_display(0, Mode::HellRounds), "0:00");
    }

    #[test]
    fn stopwatch_minutes_are_padded() {
        assert_eq!(format_display(65, Mode::Stopwatch), "01:05");
        assert_eq!(format_display(0, Mode::Stopwatch), "00:00");
        assert_eq!(format_display(6000, Mode::Stopwatch), "100:00");
    }

    #[test]
    fn big_text_scales_in_both_directions() {
        let small = big_text_rows("1:05", 1);
        assert_eq!(small.len(), 5);
        assert_eq!(small[0], "  █   ███ ███");

        let large = big_text_rows("1:05", 2);
        assert_eq!(large.len(), 10);
        assert_eq!(large[0], large[1]);
        assert_eq!(large[0].chars().count(), small[0].chars().count() * 2);
    }
}
