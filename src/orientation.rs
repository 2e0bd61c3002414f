//! Portrait/landscape signal for the clock display.
//!
//! Terminal cells are roughly twice as tall as they are wide, so a window
//! counts as landscape once its column count reaches twice its row count.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn from_size(cols: u16, rows: u16) -> Self {
        if u32::from(cols) >= u32::from(rows) * 2 {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }

    pub fn is_landscape(&self) -> bool {
        matches!(self, Self::Landscape)
    }
}

/// Glyph scale for the clock digits. Landscape gets the larger face.
pub fn display_scale(orientation: Orientation) -> u16 {
    match orientation {
        Orientation::Portrait => 1,
        Orientation::Landscape => 2,
    }
}
