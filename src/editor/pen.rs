//! Pen colors, thickness presets and the active pen style.

/// Stroke colors offered in the drawing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PenColor {
    Black,
    Red,
    Green,
    Blue,
}

impl PenColor {
    pub const ALL: [PenColor; 4] = [PenColor::Black, PenColor::Red, PenColor::Green, PenColor::Blue];

    /// 24-bit `0xRRGGBB` value.
    pub fn hex(self) -> u32 {
        match self {
            PenColor::Black => 0x000000,
            PenColor::Red => 0xff0000,
            PenColor::Green => 0x00ff00,
            PenColor::Blue => 0x0000ff,
        }
    }

    pub fn rgb(self) -> [f32; 3] {
        let hex = self.hex();
        [
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            PenColor::Black => "Black",
            PenColor::Red => "Red",
            PenColor::Green => "Green",
            PenColor::Blue => "Blue",
        }
    }
}

/// Stroke width presets in world units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PenThickness {
    Thin,
    Normal,
    Thick,
}

impl PenThickness {
    pub const ALL: [PenThickness; 3] = [PenThickness::Thin, PenThickness::Normal, PenThickness::Thick];

    pub fn width(self) -> f32 {
        match self {
            PenThickness::Thin => 0.01,
            PenThickness::Normal => 0.03,
            PenThickness::Thick => 0.05,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PenThickness::Thin => "Thin",
            PenThickness::Normal => "Normal",
            PenThickness::Thick => "Thick",
        }
    }
}

/// Style read whenever a stroke mesh is built. Changing it never touches
/// strokes that are already finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenStyle {
    pub color: PenColor,
    /// Full stroke width in world units
    pub width: f32,
}

impl Default for PenStyle {
    fn default() -> Self {
        Self {
            color: PenColor::Black,
            width: 0.02,
        }
    }
}

impl PenStyle {
    pub fn set_color(&mut self, color: PenColor) {
        self.color = color;
    }

    pub fn set_thickness(&mut self, thickness: PenThickness) {
        self.width = thickness.width();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_values() {
        assert_eq!(PenColor::Black.rgb(), [0.0, 0.0, 0.0]);
        assert_eq!(PenColor::Red.rgb(), [1.0, 0.0, 0.0]);
        assert_eq!(PenColor::Green.hex(), 0x00ff00);
        assert_eq!(PenColor::Blue.rgb(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_thickness_presets() {
        let mut style = PenStyle::default();
        assert_eq!(style.width, 0.02);
        style.set_thickness(PenThickness::Thin);
        assert_eq!(style.width, 0.01);
        style.set_thickness(PenThickness::Normal);
        assert_eq!(style.width, 0.03);
        style.set_thickness(PenThickness::Thick);
        assert_eq!(style.width, 0.05);
    }
}
