use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, ShiftHue, Srgb};
use plotters::style::RGBColor;

use crate::error::{PlotError, Result};

// ---------------------------------------------------------------------------
// SeriesColor – one RGB colour usable by both renderers
// ---------------------------------------------------------------------------

/// Two colours closer than this on every channel are hard to tell apart.
const MIN_CHANNEL_DISTANCE: u8 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SeriesColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional).
    pub fn parse_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        if !hex.is_ascii() {
            return Err(PlotError::Config(format!("invalid colour '{hex}'")));
        }
        let rgb = Srgb::<u8>::from_str(hex)
            .map_err(|e| PlotError::Config(format!("invalid colour '{hex}': {e}")))?;
        Ok(Self::new(rgb.red, rgb.green, rgb.blue))
    }

    /// Same lightness and saturation, hue rotated half way round the wheel.
    pub fn complement(self) -> Self {
        let hsl: Hsl = self.to_srgb().into_color();
        from_hsl(hsl.shift_hue(180.0))
    }

    pub fn to_rgb(self) -> RGBColor {
        RGBColor(self.r, self.g, self.b)
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(self.r, self.g, self.b)
    }

    /// No channel differs by more than [`MIN_CHANNEL_DISTANCE`].
    pub fn is_close_to(self, other: Self) -> bool {
        self.r.abs_diff(other.r) < MIN_CHANNEL_DISTANCE
            && self.g.abs_diff(other.g) < MIN_CHANNEL_DISTANCE
            && self.b.abs_diff(other.b) < MIN_CHANNEL_DISTANCE
    }

    fn to_srgb(self) -> Srgb {
        Srgb::<u8>::new(self.r, self.g, self.b).into_format::<f32>()
    }
}

fn from_hsl(hsl: Hsl) -> SeriesColor {
    let rgb: Srgb = hsl.into_color();
    SeriesColor::new(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<SeriesColor> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            from_hsl(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// SeriesColors – the expected / actual pair
// ---------------------------------------------------------------------------

/// Colours of the two plotted series. Always distinct from each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesColors {
    pub expected: SeriesColor,
    pub actual: SeriesColor,
}

impl SeriesColors {
    /// Parse both colours; if they are too close to tell apart, the actual
    /// series is recoloured.
    pub fn resolve(expected_hex: &str, actual_hex: &str) -> Result<Self> {
        let expected = SeriesColor::parse_hex(expected_hex)?;
        let mut actual = SeriesColor::parse_hex(actual_hex)?;

        if actual.is_close_to(expected) {
            actual = contrasting(expected);
            log::warn!(
                "Expected ({expected_hex}) and actual ({actual_hex}) colours are too similar; drawing actual as #{:02x}{:02x}{:02x}",
                actual.r,
                actual.g,
                actual.b
            );
        }

        Ok(Self { expected, actual })
    }
}

/// Complementary hue, or the first palette colour far enough away for
/// greys, which have no hue to rotate.
fn contrasting(color: SeriesColor) -> SeriesColor {
    let complement = color.complement();
    if !complement.is_close_to(color) {
        return complement;
    }
    generate_palette(6)
        .into_iter()
        .find(|c| !c.is_close_to(color))
        .unwrap_or(SeriesColor::new(255 - color.r, 255 - color.g, 255 - color.b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(
            SeriesColor::parse_hex("#0000ff").unwrap(),
            SeriesColor::new(0, 0, 255)
        );
        assert_eq!(
            SeriesColor::parse_hex("f00").unwrap(),
            SeriesColor::new(255, 0, 0)
        );
    }

    #[test]
    fn bad_hex_is_a_config_error() {
        assert!(matches!(
            SeriesColor::parse_hex("blue"),
            Err(PlotError::Config(_))
        ));
        assert!(SeriesColor::parse_hex("#ééé").is_err());
    }

    #[test]
    fn distinct_colours_are_kept() {
        let colors = SeriesColors::resolve("#0000ff", "#ff0000").unwrap();
        assert_eq!(colors.expected, SeriesColor::new(0, 0, 255));
        assert_eq!(colors.actual, SeriesColor::new(255, 0, 0));
    }

    #[test]
    fn identical_colours_are_separated() {
        let colors = SeriesColors::resolve("#0000ff", "#0000FF").unwrap();
        assert_ne!(colors.expected, colors.actual);
        // blue rotated by 180° is yellow
        assert_eq!(colors.actual, SeriesColor::new(255, 255, 0));
    }

    #[test]
    fn identical_grey_colours_are_separated() {
        let colors = SeriesColors::resolve("#000000", "#000").unwrap();
        assert_ne!(colors.expected, colors.actual);
    }

    #[test]
    fn near_identical_colours_are_separated() {
        let colors = SeriesColors::resolve("#0000ff", "#0000fe").unwrap();
        assert_eq!(colors.expected, SeriesColor::new(0, 0, 255));
        assert!(!colors.actual.is_close_to(colors.expected));
        assert_eq!(colors.actual, SeriesColor::new(255, 255, 0));
    }

    #[test]
    fn near_identical_greys_are_separated() {
        let colors = SeriesColors::resolve("#808080", "#7f7f7f").unwrap();
        assert!(!colors.actual.is_close_to(colors.expected));
    }

    #[test]
    fn closeness_is_per_channel() {
        let blue = SeriesColor::new(0, 0, 255);
        assert!(blue.is_close_to(SeriesColor::new(10, 20, 230)));
        assert!(!blue.is_close_to(SeriesColor::new(0, 80, 255)));
    }

    #[test]
    fn palette_has_requested_size() {
        let palette = generate_palette(4);
        assert_eq!(palette.len(), 4);
        assert_ne!(palette[0], palette[2]);
    }
}
