//! Colours for the dashboard.

use ratatui::style::Color;
use tianwen_core::ColorTheme;

/// Accent colour of a theme, used for the dial, labels and key hints.
pub fn theme_color(theme: ColorTheme) -> Color {
    match theme {
        ColorTheme::Gold => Color::Rgb(255, 204, 0),
        ColorTheme::Cyan => Color::Cyan,
        ColorTheme::Green => Color::Green,
        ColorTheme::Magenta => Color::Magenta,
        ColorTheme::White => Color::White,
    }
}

/// Parse `#rrggbb`.
pub fn parse_hex(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Colour of a body given as `#rrggbb`, white when malformed.
pub fn body_color(hex: &str) -> Color {
    parse_hex(hex).unwrap_or(Color::White)
}

/// Scale an RGB colour towards black; other colours pass through.
pub fn dim(color: Color, factor: f64) -> Color {
    let factor = factor.clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => {
            let scale = |c: u8| (f64::from(c) * factor).round() as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other => other,
    }
}

/// Hue of the starfield, degrees.
const STAR_HUE: f64 = 230.0;
const STAR_SATURATION: f64 = 0.35;

/// A pale blue star whose lightness follows `brightness` in `[0, 1]`.
pub fn star_color(brightness: f64) -> Color {
    let lightness = 0.2 + brightness.clamp(0.0, 1.0) * 0.5;
    from_hsl(STAR_HUE, STAR_SATURATION, lightness)
}

/// HSL to RGB through chroma. `hue` is in degrees, the rest in `[0, 1]`.
fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Color {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let base = lightness - chroma / 2.0;
    let channel = |c: f64| ((c + base) * 255.0).round() as u8;
    Color::Rgb(channel(r), channel(g), channel(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#ffcc00"), Some(Color::Rgb(255, 204, 0)));
        assert_eq!(parse_hex("#CD5C5C"), Some(Color::Rgb(205, 92, 92)));
        assert_eq!(parse_hex("ffcc00"), None);
        assert_eq!(parse_hex("#ffcc0"), None);
        assert_eq!(parse_hex("#gggggg"), None);
        assert_eq!(body_color("nope"), Color::White);
    }

    #[test]
    fn test_dim() {
        assert_eq!(dim(Color::Rgb(200, 100, 50), 0.5), Color::Rgb(100, 50, 25));
        assert_eq!(dim(Color::Rgb(200, 100, 50), 2.0), Color::Rgb(200, 100, 50));
        assert_eq!(dim(Color::Cyan, 0.1), Color::Cyan);
    }

    #[test]
    fn test_from_hsl() {
        assert_eq!(from_hsl(120.0, 0.0, 0.5), Color::Rgb(128, 128, 128));
        assert_eq!(from_hsl(0.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
        assert_eq!(from_hsl(240.0, 1.0, 0.5), Color::Rgb(0, 0, 255));
        assert_eq!(from_hsl(-120.0, 1.0, 0.5), Color::Rgb(0, 0, 255));
    }

    #[test]
    fn test_stars_lean_blue() {
        let Color::Rgb(r, g, b) = star_color(0.6) else {
            panic!("stars are rgb");
        };
        assert!(b > g && g > r);
    }

    #[test]
    fn test_star_brightness_orders() {
        let lightness = |c: Color| match c {
            Color::Rgb(r, g, b) => u32::from(r) + u32::from(g) + u32::from(b),
            _ => 0,
        };
        assert!(lightness(star_color(1.0)) > lightness(star_color(0.5)));
        assert!(lightness(star_color(0.5)) > lightness(star_color(0.0)));
        assert_eq!(star_color(3.0), star_color(1.0));
    }
}
