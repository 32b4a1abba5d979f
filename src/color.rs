//! Color conversion between user-entered color strings and the linear RGB
//! triples the interpolation core works in.
//!
//! Parsing accepts `#RGB`, `#RRGGBB`, `0x`-prefixed hex, and a small set of
//! CSS color names. Components decode as sRGB and pass through the standard
//! sRGB → linear transfer function. Everything here is a pure function of
//! its input; the core never converts colors itself.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid color string: {0:?}")]
    InvalidColor(String),
}

/// Parse a color string into a linear-space RGB triple.
///
/// # Errors
/// [`ColorError::InvalidColor`] when the string is neither a recognized hex
/// spelling nor a known color name.
pub fn parse_color(text: &str) -> Result<[f64; 3], ColorError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ColorError::InvalidColor(text.to_owned()));
    }

    parse_hex(trimmed)
        .or_else(|| named_color(trimmed))
        .map(|srgb| srgb.map(srgb_to_linear))
        .ok_or_else(|| ColorError::InvalidColor(text.to_owned()))
}

/// Decode the sRGB components of a hex spelling, still in [0,1] sRGB space.
fn parse_hex(text: &str) -> Option<[f64; 3]> {
    let digits = if let Some(stripped) = text.strip_prefix('#') {
        stripped
    } else if let Some(stripped) = text.strip_prefix("0x") {
        stripped
    } else {
        return None;
    };

    let expanded = match digits.len() {
        3 => {
            let mut result = String::with_capacity(6);
            for ch in digits.chars() {
                result.push(ch);
                result.push(ch);
            }
            result
        }
        6 => digits.to_owned(),
        _ => return None,
    };

    u32::from_str_radix(&expanded, 16).ok().map(|value| {
        let r = ((value >> 16) & 0xFF) as f64;
        let g = ((value >> 8) & 0xFF) as f64;
        let b = (value & 0xFF) as f64;
        [r / 255.0, g / 255.0, b / 255.0]
    })
}

fn named_color(text: &str) -> Option<[f64; 3]> {
    match text.to_ascii_lowercase().as_str() {
        "white" => Some([1.0, 1.0, 1.0]),
        "black" => Some([0.0, 0.0, 0.0]),
        "red" => Some([1.0, 0.0, 0.0]),
        "green" => Some([0.0, 1.0, 0.0]),
        "blue" => Some([0.0, 0.0, 1.0]),
        "yellow" => Some([1.0, 1.0, 0.0]),
        "magenta" | "fuchsia" => Some([1.0, 0.0, 1.0]),
        "cyan" | "aqua" => Some([0.0, 1.0, 1.0]),
        "gray" | "grey" => Some([0.5, 0.5, 0.5]),
        _ => None,
    }
}

/// The standard sRGB → linear transfer function for one component.
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// The standard linear → sRGB transfer function for one component.
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Format a linear RGB triple as a `#RRGGBB` string, for handle swatches
/// and other UI echoes of node colors.
#[must_use]
pub fn to_hex(linear: [f64; 3]) -> String {
    let quantize = |c: f64| (linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0).round() as u32;
    format!(
        "#{:02x}{:02x}{:02x}",
        quantize(linear[0]),
        quantize(linear[1]),
        quantize(linear[2])
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_and_black_are_transfer_fixed_points() {
        assert_eq!(parse_color("#ffffff").unwrap(), [1.0, 1.0, 1.0]);
        assert_eq!(parse_color("#000000").unwrap(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn short_hex_expands_per_digit() {
        assert_eq!(parse_color("#fff").unwrap(), [1.0, 1.0, 1.0]);
        assert_eq!(parse_color("#f00").unwrap(), parse_color("#ff0000").unwrap());
    }

    #[test]
    fn accepts_0x_prefix_and_names() {
        assert_eq!(
            parse_color("0xff0000").unwrap(),
            parse_color("red").unwrap()
        );
        assert_eq!(parse_color("WHITE").unwrap(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn mid_gray_passes_through_srgb_curve() {
        let [r, g, b] = parse_color("#808080").unwrap();
        let expected = srgb_to_linear(128.0 / 255.0);
        assert!((r - expected).abs() < 1e-12);
        assert_eq!(r, g);
        assert_eq!(g, b);
        // The curve is nonlinear: mid sRGB is well below mid linear.
        assert!(r < 0.25);
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in ["", "  ", "#ff", "#ggg", "#12345", "notacolor", "ff0000"] {
            assert!(
                matches!(parse_color(bad), Err(ColorError::InvalidColor(_))),
                "expected InvalidColor for {bad:?}"
            );
        }
    }

    #[test]
    fn transfer_functions_round_trip() {
        for c in [0.0, 0.001, 0.02, 0.2, 0.5, 0.9, 1.0] {
            let there_and_back = linear_to_srgb(srgb_to_linear(c));
            assert!((there_and_back - c).abs() < 1e-12);
        }
    }

    #[test]
    fn to_hex_round_trips_parse() {
        for hex in ["#000000", "#ffffff", "#ff0000", "#123456", "#808080"] {
            let linear = parse_color(hex).unwrap();
            assert_eq!(to_hex(linear), hex);
        }
    }
}
