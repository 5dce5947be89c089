use serde::{Deserialize, Serialize};

/// Color with channels normalised to `0.0..=1.0`, as PDF drawing operators expect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Parse `#rrggbb` (leading `#` optional, case-insensitive).
/// Malformed input yields black.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Rgb::default();
    }

    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|v| f64::from(v) / 255.0)
            .unwrap_or(0.0)
    };

    Rgb {
        r: channel(0),
        g: channel(2),
        b: channel(4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_colors() {
        assert_eq!(hex_to_rgb("#ff0000"), Rgb { r: 1.0, g: 0.0, b: 0.0 });
        assert_eq!(hex_to_rgb("00FF00"), Rgb { r: 0.0, g: 1.0, b: 0.0 });
        assert_eq!(hex_to_rgb("#0000ff"), Rgb { r: 0.0, g: 0.0, b: 1.0 });
    }

    #[test]
    fn test_mid_value() {
        let rgb = hex_to_rgb("#808080");
        assert!((rgb.r - 128.0 / 255.0).abs() < f64::EPSILON);
        assert_eq!(rgb.r, rgb.g);
        assert_eq!(rgb.g, rgb.b);
    }

    #[test]
    fn test_malformed_is_black() {
        assert_eq!(hex_to_rgb(""), Rgb::default());
        assert_eq!(hex_to_rgb("#fff"), Rgb::default());
        assert_eq!(hex_to_rgb("#gg0000"), Rgb::default());
        assert_eq!(hex_to_rgb("##ff0000"), Rgb::default());
        assert_eq!(hex_to_rgb("#ff00000"), Rgb::default());
    }
}
