use eframe::egui::Color32;

/// Parse a `#RRGGBB` hex string into a color.
pub fn parse_hex_color(hex: &str) -> Result<Color32, String> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("Invalid color '{}', expected #RRGGBB", hex));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|e| format!("Invalid color '{}': {}", hex, e))
    };
    Ok(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Format an RGB triple as `#RRGGBB`.
pub fn format_hex_color(rgb: (u8, u8, u8)) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.0, rgb.1, rgb.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_hash() {
        assert_eq!(parse_hex_color("#FF8000"), Ok(Color32::from_rgb(255, 128, 0)));
    }

    #[test]
    fn test_parse_without_hash() {
        assert_eq!(parse_hex_color("00ff00"), Ok(Color32::from_rgb(0, 255, 0)));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(parse_hex_color("#FFF").is_err());
        assert!(parse_hex_color("#FF80001").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        assert!(parse_hex_color("#GG0000").is_err());
        assert!(parse_hex_color("red").is_err());
    }

    #[test]
    fn test_format_round_trip() {
        let hex = format_hex_color((255, 128, 0));
        assert_eq!(hex, "#FF8000");
        assert_eq!(parse_hex_color(&hex), Ok(Color32::from_rgb(255, 128, 0)));
    }
}
