//! Theme preferences: accent color palette and dark mode encoding.

/// Accent color selected on first run.
pub const DEFAULT_ACCENT_COLOR: &str = "#4f8cff";

/// Selectable accent colors, in picker order.
pub const ACCENT_COLORS: &[&str] = &[
    DEFAULT_ACCENT_COLOR,
    "#ef476f",
    "#ffb200",
    "#00bfae",
    "#8c54ff",
    "#22223b",
    "#607d8b",
    "#23c8b6",
    "#ff607f",
];

/// Resolves a candidate color to its palette entry (case-insensitive).
pub fn palette_color(candidate: &str) -> Option<&'static str> {
    let normalized = candidate.trim().to_ascii_lowercase();
    ACCENT_COLORS
        .iter()
        .copied()
        .find(|color| *color == normalized)
}

/// Encodes the theme flag for storage.
pub fn encode_dark_mode(enabled: bool) -> &'static str {
    if enabled {
        "true"
    } else {
        "false"
    }
}

/// Decodes the stored theme flag. Only the literal `"true"` means dark.
pub fn decode_dark_mode(raw: &str) -> bool {
    raw == "true"
}

#[cfg(test)]
mod tests {
    use super::{decode_dark_mode, encode_dark_mode, palette_color, DEFAULT_ACCENT_COLOR};

    #[test]
    fn palette_lookup_is_case_insensitive() {
        assert_eq!(palette_color("#EF476F"), Some("#ef476f"));
        assert_eq!(palette_color(DEFAULT_ACCENT_COLOR), Some("#4f8cff"));
        assert_eq!(palette_color("#000000"), None);
    }

    #[test]
    fn dark_mode_encoding_is_literal() {
        assert!(decode_dark_mode(encode_dark_mode(true)));
        assert!(!decode_dark_mode(encode_dark_mode(false)));
        assert!(!decode_dark_mode("TRUE"));
        assert!(!decode_dark_mode("1"));
    }
}
