//! Display name normalization.

/// First code point of the supplementary planes, where emoji badges live.
const SUPPLEMENTARY_START: u32 = 0x10000;

/// Strip every supplementary-plane code point from `display_name` and trim.
///
/// Any badge previously appended from that range disappears, along with any
/// such characters the member chose themselves.
///
/// ```
/// assert_eq!(rolebadge_core::base_name("Alice 🦊"), "Alice");
/// ```
pub fn base_name(display_name: &str) -> String {
    display_name
        .chars()
        .filter(|c| u32::from(*c) < SUPPLEMENTARY_START)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Name a member should carry for `badge`, or the bare base name when none.
pub fn badged_name(base_name: &str, badge: Option<&str>) -> String {
    match badge {
        Some(badge) if !badge.is_empty() => format!("{base_name} {badge}"),
        _ => base_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_supplementary_emoji_and_whitespace() {
        assert_eq!(base_name("  Alice 🦊  "), "Alice");
        assert_eq!(base_name("🎉Bob🎉"), "Bob");
    }

    #[test]
    fn test_keeps_basic_plane_symbols() {
        // U+2B50 sits in the basic multilingual plane
        assert_eq!(base_name("Alice ⭐"), "Alice ⭐");
        assert_eq!(base_name("Zoë"), "Zoë");
    }

    #[test]
    fn test_name_made_only_of_emoji_becomes_empty() {
        assert_eq!(base_name("🦊🦊"), "");
    }

    #[test]
    fn test_badge_is_space_separated() {
        assert_eq!(badged_name("Alice", Some("⭐")), "Alice ⭐");
        assert_eq!(badged_name("Alice", Some("")), "Alice");
        assert_eq!(badged_name("Alice", None), "Alice");
    }
}
