//! URI helpers

use percent_encoding::percent_decode_str;

/// Percent-decode a URI fragment, passing `None` through
///
/// Malformed escapes such as a trailing `%` are kept verbatim and byte
/// sequences that are not UTF-8 decode to U+FFFD, so this never fails.
pub fn unquote_safe(s: Option<&str>) -> Option<String> {
    s.map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_passes_through() {
        assert_eq!(unquote_safe(None), None);
    }

    #[test]
    fn test_decodes_escapes() {
        assert_eq!(unquote_safe(Some("a%20b")).as_deref(), Some("a b"));
        assert_eq!(
            unquote_safe(Some("textures/brick%20wall.png")).as_deref(),
            Some("textures/brick wall.png")
        );
        assert_eq!(unquote_safe(Some("caf%C3%A9")).as_deref(), Some("café"));
    }

    #[test]
    fn test_malformed_escapes_kept() {
        assert_eq!(unquote_safe(Some("100%")).as_deref(), Some("100%"));
        assert_eq!(unquote_safe(Some("%zz%2")).as_deref(), Some("%zz%2"));
    }

    #[test]
    fn test_invalid_utf8_replaced() {
        assert_eq!(unquote_safe(Some("%FFok")).as_deref(), Some("\u{FFFD}ok"));
    }

    #[test]
    fn test_plus_is_not_space() {
        assert_eq!(unquote_safe(Some("a+b")).as_deref(), Some("a+b"));
    }
}
