/// Default maximum length used by file lists
pub const DEFAULT_MAX_LENGTH: usize = 25;

const ELLIPSIS: &str = "...";

/// Shorten `filename` to at most `max_length` characters, keeping the
/// extension: `"quarterly-financial-report.pdf" → "quarterly-financia....pdf"`.
///
/// When the extension alone leaves no room for the stem, falls back to a
/// plain cut with a trailing ellipsis. Lengths count characters, not bytes.
pub fn truncate_filename(filename: &str, max_length: usize) -> String {
    if filename.chars().count() <= max_length {
        return filename.to_string();
    }

    let (stem, extension) = match filename.rfind('.') {
        Some(dot) => filename.split_at(dot),
        None => (filename, ""),
    };

    let available = max_length
        .checked_sub(extension.chars().count() + ELLIPSIS.len())
        .filter(|n| *n > 0);

    match available {
        Some(n) => format!("{}{}{}", take_chars(stem, n), ELLIPSIS, extension),
        None => format!(
            "{}{}",
            take_chars(filename, max_length.saturating_sub(ELLIPSIS.len())),
            ELLIPSIS
        ),
    }
}

fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_names_unchanged() {
        assert_eq!(truncate_filename("a.pdf", 25), "a.pdf");
        assert_eq!(truncate_filename("exactly-ten", 11), "exactly-ten");
    }

    #[test]
    fn test_keeps_extension() {
        assert_eq!(
            truncate_filename("quarterly-financial-report.pdf", 25),
            "quarterly-financia....pdf"
        );
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(truncate_filename("abcdefghijklmnop", 10), "abcdefg...");
    }

    #[test]
    fn test_long_extension_falls_back_to_plain_cut() {
        // ".verylongextension" (18) + "..." leaves no room in 12
        assert_eq!(
            truncate_filename("file.verylongextension", 12),
            "file.very..."
        );
    }

    #[test]
    fn test_multibyte_characters() {
        let name = "ドキュメント-最終版-修正済み.pdf";
        let result = truncate_filename(name, 12);
        assert_eq!(result.chars().count(), 12);
        assert!(result.ends_with("....pdf"));
    }

    #[test]
    fn test_tiny_max_length() {
        assert_eq!(truncate_filename("document.pdf", 3), "...");
        assert_eq!(truncate_filename("document.pdf", 0), "...");
    }

    proptest! {
        /// Property: result never exceeds the limit once it can hold an ellipsis
        #[test]
        fn never_exceeds_max(name in "[a-zA-Z0-9_ -]{0,40}(\\.[a-z]{1,5})?", max in 3usize..40) {
            let result = truncate_filename(&name, max);
            prop_assert!(result.chars().count() <= max, "{:?} -> {:?}", name, result);
        }

        /// Property: short extensions survive truncation
        #[test]
        fn extension_preserved(stem in "[a-z]{30,60}", ext in "[a-z]{1,4}", max in 10usize..25) {
            let name = format!("{}.{}", stem, ext);
            let result = truncate_filename(&name, max);
            let expected_suffix = format!(".{}", ext);
            prop_assert!(result.ends_with(&expected_suffix));
            prop_assert!(result.contains("..."));
        }
    }
}
