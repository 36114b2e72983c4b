//! Filename sanitization for client-supplied upload names.

/// Transform a client-supplied filename into a safe on-disk name.
///
/// Keeps only the final path component (both `/` and `\` count as
/// separators), replaces every character outside `[A-Za-z0-9._-]` with `_`,
/// and strips leading dots so the result can never be `.`, `..` or a
/// dotfile. Case is preserved so the stored name still correlates with the
/// original upload.
///
/// Deterministic for a given input. Returns an empty string when nothing
/// safe remains; callers must treat that as a missing filename.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let normalized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    normalized.trim_start_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_unchanged() {
        assert_eq!(sanitize_filename("report.pdf"), "report.pdf");
    }

    #[test]
    fn test_case_preserved() {
        assert_eq!(sanitize_filename("report.PDF"), "report.PDF");
    }

    #[test]
    fn test_strips_unix_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd.pdf"), "passwd.pdf");
        assert_eq!(sanitize_filename("/var/tmp/report.pdf"), "report.pdf");
    }

    #[test]
    fn test_strips_windows_path_components() {
        assert_eq!(sanitize_filename("..\\..\\boot\\report.pdf"), "report.pdf");
    }

    #[test]
    fn test_unsafe_characters_normalized() {
        assert_eq!(
            sanitize_filename("my report (final).pdf"),
            "my_report__final_.pdf"
        );
        assert_eq!(sanitize_filename("a;b&c.pdf"), "a_b_c.pdf");
    }

    #[test]
    fn test_leading_dots_stripped() {
        assert_eq!(sanitize_filename(".hidden.pdf"), "hidden.pdf");
        assert_eq!(sanitize_filename("..."), "");
        assert_eq!(sanitize_filename(".."), "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize_filename(""), "");
    }

    #[test]
    fn test_deterministic() {
        let input = "wéird näme?.pdf";
        assert_eq!(sanitize_filename(input), sanitize_filename(input));
    }
}
