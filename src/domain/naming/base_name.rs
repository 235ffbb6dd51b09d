//! File base-name sanitisation

/// Characters kept in a user-supplied base name besides ASCII letters and digits
const EXTRA_ALLOWED: &[char] = &[' ', '-', '_'];

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || EXTRA_ALLOWED.contains(&c)
}

/// Reduce `input` to `[A-Za-z0-9 _-]` and trim surrounding spaces.
///
/// Path separators, dots and every other character are dropped, so the
/// result can never escape the output directory or carry its own extension.
pub fn sanitize_base_name(input: &str) -> String {
    let kept: String = input.chars().filter(|&c| is_allowed(c)).collect();
    kept.trim().to_string()
}

/// Sanitised `requested`, or `fallback` when nothing usable remains
pub fn base_name_or(requested: &str, fallback: &str) -> String {
    let name = sanitize_base_name(requested);
    if name.is_empty() {
        fallback.to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_allowed_characters() {
        assert_eq!(sanitize_base_name("Meeting notes_2-b"), "Meeting notes_2-b");
    }

    #[test]
    fn strips_everything_else() {
        assert_eq!(sanitize_base_name("../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_base_name("8.mp3"), "8mp3");
        assert_eq!(sanitize_base_name("a:b*c?d\"e<f>g|h"), "abcdefgh");
        assert_eq!(sanitize_base_name("запись 1"), "1");
    }

    #[test]
    fn trims_spaces_after_filtering() {
        assert_eq!(sanitize_base_name("  !hello world!  "), "hello world");
        assert_eq!(sanitize_base_name("\tname\n"), "name");
    }

    #[test]
    fn output_only_contains_allowed_set() {
        let inputs = ["ÄÖÜ äöü", "tab\there", "emoji 🎙 name", "/\\:;,.", "x y-z_0"];
        for input in inputs {
            let out = sanitize_base_name(input);
            assert!(out.chars().all(is_allowed), "{:?} -> {:?}", input, out);
            assert_eq!(out, out.trim());
        }
    }

    #[test]
    fn empty_result_falls_back() {
        assert_eq!(base_name_or("???", "12"), "12");
        assert_eq!(base_name_or("   ", "12"), "12");
        assert_eq!(base_name_or("", "12"), "12");
        assert_eq!(base_name_or("take", "12"), "take");
    }
}
