//! Text cleanup applied to every string that ends up in a [`Recipe`](crate::model::Recipe).

use html_escape::decode_html_entities;

const ZERO_WIDTH: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

/// Normalizes a piece of page text.
///
/// Zero-width marks are stripped and character entities (numeric, hexadecimal
/// and named) are decoded until the text stops changing, so double-encoded
/// input such as `&amp;#8211;` ends up as a dash. Whitespace runs (including
/// non-breaking spaces produced by decoding) are then collapsed to one space
/// and the result is trimmed. Malformed entities are left as they are.
///
/// `normalize(&normalize(s)) == normalize(s)` holds for every input.
pub fn normalize(text: &str) -> String {
    let mut current = strip_zero_width(text);
    loop {
        let decoded = strip_zero_width(&decode_html_entities(&current));
        if decoded == current {
            break;
        }
        current = decoded;
    }

    current.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Same as [`normalize`] for text that may be absent; absent text becomes `""`.
pub fn normalize_optional(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Normalizes and drops the value if nothing is left.
pub fn non_empty(text: &str) -> Option<String> {
    let cleaned = normalize(text);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn strip_zero_width(text: &str) -> String {
    text.chars().filter(|c| !ZERO_WIDTH.contains(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_named_entities() {
        assert_eq!(normalize("A&#8211;B"), "A–B");
        assert_eq!(normalize("A&amp;B"), "A&B");
        assert_eq!(normalize("&#x2014;"), "—");
        assert_eq!(normalize("&quot;hi&quot; &lt;b&gt;"), "\"hi\" <b>");
        assert_eq!(normalize("350&deg;F"), "350°F");
        assert_eq!(normalize("&frac12; cup"), "½ cup");
        assert_eq!(normalize("wait&hellip;"), "wait…");
        assert_eq!(normalize("&ldquo;yes&rdquo;"), "“yes”");
    }

    #[test]
    fn test_whitespace_collapse_and_trim() {
        assert_eq!(normalize("  2 cups\n\n\tflour  "), "2 cups flour");
        assert_eq!(normalize("&nbsp;1 egg&nbsp;"), "1 egg");
        assert_eq!(normalize("a\u{00A0}\u{00A0}b"), "a b");
    }

    #[test]
    fn test_zero_width_marks_removed() {
        assert_eq!(normalize("\u{FEFF}Sal\u{200B}t\u{200C}\u{200D}"), "Salt");
        assert_eq!(normalize("&#8203;pepper"), "pepper");
    }

    #[test]
    fn test_double_encoded_entities() {
        assert_eq!(normalize("Mac &amp;amp; Cheese"), "Mac & Cheese");
        assert_eq!(normalize("A&amp;#8211;B"), "A–B");
    }

    #[test]
    fn test_malformed_entities_pass_through() {
        assert_eq!(normalize("&#xZZ; and &bogus;"), "&#xZZ; and &bogus;");
        assert_eq!(normalize("AT&T"), "AT&T");
    }

    #[test]
    fn test_absent_text() {
        assert_eq!(normalize_optional(None), "");
        assert_eq!(normalize_optional(Some(" x ")), "x");
        assert_eq!(non_empty(" \u{200B} "), None);
        assert_eq!(non_empty(" a "), Some("a".to_string()));
    }

    #[test]
    fn test_idempotence() {
        let samples = [
            "",
            "   ",
            "A&#8211;B",
            "&amp;amp;lt;",
            "a&\u{200B}amp;b",
            "&am\u{200B}p;",
            "x &nbsp; &#32; y",
            "\u{FEFF}&#xFEFF;&#8203;",
            "&amp;&#8203;;",
            "Tom &amp Jerry",
            "1/2 cup &frac12;&nbsp;sugar\r\n",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }
}
