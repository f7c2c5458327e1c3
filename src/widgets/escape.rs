//! Attribute-value escaping for navigation triggers.
//!
//! Paths end up inside element attributes and attribute selectors, so the
//! characters that would break out of a double-quoted attribute are escaped.

/// Escape `value` for use inside a double-quoted attribute.
///
/// - `&` becomes `&amp;` unless it already starts a character reference
///   (`&name;`, `&#123;` or `&#x1f;`, case-insensitive).
/// - `"` becomes `&quot;`.
/// - `>` becomes `&gt;`.
///
/// Everything else, `'` and `<` included, passes through.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, ch) in value.char_indices() {
        match ch {
            '&' if !starts_reference(&value[i + 1..]) => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Whether `rest` (the text after an `&`) begins with a complete reference.
fn starts_reference(rest: &str) -> bool {
    let Some(end) = rest.find(';') else {
        return false;
    };
    let body = &rest[..end];
    if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit())
    } else if let Some(decimal) = body.strip_prefix('#') {
        !decimal.is_empty() && decimal.chars().all(|c| c.is_ascii_digit())
    } else {
        !body.is_empty() && body.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_unchanged() {
        assert_eq!(escape_attribute("/product/1"), "/product/1");
        assert_eq!(escape_attribute(""), "");
    }

    #[test]
    fn quotes_and_greater_than() {
        assert_eq!(
            escape_attribute(" \"'><=invalid_path"),
            " &quot;'&gt;<=invalid_path"
        );
    }

    #[test]
    fn bare_ampersand() {
        assert_eq!(escape_attribute("a&b"), "a&amp;b");
        assert_eq!(escape_attribute("a&"), "a&amp;");
        assert_eq!(escape_attribute("&;"), "&amp;;");
        assert_eq!(escape_attribute("& amp;"), "&amp; amp;");
    }

    #[test]
    fn existing_references_kept() {
        assert_eq!(escape_attribute("&amp;"), "&amp;");
        assert_eq!(escape_attribute("&AMP;"), "&AMP;");
        assert_eq!(escape_attribute("&#39;"), "&#39;");
        assert_eq!(escape_attribute("&#x1F;"), "&#x1F;");
        assert_eq!(escape_attribute("&#X1f;"), "&#X1f;");
    }

    #[test]
    fn malformed_references_escaped() {
        assert_eq!(escape_attribute("&#;"), "&amp;#;");
        assert_eq!(escape_attribute("&#x;"), "&amp;#x;");
        assert_eq!(escape_attribute("&#xg1;"), "&amp;#xg1;");
        assert_eq!(escape_attribute("&#1a;"), "&amp;#1a;");
    }

    #[test]
    fn multibyte_text_passes_through() {
        assert_eq!(escape_attribute("/café&\"ü\""), "/café&amp;&quot;ü&quot;");
    }
}
