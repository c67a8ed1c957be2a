// sieve-core/src/domain/cleaning/text.rs

/// Title-cases a string: the first letter of every alphabetic run is upper
/// case, the rest lower case. Any non-letter (space, digit, apostrophe,
/// hyphen) starts a new run, so `"o'brien"` becomes `"O'Brien"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Trim + title case. Absent stays absent.
pub fn normalize_text(value: Option<&str>) -> Option<String> {
    value.map(|v| title_case(v.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("bob"), "Bob");
        assert_eq!(title_case("SMITH"), "Smith");
        assert_eq!(title_case("north east"), "North East");
        assert_eq!(title_case("o'brien"), "O'Brien");
        assert_eq!(title_case("anne-marie"), "Anne-Marie");
        assert_eq!(title_case("3rd street"), "3Rd Street");
        assert_eq!(title_case("élodie"), "Élodie");
    }

    #[test]
    fn test_normalize_text_trims_first() {
        assert_eq!(normalize_text(Some("  bob  ")), Some("Bob".to_string()));
        assert_eq!(normalize_text(None), None);
    }

    #[test]
    fn test_title_case_is_idempotent() {
        for s in ["O'Brien", "Anne-Marie", "Home & Garden", "3Rd Street"] {
            assert_eq!(title_case(&title_case(s)), title_case(s));
        }
    }
}
