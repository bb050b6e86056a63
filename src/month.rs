// 🗓️ Month-Name Resolver
// Indonesian month labels -> two-digit month codes

/// Immutable lookup table, lowercase label -> month code
static MONTHS: [(&str, &str); 12] = [
    ("januari", "01"),
    ("februari", "02"),
    ("maret", "03"),
    ("april", "04"),
    ("mei", "05"),
    ("juni", "06"),
    ("juli", "07"),
    ("agustus", "08"),
    ("september", "09"),
    ("oktober", "10"),
    ("november", "11"),
    ("desember", "12"),
];

/// Resolve a month label such as `"1Januari"` or `"AGUSTUS"` to its code.
///
/// Matching is case-insensitive; leading and trailing non-alphabetic
/// characters (ordinal digits, punctuation, whitespace) are stripped first.
/// Returns `None` for anything that is not one of the twelve month names.
pub fn resolve_month(label: &str) -> Option<&'static str> {
    let cleaned = label
        .trim_matches(|c: char| !c.is_alphabetic())
        .to_lowercase();

    MONTHS
        .iter()
        .find(|(name, _)| *name == cleaned)
        .map(|(_, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_case_insensitive() {
        assert_eq!(resolve_month("januari"), Some("01"));
        assert_eq!(resolve_month("JANUARI"), Some("01"));
        assert_eq!(resolve_month("Januari"), Some("01"));
    }

    #[test]
    fn test_resolve_strips_ordinal_digits() {
        assert_eq!(resolve_month("1Januari"), Some("01"));
        assert_eq!(resolve_month("12Desember"), Some("12"));
        assert_eq!(resolve_month("8Agustus2025"), Some("08"));
        assert_eq!(resolve_month("  5 Mei "), Some("05"));
    }

    #[test]
    fn test_resolve_all_months() {
        for (i, (name, code)) in MONTHS.iter().enumerate() {
            assert_eq!(resolve_month(name), Some(*code));
            assert_eq!(code.parse::<usize>().unwrap(), i + 1);
        }
    }

    #[test]
    fn test_resolve_unknown_label() {
        assert_eq!(resolve_month("January"), None);
        assert_eq!(resolve_month(""), None);
        assert_eq!(resolve_month("2025"), None);
    }
}
