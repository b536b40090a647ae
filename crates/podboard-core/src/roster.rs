//! Student roster parsing.

/// Split free-text input into cleaned student IDs.
///
/// Tokens are comma-separated, whitespace-trimmed, upper-cased; empty tokens
/// are dropped. No deduplication happens here -- the rule engine reports
/// in-request duplicates so the user sees which ID they typed twice.
pub fn parse_student_ids(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.to_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn trims_uppercases_and_drops_empties() {
        assert_eq!(
            parse_student_ids(" sit-1 , SIT-1 ,, b "),
            vec!["SIT-1", "SIT-1", "B"]
        );
    }

    #[test]
    fn blank_input_yields_nothing() {
        assert!(parse_student_ids("").is_empty());
        assert!(parse_student_ids("   ").is_empty());
        assert!(parse_student_ids(" , ,").is_empty());
    }

    #[test]
    fn keeps_duplicates_in_order() {
        assert_eq!(parse_student_ids("a,b,a"), vec!["A", "B", "A"]);
    }

    proptest! {
        #[test]
        fn output_is_trimmed_uppercase_nonempty(text in ".{0,80}") {
            for id in parse_student_ids(&text) {
                prop_assert!(!id.is_empty());
                prop_assert_eq!(id.trim(), &id);
                prop_assert_eq!(id.to_uppercase(), id.clone());
                prop_assert!(!id.contains(','));
            }
        }
    }
}
