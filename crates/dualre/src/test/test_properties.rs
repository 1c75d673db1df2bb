// Property tests for the scan, split and replace invariants
use proptest::prelude::*;

use crate::*;

const PATTERNS: &[&str] = &[
    "",
    "a",
    "a*",
    "x*",
    "[a-c]+",
    r"\d+",
    ",",
    r"(\w)\1",
    "(?=b)",
    r"(?<=a)b*",
    "é|€",
];

/// Patterns that can never match the empty string.
const NONEMPTY_NATIVE: &[&str] = &["a", "[a-c]+", r"\d+", "ab|b", "é|€", r"[^,]+"];

fn subject() -> impl Strategy<Value = String> {
    "[abc, 1é€]{0,24}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn matches_are_ordered_and_disjoint(
        pattern in prop::sample::select(PATTERNS),
        s in subject(),
    ) {
        let re = Regex::new(pattern).unwrap();
        let found = re.find_all(&s, -1);
        for m in &found {
            prop_assert!(m.start() <= m.end());
            prop_assert!(s.is_char_boundary(m.start()) && s.is_char_boundary(m.end()));
        }
        for pair in found.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            prop_assert!(next.start() >= prev.end());
            if prev.is_empty() {
                prop_assert!(next.start() > prev.start());
            }
        }
    }

    #[test]
    fn limited_scan_is_prefix(
        pattern in prop::sample::select(PATTERNS),
        s in subject(),
        limit in 0isize..6,
    ) {
        let re = Regex::new(pattern).unwrap();
        let all = re.find_all(&s, -1);
        let some = re.find_all(&s, limit);
        let expected = all.len().min(limit as usize);
        prop_assert_eq!(&some[..], &all[..expected]);
    }

    #[test]
    fn replace_with_whole_match_is_identity(
        pattern in prop::sample::select(PATTERNS),
        s in subject(),
    ) {
        let re = Regex::new(pattern).unwrap();
        prop_assert_eq!(re.replace_all(&s, "$0"), s.as_str());
    }

    #[test]
    fn byte_subjects_agree_with_text(
        pattern in prop::sample::select(PATTERNS),
        s in subject(),
    ) {
        let re = Regex::new(pattern).unwrap();
        let text: Vec<_> = re.find_all(&s, -1).iter().map(|m| m.range()).collect();
        let bytes: Vec<_> = re
            .find_all_bytes(s.as_bytes(), -1)
            .iter()
            .map(|m| m.range())
            .collect();
        prop_assert_eq!(text, bytes);
    }

    #[test]
    fn split_then_join_is_identity(s in subject()) {
        let re = Regex::new(",").unwrap();
        prop_assert_eq!(re.split(&s, -1).join(","), s);
    }

    #[test]
    fn native_agrees_with_reference(
        pattern in prop::sample::select(NONEMPTY_NATIVE),
        s in subject(),
    ) {
        let re = Regex::new(pattern).unwrap();
        let reference = regex::Regex::new(pattern).unwrap();
        prop_assert_eq!(re.is_match(&s), reference.is_match(&s));

        let ours: Vec<_> = re.find_iter(&s).map(|m| m.range()).collect();
        let theirs: Vec<_> = reference.find_iter(&s).map(|m| m.range()).collect();
        prop_assert_eq!(ours, theirs);
    }

    #[test]
    fn engines_agree_on_plain_patterns(
        pattern in prop::sample::select(NONEMPTY_NATIVE),
        s in subject(),
    ) {
        let native = Regex::new(pattern).unwrap();
        let backtracking = RegexBuilder::new(pattern)
            .engine(EngineSelection::Backtracking)
            .build()
            .unwrap();
        prop_assert_eq!(native.find_all(&s, -1), backtracking.find_all(&s, -1));
    }
}
