// Tests for engine selection and compile errors
use crate::*;

#[test]
fn test_classify_plain_patterns_are_native() {
    for pattern in ["", "hello", "[a-z]+", r"\d{2,4}", "p([a-z]+)ch", r"(?:ab)+", r"(?i)abc"] {
        assert_eq!(classify(pattern), EngineKind::Native, "{pattern}");
    }
}

#[test]
fn test_classify_lookarounds() {
    for pattern in ["foo(?=bar)", "foo(?!bar)", "(?<=foo)bar", "(?<!foo)bar"] {
        assert_eq!(classify(pattern), EngineKind::Backtracking, "{pattern}");
    }
}

#[test]
fn test_classify_escaped_lookaround_is_native() {
    assert_eq!(classify(r"\(?=x"), EngineKind::Native);
    // escaped backslash, then a real lookahead
    assert_eq!(classify(r"\\(?=x)"), EngineKind::Backtracking);
}

#[test]
fn test_classify_backreferences() {
    assert_eq!(classify(r"(foo)\1"), EngineKind::Backtracking);
    assert_eq!(classify(r"(\w+)\s+\1"), EngineKind::Backtracking);
    // no capturing group, so `\1` is not taken as a backreference
    assert_eq!(classify(r"(?:foo)\1"), EngineKind::Native);
    assert_eq!(classify(r"\1"), EngineKind::Native);
    // `\\1` is an escaped backslash followed by a literal 1
    assert_eq!(classify(r"(a)\\1"), EngineKind::Native);
    // `\0` is not a backreference token
    assert_eq!(classify(r"(a)\0"), EngineKind::Native);
}

#[test]
fn test_classify_extended_markers() {
    for pattern in [
        r"(?>a+)b",
        r"(?P<w>\w+) (?P=w)",
        r"(?<w>\w+) \k<w>",
        r"a++",
        r"a*+b",
        r"x{2}+",
    ] {
        assert_eq!(classify(pattern), EngineKind::Backtracking, "{pattern}");
    }
    assert_eq!(classify(r"a\+\+"), EngineKind::Native);
}

#[test]
fn test_compile_picks_engine() {
    let re = Regex::new("hello").unwrap();
    assert_eq!(re.engine_kind(), EngineKind::Native);
    assert!(!re.is_backtracking());

    let re = Regex::new("foo(?=bar)").unwrap();
    assert!(re.is_backtracking());

    let re = Regex::new(r"(foo)\1").unwrap();
    assert!(re.is_backtracking());
}

#[test]
fn test_as_str_returns_source() {
    let pattern = r"p([a-z]+)ch";
    let re = Regex::new(pattern).unwrap();
    assert_eq!(re.as_str(), pattern);
    assert_eq!(re.to_string(), pattern);

    let re: Regex = r"(?<=x)y".parse().unwrap();
    assert_eq!(re.as_str(), r"(?<=x)y");
}

#[test]
fn test_engine_selection_override() {
    let re = RegexBuilder::new("hello")
        .engine(EngineSelection::Backtracking)
        .build()
        .unwrap();
    assert!(re.is_backtracking());
    assert!(re.is_match("say hello"));

    let err = RegexBuilder::new("foo(?=bar)")
        .engine(EngineSelection::Native)
        .build()
        .unwrap_err();
    assert_eq!(err.engine, EngineKind::Native);
    assert_eq!(err.code, ErrorCode::Unsupported);
    assert_eq!(err.offset, 3);
}

#[test]
fn test_custom_classifier() {
    let re = RegexBuilder::new("abc")
        .classifier(|_: &str| EngineKind::Backtracking)
        .build()
        .unwrap();
    assert!(re.is_backtracking());
}

#[test]
fn test_native_compile_error_offset() {
    let err = Regex::new("[").unwrap_err();
    assert_eq!(err.engine, EngineKind::Native);
    assert_eq!(err.code, ErrorCode::Syntax);
    assert_eq!(err.offset, 0);

    let err = Regex::new("a)").unwrap_err();
    assert_eq!(err.code, ErrorCode::Syntax);
    assert_eq!(err.offset, 1);
    assert!(err.to_string().contains("offset 1"));
}

#[test]
fn test_backtracking_compile_error() {
    let err = Regex::new("(?=a").unwrap_err();
    assert_eq!(err.engine, EngineKind::Backtracking);
    assert_eq!(err.code, ErrorCode::Syntax);

    let err = Regex::new(r"(a)\2").unwrap_err();
    assert_eq!(err.engine, EngineKind::Backtracking);
}

#[test]
fn test_capture_names() {
    let re = Regex::new(r"(?P<year>\d{4})-(\d{2})").unwrap();
    assert_eq!(re.captures_len(), 3);
    assert_eq!(re.capture_names(), vec![None, Some("year"), None]);
    assert_eq!(re.capture_index("year"), Some(1));
    assert_eq!(re.capture_index("month"), None);

    let re = Regex::new(r"(?P<w>\w+) (?P=w)").unwrap();
    assert!(re.is_backtracking());
    assert_eq!(re.capture_index("w"), Some(1));
}
