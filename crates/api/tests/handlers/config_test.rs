use medqueue_api::config::{parse_log_level, parse_positive};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tracing::Level;

#[rstest]
#[case("trace", Level::TRACE)]
#[case("DEBUG", Level::DEBUG)]
#[case("warn", Level::WARN)]
#[case("error", Level::ERROR)]
#[case("chatty", Level::INFO)]
fn test_parse_log_level(#[case] raw: &str, #[case] expected: Level) {
    assert_eq!(parse_log_level(raw), expected);
}

#[test]
fn test_parse_positive_accepts_whitespace() {
    assert_eq!(parse_positive(" 7 ").unwrap(), 7);
}

#[rstest]
#[case("0")]
#[case("-3")]
#[case("seven")]
fn test_parse_positive_rejects(#[case] raw: &str) {
    assert!(parse_positive(raw).is_err());
}
