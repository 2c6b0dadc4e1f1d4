use super::*;

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: u32 = env_parse("__TEST_SESSION_MISSING_KEY__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_valid() {
    unsafe { std::env::set_var("__TEST_SESSION_EP_VALID__", "7") };
    let val: u32 = env_parse("__TEST_SESSION_EP_VALID__", 0);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__TEST_SESSION_EP_VALID__") };
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__TEST_SESSION_EP_INVALID__", "lots") };
    let val: u32 = env_parse("__TEST_SESSION_EP_INVALID__", 3);
    assert_eq!(val, 3);
    unsafe { std::env::remove_var("__TEST_SESSION_EP_INVALID__") };
}

// =============================================================================
// StorageConfig
// =============================================================================

#[test]
fn with_url_keeps_url() {
    let config = StorageConfig::with_url("sqlite::memory:");
    assert_eq!(config.url, "sqlite::memory:");
    assert!(config.max_connections >= 1);
}
