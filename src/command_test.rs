use super::*;

#[test]
fn blank_line_is_no_command() {
    assert!(parse("").unwrap().is_none());
    assert!(parse("   \t").unwrap().is_none());
}

#[test]
fn token_with_and_without_value() {
    assert_eq!(parse("token abc123").unwrap(), Some(Command::SetToken(Some("abc123".into()))));
    assert_eq!(parse("token").unwrap(), Some(Command::SetToken(None)));
    assert_eq!(parse("  TOKEN   xyz  ").unwrap(), Some(Command::SetToken(Some("xyz".into()))));
}

#[test]
fn user_parses_profile_json() {
    let cmd = parse(r#"user {"_id":"u1","name":"Alice","phoneNumber":"+15550100"}"#).unwrap();
    let expected = UserProfile { id: "u1".into(), display_name: "Alice".into(), phone_number: "+15550100".into() };
    assert_eq!(cmd, Some(Command::SetUser(Some(expected))));
    assert_eq!(parse("user").unwrap(), Some(Command::SetUser(None)));
}

#[test]
fn user_with_bad_json_is_error() {
    let err = parse("user {oops").unwrap_err();
    assert!(matches!(err, CommandError::InvalidUser(_)));
}

#[test]
fn go_resolves_screen_names() {
    assert_eq!(parse("go otp").unwrap(), Some(Command::Go(Screen::Otp)));
    assert_eq!(parse("go ReviewForm").unwrap(), Some(Command::Go(Screen::ReviewForm)));
}

#[test]
fn go_requires_known_screen() {
    assert!(matches!(parse("go").unwrap_err(), CommandError::MissingArgument("screen")));
    assert!(matches!(parse("go settings").unwrap_err(), CommandError::UnknownScreen(name) if name == "settings"));
}

#[test]
fn simple_verbs() {
    assert_eq!(parse("logout").unwrap(), Some(Command::Logout));
    assert_eq!(parse("back").unwrap(), Some(Command::Back));
    assert_eq!(parse("show").unwrap(), Some(Command::Show));
    assert_eq!(parse("?").unwrap(), Some(Command::Help));
    assert_eq!(parse("exit").unwrap(), Some(Command::Quit));
}

#[test]
fn unknown_verb_is_error() {
    let err = parse("dance now").unwrap_err();
    assert_eq!(err.to_string(), "unknown command `dance`; try `help`");
}
