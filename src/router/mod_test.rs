use super::*;
use crate::session::UserProfile;

fn session(token: Option<&str>, is_loading: bool) -> Session {
    Session { token: token.map(str::to_owned), user: None, is_loading }
}

// =============================================================================
// route_for
// =============================================================================

#[test]
fn loading_wins_over_token() {
    assert_eq!(route_for(&session(Some("abc123"), true)), Route::Loading);
    assert_eq!(route_for(&session(None, true)), Route::Loading);
}

#[test]
fn missing_token_is_unauthenticated() {
    assert_eq!(route_for(&session(None, false)), Route::Unauthenticated);
}

#[test]
fn empty_token_is_unauthenticated() {
    assert_eq!(route_for(&session(Some(""), false)), Route::Unauthenticated);
}

#[test]
fn token_is_authenticated() {
    assert_eq!(route_for(&session(Some("abc123"), false)), Route::Authenticated);
}

#[test]
fn user_alone_does_not_authenticate() {
    let mut s = session(None, false);
    s.user = Some(UserProfile { id: "u1".into(), display_name: "A".into(), phone_number: "+1".into() });
    assert_eq!(route_for(&s), Route::Unauthenticated);
}

// =============================================================================
// Route screens
// =============================================================================

#[test]
fn route_screen_sets_are_disjoint() {
    for screen in Screen::ALL {
        let owners = [Route::Unauthenticated, Route::Authenticated]
            .into_iter()
            .filter(|r| r.contains(screen))
            .count();
        assert_eq!(owners, 1, "{screen} should belong to exactly one route");
    }
    assert!(Route::Loading.screens().is_empty());
}

#[test]
fn initial_screens() {
    assert_eq!(Route::Loading.initial_screen(), None);
    assert_eq!(Route::Unauthenticated.initial_screen(), Some(Screen::Auth));
    assert_eq!(Route::Authenticated.initial_screen(), Some(Screen::Feed));
}

// =============================================================================
// Screen
// =============================================================================

#[test]
fn only_review_form_shows_header() {
    let review = Screen::ReviewForm.options();
    assert!(review.header_shown);
    assert_eq!(review.title, Some("Write a Review"));

    for screen in [Screen::Auth, Screen::Otp, Screen::Feed] {
        assert!(!screen.options().header_shown);
    }
}

#[test]
fn from_name_is_case_insensitive() {
    assert_eq!(Screen::from_name("otp"), Some(Screen::Otp));
    assert_eq!(Screen::from_name("reviewform"), Some(Screen::ReviewForm));
    assert_eq!(Screen::from_name("Feed"), Some(Screen::Feed));
    assert_eq!(Screen::from_name("settings"), None);
}
