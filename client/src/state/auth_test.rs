use super::*;

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_no_user() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(!state.loading);
}

#[test]
fn auth_state_loading_constructor() {
    let state = AuthState::loading();
    assert!(state.loading);
    assert!(state.email().is_none());
}

#[test]
fn auth_state_email_from_user() {
    let state = AuthState {
        user: Some(User { id: "u1".to_owned(), email: "a@b.com".to_owned(), email_confirmed: true }),
        loading: false,
    };
    assert_eq!(state.email(), Some("a@b.com"));
}
