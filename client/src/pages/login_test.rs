use super::*;

#[test]
fn build_login_request_trims_email() {
    let request = build_login_request("  a@b.com ", "pw", true).unwrap();
    assert_eq!(request.email, "a@b.com");
    assert_eq!(request.password, "pw");
    assert!(request.remember_me);
}

#[test]
fn build_login_request_keeps_password_whitespace() {
    let request = build_login_request("a@b.com", " pw ", false).unwrap();
    assert_eq!(request.password, " pw ");
}

#[test]
fn build_login_request_requires_both_fields() {
    let errors = build_login_request("   ", "", false).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.contains_key("Email"));
    assert!(errors.contains_key("Password"));
}
