use super::*;

#[test]
fn build_register_request_accepts_matching_passwords() {
    let request = build_register_request(" new@example.com ", "secret1", "secret1").unwrap();
    assert_eq!(request.email, "new@example.com");
    assert_eq!(request.confirm_password, "secret1");
}

#[test]
fn build_register_request_reports_mismatch() {
    let errors = build_register_request("new@example.com", "secret1", "secret2").unwrap_err();
    assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["ConfirmPassword"]);
}

#[test]
fn required_errors_take_precedence_over_mismatch() {
    let errors = build_register_request("", "secret1", "").unwrap_err();
    assert!(errors.contains_key("Email"));
    assert_eq!(
        errors["ConfirmPassword"],
        vec!["The ConfirmPassword field is required.".to_owned()]
    );
}
