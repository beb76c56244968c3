//! Tests for user identity validation and serde contracts.

use super::*;
use rstest::rstest;

#[rstest]
fn user_id_accepts_canonical_uuid() {
    let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
    assert_eq!(id.as_ref(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
}

#[rstest]
#[case("")]
#[case("  ")]
#[case("not-a-uuid")]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
fn user_id_rejects_invalid_input(#[case] raw: &str) {
    assert!(UserId::new(raw).is_err());
}

#[rstest]
fn user_id_round_trips_through_uuid() {
    let id = UserId::random();
    let wrapped = UserId::from_uuid(*id.as_uuid());
    assert_eq!(wrapped, id);
}

#[rstest]
fn display_name_rejects_blank_input() {
    assert!(matches!(
        DisplayName::new("   "),
        Err(UserValidationError::EmptyDisplayName)
    ));
}

#[rstest]
fn display_name_rejects_overlong_input() {
    let long = "x".repeat(DISPLAY_NAME_MAX + 1);
    assert!(matches!(
        DisplayName::new(long),
        Err(UserValidationError::DisplayNameTooLong { .. })
    ));
}

#[rstest]
#[case("alice@example.com")]
#[case("a.b+tag@mail.co")]
fn email_accepts_plausible_addresses(#[case] raw: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), raw);
}

#[rstest]
#[case("")]
#[case("no-at-sign")]
#[case("@missing-local")]
#[case("missing-domain@")]
#[case("two@@ats")]
#[case("spaced name@example.com")]
fn email_rejects_implausible_addresses(#[case] raw: &str) {
    assert!(EmailAddress::new(raw).is_err());
}

#[rstest]
fn user_round_trips_through_serde() {
    let user = User::try_from_strings(
        "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        "Alice Provider",
        "alice@example.com",
        true,
    )
    .expect("valid user")
    .with_avatar_url(Some("https://cdn.example.com/alice.png".to_owned()));

    let encoded = serde_json::to_string(&user).expect("user serializes");
    let decoded: User = serde_json::from_str(&encoded).expect("user deserializes");

    assert_eq!(decoded, user);
    assert!(decoded.is_provider());
    assert_eq!(
        decoded.avatar_url(),
        Some("https://cdn.example.com/alice.png")
    );
}

#[rstest]
fn user_deserialization_rejects_invalid_email() {
    let payload = serde_json::json!({
        "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        "displayName": "Alice",
        "email": "not-an-email",
        "isProvider": true,
    });

    let result: Result<User, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}
