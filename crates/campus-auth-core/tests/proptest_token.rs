//! Property-based tests for token issuance and validation
//!
//! These tests verify:
//! - Issued tokens verify back to exactly the signed claims
//! - Any single-character change to a token is reported as a bad signature
//! - Expiry is enforced at the `exp` second with no leeway
//! - Arbitrary garbage never panics the validator

mod common;

use campus_auth_core::{TokenIssuer, TokenRejection, TokenValidator};
use campus_types::{Role, User, UserId};
use proptest::prelude::*;

const BASE64URL: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

// ============================================================================
// Strategies
// ============================================================================

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Student), Just(Role::Faculty), Just(Role::Admin)]
}

fn arb_user() -> impl Strategy<Value = User> {
    (1i64..1_000_000, "[a-z][a-z0-9_]{2,15}", arb_role())
        .prop_map(|(id, username, role)| User::new(UserId(id), username, role))
}

/// Issue times between 2001 and 2286
fn arb_issued_at() -> impl Strategy<Value = i64> {
    1_000_000_000i64..9_000_000_000
}

fn pair() -> (TokenIssuer, TokenValidator) {
    let config = common::test_config();
    (
        TokenIssuer::new(&config).unwrap(),
        TokenValidator::new(&config).unwrap(),
    )
}

// ============================================================================
// Roundtrip Properties
// ============================================================================

proptest! {
    /// Property: verify(issue(user)) reproduces the signed claims
    #[test]
    fn prop_issued_token_roundtrips(user in arb_user(), iat in arb_issued_at()) {
        let (issuer, validator) = pair();
        let issued = issuer.issue_at(&user, iat).unwrap();

        let claims = validator.verify_at(&issued.token, iat).unwrap();
        prop_assert_eq!(&claims, &issued.claims);
        prop_assert_eq!(claims.id, user.id);
        prop_assert_eq!(claims.username, user.username);
        prop_assert_eq!(claims.role, user.role);
    }
}

// ============================================================================
// Tamper Properties
// ============================================================================

proptest! {
    /// Property: changing any one character yields InvalidSignature,
    /// never Expired and never success
    #[test]
    fn prop_single_char_tamper_detected(
        user in arb_user(),
        iat in arb_issued_at(),
        position in any::<prop::sample::Index>(),
        replacement in any::<prop::sample::Index>(),
    ) {
        let (issuer, validator) = pair();
        let issued = issuer.issue_at(&user, iat).unwrap();

        let mut bytes = issued.token.clone().into_bytes();
        let at = position.index(bytes.len());
        let mut new_byte = BASE64URL[replacement.index(BASE64URL.len())];
        if new_byte == bytes[at] {
            new_byte = if new_byte == b'A' { b'B' } else { b'A' };
        }
        bytes[at] = new_byte;
        let tampered = String::from_utf8(bytes).unwrap();

        prop_assert_eq!(
            validator.verify_at(&tampered, iat),
            Err(TokenRejection::InvalidSignature)
        );
    }

    /// Property: random strings never panic and never validate
    #[test]
    fn prop_garbage_never_validates(token in "[A-Za-z0-9_.=-]{1,200}") {
        let (_, validator) = pair();
        let result = validator.verify_at(&token, 1_700_000_000);
        prop_assert!(matches!(
            result,
            Err(TokenRejection::InvalidSignature)
        ));
    }
}

// ============================================================================
// Expiry Properties
// ============================================================================

proptest! {
    /// Property: valid through iat + ttl, expired one second later
    #[test]
    fn prop_expiry_boundary(user in arb_user(), iat in arb_issued_at(), offset in 0i64..3600) {
        let (issuer, validator) = pair();
        let issued = issuer.issue_at(&user, iat).unwrap();

        prop_assert!(validator.verify_at(&issued.token, iat + offset).is_ok());
        prop_assert_eq!(
            validator.verify_at(&issued.token, iat + 3601 + offset),
            Err(TokenRejection::Expired)
        );
    }
}

#[test]
fn test_expiry_at_documented_offsets() {
    let (issuer, validator) = pair();
    let user = User::new(UserId(101), "student1", Role::Student);
    let iat = 1_700_000_000;
    let issued = issuer.issue_at(&user, iat).unwrap();

    assert!(validator.verify_at(&issued.token, iat + 3599).is_ok());
    assert_eq!(
        validator.verify_at(&issued.token, iat + 3601),
        Err(TokenRejection::Expired)
    );
}
