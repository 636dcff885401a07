//! Unit coverage of the pure guard predicates against every identity
//! outcome the resolvers can produce.

use upe_api::identity::principal::{Principal, RequestIdentity, TokenRejection};
use upe_api::middleware::guards::{AuthError, check_authenticated, check_role, check_verified};
use upe_api::modules::users::model::UserRole;

fn principal(role: UserRole, verified: bool) -> Principal {
    Principal {
        subject_id: "subject-1".to_string(),
        user_id: "user-1".to_string(),
        email: "p@test.com".to_string(),
        name: "P".to_string(),
        role,
        verified,
    }
}

#[test]
fn test_anonymous_fails_authentication() {
    let err = check_authenticated(&RequestIdentity::Anonymous).unwrap_err();
    assert_eq!(err.code(), "NOT_AUTHENTICATED");
}

#[test]
fn test_rejections_map_to_specific_codes() {
    assert_eq!(
        check_authenticated(&RequestIdentity::Rejected(TokenRejection::Expired))
            .unwrap_err()
            .code(),
        "TOKEN_EXPIRED"
    );
    assert_eq!(
        check_authenticated(&RequestIdentity::Rejected(TokenRejection::Invalid))
            .unwrap_err()
            .code(),
        "TOKEN_INVALID"
    );
    assert_eq!(
        check_authenticated(&RequestIdentity::Rejected(TokenRejection::UserNotFound))
            .unwrap_err()
            .code(),
        "NOT_AUTHENTICATED"
    );
}

#[test]
fn test_authenticated_passes_and_borrows_principal() {
    let identity = RequestIdentity::Authenticated(principal(UserRole::Admin, true));
    let resolved = check_authenticated(&identity).unwrap();
    assert_eq!(resolved.role, UserRole::Admin);
}

#[test]
fn test_role_check_against_sets() {
    let student = principal(UserRole::Estudiante, true);

    assert!(check_role(&student, &[UserRole::Estudiante]).is_ok());
    assert!(check_role(&student, &[UserRole::Estudiante, UserRole::Empresa]).is_ok());
    assert!(check_role(&student, &[UserRole::Empresa]).is_err());
    assert!(check_role(&student, &[]).is_err());
}

#[test]
fn test_role_error_carries_allowed_set() {
    let student = principal(UserRole::Estudiante, true);
    let err = check_role(&student, &[UserRole::Empresa]).unwrap_err();
    assert_eq!(
        err,
        AuthError::RoleNotPermitted {
            allowed: vec![UserRole::Empresa]
        }
    );
}

#[test]
fn test_verified_check() {
    assert!(check_verified(&principal(UserRole::Empresa, true)).is_ok());
    assert_eq!(
        check_verified(&principal(UserRole::Empresa, false))
            .unwrap_err()
            .code(),
        "NOT_VERIFIED"
    );
}

#[test]
fn test_guard_composition_short_circuits_in_order() {
    // requireAuthenticated -> requireRole -> requireVerified, stopping at
    // the first failure.
    let identity = RequestIdentity::Authenticated(principal(UserRole::Empresa, false));

    let result = check_authenticated(&identity)
        .and_then(|p| check_role(p, &[UserRole::Empresa]).map(|_| p))
        .and_then(|p| check_verified(p).map(|_| p));

    assert_eq!(result.unwrap_err().code(), "NOT_VERIFIED");

    let anonymous = RequestIdentity::Anonymous;
    let result = check_authenticated(&anonymous)
        .and_then(|p| check_role(p, &[UserRole::Empresa]).map(|_| p));
    assert_eq!(result.unwrap_err().code(), "NOT_AUTHENTICATED");
}
