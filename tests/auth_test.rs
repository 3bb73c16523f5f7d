mod common;

use assert_matches::assert_matches;

use workshop_api::{
    auth::{AuthService, LoginRequest, RegisterRequest},
    errors::ServiceError,
};

use common::setup;

const TEST_SECRET: &str = "integration-test-secret-with-plenty-of-entropy-0123456789";

fn register_request(email: &str) -> RegisterRequest {
    RegisterRequest {
        name: "Ana Souza".to_string(),
        email: email.to_string(),
        password: "hunter2hunter2".to_string(),
        role: None,
    }
}

#[tokio::test]
async fn register_login_round_trip_yields_a_verifiable_token() {
    let ctx = setup().await;
    let auth = AuthService::new(ctx.db.clone(), TEST_SECRET.to_string(), 3600);

    let account = auth.register(register_request("ana@example.com")).await.unwrap();
    assert_eq!(account.role, "user");
    assert!(account.active);

    let response = auth
        .login(LoginRequest {
            email: "ana@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
        })
        .await
        .unwrap();

    let claims = auth.verify_token(&response.token).unwrap();
    assert_eq!(claims.sub, account.id);
    assert_eq!(claims.email, "ana@example.com");
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_fail_identically() {
    let ctx = setup().await;
    let auth = AuthService::new(ctx.db.clone(), TEST_SECRET.to_string(), 3600);
    auth.register(register_request("ana@example.com")).await.unwrap();

    let wrong_password = auth
        .login(LoginRequest {
            email: "ana@example.com".to_string(),
            password: "not-the-password".to_string(),
        })
        .await;
    assert_matches!(wrong_password, Err(ServiceError::AuthError(_)));

    let unknown_email = auth
        .login(LoginRequest {
            email: "nobody@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
        })
        .await;
    assert_matches!(unknown_email, Err(ServiceError::AuthError(_)));
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let ctx = setup().await;
    let auth = AuthService::new(ctx.db.clone(), TEST_SECRET.to_string(), 3600);

    auth.register(register_request("ana@example.com")).await.unwrap();
    let second = auth.register(register_request("ana@example.com")).await;
    assert_matches!(second, Err(ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn tokens_signed_with_another_secret_are_rejected() {
    let ctx = setup().await;
    let auth = AuthService::new(ctx.db.clone(), TEST_SECRET.to_string(), 3600);
    let other = AuthService::new(
        ctx.db.clone(),
        "a-completely-different-secret-0987654321-with-entropy".to_string(),
        3600,
    );

    let account = auth.register(register_request("ana@example.com")).await.unwrap();
    let (token, _) = other.issue_token(&account).unwrap();

    assert_matches!(auth.verify_token(&token), Err(ServiceError::AuthError(_)));
}
