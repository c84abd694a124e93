use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{LoginRequestDto, SessionResponseDto};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::SessionService;
use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

/// Login with the admin email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = SessionResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<SessionService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<SessionResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let session = service.login(dto)?;
    Ok(Json(session))
}

/// Get the admin identity behind the current session
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current admin", body = AuthenticatedUser),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(user: AuthenticatedUser) -> Json<AuthenticatedUser> {
    Json(user)
}

#[cfg(test)]
mod tests {
    use crate::features::auth::model::AuthenticatedUser;
    use crate::shared::test_helpers::{admin_token, protect, test_session_service};
    use axum::http::StatusCode;
    use axum::Router;
    use axum_test::TestServer;
    use serde_json::json;

    fn server() -> (TestServer, String) {
        let sessions = test_session_service();
        let token = admin_token(&sessions);
        let app = Router::new()
            .merge(crate::features::auth::routes::public_routes(sessions.clone()))
            .merge(protect(
                crate::features::auth::routes::protected_routes(),
                sessions,
            ));
        (TestServer::new(app).unwrap(), token)
    }

    #[tokio::test]
    async fn test_login_returns_bearer_token() {
        let (server, _) = server();
        let response = server
            .post("/api/auth/login")
            .json(&json!({ "email": "admin@turismoantigua.com", "password": "admin123" }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["tokenType"], "Bearer");
        assert!(body["accessToken"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn test_login_with_bad_password_is_unauthorized() {
        let (server, _) = server();
        let response = server
            .post("/api/auth/login")
            .json(&json!({ "email": "admin@turismoantigua.com", "password": "nope" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        response.assert_json(&json!({ "error": "Invalid credentials" }));
    }

    #[tokio::test]
    async fn test_login_with_malformed_email_is_bad_request() {
        let (server, _) = server();
        let response = server
            .post("/api/auth/login")
            .json(&json!({ "email": "not-an-email", "password": "admin123" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_me_requires_session() {
        let (server, token) = server();

        server
            .get("/api/auth/me")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let response = server
            .get("/api/auth/me")
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();
        let me: AuthenticatedUser = response.json();
        assert_eq!(me.sub, "admin@turismoantigua.com");
    }
}
