use chrono::Utc;
use hmac::{Hmac, Mac};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::Sha256;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{LoginRequestDto, SessionResponseDto};
use crate::features::auth::model::{AuthenticatedUser, SessionClaims};
use crate::shared::constants::ROLE_ADMIN;

type HmacSha256 = Hmac<Sha256>;

/// Issues and validates admin session tokens.
///
/// There is exactly one admin account, configured through the environment.
/// Tokens are HS256 JWTs signed with the session secret.
pub struct SessionService {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SessionService {
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.session_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.session_secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Check the admin credentials and issue a session token
    pub fn login(&self, dto: LoginRequestDto) -> Result<SessionResponseDto> {
        if !self.credentials_match(&dto.email, &dto.password) {
            tracing::warn!("Rejected admin login for {}", dto.email);
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let access_token = self.issue_token()?;
        tracing::info!("Admin session issued for {}", self.config.admin_email);

        Ok(SessionResponseDto {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.config.session_ttl.as_secs(),
        })
    }

    /// Sign a fresh token for the configured admin
    pub fn issue_token(&self) -> Result<String> {
        let now = Utc::now().timestamp().max(0) as u64;
        let claims = SessionClaims {
            sub: self.config.admin_email.clone(),
            name: self.config.admin_name.clone(),
            role: ROLE_ADMIN.to_string(),
            iss: self.config.session_issuer.clone(),
            iat: now,
            exp: now + self.config.session_ttl.as_secs(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))
    }

    /// Verify signature, issuer and expiry, and return the admin identity
    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.session_issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid session: {}", e)))?;

        let user = AuthenticatedUser::from(data.claims);
        if !user.is_admin() {
            return Err(AppError::Unauthorized(
                "Admin session required".to_string(),
            ));
        }

        Ok(user)
    }

    /// Constant-time credential comparison.
    ///
    /// Both passwords are run through HMAC-SHA256 keyed with the session
    /// secret and the tags are compared with `verify_slice`.
    fn credentials_match(&self, email: &str, password: &str) -> bool {
        let Some(expected) = self.password_tag(self.config.admin_password.as_bytes()) else {
            return false;
        };

        let password_ok = HmacSha256::new_from_slice(self.config.session_secret.as_bytes())
            .map(|mut mac| {
                mac.update(password.as_bytes());
                mac.verify_slice(&expected).is_ok()
            })
            .unwrap_or(false);

        password_ok && email.trim().eq_ignore_ascii_case(&self.config.admin_email)
    }

    fn password_tag(&self, password: &[u8]) -> Option<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(self.config.session_secret.as_bytes()).ok()?;
        mac.update(password);
        Some(mac.finalize().into_bytes().to_vec())
    }
}
