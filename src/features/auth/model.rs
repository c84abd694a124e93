use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::ROLE_ADMIN;

/// Admin identity attached to a request by the session middleware
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Login email, used as the session subject
    pub sub: String,
    pub name: String,
    pub role: String,
}

impl AuthenticatedUser {
    /// Check if user may manage portal content
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub name: String,
    pub role: String,
    pub iss: String,
    pub iat: u64,
    pub exp: u64,
}

impl From<SessionClaims> for AuthenticatedUser {
    fn from(claims: SessionClaims) -> Self {
        Self {
            sub: claims.sub,
            name: claims.name,
            role: claims.role,
        }
    }
}
