use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Confirmation body for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub deleted: bool,
}

/// A value outside a closed vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind} '{value}'. Allowed values: {allowed}")]
pub struct InvalidEnum {
    pub kind: &'static str,
    pub value: String,
    pub allowed: String,
}

/// Closed set of lowercase wire values, such as a category list
pub trait Vocabulary: Sized + Copy + 'static {
    /// Name used in error messages
    const KIND: &'static str;
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    /// Exact, case-sensitive match against the wire values
    fn parse_token(value: &str) -> Result<Self, InvalidEnum> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == value)
            .ok_or_else(|| InvalidEnum {
                kind: Self::KIND,
                value: value.to_string(),
                allowed: Self::ALL
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Parse an optional query or body value. Blank counts as absent.
    fn parse_optional(value: Option<&str>) -> Result<Option<Self>, InvalidEnum> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(Self::parse_token)
            .transpose()
    }
}

/// Split a free-text search term the way list endpoints expect it:
/// trimmed, lowercased, `None` when empty.
pub fn normalize_search(q: Option<&str>) -> Option<String> {
    q.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty())
}
