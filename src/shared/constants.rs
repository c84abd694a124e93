/// Language recorded for a village when the payload names none
pub const DEFAULT_LANGUAGE: &str = "Español";

/// Maximum accepted upload size in bytes (10MB)
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - can create, edit and delete portal content
pub const ROLE_ADMIN: &str = "ADMIN";
