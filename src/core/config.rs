use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub swagger: SwaggerConfig,
    pub catalog: CatalogConfig,
    /// Upload backend settings. Missing credentials are kept as the error
    /// message so uploads can fail fast without stopping the rest of the API.
    pub storage: Result<StorageConfig, String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Admin session settings
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub admin_email: String,
    pub admin_password: String,
    pub admin_name: String,
    pub session_secret: String,
    pub session_issuer: String,
    pub session_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Sources for the read-only tour and event catalogs.
/// `None` selects the dataset bundled with the binary.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub tours_path: Option<PathBuf>,
    pub events_path: Option<PathBuf>,
}

/// S3-compatible upload backend configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// S3 API endpoint URL
    pub endpoint: String,
    /// Base URL used when building public object URLs (defaults to endpoint)
    pub public_endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub region: String,
    /// Key prefix for every uploaded object
    pub prefix: String,
    /// Total bytes the prefix may hold; `None` disables the quota check
    pub quota_bytes: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            catalog: CatalogConfig::from_env(),
            storage: StorageConfig::from_env(),
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl AuthConfig {
    const DEFAULT_SESSION_TTL_SECS: u64 = 8 * 3600; // one working day
    const MIN_SECRET_LEN: usize = 32;

    pub fn from_env() -> Result<Self, String> {
        let admin_email = env::var("ADMIN_EMAIL")
            .map_err(|_| "ADMIN_EMAIL environment variable is required".to_string())?;

        let admin_password = env::var("ADMIN_PASSWORD")
            .map_err(|_| "ADMIN_PASSWORD environment variable is required".to_string())?;

        let admin_name = env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string());

        let session_secret = env::var("SESSION_SECRET")
            .map_err(|_| "SESSION_SECRET environment variable is required".to_string())?;
        if session_secret.len() < Self::MIN_SECRET_LEN {
            return Err(format!(
                "SESSION_SECRET must be at least {} bytes long",
                Self::MIN_SECRET_LEN
            ));
        }

        let session_issuer =
            env::var("SESSION_ISSUER").unwrap_or_else(|_| "antigua-turismo".to_string());

        let session_ttl_secs = env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_SESSION_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SESSION_TTL_SECS must be a valid number".to_string())?;

        Ok(Self {
            admin_email,
            admin_password,
            admin_name,
            session_secret,
            session_issuer,
            session_ttl: Duration::from_secs(session_ttl_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title =
            env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Antigua Turismo API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION").unwrap_or_else(|_| {
            "Villages, tours and events of La Antigua Guatemala".to_string()
        });

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self {
            tours_path: env::var("TOURS_DATA_PATH")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            events_path: env::var("EVENTS_DATA_PATH")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so the required-key checks can be
    /// exercised without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| format!("{} environment variable not configured", key))
        };

        let endpoint = required("UPLOAD_ENDPOINT")?;
        let access_key = required("UPLOAD_ACCESS_KEY")?;
        let secret_key = required("UPLOAD_SECRET_KEY")?;

        let public_endpoint = lookup("UPLOAD_PUBLIC_ENDPOINT")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| endpoint.clone());
        let bucket = lookup("UPLOAD_BUCKET").unwrap_or_else(|| "antigua-media".to_string());
        let region = lookup("UPLOAD_REGION").unwrap_or_else(|| "us-east-1".to_string());
        let prefix = lookup("UPLOAD_PREFIX").unwrap_or_else(|| "media".to_string());

        let quota_bytes = match lookup("UPLOAD_QUOTA_BYTES").filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                raw.parse::<u64>()
                    .map_err(|_| "UPLOAD_QUOTA_BYTES must be a valid number".to_string())?,
            ),
            None => None,
        };

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            public_endpoint: public_endpoint.trim_end_matches('/').to_string(),
            access_key,
            secret_key,
            bucket,
            region,
            prefix: prefix.trim_matches('/').to_string(),
            quota_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_storage_config_requires_secret_key() {
        let err = StorageConfig::from_lookup(lookup_from(&[
            ("UPLOAD_ENDPOINT", "http://localhost:9000"),
            ("UPLOAD_ACCESS_KEY", "minio"),
        ]))
        .unwrap_err();
        assert_eq!(err, "UPLOAD_SECRET_KEY environment variable not configured");
    }

    #[test]
    fn test_storage_config_requires_endpoint() {
        let err = StorageConfig::from_lookup(lookup_from(&[
            ("UPLOAD_ACCESS_KEY", "minio"),
            ("UPLOAD_SECRET_KEY", "secret"),
        ]))
        .unwrap_err();
        assert_eq!(err, "UPLOAD_ENDPOINT environment variable not configured");
    }

    #[test]
    fn test_storage_config_defaults() {
        let config = StorageConfig::from_lookup(lookup_from(&[
            ("UPLOAD_ENDPOINT", "http://localhost:9000/"),
            ("UPLOAD_ACCESS_KEY", "minio"),
            ("UPLOAD_SECRET_KEY", "secret"),
            ("UPLOAD_QUOTA_BYTES", "1048576"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint, "http://localhost:9000");
        assert_eq!(config.public_endpoint, "http://localhost:9000");
        assert_eq!(config.bucket, "antigua-media");
        assert_eq!(config.prefix, "media");
        assert_eq!(config.quota_bytes, Some(1_048_576));
    }

    #[test]
    fn test_storage_config_rejects_bad_quota() {
        let err = StorageConfig::from_lookup(lookup_from(&[
            ("UPLOAD_ENDPOINT", "http://localhost:9000"),
            ("UPLOAD_ACCESS_KEY", "minio"),
            ("UPLOAD_SECRET_KEY", "secret"),
            ("UPLOAD_QUOTA_BYTES", "lots"),
        ]))
        .unwrap_err();
        assert!(err.contains("UPLOAD_QUOTA_BYTES"));
    }
}
