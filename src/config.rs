use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub vision_api_key: String,
    pub vision_endpoint: String,
    pub off_base_url: String,
    /// Optional secondary lookup webhook tried when the primary database
    /// misses a barcode.
    pub fallback_lookup_url: Option<String>,
    /// Uniform timeout for all outbound calls, in seconds.
    pub http_timeout_secs: u64,
    pub history_limit: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "nutritruth".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "nutritruth-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 7),
        };
        Ok(Self {
            database_url,
            jwt,
            vision_api_key: std::env::var("GOOGLE_VISION_API_KEY").unwrap_or_default(),
            vision_endpoint: std::env::var("VISION_ENDPOINT")
                .unwrap_or_else(|_| "https://vision.googleapis.com/v1/images:annotate".into()),
            off_base_url: std::env::var("OFF_BASE_URL")
                .unwrap_or_else(|_| "https://world.openfoodfacts.org/api/v0".into()),
            fallback_lookup_url: std::env::var("FALLBACK_LOOKUP_URL").ok(),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(30),
            history_limit: std::env::var("HISTORY_LIMIT")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(20),
        })
    }
}
