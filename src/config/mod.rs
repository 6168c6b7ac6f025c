const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MONGODB_URI: &str = "mongodb://127.0.0.1:27017";
const DEFAULT_DB_NAME: &str = "todo";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:4200";

/// Runtime configuration for the task API, resolved from CLI flags and
/// environment variables in `main.rs`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port the HTTP server listens on.
    pub port: u16,
    /// MongoDB connection string.
    pub mongodb_uri: String,
    /// Database holding the `tasks` collection.
    pub db_name: String,
    /// Single origin allowed by CORS.
    pub allowed_origin: String,
}

impl AppConfig {
    pub fn new(
        port: Option<u16>,
        mongodb_uri: Option<String>,
        db_name: Option<String>,
        allowed_origin: Option<String>,
    ) -> Self {
        Self {
            port: port.unwrap_or(DEFAULT_PORT),
            mongodb_uri: mongodb_uri.unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string()),
            db_name: db_name.unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
            allowed_origin: allowed_origin.unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(None, None, None, None)
    }
}
