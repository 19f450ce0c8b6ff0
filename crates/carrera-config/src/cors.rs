use std::env;

const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Browser origins allowed to call the API with credentials.
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Reads the comma-separated `ALLOWED_ORIGINS` list.
    pub fn from_env() -> Self {
        let raw = env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGINS.to_string());
        Self::from_list(&raw)
    }

    pub fn from_list(raw: &str) -> Self {
        Self {
            allowed_origins: raw
                .split(',')
                .map(|origin| origin.trim().trim_end_matches('/').to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_origins() {
        let config = CorsConfig::from_list(DEFAULT_ORIGINS);
        assert_eq!(
            config.allowed_origins,
            ["http://localhost:3000", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_blank_entries_and_trailing_slashes() {
        let config = CorsConfig::from_list(" https://carrera.app/ ,, ");
        assert_eq!(config.allowed_origins, ["https://carrera.app"]);
    }
}
