use anyhow::{ensure, Context, Result};

const DEFAULT_MAX_REQUEST_BYTES: usize = 2 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Body size limit for the prompt endpoints. Raw record payloads can be large.
    pub max_request_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_request_bytes: match std::env::var("MAX_REQUEST_BYTES") {
                Ok(raw) => parse_body_limit(&raw)?,
                Err(_) => DEFAULT_MAX_REQUEST_BYTES,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
        }
    }
}

fn parse_body_limit(raw: &str) -> Result<usize> {
    let limit = raw
        .trim()
        .parse::<usize>()
        .context("MAX_REQUEST_BYTES must be a positive integer")?;
    ensure!(limit > 0, "MAX_REQUEST_BYTES must be a positive integer, got 0");
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_limit_accepts_positive() {
        assert_eq!(parse_body_limit("1024").unwrap(), 1024);
    }

    #[test]
    fn test_body_limit_rejects_zero() {
        let err = parse_body_limit("0").unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_body_limit_rejects_garbage() {
        assert!(parse_body_limit("two megabytes").is_err());
        assert!(parse_body_limit("-5").is_err());
    }
}
