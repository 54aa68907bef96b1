use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub submissions_dir: PathBuf,
    pub static_dir: Option<PathBuf>,
    pub max_body_size: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("INTAKE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid INTAKE_HOST: {e}"))?;

        let port: u16 = env_or("INTAKE_PORT", "8000")
            .parse()
            .map_err(|e| format!("Invalid INTAKE_PORT: {e}"))?;

        let submissions_dir = PathBuf::from(env_or("INTAKE_SUBMISSIONS_DIR", "applications"));

        let static_dir = std::env::var("INTAKE_STATIC_DIR").ok().map(PathBuf::from);

        let max_body_size: usize = env_or("INTAKE_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid INTAKE_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("INTAKE_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            submissions_dir,
            static_dir,
            max_body_size,
            log_level,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
