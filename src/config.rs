use confique::Config as _;
use std::{path::PathBuf, sync::OnceLock, time::Duration};

#[derive(confique::Config)]
pub struct Config {
    /// How long a shown suggestion stays eligible for acceptance matching.
    #[config(env = "QSENSE_MATCH_WINDOW_MS", default = 1000)]
    pub match_window_ms: u64,
    /// Directory used by `FileStore` for per-connection usage records.
    #[config(env = "QSENSE_USAGE_DIR", default = ".qsense/usage")]
    pub usage_dir: PathBuf,
    #[config(env = "QSENSE_METADATA_TTL_SECS", default = 300)]
    pub metadata_ttl_secs: u64,
    #[config(env = "QSENSE_METADATA_CAPACITY", default = 64)]
    pub metadata_capacity: u64,
}

impl Config {
    pub fn match_window(&self) -> Duration {
        Duration::from_millis(self.match_window_ms)
    }

    pub fn metadata_ttl(&self) -> Duration {
        Duration::from_secs(self.metadata_ttl_secs)
    }
}

pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        Config::builder()
            .env()
            .file("qsense.toml")
            .load()
            .expect("Failed to load one or more value configuration from the current environment")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_loaded() {
        let config = Config::builder()
            .load()
            .expect("defaults should satisfy every field");
        assert_eq!(config.match_window(), Duration::from_millis(1000));
        assert_eq!(config.usage_dir, PathBuf::from(".qsense/usage"));
        assert_eq!(config.metadata_ttl(), Duration::from_secs(300));
        assert_eq!(config.metadata_capacity, 64);
    }
}
