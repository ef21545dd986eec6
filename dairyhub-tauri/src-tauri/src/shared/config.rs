use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    /// キー長と値長の合計に対する上限（バイト）。
    pub quota_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// オンライン復帰時に自動でキューをドレインするか
    pub auto_sync: bool,
    pub probe_enabled: bool,
    pub probe_address: String,
    pub probe_interval_secs: u64,
    pub probe_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            database: DatabaseConfig {
                url: format!("sqlite://{}/dairyhub.db?mode=rwc", data_dir.display()),
                max_connections: 5,
            },
            storage: StorageConfig {
                data_dir: data_dir.display().to_string(),
                quota_bytes: 5 * 1024 * 1024, // 5MB
            },
            sync: SyncConfig {
                auto_sync: true,
                probe_enabled: false,
                probe_address: "1.1.1.1:443".to_string(),
                probe_interval_secs: 30,
                probe_timeout_ms: 3_000,
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        // 既定値
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("DAIRYHUB_DATA_DIR") {
            let dir = v.trim().to_string();
            if !dir.is_empty() {
                cfg.database.url = format!("sqlite://{dir}/dairyhub.db?mode=rwc");
                cfg.storage.data_dir = dir;
            }
        }
        if let Ok(v) = std::env::var("DAIRYHUB_DATABASE_URL") {
            if !v.trim().is_empty() {
                cfg.database.url = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("DAIRYHUB_DB_MAX_CONNECTIONS") {
            if let Some(value) = parse_u32(&v) {
                cfg.database.max_connections = value;
            }
        }
        if let Ok(v) = std::env::var("DAIRYHUB_STORAGE_QUOTA_BYTES") {
            if let Some(value) = parse_u64(&v) {
                cfg.storage.quota_bytes = value;
            }
        }

        // 同期設定の環境変数反映
        if let Ok(v) = std::env::var("DAIRYHUB_AUTO_SYNC") {
            cfg.sync.auto_sync = parse_bool(&v, cfg.sync.auto_sync);
        }
        if let Ok(v) = std::env::var("DAIRYHUB_PROBE_ENABLED") {
            cfg.sync.probe_enabled = parse_bool(&v, cfg.sync.probe_enabled);
        }
        if let Ok(v) = std::env::var("DAIRYHUB_PROBE_ADDRESS") {
            if !v.trim().is_empty() {
                cfg.sync.probe_address = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("DAIRYHUB_PROBE_INTERVAL_SECS") {
            if let Some(value) = parse_u64(&v) {
                cfg.sync.probe_interval_secs = value;
            }
        }
        if let Ok(v) = std::env::var("DAIRYHUB_PROBE_TIMEOUT_MS") {
            if let Some(value) = parse_u64(&v) {
                cfg.sync.probe_timeout_ms = value;
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".to_string());
        }
        if self.storage.quota_bytes == 0 {
            return Err("Storage quota_bytes must be greater than 0".to_string());
        }
        if self.sync.probe_enabled {
            if self.sync.probe_interval_secs == 0 {
                return Err("Sync probe_interval_secs must be greater than 0".to_string());
            }
            if self.sync.probe_timeout_ms == 0 {
                return Err("Sync probe_timeout_ms must be greater than 0".to_string());
            }
            if self.sync.probe_address.trim().is_empty() {
                return Err("Sync probe_address is required when probing".to_string());
            }
        }
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("dairyhub"))
        .unwrap_or_else(|| PathBuf::from("./data"))
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.storage.quota_bytes, 5 * 1024 * 1024);
        assert!(cfg.database.url.starts_with("sqlite://"));
    }

    #[test]
    fn validate_rejects_zero_quota() {
        let mut cfg = AppConfig::default();
        cfg.storage.quota_bytes = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_checks_probe_settings_only_when_enabled() {
        let mut cfg = AppConfig::default();
        cfg.sync.probe_interval_secs = 0;
        assert!(cfg.validate().is_ok());

        cfg.sync.probe_enabled = true;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn parse_bool_falls_back_to_default() {
        assert!(parse_bool("YES", false));
        assert!(!parse_bool("off", true));
        assert!(parse_bool("maybe", true));
    }
}
