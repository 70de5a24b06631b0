use crate::error::{ExplorerError, Result};
use art_explorer_common::mock::MOCK_SEARCH_LATENCY_MS;
use art_explorer_common::{LatencyModel, OverlapPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 類似度サービスURLの環境変数
pub const SERVICE_URL_ENV: &str = "ART_EXPLORER_SERVICE_URL";

/// サービスが受け付けるtop_kの範囲
pub const TOP_K_RANGE: std::ops::RangeInclusive<usize> = 1..=10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub service_url: String,
    pub top_k: usize,
    /// 模擬データ使用時の待ち時間
    pub latency_ms: u64,
    pub timeout_seconds: u64,
    pub overlap_policy: OverlapPolicy,
    /// falseなら常に模擬データ
    pub use_service: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:8000".into(),
            top_k: 5,
            latency_ms: MOCK_SEARCH_LATENCY_MS,
            timeout_seconds: 30,
            overlap_policy: OverlapPolicy::Supersede,
            use_service: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ExplorerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("art-explorer").join("config.json"))
    }

    /// サービスURL（環境変数を優先、末尾の/は除く）
    pub fn service_url(&self) -> String {
        let url = std::env::var(SERVICE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.service_url.clone());
        url.trim().trim_end_matches('/').to_string()
    }

    pub fn set_service_url(&mut self, url: String) -> Result<()> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ExplorerError::Config(format!(
                "URLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.service_url = url.to_string();
        Ok(())
    }

    pub fn set_top_k(&mut self, top_k: usize) -> Result<()> {
        if !TOP_K_RANGE.contains(&top_k) {
            return Err(ExplorerError::Config(format!(
                "top_kは{}〜{}で指定してください: {}",
                TOP_K_RANGE.start(),
                TOP_K_RANGE.end(),
                top_k
            )));
        }
        self.top_k = top_k;
        Ok(())
    }

    pub fn latency(&self) -> LatencyModel {
        LatencyModel::from_millis(self.latency_ms)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_seconds.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service_url, "http://localhost:8000");
        assert_eq!(config.top_k, 5);
        assert_eq!(config.latency(), LatencyModel::Fixed { millis: 800 });
        assert_eq!(config.overlap_policy, OverlapPolicy::Supersede);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().expect("一時ディレクトリ作成失敗");
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.set_top_k(8).unwrap();
        config.latency_ms = 0;
        config.overlap_policy = OverlapPolicy::Reject;
        config.save_to(&path).expect("保存失敗");

        let loaded = Config::load_from(&path).expect("読み込み失敗");
        assert_eq!(loaded, config);
        assert!(loaded.latency().is_none());
    }

    #[test]
    fn test_load_missing_returns_default() {
        let dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"top_k": 3, "overlap_policy": "reject"}"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.top_k, 3);
        assert_eq!(loaded.overlap_policy, OverlapPolicy::Reject);
        assert_eq!(loaded.service_url, "http://localhost:8000");
    }

    #[test]
    fn test_set_service_url_validation() {
        let mut config = Config::default();
        assert!(config.set_service_url("ftp://example.com".into()).is_err());
        config.set_service_url("https://search.example.com/".into()).unwrap();
        assert_eq!(config.service_url, "https://search.example.com/");
    }

    #[test]
    fn test_set_top_k_range() {
        let mut config = Config::default();
        assert!(config.set_top_k(0).is_err());
        assert!(config.set_top_k(11).is_err());
        assert!(config.set_top_k(10).is_ok());
    }
}
