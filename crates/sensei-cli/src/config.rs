//! 設定ファイルとコマンドライン引数の統合

use std::path::Path;

use anyhow::{Context, Result};
use sensei_core::EngineConfig;

/// エンジン設定に関するコマンドライン引数
#[derive(clap::Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// エンジン設定ファイル（TOML）
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,

    /// 探索スレッド数
    #[arg(long)]
    pub threads: Option<usize>,

    /// 置換表サイズ（MB）
    #[arg(long = "hash-mb")]
    pub hash_mb: Option<usize>,
}

/// TOML ファイルから設定を読む
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config file {}", path.display()))
}

impl EngineArgs {
    /// 設定ファイル（なければ既定値）にコマンドライン引数を上書きする
    pub fn resolve(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => EngineConfig::default(),
        };
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(hash_mb) = self.hash_mb {
            config.hash_mb = hash_mb;
        }
        log::debug!("engine config: {config:?}");
        Ok(config.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_toml_with_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "threads = 3\nhash_mb = 8\n\n[eval]\ncorner_weight = 90").unwrap();
        let args = EngineArgs {
            config: Some(file.path().to_path_buf()),
            threads: Some(2),
            hash_mb: None,
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.threads, 2);
        assert_eq!(config.hash_mb, 8);
        assert_eq!(config.eval.corner_weight, 90);
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "unknown_key = 1").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid config file"));
    }

    #[test]
    fn test_defaults_without_file() {
        let config = EngineArgs::default().resolve().unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
