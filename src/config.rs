use crate::error::{KenshinError, Result};
use encoding_rs::Encoding;
use kenshin_common::{builtin_companies, Company, Facility};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// 既定のログファイル
pub const DEFAULT_LOG_FILE: &str = "log.txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 健診機関の固定値
    pub facility: Facility,
    /// 会社一覧（未指定なら組み込みの一覧）
    pub companies: Option<Vec<Company>>,
    /// 入力ファイルの文字コード（WHATWGラベル）
    pub input_encoding: String,
    /// 出力先フォルダ（未指定ならカレント）
    pub output_dir: Option<PathBuf>,
    pub log_file: PathBuf,
    /// 名簿にテンプレート行を含める（対応する提出先のみ有効）
    pub roster_template_passthrough: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    /// 既定の場所から読み込む（ファイルがなければ既定値）
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::read(&config_path)
        } else {
            Ok(Self::default_config())
        }
    }

    /// 指定パスから読み込む
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(KenshinError::FileNotFound(path.display().to_string()));
        }
        Self::read(path)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
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
            .ok_or_else(|| KenshinError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("kenshin-convert").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            facility: Facility::default(),
            companies: None,
            input_encoding: "shift_jis".into(),
            output_dir: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            roster_template_passthrough: true,
        }
    }

    fn validate(&self) -> Result<()> {
        self.encoding()?;

        if let Some(companies) = &self.companies {
            let mut seen = HashSet::new();
            for company in companies {
                if company.code.trim().is_empty() {
                    return Err(KenshinError::Config(format!(
                        "会社コードが空です: {}",
                        company.name
                    )));
                }
                if !seen.insert(company.code.as_str()) {
                    return Err(KenshinError::Config(format!(
                        "会社コードが重複しています: {}",
                        company.code
                    )));
                }
            }
        }

        Ok(())
    }

    /// 有効な会社一覧
    pub fn companies(&self) -> Vec<Company> {
        self.companies.clone().unwrap_or_else(builtin_companies)
    }

    /// 入力ファイルの文字コード
    pub fn encoding(&self) -> Result<&'static Encoding> {
        Encoding::for_label(self.input_encoding.trim().as_bytes())
            .ok_or_else(|| KenshinError::UnsupportedEncoding(self.input_encoding.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.encoding().unwrap(), encoding_rs::SHIFT_JIS);
        assert_eq!(config.log_file, PathBuf::from("log.txt"));
        assert!(config.roster_template_passthrough);
        assert_eq!(config.companies(), builtin_companies());
    }

    #[test]
    fn test_load_partial_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "facility": {"name": "テスト健診センター"},
                "companies": [{"code": "1", "name": "テスト商事"}],
                "input_encoding": "utf-8"
            }"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.facility.name, "テスト健診センター");
        assert_eq!(config.companies(), vec![Company::new("1", "テスト商事")]);
        assert_eq!(config.encoding().unwrap(), encoding_rs::UTF_8);
        assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load_from(Path::new("/nonexistent/config.json"));
        assert!(matches!(result, Err(KenshinError::FileNotFound(_))));
    }

    #[test]
    fn test_unknown_encoding_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, r#"{"input_encoding": "ebcdic-jp"}"#).unwrap();
        let result = Config::load_from(&path);
        assert!(matches!(result, Err(KenshinError::UnsupportedEncoding(_))));
    }

    #[test]
    fn test_duplicate_company_codes_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"companies": [{"code": "1", "name": "A"}, {"code": "1", "name": "B"}]}"#,
        )
        .unwrap();
        let result = Config::load_from(&path);
        assert!(matches!(result, Err(KenshinError::Config(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.json");
        let mut config = Config::default();
        config.roster_template_passthrough = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.roster_template_passthrough);
        assert_eq!(loaded.facility, Facility::default());
    }
}
