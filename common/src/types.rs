//! 変換で共有される型
//!
//! - Company: 会社コードと表示名
//! - Facility: 健診機関の固定値（出力に定数として書き込む）
//! - TargetRecord: 出力1行分（列IDをキーに保持し、出力時に位置へ並べる）

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 会社（事業所）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub code: String,
    pub name: String,
}

impl Company {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// 組み込みの会社一覧
pub const BUILTIN_COMPANIES: &[(&str, &str)] = &[
    ("2000100100000001", "株式会社みなと精機"),
    ("2000100100000002", "みなと精機健康保険組合"),
    ("2000100200000001", "株式会社さくら物流"),
    ("2000100300000001", "東都システム開発株式会社"),
    ("2000100400000001", "株式会社青葉フーズ"),
];

pub fn builtin_companies() -> Vec<Company> {
    BUILTIN_COMPANIES
        .iter()
        .map(|(code, name)| Company::new(*code, *name))
        .collect()
}

/// 健診機関の固定値
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Facility {
    /// 健診機関番号
    pub number: String,
    /// 健診機関名称
    pub name: String,
    pub zip_code: String,
    pub address: String,
    pub phone: String,
    /// 健診実施医師名
    pub physician: String,
}

impl Default for Facility {
    fn default() -> Self {
        Self {
            number: "1310000000".into(),
            name: "医療法人社団　健診会　中央健診クリニック".into(),
            zip_code: "100-0005".into(),
            address: "東京都千代田区丸の内１－１－１".into(),
            phone: "03-0000-0000".into(),
            physician: "健診　一郎".into(),
        }
    }
}

/// 出力1行分
///
/// 値は列IDで保持する。列位置への並べ替えは [`crate::catalogue::Catalogue::to_row`] が行う。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetRecord {
    values: HashMap<&'static str, String>,
}

impl TargetRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: &'static str, value: impl Into<String>) {
        self.values.insert(id, value.into());
    }

    /// 未設定の列は空文字
    pub fn get(&self, id: &str) -> &str {
        self.values.get(id).map(|s| s.as_str()).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
