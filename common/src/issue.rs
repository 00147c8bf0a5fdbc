//! データ品質の指摘
//!
//! 1レコード・1項目の問題を表す。処理は止めず、ログに記録して続行する。

use crate::source::PersonRef;

/// 指摘の種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// 必須項目が空欄
    Missing { item: &'static str },
    /// コード表にない値
    Unrecognized { item: &'static str, value: String },
    /// 日付の形式不正
    MalformedDate { item: &'static str, value: String, reason: String },
    /// 数値であるべき項目が数値でない
    NonNumeric { item: &'static str, value: String },
    /// 文字数上限のため一部を省略
    Truncated { item: &'static str },
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::Missing { item } => write!(f, "{}なし", item),
            IssueKind::Unrecognized { item, value } => write!(f, "{}コード変換エラー({})", item, value),
            IssueKind::MalformedDate { item, value, reason } => {
                write!(f, "{}エラー({}: {})", item, value, reason)
            }
            IssueKind::NonNumeric { item, value } => write!(f, "{}数値エラー({})", item, value),
            IssueKind::Truncated { item } => write!(f, "{}を文字数上限で省略", item),
        }
    }
}

/// 受診者単位の指摘
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub name: String,
    pub insurer_number: String,
    pub kind: IssueKind,
}

impl Issue {
    pub fn new(person: PersonRef<'_>, kind: IssueKind) -> Self {
        Self {
            name: person.name.to_string(),
            insurer_number: person.insurer_number.to_string(),
            kind,
        }
    }

    /// ログに出力する
    pub fn log(&self) {
        tracing::warn!(
            name = %self.name,
            insurer = %self.insurer_number,
            "{}:{},{}",
            self.kind,
            self.name,
            self.insurer_number
        );
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{},{}", self.kind, self.name, self.insurer_number)
    }
}
