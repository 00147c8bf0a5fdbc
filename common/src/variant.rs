//! 提出先フォーマット（バリアント）定義
//!
//! 提出先ごとに列数・日付書式・尿定性テーブル・既往歴の区切り・
//! 対象コース条件・件数の数え方が異なる。差異はすべてここに集約し、
//! 列定義（[`crate::catalogue`]）とマッパーはこの値を参照するだけにする。

use crate::code_table::{CodeTable, URINE_EXTENDED, URINE_SATURATED};
use crate::compose::DateStyle;
use crate::source::SourceRecord;

/// 対象コース（定期・雇入時・役員・特定業務従事者・海外派遣者）
pub const COURSE_ALLOW_LIST: &[(&str, &str)] = &[
    ("101", "定期健康診断"),
    ("102", "雇入時健康診断"),
    ("103", "役員健診"),
    ("104", "特定業務従事者健診"),
    ("105", "海外派遣者健診"),
];

/// 名簿のテンプレート行を示す会社コード欄の値
pub const TEMPLATE_COMPANY_TOKEN: &str = "会社コード";

/// バリアントの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    /// 健保提出用（CSV）
    Kenpo,
    /// 産業医提出用
    Sangyoui,
    /// 人事提出用
    Jinji,
    /// 組合提出用
    Kumiai,
}

impl VariantKind {
    pub const ALL: [VariantKind; 4] = [
        VariantKind::Kenpo,
        VariantKind::Sangyoui,
        VariantKind::Jinji,
        VariantKind::Kumiai,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            VariantKind::Kenpo => "kenpo",
            VariantKind::Sangyoui => "sangyoui",
            VariantKind::Jinji => "jinji",
            VariantKind::Kumiai => "kumiai",
        }
    }
}

impl std::fmt::Display for VariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for VariantKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kenpo" | "健保" => Ok(VariantKind::Kenpo),
            "sangyoui" | "産業医" => Ok(VariantKind::Sangyoui),
            "jinji" | "人事" => Ok(VariantKind::Jinji),
            "kumiai" | "組合" => Ok(VariantKind::Kumiai),
            _ => Err(format!(
                "Unknown format: {}. Use kenpo, sangyoui, jinji, or kumiai",
                s
            )),
        }
    }
}

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// 区切りテキスト（Shift_JIS, CRLF）
    Csv,
    /// スプレッドシート
    Xlsx,
}

impl SinkKind {
    pub fn extension(&self) -> &'static str {
        match self {
            SinkKind::Csv => "csv",
            SinkKind::Xlsx => "xlsx",
        }
    }
}

/// 出力対象の条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// 会社が一致すれば全件
    All,
    /// コースコードが [`COURSE_ALLOW_LIST`] に含まれるもの
    CourseAllowList,
}

impl Eligibility {
    pub fn accepts(&self, record: &SourceRecord) -> bool {
        match self {
            Eligibility::All => true,
            Eligibility::CourseAllowList => {
                let course = record.course_code();
                COURSE_ALLOW_LIST.iter().any(|(code, _)| *code == course)
            }
        }
    }
}

/// 会社別件数の数え方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountScope {
    /// 出力条件を満たすものだけ数える
    Eligible,
    /// 会社一致をすべて数える（出力条件は出力時のみ適用）
    ///
    /// 件数と出力行数が食い違うことがある。既存の提出物と揃えるため維持している。
    AllMatches,
}

/// 提出先フォーマット
#[derive(Debug, Clone)]
pub struct FormatVariant {
    pub kind: VariantKind,
    /// 表示名（出力ファイル名にも使う）
    pub label: &'static str,
    /// 出力列数
    pub width: usize,
    pub sink: SinkKind,
    pub date_style: DateStyle,
    pub urine_table: &'static CodeTable,
    /// 既往歴の区切り
    pub history_separator: &'static str,
    pub eligibility: Eligibility,
    pub count_scope: CountScope,
    /// 名簿にテンプレート行を含める
    pub roster_template_passthrough: bool,
}

impl FormatVariant {
    pub fn get(kind: VariantKind) -> Self {
        match kind {
            VariantKind::Kenpo => Self {
                kind,
                label: "健保提出用",
                width: 213,
                sink: SinkKind::Csv,
                date_style: DateStyle::Compact,
                urine_table: &URINE_SATURATED,
                history_separator: "／",
                eligibility: Eligibility::All,
                count_scope: CountScope::Eligible,
                roster_template_passthrough: false,
            },
            VariantKind::Sangyoui => Self {
                kind,
                label: "産業医提出用",
                width: 221,
                sink: SinkKind::Xlsx,
                date_style: DateStyle::Slashed,
                urine_table: &URINE_EXTENDED,
                history_separator: " ",
                eligibility: Eligibility::CourseAllowList,
                count_scope: CountScope::AllMatches,
                roster_template_passthrough: false,
            },
            VariantKind::Jinji => Self {
                kind,
                label: "人事提出用",
                width: 222,
                sink: SinkKind::Xlsx,
                date_style: DateStyle::Slashed,
                urine_table: &URINE_EXTENDED,
                history_separator: " ",
                eligibility: Eligibility::CourseAllowList,
                count_scope: CountScope::AllMatches,
                roster_template_passthrough: true,
            },
            VariantKind::Kumiai => Self {
                kind,
                label: "組合提出用",
                width: 222,
                sink: SinkKind::Xlsx,
                date_style: DateStyle::Compact,
                urine_table: &URINE_SATURATED,
                history_separator: "／",
                eligibility: Eligibility::CourseAllowList,
                count_scope: CountScope::Eligible,
                roster_template_passthrough: false,
            },
        }
    }

    /// 件数集計でこのレコードを数えるか
    pub fn counts(&self, record: &SourceRecord) -> bool {
        match self.count_scope {
            CountScope::AllMatches => true,
            CountScope::Eligible => self.eligibility.accepts(record),
        }
    }

    /// 件数と出力行数が食い違いうるか
    pub fn count_may_exceed_rows(&self) -> bool {
        self.count_scope == CountScope::AllMatches && self.eligibility != Eligibility::All
    }
}
