//! Kenshin Common Library
//!
//! 健診データ変換の中核（コード表・項目合成・列定義・マッパー・会社別振り分け）

pub mod catalogue;
pub mod code_table;
pub mod compose;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod issue;
pub mod mapper;
pub mod roster;
pub mod source;
pub mod types;
pub mod variant;

#[cfg(test)]
pub(crate) mod fixture;

pub use catalogue::{Catalogue, Column, Rule};
pub use code_table::{CodeTable, Recoded, SENTINEL};
pub use dispatch::{Batch, CompanyCount, Dispatcher};
pub use error::{Error, Result};
pub use issue::{Issue, IssueKind};
pub use mapper::{map_record, MapContext, Mapped};
pub use source::SourceRecord;
pub use types::{builtin_companies, Company, Facility, TargetRecord};
pub use variant::{FormatVariant, SinkKind, VariantKind};
