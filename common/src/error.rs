//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// レコード単位のデータ品質問題は [`crate::issue::Issue`] で扱い、
/// ここには実行全体を止める失敗だけを置く。
#[derive(Error, Debug)]
pub enum Error {
    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Excel error: {0}")]
    Excel(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
