//! kenshin-convert
//!
//! 健診システムのエクスポート（タブ区切り）を読み、会社別に提出先フォーマットの
//! データファイルと名簿を出力する。変換の中核は kenshin-common にある。

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod logging;
pub mod reader;
