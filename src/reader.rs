//! 入力ファイル（健診システムのタブ区切りエクスポート）の読み込み
//!
//! 文字コードを変換してからタブ区切りとして読む。1行目は見出しとして読み飛ばし、
//! 内容は検証しない。引用符は特別扱いせず値の一部として扱う。

use crate::error::{KenshinError, Result};
use encoding_rs::Encoding;
use kenshin_common::SourceRecord;
use std::path::Path;

/// バイト列を文字列に変換する
///
/// 変換できない文字は置換文字になる。処理は続行し、ログに記録する。
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(encoding = actual.name(), "文字コード変換で置換文字が発生しました");
    }
    text.into_owned()
}

/// タブ区切りテキストをレコードに分解する（見出し行を除く）
pub fn parse_records(text: &str) -> Result<Vec<SourceRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let row = result.map_err(|e| KenshinError::InputParse(format!("{}行目: {}", index + 2, e)))?;
        records.push(row.iter().collect::<SourceRecord>());
    }

    Ok(records)
}

/// 入力ファイルを読み込む
pub fn read_source(path: &Path, encoding: &'static Encoding) -> Result<Vec<SourceRecord>> {
    if !path.exists() {
        return Err(KenshinError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let text = decode(&bytes, encoding);
    let records = parse_records(&text)?;

    if records.is_empty() {
        tracing::warn!(path = %path.display(), "入力ファイルにデータ行がありません");
    }

    tracing::info!(path = %path.display(), records = records.len(), "入力ファイル読み込み");
    Ok(records)
}
