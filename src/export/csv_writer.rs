//! CSV出力（Shift_JIS, CRLF）

use super::TableWriter;
use crate::error::{KenshinError, Result};
use std::path::Path;

pub struct CsvWriter;

/// 行をCSVテキストにする
pub fn to_csv_text(rows: &[Vec<String>]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .flexible(true)
        .from_writer(Vec::new());

    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| KenshinError::CsvWrite(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| KenshinError::CsvWrite(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| KenshinError::CsvWrite(e.to_string()))
}

/// Shift_JISに変換する（表せない文字は数値文字参照になる）
pub fn encode_shift_jis(text: &str, path: &Path) -> Vec<u8> {
    let (bytes, _, had_errors) = encoding_rs::SHIFT_JIS.encode(text);
    if had_errors {
        tracing::warn!(path = %path.display(), "Shift_JISで表せない文字を置換しました");
    }
    bytes.into_owned()
}

impl TableWriter for CsvWriter {
    fn write_table(
        &self,
        path: &Path,
        _sheet_name: &str,
        rows: &[Vec<String>],
        _header_rows: usize,
    ) -> Result<()> {
        let text = to_csv_text(rows)?;
        std::fs::write(path, encode_shift_jis(&text, path))?;
        Ok(())
    }
}
