//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを作り、ファイルに保存する

use super::TableWriter;
use crate::error::{KenshinError, Result};
use kenshin_common::export::excel_core::{generate_table_buffer, HeaderStyle};
use std::path::Path;

pub struct ExcelWriter;

impl TableWriter for ExcelWriter {
    fn write_table(
        &self,
        path: &Path,
        sheet_name: &str,
        rows: &[Vec<String>],
        header_rows: usize,
    ) -> Result<()> {
        let header = match header_rows {
            0 => HeaderStyle::None,
            n => HeaderStyle::Rows(
                u32::try_from(n).map_err(|e| KenshinError::ExcelGeneration(e.to_string()))?,
            ),
        };
        let buffer = generate_table_buffer(sheet_name, rows, header)
            .map_err(|e| KenshinError::ExcelGeneration(e.to_string()))?;
        std::fs::write(path, buffer)?;
        Ok(())
    }
}
