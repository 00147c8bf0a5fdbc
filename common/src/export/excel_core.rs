//! Excel生成（共通ライブラリ）
//!
//! 行データをそのまま1シートに書き出す。すべて文字列セルとして書き込み、
//! コード値の先頭ゼロ（"01" など）を保持する。

use crate::error::{Error, Result};
use rust_xlsxwriter::*;

/// 見出し行の書式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// 見出しなし
    None,
    /// 先頭n行を見出しとして太字にし、スクロール時に固定する
    Rows(u32),
}

fn excel_err(context: &str, e: XlsxError) -> Error {
    Error::Excel(format!("{}: {}", context, e))
}

/// 行データからExcelをバッファに生成
pub fn generate_table_buffer(
    sheet_name: &str,
    rows: &[Vec<String>],
    header: HeaderStyle,
) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));
    let text_format = Format::new().set_num_format("@");

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| excel_err("シート名設定エラー", e))?;

    let header_rows = match header {
        HeaderStyle::None => 0,
        HeaderStyle::Rows(n) => n,
    };

    for (r, row) in rows.iter().enumerate() {
        let r = u32::try_from(r).map_err(|_| Error::Excel("行数が上限を超えています".into()))?;
        let format = if r < header_rows { &header_format } else { &text_format };
        for (c, value) in row.iter().enumerate() {
            let c = u16::try_from(c).map_err(|_| Error::Excel("列数が上限を超えています".into()))?;
            worksheet
                .write_string_with_format(r, c, value, format)
                .map_err(|e| excel_err("セル書き込みエラー", e))?;
        }
    }

    if header_rows > 0 {
        worksheet
            .set_freeze_panes(header_rows, 0)
            .map_err(|e| excel_err("ウィンドウ枠固定エラー", e))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| excel_err("Excel保存エラー", e))
}
