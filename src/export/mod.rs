pub mod csv_writer;
pub mod excel;

use crate::error::{KenshinError, Result};
use chrono::NaiveDate;
use kenshin_common::{Batch, Catalogue, Company, FormatVariant, SinkKind};
use std::path::{Path, PathBuf};

/// 表形式の出力先
pub trait TableWriter {
    /// 先頭 `header_rows` 行を見出しとして書き出す
    fn write_table(
        &self,
        path: &Path,
        sheet_name: &str,
        rows: &[Vec<String>],
        header_rows: usize,
    ) -> Result<()>;
}

pub fn writer_for(sink: SinkKind) -> Box<dyn TableWriter> {
    match sink {
        SinkKind::Csv => Box::new(csv_writer::CsvWriter),
        SinkKind::Xlsx => Box::new(excel::ExcelWriter),
    }
}

/// 会社1社分の出力ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub data: PathBuf,
    pub roster: PathBuf,
}

/// ファイル名に使えない文字を置き換える
fn sanitize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// `{出力先}/{実行日}/{会社名}_{提出先}.{拡張子}` と名簿のパス
pub fn output_paths(
    output_dir: &Path,
    run_date: NaiveDate,
    company: &Company,
    variant: &FormatVariant,
) -> OutputPaths {
    let dir = output_dir.join(run_date.format("%Y%m%d").to_string());
    let stem = format!("{}_{}", sanitize(&company.name), variant.label);
    let ext = variant.sink.extension();
    OutputPaths {
        data: dir.join(format!("{}.{}", stem, ext)),
        roster: dir.join(format!("{}_名簿.{}", stem, ext)),
    }
}

/// 会社1社分のデータファイルと名簿を書き出す
pub fn write_batch(
    batch: &Batch,
    catalogue: &Catalogue,
    output_dir: &Path,
    run_date: NaiveDate,
) -> Result<OutputPaths> {
    let variant = &catalogue.variant;
    let paths = output_paths(output_dir, run_date, &batch.company, variant);

    if let Some(dir) = paths.data.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| KenshinError::OutputDir(format!("{}: {}", dir.display(), e)))?;
    }

    let header = catalogue.header_rows();
    let header_rows = header.len();
    let mut rows = header;
    rows.extend(batch.rows.iter().cloned());

    let writer = writer_for(variant.sink);
    writer.write_table(&paths.data, variant.label, &rows, header_rows)?;
    writer.write_table(&paths.roster, "名簿", &batch.roster, 0)?;

    tracing::info!(
        company = %batch.company.code,
        data = %paths.data.display(),
        roster = %paths.roster.display(),
        "出力完了"
    );

    Ok(paths)
}
