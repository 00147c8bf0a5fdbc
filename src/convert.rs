//! 変換処理全体（読み込み → 会社別振り分け → 出力）

use crate::config::Config;
use crate::error::Result;
use crate::export::{write_batch, OutputPaths};
use crate::reader::read_source;
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use kenshin_common::{Catalogue, Company, Dispatcher, FormatVariant, VariantKind};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub format: VariantKind,
    pub output_dir: PathBuf,
    /// 出力フォルダ名に使う日付
    pub run_date: NaiveDate,
    pub roster_template_passthrough: bool,
    pub show_progress: bool,
}

/// 会社1社分の結果
#[derive(Debug, Clone)]
pub struct CompanySummary {
    pub company: Company,
    pub counted: usize,
    pub rows: usize,
    pub roster_rows: usize,
    pub issues: usize,
    pub paths: OutputPaths,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub format: VariantKind,
    pub records: usize,
    pub companies: Vec<CompanySummary>,
}

impl RunSummary {
    pub fn total_issues(&self) -> usize {
        self.companies.iter().map(|c| c.issues).sum()
    }

    pub fn total_rows(&self) -> usize {
        self.companies.iter().map(|c| c.rows).sum()
    }
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}") {
        bar.set_style(style);
    }
    bar
}

/// 入力ファイル1つを変換して会社別に出力する
pub fn run(options: &ConvertOptions, config: &Config) -> Result<RunSummary> {
    let records = read_source(&options.input, config.encoding()?)?;
    let companies = config.companies();

    let catalogue = Catalogue::build(FormatVariant::get(options.format))?;
    let dispatcher = Dispatcher::new(&catalogue, &config.facility)
        .with_template_passthrough(options.roster_template_passthrough);

    let plan = dispatcher.plan(&records, &companies);
    let bar = progress_bar(plan.len(), options.show_progress);
    let mut summaries = Vec::with_capacity(plan.len());

    for target in &plan {
        bar.set_message(target.company.name.clone());
        let batch = dispatcher.build(&records, target);
        let paths = write_batch(&batch, &catalogue, &options.output_dir, options.run_date)?;

        tracing::info!(
            company = %batch.company.code,
            counted = batch.counted,
            rows = batch.rows.len(),
            roster = batch.roster.len(),
            issues = batch.issues.len(),
            "会社別出力"
        );

        summaries.push(CompanySummary {
            company: batch.company.clone(),
            counted: batch.counted,
            rows: batch.rows.len(),
            roster_rows: batch.roster.len(),
            issues: batch.issues.len(),
            paths,
        });
        bar.inc(1);
    }
    bar.finish_and_clear();

    Ok(RunSummary {
        format: options.format,
        records: records.len(),
        companies: summaries,
    })
}
