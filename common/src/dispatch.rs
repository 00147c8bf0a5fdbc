//! 会社別の振り分け
//!
//! 1. 全レコードを1回走査して会社ごとの件数を数える（先に一致した会社を採用）
//! 2. 件数が1以上の会社を、会社一覧の定義順に出力対象とする
//! 3. 会社ごとに、会社一致かつ出力条件を満たすレコードを変換し、名簿も作る

use crate::catalogue::Catalogue;
use crate::issue::Issue;
use crate::mapper::{map_record, MapContext};
use crate::roster::{is_template, roster_entry, template_entry};
use crate::source::SourceRecord;
use crate::types::{Company, Facility};

/// 会社ごとの件数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyCount {
    pub company: Company,
    pub count: usize,
}

/// 会社1社分の出力内容
#[derive(Debug, Clone, Default)]
pub struct Batch {
    pub company: Company,
    /// 件数集計での件数
    pub counted: usize,
    /// データファイルの行（見出しを除く）
    pub rows: Vec<Vec<String>>,
    /// 名簿の行
    pub roster: Vec<Vec<String>>,
    pub issues: Vec<Issue>,
}

/// バリアント1つ分の振り分け処理
pub struct Dispatcher<'a> {
    catalogue: &'a Catalogue,
    facility: &'a Facility,
    template_passthrough: bool,
}

impl<'a> Dispatcher<'a> {
    pub fn new(catalogue: &'a Catalogue, facility: &'a Facility) -> Self {
        Self {
            catalogue,
            facility,
            template_passthrough: catalogue.variant.roster_template_passthrough,
        }
    }

    /// 名簿のテンプレート行の扱いを切り替える（対応していないバリアントでは常に無効）
    pub fn with_template_passthrough(mut self, enabled: bool) -> Self {
        self.template_passthrough = enabled && self.catalogue.variant.roster_template_passthrough;
        self
    }

    pub fn template_passthrough(&self) -> bool {
        self.template_passthrough
    }

    /// 会社ごとの件数を数える
    pub fn count(&self, records: &[SourceRecord], companies: &[Company]) -> Vec<CompanyCount> {
        let variant = &self.catalogue.variant;
        let mut counts: Vec<CompanyCount> = companies
            .iter()
            .map(|company| CompanyCount { company: company.clone(), count: 0 })
            .collect();

        for record in records {
            let code = record.company_code();
            if let Some(entry) = counts.iter_mut().find(|c| c.company.code == code) {
                if variant.counts(record) {
                    entry.count += 1;
                }
            }
        }

        counts
    }

    /// 出力対象の会社（件数が1以上、定義順）
    pub fn plan(&self, records: &[SourceRecord], companies: &[Company]) -> Vec<CompanyCount> {
        let plan: Vec<CompanyCount> = self
            .count(records, companies)
            .into_iter()
            .filter(|c| c.count > 0)
            .collect();

        tracing::info!(
            format = %self.catalogue.variant.kind,
            companies = plan.len(),
            "出力対象の会社を決定"
        );
        plan
    }

    /// 会社1社分を変換する
    pub fn build(&self, records: &[SourceRecord], target: &CompanyCount) -> Batch {
        let variant = &self.catalogue.variant;
        let company = &target.company;
        let ctx = MapContext {
            catalogue: self.catalogue,
            facility: self.facility,
            company,
        };

        let mut batch = Batch {
            company: company.clone(),
            counted: target.count,
            ..Batch::default()
        };

        for record in records {
            if record.company_code() == company.code {
                if !variant.eligibility.accepts(record) {
                    continue;
                }
                let mapped = map_record(record, &ctx);
                for issue in &mapped.issues {
                    issue.log();
                }
                batch.rows.push(self.catalogue.to_row(&mapped.target));
                batch.roster.push(roster_entry(record, company, variant));
                batch.issues.extend(mapped.issues);
            } else if self.template_passthrough && is_template(record) {
                batch.roster.push(template_entry(record));
            }
        }

        if batch.rows.len() != batch.counted {
            tracing::info!(
                company = %company.code,
                counted = batch.counted,
                rows = batch.rows.len(),
                "件数と出力行数が異なります"
            );
        }

        batch
    }
}
