//! 出力列定義（カタログ）
//!
//! 列ごとに「何をどう入れるか」を [`Rule`] で宣言する。
//! マッパーはこの表を先頭から評価するだけで、バリアント固有の分岐は持たない。
//!
//! ## 構成
//! 1. 特定健診ブロック（全バリアント共通、[`base`]）
//! 2. バリアント別の追加ブロック（[`blocks`]）
//! 3. 列数に満たない分は末尾を「予備」で埋める

pub mod base;
pub mod blocks;

use crate::code_table::CodeTable;
use crate::error::{Error, Result};
use crate::types::TargetRecord;
use crate::variant::FormatVariant;
use std::collections::HashSet;

/// 予備列のID
pub const RESERVED_ID: &str = "RESERVED";

/// 健診機関の固定値のうちどれを入れるか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacilityField {
    Number,
    Name,
    ZipCode,
    Address,
    Phone,
    Physician,
}

/// レコード単位で一度だけ計算する合成値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derived {
    ExamDate,
    BirthDate,
    SystolicFlag,
    Systolic,
    DiastolicFlag,
    Diastolic,
    FastingGlucoseMethod,
    FastingGlucose,
    RandomGlucoseMethod,
    RandomGlucose,
    HbA1cMethod,
    HbA1c,
    /// 採血時間(食後)
    PostMealSample,
    HistoryText,
    /// 既往歴の有無（1:あり 2:なし）
    HistoryFlag,
    SymptomFlag,
    SymptomText,
    /// 出力対象の会社名
    CompanyName,
}

/// 列の値の決め方
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// 常に空欄
    Blank,
    /// 固定値
    Literal(&'static str),
    /// 健診機関の固定値（設定ファイルで変更可）
    Facility(FacilityField),
    /// 入力値をそのまま
    Copy(usize),
    /// 入力値をNFKC正規化
    Narrow(usize),
    /// コード表で変換
    Recode(usize, &'static CodeTable),
    /// 尿定性（テーブルはバリアントで選ぶ）
    Urine(usize),
    /// 入力値があれば測定法コードを入れる
    MethodIf(usize, &'static str),
    /// 複数項目を連結（`gate` が空欄なら全体を空欄にする）
    Join {
        fields: &'static [usize],
        sep: &'static str,
        gate: Option<usize>,
    },
    /// 合成値
    Derive(Derived),
}

/// 出力列1つ分
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// 提出先システムの項目ID
    pub id: &'static str,
    /// 日本語見出し
    pub label: &'static str,
    pub rule: Rule,
    /// 空欄ならログに記録する
    pub required: bool,
}

impl Column {
    pub const fn new(id: &'static str, label: &'static str, rule: Rule) -> Self {
        Self { id, label, rule, required: false }
    }

    pub const fn required(id: &'static str, label: &'static str, rule: Rule) -> Self {
        Self { id, label, rule, required: true }
    }

    pub const fn blank(id: &'static str, label: &'static str) -> Self {
        Self::new(id, label, Rule::Blank)
    }

    pub const fn reserved() -> Self {
        Self::blank(RESERVED_ID, "予備")
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.rule, Rule::Blank)
    }
}

/// レコード単位の必須チェック（いずれかの項目があればよい）
#[derive(Debug, Clone, Copy)]
pub struct Check {
    pub item: &'static str,
    pub any_of: &'static [usize],
}

/// バリアント1つ分の列定義
#[derive(Debug, Clone)]
pub struct Catalogue {
    pub variant: FormatVariant,
    columns: Vec<Column>,
    checks: Vec<Check>,
}

impl Catalogue {
    /// 列定義を組み立て、列数まで予備で埋める
    pub fn build(variant: FormatVariant) -> Result<Self> {
        let declared = blocks::columns_for(&variant);
        let checks = base::checks();
        Self::from_columns(variant, declared, checks)
    }

    pub fn from_columns(
        variant: FormatVariant,
        mut columns: Vec<Column>,
        checks: Vec<Check>,
    ) -> Result<Self> {
        if columns.len() > variant.width {
            return Err(Error::Layout(format!(
                "{}: 定義列数{}が出力列数{}を超えています",
                variant.label,
                columns.len(),
                variant.width
            )));
        }

        let mut seen = HashSet::new();
        for column in columns.iter().filter(|c| !c.is_blank()) {
            if !seen.insert(column.id) {
                return Err(Error::Layout(format!(
                    "{}: 項目IDが重複しています: {}",
                    variant.label, column.id
                )));
            }
        }

        columns.resize(variant.width, Column::reserved());

        Ok(Self { variant, columns, checks })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// 項目IDの位置（0始まり）
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id && !c.is_blank())
    }

    /// 見出し3行（項目ID・項目番号・日本語名）
    pub fn header_rows(&self) -> Vec<Vec<String>> {
        let ids = self.columns.iter().map(|c| c.id.to_string()).collect();
        let numbers = (1..=self.columns.len()).map(|n| format!("C{:03}", n)).collect();
        let labels = self.columns.iter().map(|c| c.label.to_string()).collect();
        vec![ids, numbers, labels]
    }

    /// 出力行に並べる
    pub fn to_row(&self, record: &TargetRecord) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| {
                if c.is_blank() {
                    String::new()
                } else {
                    record.get(c.id).to_string()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::VariantKind;

    #[test]
    fn test_every_variant_has_its_declared_width() {
        for kind in VariantKind::ALL {
            let variant = FormatVariant::get(kind);
            let width = variant.width;
            let catalogue = Catalogue::build(variant).expect("カタログ生成失敗");
            assert_eq!(catalogue.width(), width, "{}", kind);
            for row in catalogue.header_rows() {
                assert_eq!(row.len(), width, "{}", kind);
            }
        }
    }

    #[test]
    fn test_base_block_positions_are_shared() {
        for kind in VariantKind::ALL {
            let catalogue = Catalogue::build(FormatVariant::get(kind)).unwrap();
            assert_eq!(catalogue.position_of("JISSHI_KBN"), Some(0));
            assert_eq!(catalogue.position_of("INSURER_NO"), Some(8));
            assert_eq!(catalogue.position_of("BIRTH_DATE"), Some(13));
            assert_eq!(catalogue.position_of("SBP"), Some(37));
            assert_eq!(catalogue.position_of("FBS"), Some(79));
            assert_eq!(catalogue.position_of("RBS"), Some(83));
            assert_eq!(catalogue.position_of("HISTORY_DETAIL"), Some(124));
            assert_eq!(catalogue.position_of("POST_MEAL"), Some(170));
        }
    }

    #[test]
    fn test_questionnaire_history_precedes_medication() {
        for kind in VariantKind::ALL {
            let catalogue = Catalogue::build(FormatVariant::get(kind)).unwrap();
            assert_eq!(catalogue.position_of("METABO"), Some(138));
            assert_eq!(catalogue.position_of("Q_STROKE"), Some(139));
            assert_eq!(catalogue.position_of("Q_ANEMIA"), Some(142));
            assert_eq!(catalogue.position_of("Q_MED_BP"), Some(143));
            assert_eq!(catalogue.position_of("Q_MED_LIPID"), Some(145));
            assert_eq!(catalogue.position_of("Q_SMOKING"), Some(146));
            assert_eq!(catalogue.position_of("Q_WEIGHT_GAIN"), Some(148));
        }
    }

    #[test]
    fn test_trailing_columns_are_reserved() {
        let catalogue = Catalogue::build(FormatVariant::get(VariantKind::Kenpo)).unwrap();
        let last = catalogue.columns().last().unwrap();
        assert_eq!(last.id, RESERVED_ID);
        assert_eq!(last.label, "予備");
    }

    #[test]
    fn test_header_rows() {
        let catalogue = Catalogue::build(FormatVariant::get(VariantKind::Sangyoui)).unwrap();
        let headers = catalogue.header_rows();
        assert_eq!(headers.len(), 3);
        assert_eq!(headers[0][0], "JISSHI_KBN");
        assert_eq!(headers[1][0], "C001");
        assert_eq!(headers[1][220], "C221");
        assert_eq!(headers[2][0], "実施区分");
    }

    #[test]
    fn test_too_many_columns_is_layout_error() {
        let mut variant = FormatVariant::get(VariantKind::Kenpo);
        variant.width = 10;
        let result = Catalogue::build(variant);
        assert!(matches!(result, Err(Error::Layout(_))));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let variant = FormatVariant::get(VariantKind::Kenpo);
        let columns = vec![
            Column::new("HEIGHT", "身長", Rule::Copy(19)),
            Column::new("HEIGHT", "身長", Rule::Copy(19)),
        ];
        let result = Catalogue::from_columns(variant, columns, Vec::new());
        assert!(matches!(result, Err(Error::Layout(_))));
    }

    #[test]
    fn test_to_row_places_values_by_id() {
        let variant = FormatVariant::get(VariantKind::Kenpo);
        let catalogue = Catalogue::build(variant).unwrap();
        let mut record = TargetRecord::new();
        record.set("HEIGHT", "170.2");
        record.set("RESERVED", "書き込まれない");
        let row = catalogue.to_row(&record);
        assert_eq!(row.len(), 213);
        assert_eq!(row[catalogue.position_of("HEIGHT").unwrap()], "170.2");
        assert!(row.iter().filter(|v| !v.is_empty()).count() == 1);
    }
}
