//! 受診者名簿
//!
//! データファイルと同じ対象者を14列で一覧にする。見出し行はない。

use crate::code_table::{SENTINEL, SEX};
use crate::compose::{era_to_gregorian, format_exam_date, to_narrow};
use crate::source::{field, SourceRecord};
use crate::types::Company;
use crate::variant::{FormatVariant, TEMPLATE_COMPANY_TOKEN};

/// 名簿の列（見出し名, 入力位置）
pub const ROSTER_COLUMNS: [(&str, usize); 14] = [
    ("会社コード", field::COMPANY_CODE),
    ("会社名", field::COMPANY_NAME),
    ("社員番号", field::EMPLOYEE_NUMBER),
    ("所属", field::DEPARTMENT),
    ("カナ氏名", field::NAME_KANA),
    ("漢字氏名", field::NAME_KANJI),
    ("性別", field::SEX),
    ("生年月日", field::BIRTH_DATE),
    ("受診日", field::EXAM_DATE),
    ("コースコード", field::COURSE_CODE),
    ("保険者番号", field::INSURER_NUMBER),
    ("記号", field::CARD_SYMBOL),
    ("番号", field::CARD_NUMBER),
    ("総合判定", field::OVERALL_JUDGEMENT),
];

pub const ROSTER_WIDTH: usize = ROSTER_COLUMNS.len();

/// 会社コード欄がテンプレート行の目印になっているか
pub fn is_template(record: &SourceRecord) -> bool {
    record.company_code() == TEMPLATE_COMPANY_TOKEN
}

/// 対象者1名分の名簿行
///
/// 生年月日の変換エラーはデータファイル側で記録済みのため、ここでは値のみ置き換える。
pub fn roster_entry(record: &SourceRecord, company: &Company, variant: &FormatVariant) -> Vec<String> {
    let style = variant.date_style;
    let raw = move |pos: usize| record.get(pos).trim();

    vec![
        company.code.clone(),
        company.name.clone(),
        raw(field::EMPLOYEE_NUMBER).to_string(),
        raw(field::DEPARTMENT).to_string(),
        to_narrow(raw(field::NAME_KANA)),
        raw(field::NAME_KANJI).to_string(),
        SEX.recode(raw(field::SEX)).as_cell().to_string(),
        era_to_gregorian(raw(field::BIRTH_DATE), style).unwrap_or_else(|_| SENTINEL.to_string()),
        format_exam_date(raw(field::EXAM_DATE), style),
        raw(field::COURSE_CODE).to_string(),
        raw(field::INSURER_NUMBER).to_string(),
        raw(field::CARD_SYMBOL).to_string(),
        raw(field::CARD_NUMBER).to_string(),
        raw(field::OVERALL_JUDGEMENT).to_string(),
    ]
}

/// テンプレート行は変換せず入力値をそのまま並べる
pub fn template_entry(record: &SourceRecord) -> Vec<String> {
    ROSTER_COLUMNS
        .iter()
        .map(|(_, pos)| record.get(*pos).to_string())
        .collect()
}
