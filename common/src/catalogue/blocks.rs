//! バリアント別の追加ブロック
//!
//! 特定健診ブロックの後ろに並べる列。どのブロックをどの順で付けるかは
//! [`columns_for`] が決める。

use super::{base, Column, Derived, Rule};
use crate::code_table::{FINDING, HEARING};
use crate::source::field;
use crate::variant::{FormatVariant, VariantKind};

/// 腎機能・尿酸・尿潜血
fn kidney() -> Vec<Column> {
    vec![
        Column::new("URIC_ACID", "尿酸", Rule::Copy(field::URIC_ACID)),
        Column::new("CREATININE", "血清クレアチニン", Rule::Copy(field::CREATININE)),
        Column::new("EGFR", "eGFR", Rule::Copy(field::EGFR)),
        Column::new(
            "URINE_OB_METHOD",
            "尿潜血測定法",
            Rule::MethodIf(field::URINE_OCCULT_BLOOD, "1"),
        ),
        Column::new("URINE_OB", "尿潜血", Rule::Urine(field::URINE_OCCULT_BLOOD)),
    ]
}

/// 血球
fn blood() -> Vec<Column> {
    vec![
        Column::new("WBC", "白血球数", Rule::Copy(field::WBC)),
        Column::new("PLATELET", "血小板数", Rule::Copy(field::PLATELET)),
    ]
}

/// 労働安全衛生法の項目（胸部X線・聴力・視力・業務歴）
fn occupational() -> Vec<Column> {
    vec![
        Column::new(
            "CHEST_XRAY_PRESENCE",
            "胸部X線所見の有無",
            Rule::Recode(field::CHEST_XRAY_JUDGEMENT, &FINDING),
        ),
        Column::new(
            "CHEST_XRAY_FINDINGS",
            "胸部X線所見",
            Rule::Join {
                fields: &[field::CHEST_XRAY_FINDINGS],
                sep: "",
                gate: Some(field::CHEST_XRAY_JUDGEMENT),
            },
        ),
        Column::new("HEARING_R_1000", "聴力(右1000Hz)", Rule::Recode(field::HEARING_R_1000, &HEARING)),
        Column::new("HEARING_R_4000", "聴力(右4000Hz)", Rule::Recode(field::HEARING_R_4000, &HEARING)),
        Column::new("HEARING_L_1000", "聴力(左1000Hz)", Rule::Recode(field::HEARING_L_1000, &HEARING)),
        Column::new("HEARING_L_4000", "聴力(左4000Hz)", Rule::Recode(field::HEARING_L_4000, &HEARING)),
        Column::new("VISION_R_NAKED", "視力(右裸眼)", Rule::Narrow(field::VISION_R_NAKED)),
        Column::new("VISION_L_NAKED", "視力(左裸眼)", Rule::Narrow(field::VISION_L_NAKED)),
        Column::new("VISION_R_CORRECTED", "視力(右矯正)", Rule::Narrow(field::VISION_R_CORRECTED)),
        Column::new("VISION_L_CORRECTED", "視力(左矯正)", Rule::Narrow(field::VISION_L_CORRECTED)),
        Column::new("WORK_HISTORY", "業務歴", Rule::Copy(field::WORK_HISTORY)),
    ]
}

/// 社内管理用の識別項目
fn employee() -> Vec<Column> {
    vec![
        Column::new("COMPANY_CODE", "会社コード", Rule::Copy(field::COMPANY_CODE)),
        Column::new("COMPANY_NAME", "会社名", Rule::Derive(Derived::CompanyName)),
        Column::new("DEPARTMENT", "所属", Rule::Copy(field::DEPARTMENT)),
        Column::new("COURSE_CODE", "コースコード", Rule::Copy(field::COURSE_CODE)),
        Column::new("COURSE_NAME", "コース名", Rule::Copy(field::COURSE_NAME)),
        Column::new("RECEIPT_NO", "受付番号", Rule::Copy(field::RECEIPT_NUMBER)),
        Column::new("EXAMINEE_ID", "受診者番号", Rule::Copy(field::EXAMINEE_ID)),
    ]
}

/// バリアントの宣言列（予備埋め前）
pub fn columns_for(variant: &FormatVariant) -> Vec<Column> {
    let mut columns = base::columns();
    let extra = match variant.kind {
        VariantKind::Kenpo => vec![kidney()],
        VariantKind::Sangyoui => vec![kidney(), blood(), occupational()],
        VariantKind::Jinji => vec![blood(), occupational(), employee()],
        VariantKind::Kumiai => vec![employee(), kidney(), blood()],
    };
    columns.extend(extra.into_iter().flatten());
    columns
}
