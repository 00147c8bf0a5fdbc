//! 特定健診ブロック（全バリアント共通の先頭171列）

use super::{Check, Column, Derived, FacilityField, Rule};
use crate::code_table::{
    DRINKING, DRINK_AMOUNT, EATING_SPEED, FINDING, GUIDANCE_LEVEL, KEITH_WAGENER, LIFESTYLE,
    METABOLIC, SCHEIE, SCOTT, SEX, YES_NO,
};
use crate::source::field;

/// 特定健診ブロックの列数
pub const BASE_WIDTH: usize = 171;

const fn col(id: &'static str, label: &'static str, rule: Rule) -> Column {
    Column::new(id, label, rule)
}

const fn req(id: &'static str, label: &'static str, rule: Rule) -> Column {
    Column::required(id, label, rule)
}

const fn blank(id: &'static str, label: &'static str) -> Column {
    Column::blank(id, label)
}

const fn derive(id: &'static str, label: &'static str, derived: Derived) -> Column {
    Column::new(id, label, Rule::Derive(derived))
}

/// 検査値と、その前後の測定法・基準値欄
fn lab(
    columns: &mut Vec<Column>,
    prefix: [&'static str; 4],
    label: &'static str,
    pos: usize,
    method: &'static str,
    required: bool,
) {
    let [method_id, value_id, low_id, high_id] = prefix;
    columns.push(col(method_id, "測定法", Rule::MethodIf(pos, method)));
    columns.push(Column {
        required,
        ..col(value_id, label, Rule::Copy(pos))
    });
    columns.push(blank(low_id, "下限値"));
    columns.push(blank(high_id, "上限値"));
}

/// 欠番をまとめて追加
fn gap(columns: &mut Vec<Column>, count: usize) {
    for _ in 0..count {
        columns.push(blank("GAP", "欠番"));
    }
}

pub fn columns() -> Vec<Column> {
    let mut c = Vec::with_capacity(BASE_WIDTH);

    // 実施情報・健診機関
    c.push(col("JISSHI_KBN", "実施区分", Rule::Literal("1")));
    c.push(col("PROGRAM_TYPE", "プログラム種別", Rule::Literal("030")));
    c.push(derive("EXAM_DATE", "実施年月日", Derived::ExamDate));
    c.push(col("FACILITY_NO", "健診機関番号", Rule::Facility(FacilityField::Number)));
    c.push(col("FACILITY_NAME", "健診機関名称", Rule::Facility(FacilityField::Name)));
    c.push(col("FACILITY_ZIP", "健診機関郵便番号", Rule::Facility(FacilityField::ZipCode)));
    c.push(col("FACILITY_ADDRESS", "健診機関所在地", Rule::Facility(FacilityField::Address)));
    c.push(col("FACILITY_TEL", "健診機関電話番号", Rule::Facility(FacilityField::Phone)));

    // 受診者
    c.push(req("INSURER_NO", "保険者番号", Rule::Copy(field::INSURER_NUMBER)));
    c.push(req("CARD_SYMBOL", "被保険者証等記号", Rule::Copy(field::CARD_SYMBOL)));
    c.push(req("CARD_NUMBER", "被保険者証等番号", Rule::Copy(field::CARD_NUMBER)));
    c.push(req("NAME_KANA", "カナ氏名", Rule::Narrow(field::NAME_KANA)));
    c.push(req("NAME_KANJI", "漢字氏名", Rule::Copy(field::NAME_KANJI)));
    c.push(req("BIRTH_DATE", "生年月日", Rule::Derive(Derived::BirthDate)));
    c.push(req("SEX", "男女区分", Rule::Recode(field::SEX, &SEX)));
    c.push(req("ZIP_CODE", "郵便番号", Rule::Copy(field::ZIP_CODE)));
    c.push(req(
        "ADDRESS",
        "住所",
        Rule::Join {
            fields: &[field::ADDRESS_1, field::ADDRESS_2],
            sep: "　",
            gate: None,
        },
    ));
    c.push(blank("TICKET_NO", "受診券整理番号"));
    c.push(blank("TICKET_EXPIRY", "受診券有効期限"));
    c.push(blank("EXAM_TYPE", "健診種別コード"));
    c.push(blank("OFFICE_CODE", "事業所コード"));
    c.push(col("EMPLOYEE_NO", "社員番号", Rule::Copy(field::EMPLOYEE_NUMBER)));
    gap(&mut c, 6);

    // 身体計測
    c.push(req("HEIGHT", "身長", Rule::Copy(field::HEIGHT)));
    c.push(req("WEIGHT", "体重", Rule::Copy(field::WEIGHT)));
    c.push(req("BMI", "BMI", Rule::Copy(field::BMI)));
    c.push(col("WAIST_METHOD", "腹囲測定法", Rule::MethodIf(field::WAIST, "1")));
    c.push(col("WAIST", "腹囲", Rule::Copy(field::WAIST)));
    c.push(blank("VISCERAL_FAT", "内臓脂肪面積"));
    c.push(blank("VISCERAL_FAT_LOW", "下限値"));
    c.push(blank("VISCERAL_FAT_HIGH", "上限値"));

    // 血圧
    c.push(derive("SBP_KBN", "収縮期血圧区分", Derived::SystolicFlag));
    c.push(derive("SBP", "収縮期血圧", Derived::Systolic));
    c.push(blank("SBP_LOW", "下限値"));
    c.push(blank("SBP_HIGH", "上限値"));
    gap(&mut c, 3);
    c.push(derive("DBP_KBN", "拡張期血圧区分", Derived::DiastolicFlag));
    c.push(derive("DBP", "拡張期血圧", Derived::Diastolic));
    c.push(blank("DBP_LOW", "下限値"));
    c.push(blank("DBP_HIGH", "上限値"));
    gap(&mut c, 3);

    // 脂質・肝機能
    lab(&mut c, ["TC_METHOD", "TC", "TC_LOW", "TC_HIGH"], "総コレステロール", field::TOTAL_CHOLESTEROL, "01", false);
    lab(&mut c, ["HDL_METHOD", "HDL", "HDL_LOW", "HDL_HIGH"], "HDLコレステロール", field::HDL, "01", true);
    lab(&mut c, ["LDL_METHOD", "LDL", "LDL_LOW", "LDL_HIGH"], "LDLコレステロール", field::LDL, "01", true);
    lab(&mut c, ["TG_METHOD", "TG", "TG_LOW", "TG_HIGH"], "中性脂肪", field::TRIGLYCERIDE, "01", true);
    lab(&mut c, ["GOT_METHOD", "GOT", "GOT_LOW", "GOT_HIGH"], "GOT(AST)", field::GOT, "02", true);
    lab(&mut c, ["GPT_METHOD", "GPT", "GPT_LOW", "GPT_HIGH"], "GPT(ALT)", field::GPT, "02", true);
    lab(&mut c, ["GGT_METHOD", "GGT", "GGT_LOW", "GGT_HIGH"], "γ-GT(γ-GTP)", field::GAMMA_GTP, "01", true);

    // 血糖
    c.push(derive("FBS_METHOD", "空腹時血糖測定法", Derived::FastingGlucoseMethod));
    c.push(derive("FBS", "空腹時血糖", Derived::FastingGlucose));
    c.push(blank("FBS_LOW", "下限値"));
    c.push(blank("FBS_HIGH", "上限値"));
    c.push(derive("RBS_METHOD", "随時血糖測定法", Derived::RandomGlucoseMethod));
    c.push(derive("RBS", "随時血糖", Derived::RandomGlucose));
    c.push(blank("RBS_LOW", "下限値"));
    c.push(blank("RBS_HIGH", "上限値"));
    c.push(derive("HBA1C_METHOD", "HbA1c測定法", Derived::HbA1cMethod));
    c.push(derive("HBA1C", "HbA1c", Derived::HbA1c));
    c.push(blank("HBA1C_LOW", "下限値"));
    c.push(blank("HBA1C_HIGH", "上限値"));

    // 貧血
    c.push(col("RBC", "赤血球数", Rule::Copy(field::RBC)));
    c.push(blank("RBC_LOW", "下限値"));
    c.push(blank("RBC_HIGH", "上限値"));
    c.push(col("HGB", "血色素量", Rule::Copy(field::HEMOGLOBIN)));
    c.push(blank("HGB_LOW", "下限値"));
    c.push(blank("HGB_HIGH", "上限値"));
    c.push(col("HCT", "ヘマトクリット値", Rule::Copy(field::HEMATOCRIT)));
    c.push(blank("HCT_LOW", "下限値"));
    c.push(blank("HCT_HIGH", "上限値"));
    c.push(blank("ANEMIA_REASON", "貧血検査実施理由"));
    c.push(col("MCHC", "MCHC", Rule::Copy(field::MCHC)));
    c.push(blank("MCHC_LOW", "下限値"));
    c.push(blank("MCHC_HIGH", "上限値"));

    // 尿
    c.push(col("URINE_SUGAR_METHOD", "尿糖測定法", Rule::MethodIf(field::URINE_SUGAR, "1")));
    c.push(col("URINE_SUGAR", "尿糖", Rule::Urine(field::URINE_SUGAR)));
    c.push(col("URINE_PROTEIN_METHOD", "尿蛋白測定法", Rule::MethodIf(field::URINE_PROTEIN, "1")));
    c.push(col("URINE_PROTEIN", "尿蛋白", Rule::Urine(field::URINE_PROTEIN)));

    // 心電図・眼底・診察
    c.push(col("ECG_PRESENCE", "心電図所見の有無", Rule::Recode(field::ECG_JUDGEMENT, &FINDING)));
    c.push(col(
        "ECG_FINDINGS",
        "心電図所見",
        Rule::Join {
            fields: &field::ECG_FINDINGS,
            sep: "　",
            gate: Some(field::ECG_JUDGEMENT),
        },
    ));
    c.push(blank("ECG_REASON", "心電図実施理由"));
    c.push(col("FUNDUS_SCHEIE_H", "眼底(シェイエH)", Rule::Recode(field::FUNDUS_SCHEIE_H, &SCHEIE)));
    gap(&mut c, 2);
    c.push(col("FUNDUS_SCHEIE_S", "眼底(シェイエS)", Rule::Recode(field::FUNDUS_SCHEIE_S, &SCHEIE)));
    gap(&mut c, 2);
    c.push(col("FUNDUS_KW", "眼底(キースワグナー)", Rule::Recode(field::FUNDUS_KW, &KEITH_WAGENER)));
    gap(&mut c, 2);
    c.push(col("FUNDUS_SCOTT", "眼底(SCOTT)", Rule::Recode(field::FUNDUS_SCOTT, &SCOTT)));
    c.push(col(
        "FUNDUS_OTHER",
        "眼底その他所見",
        Rule::Join {
            fields: &field::FUNDUS_OTHER,
            sep: "",
            gate: Some(field::FUNDUS_OTHER[0]),
        },
    ));
    c.push(blank("FUNDUS_REASON", "眼底実施理由"));
    c.push(col(
        "PHYSICAL_PRESENCE",
        "他覚症状の有無",
        Rule::Recode(field::PHYSICAL_JUDGEMENT, &FINDING),
    ));
    c.push(col(
        "PHYSICAL_FINDINGS",
        "他覚症状",
        Rule::Join {
            fields: &field::PHYSICAL_FINDINGS,
            sep: "　",
            gate: Some(field::PHYSICAL_JUDGEMENT),
        },
    ));

    // 既往歴
    c.push(derive("HISTORY_DETAIL", "既往歴", Derived::HistoryText));
    gap(&mut c, 9);
    c.push(derive("HISTORY_FLAG", "既往歴の有無", Derived::HistoryFlag));

    // 判定
    c.push(col("GUIDANCE_LEVEL", "保健指導レベル", Rule::Recode(field::GUIDANCE_LEVEL, &GUIDANCE_LEVEL)));
    c.push(req("DOCTOR_JUDGEMENT", "医師の判断", Rule::Copy(field::OVERALL_JUDGEMENT)));
    c.push(col("PHYSICIAN", "健診実施医師名", Rule::Facility(FacilityField::Physician)));
    c.push(col("METABO", "メタボリックシンドローム判定", Rule::Recode(field::METABOLIC, &METABOLIC)));

    // 質問票
    c.push(col("Q_STROKE", "病歴(脳血管疾患)", Rule::Recode(field::Q_STROKE, &YES_NO)));
    c.push(col("Q_HEART", "病歴(心血管)", Rule::Recode(field::Q_HEART, &YES_NO)));
    c.push(col("Q_KIDNEY", "病歴(腎不全・人工透析)", Rule::Recode(field::Q_KIDNEY, &YES_NO)));
    c.push(col("Q_ANEMIA", "病歴(貧血)", Rule::Recode(field::Q_ANEMIA, &YES_NO)));
    c.push(col("Q_MED_BP", "服薬1(血圧)", Rule::Recode(field::Q_MED_BP, &YES_NO)));
    c.push(col("Q_MED_GLUCOSE", "服薬2(血糖)", Rule::Recode(field::Q_MED_GLUCOSE, &YES_NO)));
    c.push(col("Q_MED_LIPID", "服薬3(脂質)", Rule::Recode(field::Q_MED_LIPID, &YES_NO)));
    c.push(col("Q_SMOKING", "喫煙", Rule::Recode(field::Q_SMOKING, &YES_NO)));
    gap(&mut c, 1);
    c.push(col("Q_WEIGHT_GAIN", "20歳からの体重変化", Rule::Recode(field::Q_WEIGHT_GAIN, &YES_NO)));
    c.push(col("Q_EXERCISE", "30分以上の運動習慣", Rule::Recode(field::Q_EXERCISE, &YES_NO)));
    c.push(col("Q_ACTIVITY", "歩行又は身体活動", Rule::Recode(field::Q_ACTIVITY, &YES_NO)));
    c.push(col("Q_WALKING_SPEED", "歩行速度", Rule::Recode(field::Q_WALKING_SPEED, &YES_NO)));
    c.push(col("Q_WEIGHT_CHANGE", "1年間の体重変化", Rule::Recode(field::Q_WEIGHT_CHANGE, &YES_NO)));
    c.push(col("Q_EATING_SPEED", "食べ方1(早食い等)", Rule::Recode(field::Q_EATING_SPEED, &EATING_SPEED)));
    c.push(col("Q_LATE_DINNER", "食べ方2(就寝前)", Rule::Recode(field::Q_LATE_DINNER, &YES_NO)));
    c.push(col("Q_SNACK", "食べ方3(夜食/間食)", Rule::Recode(field::Q_SNACK, &YES_NO)));
    c.push(col("Q_SKIP_BREAKFAST", "食習慣", Rule::Recode(field::Q_SKIP_BREAKFAST, &YES_NO)));
    c.push(col("Q_DRINKING", "飲酒", Rule::Recode(field::Q_DRINKING, &DRINKING)));
    c.push(col("Q_DRINK_AMOUNT", "飲酒量", Rule::Recode(field::Q_DRINK_AMOUNT, &DRINK_AMOUNT)));
    c.push(col("Q_SLEEP", "睡眠", Rule::Recode(field::Q_SLEEP, &YES_NO)));
    c.push(col("Q_LIFESTYLE", "生活習慣の改善", Rule::Recode(field::Q_LIFESTYLE, &LIFESTYLE)));
    c.push(col("Q_GUIDANCE_WISH", "保健指導の希望", Rule::Recode(field::Q_GUIDANCE_WISH, &YES_NO)));

    // 自覚症状
    c.push(derive("SYMPTOM_FLAG", "自覚症状の有無", Derived::SymptomFlag));
    c.push(derive("SYMPTOM_TEXT", "自覚症状", Derived::SymptomText));

    // 服薬詳細（出力しない）
    c.push(blank("MED_BP_NAME", "服薬1薬剤名"));
    c.push(blank("MED_BP_REASON", "服薬1服薬理由"));
    c.push(blank("MED_GLUCOSE_NAME", "服薬2薬剤名"));
    c.push(blank("MED_GLUCOSE_REASON", "服薬2服薬理由"));
    c.push(blank("MED_LIPID_NAME", "服薬3薬剤名"));
    c.push(blank("MED_LIPID_REASON", "服薬3服薬理由"));

    c.push(derive("POST_MEAL", "採血時間(食後)", Derived::PostMealSample));

    c
}

/// レコード単位の必須チェック
pub fn checks() -> Vec<Check> {
    vec![Check {
        item: "血糖・HbA1c",
        any_of: &[field::GLUCOSE, field::HBA1C],
    }]
}
