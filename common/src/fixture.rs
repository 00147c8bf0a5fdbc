//! テスト用の入力レコード

use crate::source::{field, SourceRecord};

/// 入力ファイルの列数
pub(crate) const SOURCE_WIDTH: usize = 142;

/// 全項目が揃った受診者1名分
pub(crate) fn sample() -> SourceRecord {
    with(&[])
}

/// [`sample`] の一部を上書きしたもの
pub(crate) fn with(overrides: &[(usize, &str)]) -> SourceRecord {
    let mut fields = vec![String::new(); SOURCE_WIDTH];
    let mut set = |pos: usize, value: &str| fields[pos] = value.to_string();

    set(field::COMPANY_CODE, "2000100100000001");
    set(field::COMPANY_NAME, "株式会社みなと精機");
    set(field::COURSE_CODE, "101");
    set(field::DEPARTMENT, "製造部");
    set(field::INSURER_NUMBER, "06139999");
    set(field::CARD_SYMBOL, "１２３");
    set(field::CARD_NUMBER, "４５６");
    set(field::NAME_KANA, "ｹﾝｼﾝ ﾀﾛｳ");
    set(field::NAME_KANJI, "健診　太郎");
    set(field::SEX, "男");
    set(field::BIRTH_DATE, "S45.01.02");
    set(field::ZIP_CODE, "100-0001");
    set(field::ADDRESS_1, "東京都千代田区");
    set(field::ADDRESS_2, "千代田１－１");
    set(field::EMPLOYEE_NUMBER, "E0001");
    set(field::EXAMINEE_ID, "K0001");
    set(field::COURSE_NAME, "定期健康診断");
    set(field::EXAM_DATE, "2024-05-20");
    set(field::RECEIPT_NUMBER, "R001");

    set(field::HEIGHT, "170.2");
    set(field::WEIGHT, "65.0");
    set(field::BMI, "22.4");
    set(field::WAIST, "80.5");
    set(field::SYSTOLIC_1, "120");
    set(field::DIASTOLIC_1, "80");
    set(field::SYSTOLIC_2, "130");
    set(field::DIASTOLIC_2, "84");

    set(field::TOTAL_CHOLESTEROL, "200");
    set(field::HDL, "55");
    set(field::LDL, "120");
    set(field::TRIGLYCERIDE, "100");
    set(field::GOT, "20");
    set(field::GPT, "18");
    set(field::GAMMA_GTP, "30");
    set(field::GLUCOSE, "95");
    set(field::HBA1C, "5.4");
    set(field::RBC, "480");
    set(field::HEMOGLOBIN, "15.0");
    set(field::HEMATOCRIT, "45.0");
    set(field::MCHC, "33.0");
    set(field::URINE_SUGAR, "－");
    set(field::URINE_PROTEIN, "+-");

    set(field::ECG_JUDGEMENT, "Ａ");
    set(field::FUNDUS_KW, "０");
    set(field::FUNDUS_SCHEIE_S, "０");
    set(field::FUNDUS_SCHEIE_H, "０");
    set(field::FUNDUS_SCOTT, "０");
    set(field::PHYSICAL_JUDGEMENT, "Ａ");

    let [name, age, treatment] = field::HISTORY[0];
    set(name, "高血圧（本態性）");
    set(age, "45");
    set(treatment, "服薬中");

    set(field::GUIDANCE_LEVEL, "情報提供レベル");
    set(field::OVERALL_JUDGEMENT, "Ａ");
    set(field::METABOLIC, "非該当");
    for pos in field::Q_STROKE..=field::Q_GUIDANCE_WISH {
        set(pos, "いいえ");
    }
    set(field::Q_EATING_SPEED, "普通");
    set(field::Q_DRINKING, "時々");
    set(field::Q_DRINK_AMOUNT, "１合未満");
    set(field::Q_LIFESTYLE, "思う");

    set(field::SYMPTOMS[0], "特になし");
    set(field::ATE_FLAG, "とっていない");

    set(field::URIC_ACID, "5.5");
    set(field::CREATININE, "0.80");
    set(field::EGFR, "80.1");
    set(field::WBC, "6000");
    set(field::PLATELET, "25.0");
    set(field::URINE_OCCULT_BLOOD, "－");
    set(field::CHEST_XRAY_JUDGEMENT, "Ａ");
    for pos in [
        field::HEARING_R_1000,
        field::HEARING_R_4000,
        field::HEARING_L_1000,
        field::HEARING_L_4000,
    ] {
        set(pos, "所見なし");
    }
    set(field::VISION_R_NAKED, "１．２");
    set(field::VISION_L_NAKED, "１．０");
    set(field::WORK_HISTORY, "事務");

    for (pos, value) in overrides {
        set(*pos, value);
    }

    SourceRecord::new(fields)
}
