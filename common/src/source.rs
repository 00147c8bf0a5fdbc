//! 入力レコード（健診システムのタブ区切りエクスポート）
//!
//! 入力ファイルは位置だけが意味を持つ。ヘッダー行は読み飛ばし、
//! 列名による照合は行わない。列位置は [`field`] に定義する。

/// 入力ファイルの1行
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRecord {
    fields: Vec<String>,
}

impl SourceRecord {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// 位置指定で値を取得（範囲外は空文字）
    pub fn get(&self, pos: usize) -> &str {
        self.fields.get(pos).map(|s| s.as_str()).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 会社コード（前後空白除去）
    pub fn company_code(&self) -> &str {
        self.get(field::COMPANY_CODE).trim()
    }

    /// コースコード（前後空白除去）
    pub fn course_code(&self) -> &str {
        self.get(field::COURSE_CODE).trim()
    }

    /// ログ出力用の受診者識別情報
    pub fn person(&self) -> PersonRef<'_> {
        PersonRef {
            name: self.get(field::NAME_KANJI),
            insurer_number: self.get(field::INSURER_NUMBER),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for SourceRecord {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// 受診者の識別情報（氏名＋保険者番号）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonRef<'a> {
    pub name: &'a str,
    pub insurer_number: &'a str,
}

impl std::fmt::Display for PersonRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.name, self.insurer_number)
    }
}

/// 入力ファイルの列位置（0始まり）
pub mod field {
    pub const COMPANY_CODE: usize = 0;
    pub const COMPANY_NAME: usize = 1;
    pub const COURSE_CODE: usize = 2;
    pub const DEPARTMENT: usize = 3;
    pub const INSURER_NUMBER: usize = 4;
    pub const CARD_SYMBOL: usize = 5;
    pub const CARD_NUMBER: usize = 6;
    pub const NAME_KANA: usize = 7;
    pub const NAME_KANJI: usize = 8;
    pub const SEX: usize = 9;
    /// 和暦（例: S45.01.02）
    pub const BIRTH_DATE: usize = 10;
    pub const ZIP_CODE: usize = 11;
    pub const ADDRESS_1: usize = 12;
    pub const ADDRESS_2: usize = 13;
    pub const EMPLOYEE_NUMBER: usize = 14;
    pub const EXAMINEE_ID: usize = 15;
    pub const COURSE_NAME: usize = 16;
    /// 西暦（YYYY-MM-DD）
    pub const EXAM_DATE: usize = 17;
    pub const RECEIPT_NUMBER: usize = 18;

    pub const HEIGHT: usize = 19;
    pub const WEIGHT: usize = 20;
    pub const BMI: usize = 21;
    pub const WAIST: usize = 22;
    pub const SYSTOLIC_1: usize = 23;
    pub const DIASTOLIC_1: usize = 24;
    pub const SYSTOLIC_2: usize = 25;
    pub const DIASTOLIC_2: usize = 26;

    pub const TOTAL_CHOLESTEROL: usize = 27;
    pub const HDL: usize = 28;
    pub const LDL: usize = 29;
    pub const TRIGLYCERIDE: usize = 30;
    pub const GOT: usize = 31;
    pub const GPT: usize = 32;
    pub const GAMMA_GTP: usize = 33;
    pub const GLUCOSE: usize = 34;
    pub const HBA1C: usize = 35;
    pub const RBC: usize = 36;
    pub const HEMOGLOBIN: usize = 37;
    pub const HEMATOCRIT: usize = 38;
    pub const MCHC: usize = 39;
    pub const URINE_SUGAR: usize = 40;
    pub const URINE_PROTEIN: usize = 41;

    pub const ECG_JUDGEMENT: usize = 42;
    pub const ECG_FINDINGS: [usize; 4] = [43, 44, 45, 46];
    pub const FUNDUS_KW: usize = 47;
    pub const FUNDUS_SCHEIE_S: usize = 48;
    pub const FUNDUS_SCHEIE_H: usize = 49;
    pub const FUNDUS_SCOTT: usize = 50;
    pub const FUNDUS_OTHER: [usize; 4] = [55, 56, 57, 58];
    pub const PHYSICAL_JUDGEMENT: usize = 59;
    pub const PHYSICAL_FINDINGS: [usize; 3] = [60, 61, 62];

    /// 既往歴（病名, 発症年齢, 治療状況）×10
    pub const HISTORY: [[usize; 3]; 10] = [
        [63, 64, 65],
        [66, 67, 68],
        [69, 70, 71],
        [72, 73, 74],
        [75, 76, 77],
        [109, 110, 111],
        [112, 113, 114],
        [115, 116, 117],
        [118, 119, 120],
        [121, 122, 123],
    ];

    pub const GUIDANCE_LEVEL: usize = 78;
    pub const OVERALL_JUDGEMENT: usize = 79;
    pub const METABOLIC: usize = 81;

    pub const Q_STROKE: usize = 82;
    pub const Q_HEART: usize = 83;
    pub const Q_KIDNEY: usize = 84;
    pub const Q_ANEMIA: usize = 85;
    pub const Q_MED_BP: usize = 86;
    pub const Q_MED_GLUCOSE: usize = 87;
    pub const Q_MED_LIPID: usize = 88;
    pub const Q_SMOKING: usize = 89;
    pub const Q_WEIGHT_GAIN: usize = 90;
    pub const Q_EXERCISE: usize = 91;
    pub const Q_ACTIVITY: usize = 92;
    pub const Q_WALKING_SPEED: usize = 93;
    pub const Q_WEIGHT_CHANGE: usize = 94;
    pub const Q_EATING_SPEED: usize = 95;
    pub const Q_LATE_DINNER: usize = 96;
    pub const Q_SNACK: usize = 97;
    pub const Q_SKIP_BREAKFAST: usize = 98;
    pub const Q_DRINKING: usize = 99;
    pub const Q_DRINK_AMOUNT: usize = 100;
    pub const Q_SLEEP: usize = 101;
    pub const Q_LIFESTYLE: usize = 102;
    pub const Q_GUIDANCE_WISH: usize = 103;

    /// 自覚症状（4区分）
    pub const SYMPTOMS: [usize; 4] = [104, 105, 106, 124];
    /// 食事摂取（「とった」等）
    pub const ATE_FLAG: usize = 107;
    /// 食後経過時間（時間）
    pub const HOURS_SINCE_MEAL: usize = 108;

    pub const URIC_ACID: usize = 125;
    pub const CREATININE: usize = 126;
    pub const EGFR: usize = 127;
    pub const WBC: usize = 128;
    pub const PLATELET: usize = 129;
    pub const URINE_OCCULT_BLOOD: usize = 130;
    pub const CHEST_XRAY_JUDGEMENT: usize = 131;
    pub const CHEST_XRAY_FINDINGS: usize = 132;
    pub const HEARING_R_1000: usize = 133;
    pub const HEARING_R_4000: usize = 134;
    pub const HEARING_L_1000: usize = 135;
    pub const HEARING_L_4000: usize = 136;
    pub const VISION_R_NAKED: usize = 137;
    pub const VISION_L_NAKED: usize = 138;
    pub const VISION_R_CORRECTED: usize = 139;
    pub const VISION_L_CORRECTED: usize = 140;
    pub const WORK_HISTORY: usize = 141;
}
