//! コード変換テーブル
//!
//! 健診システムの表記（「男」「＋」「はい」など）を提出先のコード値に変換する。
//! 空欄は空欄のまま返し、定義外の値は [`Recoded::Unrecognized`] とする。

/// 変換不能時に出力へ書き込む値
pub const SENTINEL: &str = "err";

/// 変換結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recoded {
    /// 入力が空欄
    Empty,
    /// 変換後コード（空コードを含む）
    Code(&'static str),
    /// 定義外の値
    Unrecognized,
}

impl Recoded {
    /// 出力セルに書く文字列
    pub fn as_cell(&self) -> &'static str {
        match self {
            Recoded::Empty => "",
            Recoded::Code(code) => code,
            Recoded::Unrecognized => SENTINEL,
        }
    }

    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Recoded::Unrecognized)
    }
}

/// 変更不可のコード表
#[derive(Debug)]
pub struct CodeTable {
    /// ログ表示用の名称
    pub name: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl CodeTable {
    pub const fn new(name: &'static str, entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { name, entries }
    }

    /// 完全一致で変換する
    pub fn recode(&self, raw: &str) -> Recoded {
        if raw.is_empty() {
            return Recoded::Empty;
        }
        self.entries
            .iter()
            .find(|(label, _)| *label == raw)
            .map(|&(_, code)| Recoded::Code(code))
            .unwrap_or(Recoded::Unrecognized)
    }

    pub fn entries(&self) -> &'static [(&'static str, &'static str)] {
        self.entries
    }
}

pub static SEX: CodeTable = CodeTable::new("性別", &[("男", "1"), ("女", "2")]);

/// 尿定性（4+以上は3+と同じコードに丸める）
pub static URINE_SATURATED: CodeTable = CodeTable::new(
    "尿定性",
    &[
        ("－", "1"),
        ("+-", "2"),
        ("＋", "3"),
        ("2+", "4"),
        ("3+", "5"),
        ("4+", "5"),
        ("5+", "5"),
    ],
);

/// 尿定性（4+以上を別コードで区別する）
pub static URINE_EXTENDED: CodeTable = CodeTable::new(
    "尿定性",
    &[
        ("－", "1"),
        ("+-", "2"),
        ("＋", "3"),
        ("2+", "4"),
        ("3+", "5"),
        ("4+", "6"),
        ("5+", "7"),
    ],
);

/// 判定区分Ａ〜Ｇ → 所見の有無（1:あり 2:なし）
pub static FINDING: CodeTable = CodeTable::new(
    "所見有無",
    &[
        ("Ａ", "2"),
        ("Ｂ", "1"),
        ("Ｃ", "1"),
        ("Ｄ", "1"),
        ("Ｅ", "1"),
        ("Ｆ", "1"),
        ("Ｇ", "1"),
    ],
);

pub static KEITH_WAGENER: CodeTable = CodeTable::new(
    "キースワグナー分類",
    &[
        ("０", "1"),
        ("Ⅰ", "2"),
        ("Ⅰａ", "2"),
        ("Ⅰｂ", "2"),
        ("Ⅱ", "3"),
        ("Ⅱａ", "3"),
        ("Ⅱｂ", "4"),
        ("Ⅲ", "5"),
        ("Ⅲａ", "5"),
        ("Ⅲｂ", "5"),
        ("Ⅳ", "6"),
        ("Ⅴ", "6"),
    ],
);

/// シェイエ分類（H・S共通）
pub static SCHEIE: CodeTable = CodeTable::new(
    "シェイエ分類",
    &[("０", "1"), ("１", "2"), ("２", "3"), ("３", "4"), ("４", "5")],
);

/// SCOTT分類（「０」は出力なし）
pub static SCOTT: CodeTable = CodeTable::new(
    "SCOTT分類",
    &[
        ("０", ""),
        ("Ⅰ", "1"),
        ("Ⅰａ", "1"),
        ("Ⅰｂ", "2"),
        ("Ⅱ", "3"),
        ("Ⅱａ", "3"),
        ("Ⅱｂ", "3"),
        ("Ⅲ", "4"),
        ("Ⅲａ", "4"),
        ("Ⅲｂ", "5"),
        ("Ⅳ", "6"),
        ("Ⅴ", "7"),
        ("Ⅵ", "9"),
    ],
);

pub static GUIDANCE_LEVEL: CodeTable = CodeTable::new(
    "保健指導レベル",
    &[
        ("積極的支援レベル", "1"),
        ("動機づけ支援レベル", "2"),
        ("情報提供レベル", "3"),
        ("判定不能", "4"),
    ],
);

pub static METABOLIC: CodeTable = CodeTable::new(
    "メタボリックシンドローム判定",
    &[
        ("基準該当", "1"),
        ("予備群該当", "2"),
        ("非該当", "3"),
        ("判定不能", "4"),
    ],
);

pub static YES_NO: CodeTable = CodeTable::new("はい/いいえ", &[("はい", "1"), ("いいえ", "2")]);

pub static EATING_SPEED: CodeTable = CodeTable::new(
    "食べ方",
    &[("速い", "1"), ("普通", "2"), ("遅い", "3")],
);

pub static DRINKING: CodeTable = CodeTable::new(
    "飲酒習慣",
    &[("毎日", "1"), ("時々", "2"), ("飲まない", "3")],
);

pub static DRINK_AMOUNT: CodeTable = CodeTable::new(
    "飲酒量",
    &[
        ("１合未満", "1"),
        ("１～２合未満", "2"),
        ("２～３合未満", "3"),
        ("３合以上", "4"),
    ],
);

pub static LIFESTYLE: CodeTable = CodeTable::new(
    "生活習慣改善意識",
    &[
        ("しない", "1"),
        ("思う", "2"),
        ("始めた", "3"),
        ("６ヶ月経過", "4"),
        ("６ヶ月以上", "5"),
    ],
);

pub static HEARING: CodeTable = CodeTable::new(
    "聴力",
    &[("所見なし", "1"), ("所見あり", "2")],
);

/// 全テーブル（一覧表示・検証用）
pub fn all_tables() -> [&'static CodeTable; 15] {
    [
        &SEX,
        &URINE_SATURATED,
        &URINE_EXTENDED,
        &FINDING,
        &KEITH_WAGENER,
        &SCHEIE,
        &SCOTT,
        &GUIDANCE_LEVEL,
        &METABOLIC,
        &YES_NO,
        &EATING_SPEED,
        &DRINKING,
        &DRINK_AMOUNT,
        &LIFESTYLE,
        &HEARING,
    ]
}
