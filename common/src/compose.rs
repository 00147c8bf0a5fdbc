//! 項目合成
//!
//! 複数の入力項目から1つの出力値を組み立てる純粋関数群。
//! - 和暦→西暦変換
//! - 血圧（1回目・2回目）の採用値と区分
//! - 食後判定と血糖・HbA1cの振り分け
//! - 既往歴の連結（25文字上限）
//! - 自覚症状の連結（単語境界で切り詰め）

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// 自由記述欄の文字数上限（コードポイント数）
pub const TEXT_BUDGET: usize = 25;

/// 食事摂取欄の「食べた」を表す値
pub const ATE_TOKEN: &str = "とった";

/// この時間未満なら食後採血とみなす
pub const AFTER_MEAL_HOURS: i64 = 10;

/// 血圧区分: 2回測定の平均
pub const BP_DUAL: &str = "1";
/// 血圧区分: 1回測定
pub const BP_SINGLE: &str = "2";

/// 血糖の測定法コード
pub const GLUCOSE_METHOD: &str = "01";
/// HbA1cの測定法コード
pub const HBA1C_METHOD: &str = "14";

// ============================================
// 日付
// ============================================

/// 出力日付の書式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// YYYYMMDD
    Compact,
    /// YYYY/MM/DD
    Slashed,
}

impl DateStyle {
    fn separator(&self) -> &'static str {
        match self {
            DateStyle::Compact => "",
            DateStyle::Slashed => "/",
        }
    }

    pub fn format(&self, year: i32, month: &str, day: &str) -> String {
        let sep = self.separator();
        format!("{:04}{}{}{}{}", year, sep, month, sep, day)
    }
}

/// 和暦変換エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EraDateError {
    /// 9文字でない
    Length(usize),
    /// 元号記号が M/T/S/H 以外
    UnknownEra(char),
    /// 年が数字でない
    Year(String),
}

impl std::fmt::Display for EraDateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EraDateError::Length(len) => write!(f, "桁数不正({}文字)", len),
            EraDateError::UnknownEra(c) => write!(f, "元号不明({})", c),
            EraDateError::Year(y) => write!(f, "年不正({})", y),
        }
    }
}

/// 元号記号 → 元年の前年（西暦）
fn era_base_year(era: char) -> Option<i32> {
    match era {
        'M' => Some(1867),
        'T' => Some(1911),
        'S' => Some(1925),
        'H' => Some(1988),
        _ => None,
    }
}

/// 和暦（例: `S45.01.02`）を西暦に変換する
///
/// 1文字目が元号、2-3文字目が年、5-6文字目が月、8-9文字目が日。
/// 区切り文字は読み飛ばし、月日はそのまま出力する。空欄は空欄を返す。
pub fn era_to_gregorian(raw: &str, style: DateStyle) -> Result<String, EraDateError> {
    if raw.is_empty() {
        return Ok(String::new());
    }

    let chars: Vec<char> = raw.chars().collect();
    if chars.len() != 9 {
        return Err(EraDateError::Length(chars.len()));
    }

    let base = era_base_year(chars[0]).ok_or(EraDateError::UnknownEra(chars[0]))?;
    let year_str: String = chars[1..3].iter().collect();
    if !year_str.chars().all(|c| c.is_ascii_digit()) {
        return Err(EraDateError::Year(year_str));
    }
    let year: i32 = year_str
        .parse()
        .map_err(|_| EraDateError::Year(year_str.clone()))?;
    let month: String = chars[4..6].iter().collect();
    let day: String = chars[7..9].iter().collect();

    Ok(style.format(base + year, &month, &day))
}

/// 受診日（YYYY-MM-DD）を出力書式に変換
pub fn format_exam_date(raw: &str, style: DateStyle) -> String {
    raw.trim().replace(['-', '/'], style.separator())
}

// ============================================
// 血圧
// ============================================

/// 血圧の採用値
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BpReading {
    /// 区分（1:2回平均 2:1回 空:測定なし）
    pub flag: &'static str,
    pub value: String,
}

/// 1回目・2回目の測定値から採用値を決める
///
/// 両方あれば平均（切り捨て）、片方ならその値、どちらもなければ空。
/// 平均を取る場合に数値でない値があれば、その値を `Err` で返す。
pub fn reconcile_bp(first: &str, second: &str) -> Result<BpReading, String> {
    let first = first.trim();
    let second = second.trim();

    match (first.is_empty(), second.is_empty()) {
        (true, true) => Ok(BpReading::default()),
        (false, true) => Ok(BpReading { flag: BP_SINGLE, value: first.to_string() }),
        (true, false) => Ok(BpReading { flag: BP_SINGLE, value: second.to_string() }),
        (false, false) => {
            let a: i64 = first.parse().map_err(|_| first.to_string())?;
            let b: i64 = second.parse().map_err(|_| second.to_string())?;
            Ok(BpReading { flag: BP_DUAL, value: ((a + b) / 2).to_string() })
        }
    }
}

// ============================================
// 食後判定・血糖振り分け
// ============================================

/// 食事状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealState {
    pub after_meal: bool,
    /// 経過時間欄が数値でなかった場合の元の値
    pub unparsed_hours: Option<String>,
}

/// 食後採血かどうかを判定する
///
/// 血糖の振り分けと「採血時間(食後)」欄は必ずこの判定を使う。
/// 経過時間が空欄または数値でない場合は0時間として扱う。
pub fn meal_state(ate_flag: &str, hours: &str) -> MealState {
    let hours = hours.trim();
    let (elapsed, unparsed_hours) = if hours.is_empty() {
        (0, None)
    } else {
        match hours.parse::<i64>() {
            Ok(h) => (h, None),
            Err(_) => (0, Some(hours.to_string())),
        }
    };

    MealState {
        after_meal: ate_flag == ATE_TOKEN && elapsed < AFTER_MEAL_HOURS,
        unparsed_hours,
    }
}

/// 食後採血かどうか
pub fn is_after_meal(ate_flag: &str, hours: &str) -> bool {
    meal_state(ate_flag, hours).after_meal
}

/// 「採血時間(食後)」欄の値（1:食後 2:それ以外）
pub fn after_meal_flag(after_meal: bool) -> &'static str {
    if after_meal {
        "1"
    } else {
        "2"
    }
}

/// 血糖・HbA1cの出力先
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlucoseSlots {
    pub fasting: Option<String>,
    pub random: Option<String>,
    pub hba1c: Option<String>,
}

impl GlucoseSlots {
    pub fn fasting_method(&self) -> &'static str {
        method_if(&self.fasting, GLUCOSE_METHOD)
    }

    pub fn random_method(&self) -> &'static str {
        method_if(&self.random, GLUCOSE_METHOD)
    }

    pub fn hba1c_method(&self) -> &'static str {
        method_if(&self.hba1c, HBA1C_METHOD)
    }

    pub fn fasting_value(&self) -> &str {
        self.fasting.as_deref().unwrap_or("")
    }

    pub fn random_value(&self) -> &str {
        self.random.as_deref().unwrap_or("")
    }

    pub fn hba1c_value(&self) -> &str {
        self.hba1c.as_deref().unwrap_or("")
    }
}

fn method_if(value: &Option<String>, code: &'static str) -> &'static str {
    if value.is_some() {
        code
    } else {
        ""
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// 血糖を空腹時／随時に振り分ける
pub fn route_glucose(glucose: &str, hba1c: &str, after_meal: bool) -> GlucoseSlots {
    let glucose = non_empty(glucose);
    let (fasting, random) = if after_meal {
        (None, glucose)
    } else {
        (glucose, None)
    };

    GlucoseSlots {
        fasting,
        random,
        hba1c: non_empty(hba1c),
    }
}

// ============================================
// 文字列
// ============================================

/// 全角英数・記号・カナを互換分解（NFKC）で正規化
pub fn to_narrow(text: &str) -> String {
    text.nfkc().collect()
}

/// 区切り文字で連結し、前後の空白（全角含む）を除去
pub fn join_trimmed(parts: &[&str], sep: &str) -> String {
    parts.join(sep).trim().to_string()
}

/// 上限付き連結の結果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Capped {
    pub text: String,
    /// 上限のため一部を落とした
    pub truncated: bool,
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

lazy_static! {
    static ref PARENTHESIZED_RE: Regex = Regex::new(r"\([^()]*\)").unwrap();
    static ref MULTI_SPACE_RE: Regex = Regex::new(r" {2,}").unwrap();
}

/// 括弧書きを除去して空白を詰める
pub fn strip_parenthesized(text: &str) -> String {
    let text = text.replace('（', "(").replace('）', ")");
    let text = PARENTHESIZED_RE.replace_all(&text, "");
    MULTI_SPACE_RE.replace_all(&text, " ").trim().to_string()
}

/// 既往歴1件分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// 病名・発症年齢・治療状況
    pub full: String,
    /// 病名のみ
    pub bare: String,
}

/// 既往歴1件（病名, 発症年齢, 治療状況）を整形する。病名が空なら `None`。
pub fn history_entry(name: &str, age: &str, treatment: &str) -> Option<HistoryEntry> {
    let bare = strip_parenthesized(name);
    if bare.is_empty() {
        return None;
    }

    let age = age.trim();
    let age = if age.is_empty() {
        String::new()
    } else {
        format!("{}才", age)
    };
    let full = strip_parenthesized(&format!("{} {} {}", name, age, treatment));

    Some(HistoryEntry { full, bare })
}

fn append(current: &str, sep: &str, next: &str) -> String {
    if current.is_empty() {
        next.to_string()
    } else {
        format!("{}{}{}", current, sep, next)
    }
}

/// 既往歴を連結する
///
/// 上限を超える場合は病名のみで追加し、病名だけでも収まらなければ
/// 残りはすべて捨てる。途中で切った文字列は出力しない。
pub fn join_history(triplets: &[(&str, &str, &str)], sep: &str, budget: usize) -> Capped {
    let mut text = String::new();
    let mut truncated = false;

    for (name, age, treatment) in triplets {
        let Some(entry) = history_entry(name, age, treatment) else {
            continue;
        };

        let candidate = append(&text, sep, &entry.full);
        if char_len(&candidate) <= budget {
            text = candidate;
            continue;
        }

        truncated = true;
        let candidate = append(&text, sep, &entry.bare);
        if char_len(&candidate) <= budget {
            text = candidate;
            continue;
        }
        break;
    }

    Capped { text, truncated }
}

fn is_word_boundary(c: char) -> bool {
    c == ' ' || c == '　'
}

/// 自覚症状などの区分を空白で連結し、単語境界で上限以内に切り詰める
///
/// 1単語だけで上限を超える場合は空にする。
pub fn join_words(segments: &[&str], budget: usize) -> Capped {
    let mut text = segments
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let mut truncated = false;

    while char_len(&text) > budget {
        truncated = true;
        match text.rfind(is_word_boundary) {
            Some(idx) => text = text[..idx].trim_end_matches(is_word_boundary).to_string(),
            None => text.clear(),
        }
    }

    Capped { text, truncated }
}

/// 自覚症状の有無（1:あり 2:なし）
pub fn symptom_flag(text: &str) -> &'static str {
    if text.trim().is_empty() || text.contains("特になし") {
        "2"
    } else {
        "1"
    }
}
