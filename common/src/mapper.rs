//! レコードマッパー
//!
//! 入力1行を、カタログの列定義に従って出力1行に変換する。
//! 変換中に見つかった問題は [`Issue`] として返し、処理は止めない。

use crate::catalogue::{Catalogue, Column, Derived, FacilityField, Rule};
use crate::code_table::{CodeTable, Recoded, SENTINEL};
use crate::compose::{
    after_meal_flag, era_to_gregorian, format_exam_date, history_entry, join_history,
    join_trimmed, join_words, meal_state, reconcile_bp, route_glucose, symptom_flag, to_narrow,
    BpReading, GlucoseSlots, TEXT_BUDGET,
};
use crate::issue::{Issue, IssueKind};
use crate::source::{field, SourceRecord};
use crate::types::{Company, Facility, TargetRecord};
use crate::variant::FormatVariant;

/// 変換に必要な固定情報
#[derive(Debug, Clone, Copy)]
pub struct MapContext<'a> {
    pub catalogue: &'a Catalogue,
    pub facility: &'a Facility,
    pub company: &'a Company,
}

/// 変換結果
#[derive(Debug, Clone, Default)]
pub struct Mapped {
    pub target: TargetRecord,
    pub issues: Vec<Issue>,
}

/// レコード単位で一度だけ計算する値
struct Facts {
    exam_date: String,
    birth_date: String,
    systolic: BpReading,
    diastolic: BpReading,
    after_meal: bool,
    glucose: GlucoseSlots,
    history_text: String,
    has_history: bool,
    symptom_flag: &'static str,
    symptom_text: String,
}

impl Facts {
    fn compute(record: &SourceRecord, variant: &FormatVariant, issues: &mut Vec<IssueKind>) -> Self {
        let style = variant.date_style;

        let raw_birth = record.get(field::BIRTH_DATE).trim();
        let birth_date = era_to_gregorian(raw_birth, style).unwrap_or_else(|e| {
            issues.push(IssueKind::MalformedDate {
                item: "生年月日",
                value: raw_birth.to_string(),
                reason: e.to_string(),
            });
            SENTINEL.to_string()
        });

        let systolic = blood_pressure(
            record.get(field::SYSTOLIC_1),
            record.get(field::SYSTOLIC_2),
            "収縮期血圧",
            issues,
        );
        let diastolic = blood_pressure(
            record.get(field::DIASTOLIC_1),
            record.get(field::DIASTOLIC_2),
            "拡張期血圧",
            issues,
        );

        let meal = meal_state(
            record.get(field::ATE_FLAG).trim(),
            record.get(field::HOURS_SINCE_MEAL),
        );
        if let Some(value) = meal.unparsed_hours {
            issues.push(IssueKind::NonNumeric { item: "食後経過時間", value });
        }

        let glucose = route_glucose(
            record.get(field::GLUCOSE),
            record.get(field::HBA1C),
            meal.after_meal,
        );
        // 随時血糖のみではHbA1cが必要
        if glucose.random.is_some() && glucose.hba1c.is_none() {
            issues.push(IssueKind::Missing { item: "HbA1c(食後採血)" });
        }

        let triplets: Vec<(&str, &str, &str)> = field::HISTORY
            .iter()
            .map(|[name, age, treatment]| (record.get(*name), record.get(*age), record.get(*treatment)))
            .collect();
        let history = join_history(&triplets, variant.history_separator, TEXT_BUDGET);
        if history.truncated {
            issues.push(IssueKind::Truncated { item: "既往歴" });
        }
        let has_history = triplets
            .iter()
            .any(|(name, age, treatment)| history_entry(name, age, treatment).is_some());

        let segments: Vec<&str> = field::SYMPTOMS.iter().map(|pos| record.get(*pos)).collect();
        let symptoms = join_words(&segments, TEXT_BUDGET);
        if symptoms.truncated {
            issues.push(IssueKind::Truncated { item: "自覚症状" });
        }

        Self {
            exam_date: format_exam_date(record.get(field::EXAM_DATE), style),
            birth_date,
            systolic,
            diastolic,
            after_meal: meal.after_meal,
            glucose,
            history_text: history.text,
            has_history,
            symptom_flag: symptom_flag(&segments.join(" ")),
            symptom_text: symptoms.text,
        }
    }

    fn value(&self, derived: Derived, company: &Company) -> String {
        match derived {
            Derived::ExamDate => self.exam_date.clone(),
            Derived::BirthDate => self.birth_date.clone(),
            Derived::SystolicFlag => self.systolic.flag.to_string(),
            Derived::Systolic => self.systolic.value.clone(),
            Derived::DiastolicFlag => self.diastolic.flag.to_string(),
            Derived::Diastolic => self.diastolic.value.clone(),
            Derived::FastingGlucoseMethod => self.glucose.fasting_method().to_string(),
            Derived::FastingGlucose => self.glucose.fasting_value().to_string(),
            Derived::RandomGlucoseMethod => self.glucose.random_method().to_string(),
            Derived::RandomGlucose => self.glucose.random_value().to_string(),
            Derived::HbA1cMethod => self.glucose.hba1c_method().to_string(),
            Derived::HbA1c => self.glucose.hba1c_value().to_string(),
            Derived::PostMealSample => after_meal_flag(self.after_meal).to_string(),
            Derived::HistoryText => self.history_text.clone(),
            Derived::HistoryFlag => (if self.has_history { "1" } else { "2" }).to_string(),
            Derived::SymptomFlag => self.symptom_flag.to_string(),
            Derived::SymptomText => self.symptom_text.clone(),
            Derived::CompanyName => company.name.clone(),
        }
    }
}

fn blood_pressure(
    first: &str,
    second: &str,
    item: &'static str,
    issues: &mut Vec<IssueKind>,
) -> BpReading {
    reconcile_bp(first, second).unwrap_or_else(|value| {
        issues.push(IssueKind::NonNumeric { item, value });
        BpReading::default()
    })
}

fn facility_value(facility: &Facility, field: FacilityField) -> &str {
    match field {
        FacilityField::Number => &facility.number,
        FacilityField::Name => &facility.name,
        FacilityField::ZipCode => &facility.zip_code,
        FacilityField::Address => &facility.address,
        FacilityField::Phone => &facility.phone,
        FacilityField::Physician => &facility.physician,
    }
}

fn recode(
    table: &CodeTable,
    raw: &str,
    item: &'static str,
    issues: &mut Vec<IssueKind>,
) -> String {
    let recoded = table.recode(raw);
    if let Recoded::Unrecognized = recoded {
        issues.push(IssueKind::Unrecognized { item, value: raw.to_string() });
    }
    recoded.as_cell().to_string()
}

fn cell(
    column: &Column,
    record: &SourceRecord,
    facts: &Facts,
    ctx: &MapContext<'_>,
    issues: &mut Vec<IssueKind>,
) -> String {
    let raw = move |pos: usize| record.get(pos).trim();

    match column.rule {
        Rule::Blank => String::new(),
        Rule::Literal(value) => value.to_string(),
        Rule::Facility(field) => facility_value(ctx.facility, field).to_string(),
        Rule::Copy(pos) => raw(pos).to_string(),
        Rule::Narrow(pos) => to_narrow(raw(pos)),
        Rule::Recode(pos, table) => recode(table, raw(pos), column.label, issues),
        Rule::Urine(pos) => recode(
            ctx.catalogue.variant.urine_table,
            raw(pos),
            column.label,
            issues,
        ),
        Rule::MethodIf(pos, code) => {
            if raw(pos).is_empty() {
                String::new()
            } else {
                code.to_string()
            }
        }
        Rule::Join { fields, sep, gate } => {
            if gate.is_some_and(|g| raw(g).is_empty()) {
                return String::new();
            }
            let parts: Vec<&str> = fields.iter().map(|pos| record.get(*pos)).collect();
            join_trimmed(&parts, sep)
        }
        Rule::Derive(derived) => facts.value(derived, ctx.company),
    }
}

/// 入力1行を出力1行に変換する
pub fn map_record(record: &SourceRecord, ctx: &MapContext<'_>) -> Mapped {
    let mut kinds = Vec::new();
    let facts = Facts::compute(record, &ctx.catalogue.variant, &mut kinds);
    let mut target = TargetRecord::new();

    for column in ctx.catalogue.columns().iter().filter(|c| !c.is_blank()) {
        let value = cell(column, record, &facts, ctx, &mut kinds);
        if column.required && value.is_empty() {
            kinds.push(IssueKind::Missing { item: column.label });
        }
        target.set(column.id, value);
    }

    for check in ctx.catalogue.checks() {
        if check.any_of.iter().all(|pos| record.get(*pos).trim().is_empty()) {
            kinds.push(IssueKind::Missing { item: check.item });
        }
    }

    let person = record.person();
    Mapped {
        target,
        issues: kinds.into_iter().map(|kind| Issue::new(person, kind)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture;
    use crate::variant::VariantKind;

    fn map_as(kind: VariantKind, record: &SourceRecord) -> Mapped {
        let catalogue = Catalogue::build(FormatVariant::get(kind)).unwrap();
        let facility = Facility::default();
        let company = Company::new("2000100100000001", "株式会社みなと精機");
        let ctx = MapContext {
            catalogue: &catalogue,
            facility: &facility,
            company: &company,
        };
        map_record(record, &ctx)
    }

    fn kinds(mapped: &Mapped) -> Vec<&IssueKind> {
        mapped.issues.iter().map(|i| &i.kind).collect()
    }

    #[test]
    fn test_complete_record_has_no_issues() {
        for kind in VariantKind::ALL {
            let mapped = map_as(kind, &fixture::sample());
            assert!(mapped.issues.is_empty(), "{}: {:?}", kind, mapped.issues);
        }
    }

    #[test]
    fn test_identity_and_constants() {
        let mapped = map_as(VariantKind::Kenpo, &fixture::sample());
        let t = &mapped.target;
        assert_eq!(t.get("JISSHI_KBN"), "1");
        assert_eq!(t.get("PROGRAM_TYPE"), "030");
        assert_eq!(t.get("FACILITY_NAME"), Facility::default().name);
        assert_eq!(t.get("PHYSICIAN"), Facility::default().physician);
        assert_eq!(t.get("NAME_KANA"), "ケンシン タロウ");
        assert_eq!(t.get("NAME_KANJI"), "健診　太郎");
        assert_eq!(t.get("SEX"), "1");
        assert_eq!(t.get("ADDRESS"), "東京都千代田区　千代田１－１");
    }

    #[test]
    fn test_dates_follow_variant_style() {
        let record = fixture::sample();
        let kenpo = map_as(VariantKind::Kenpo, &record);
        assert_eq!(kenpo.target.get("BIRTH_DATE"), "19700102");
        assert_eq!(kenpo.target.get("EXAM_DATE"), "20240520");

        let sangyoui = map_as(VariantKind::Sangyoui, &record);
        assert_eq!(sangyoui.target.get("BIRTH_DATE"), "1970/01/02");
        assert_eq!(sangyoui.target.get("EXAM_DATE"), "2024/05/20");
    }

    #[test]
    fn test_malformed_birth_date_writes_sentinel() {
        let record = fixture::with(&[(field::BIRTH_DATE, "R02.01.01")]);
        let mapped = map_as(VariantKind::Kenpo, &record);
        assert_eq!(mapped.target.get("BIRTH_DATE"), SENTINEL);
        let issues = kinds(&mapped);
        assert!(matches!(
            issues.as_slice(),
            [IssueKind::MalformedDate { item: "生年月日", .. }]
        ));
        assert_eq!(mapped.issues[0].name, "健診　太郎");
        assert_eq!(mapped.issues[0].insurer_number, "06139999");
    }

    #[test]
    fn test_blood_pressure_average_and_single() {
        let mapped = map_as(VariantKind::Kenpo, &fixture::sample());
        assert_eq!(mapped.target.get("SBP_KBN"), "1");
        assert_eq!(mapped.target.get("SBP"), "125");
        assert_eq!(mapped.target.get("DBP"), "82");

        let record = fixture::with(&[(field::SYSTOLIC_2, ""), (field::DIASTOLIC_2, "")]);
        let mapped = map_as(VariantKind::Kenpo, &record);
        assert_eq!(mapped.target.get("SBP_KBN"), "2");
        assert_eq!(mapped.target.get("SBP"), "120");
        assert_eq!(mapped.target.get("DBP"), "80");
    }

    #[test]
    fn test_non_numeric_blood_pressure_leaves_cells_empty() {
        let record = fixture::with(&[(field::SYSTOLIC_2, "測定不可")]);
        let mapped = map_as(VariantKind::Kenpo, &record);
        assert_eq!(mapped.target.get("SBP_KBN"), "");
        assert_eq!(mapped.target.get("SBP"), "");
        assert_eq!(mapped.target.get("DBP"), "82");
        assert_eq!(
            kinds(&mapped),
            vec![&IssueKind::NonNumeric { item: "収縮期血圧", value: "測定不可".into() }]
        );
    }

    #[test]
    fn test_after_meal_routes_to_random_glucose() {
        let record = fixture::with(&[(field::ATE_FLAG, "とった"), (field::HOURS_SINCE_MEAL, "8")]);
        let t = map_as(VariantKind::Kenpo, &record).target;
        assert_eq!(t.get("FBS_METHOD"), "");
        assert_eq!(t.get("FBS"), "");
        assert_eq!(t.get("RBS_METHOD"), "01");
        assert_eq!(t.get("RBS"), "95");
        assert_eq!(t.get("HBA1C_METHOD"), "14");
        assert_eq!(t.get("POST_MEAL"), "1");
    }

    #[test]
    fn test_long_fast_routes_to_fasting_glucose() {
        let record = fixture::with(&[(field::ATE_FLAG, "とった"), (field::HOURS_SINCE_MEAL, "12")]);
        let t = map_as(VariantKind::Kenpo, &record).target;
        assert_eq!(t.get("FBS_METHOD"), "01");
        assert_eq!(t.get("FBS"), "95");
        assert_eq!(t.get("RBS"), "");
        assert_eq!(t.get("POST_MEAL"), "2");
    }

    #[test]
    fn test_unparsed_hours_count_as_zero_and_are_logged() {
        let record = fixture::with(&[(field::ATE_FLAG, "とった"), (field::HOURS_SINCE_MEAL, "朝食後")]);
        let mapped = map_as(VariantKind::Kenpo, &record);
        assert_eq!(mapped.target.get("RBS"), "95");
        assert_eq!(
            kinds(&mapped),
            vec![&IssueKind::NonNumeric { item: "食後経過時間", value: "朝食後".into() }]
        );
    }

    #[test]
    fn test_random_glucose_without_hba1c_is_flagged() {
        let record = fixture::with(&[
            (field::ATE_FLAG, "とった"),
            (field::HOURS_SINCE_MEAL, "2"),
            (field::HBA1C, ""),
        ]);
        let mapped = map_as(VariantKind::Kenpo, &record);
        assert_eq!(kinds(&mapped), vec![&IssueKind::Missing { item: "HbA1c(食後採血)" }]);
    }

    #[test]
    fn test_missing_glucose_and_hba1c_is_one_issue() {
        let record = fixture::with(&[(field::GLUCOSE, ""), (field::HBA1C, "")]);
        let mapped = map_as(VariantKind::Kenpo, &record);
        assert_eq!(kinds(&mapped), vec![&IssueKind::Missing { item: "血糖・HbA1c" }]);
        assert_eq!(mapped.target.get("POST_MEAL"), "2");
    }

    #[test]
    fn test_missing_required_value_is_logged_and_left_empty() {
        let record = fixture::with(&[(field::HEIGHT, "")]);
        let mapped = map_as(VariantKind::Kenpo, &record);
        assert_eq!(mapped.target.get("HEIGHT"), "");
        assert_eq!(kinds(&mapped), vec![&IssueKind::Missing { item: "身長" }]);
    }

    #[test]
    fn test_missing_gamma_gtp_is_logged() {
        let record = fixture::with(&[(field::GAMMA_GTP, "")]);
        let mapped = map_as(VariantKind::Kenpo, &record);
        assert_eq!(mapped.target.get("GGT"), "");
        assert_eq!(mapped.target.get("GGT_METHOD"), "");
        assert_eq!(kinds(&mapped), vec![&IssueKind::Missing { item: "γ-GT(γ-GTP)" }]);
    }

    #[test]
    fn test_questionnaire_history_then_medication_in_row() {
        let catalogue = Catalogue::build(FormatVariant::get(VariantKind::Kenpo)).unwrap();
        let facility = Facility::default();
        let company = Company::new("2000100100000001", "株式会社みなと精機");
        let ctx = MapContext {
            catalogue: &catalogue,
            facility: &facility,
            company: &company,
        };
        let record = fixture::with(&[(field::Q_STROKE, "はい"), (field::Q_MED_BP, "はい")]);
        let row = catalogue.to_row(&map_record(&record, &ctx).target);

        assert_eq!(row[139], "1");
        assert_eq!(&row[140..143], &["2", "2", "2"]);
        assert_eq!(row[143], "1");
        assert_eq!(&row[144..147], &["2", "2", "2"]);
    }

    #[test]
    fn test_unrecognized_code_writes_sentinel() {
        let record = fixture::with(&[(field::SEX, "不明")]);
        let mapped = map_as(VariantKind::Kenpo, &record);
        assert_eq!(mapped.target.get("SEX"), SENTINEL);
        assert_eq!(
            kinds(&mapped),
            vec![&IssueKind::Unrecognized { item: "男女区分", value: "不明".into() }]
        );
    }

    #[test]
    fn test_urine_table_depends_on_variant() {
        let record = fixture::with(&[(field::URINE_SUGAR, "4+")]);
        assert_eq!(map_as(VariantKind::Kenpo, &record).target.get("URINE_SUGAR"), "5");
        assert_eq!(map_as(VariantKind::Sangyoui, &record).target.get("URINE_SUGAR"), "6");
        assert_eq!(map_as(VariantKind::Kenpo, &record).target.get("URINE_SUGAR_METHOD"), "1");
    }

    #[test]
    fn test_method_codes_only_when_value_present() {
        let record = fixture::with(&[(field::TOTAL_CHOLESTEROL, ""), (field::WAIST, "")]);
        let t = map_as(VariantKind::Kenpo, &record).target;
        assert_eq!(t.get("TC_METHOD"), "");
        assert_eq!(t.get("WAIST_METHOD"), "");
        assert_eq!(t.get("HDL_METHOD"), "01");
        assert_eq!(t.get("GOT_METHOD"), "02");
    }

    #[test]
    fn test_findings_are_gated_by_judgement() {
        let [first, second, ..] = field::ECG_FINDINGS;
        let record = fixture::with(&[
            (field::ECG_JUDGEMENT, "Ｃ"),
            (first, "洞性徐脈"),
            (second, "右脚ブロック"),
        ]);
        let t = map_as(VariantKind::Kenpo, &record).target;
        assert_eq!(t.get("ECG_PRESENCE"), "1");
        assert_eq!(t.get("ECG_FINDINGS"), "洞性徐脈　右脚ブロック");

        let record = fixture::with(&[(field::ECG_JUDGEMENT, ""), (first, "洞性徐脈")]);
        let t = map_as(VariantKind::Kenpo, &record).target;
        assert_eq!(t.get("ECG_PRESENCE"), "");
        assert_eq!(t.get("ECG_FINDINGS"), "");
    }

    #[test]
    fn test_history_separator_depends_on_variant() {
        let [name, age, treatment] = field::HISTORY[1];
        let record = fixture::with(&[(name, "胃潰瘍"), (age, "30"), (treatment, "治癒")]);
        let kenpo = map_as(VariantKind::Kenpo, &record);
        assert_eq!(kenpo.target.get("HISTORY_DETAIL"), "高血圧 45才 服薬中／胃潰瘍 30才 治癒");
        assert_eq!(kenpo.target.get("HISTORY_FLAG"), "1");

        let jinji = map_as(VariantKind::Jinji, &record);
        assert_eq!(jinji.target.get("HISTORY_DETAIL"), "高血圧 45才 服薬中 胃潰瘍 30才 治癒");
    }

    #[test]
    fn test_history_over_budget_is_logged() {
        let [name, age, treatment] = field::HISTORY[1];
        let record = fixture::with(&[
            (name, "慢性閉塞性肺疾患"),
            (age, "50"),
            (treatment, "経過観察中"),
        ]);
        let mapped = map_as(VariantKind::Kenpo, &record);
        let text = mapped.target.get("HISTORY_DETAIL");
        assert_eq!(text, "高血圧 45才 服薬中／慢性閉塞性肺疾患");
        assert!(text.chars().count() <= TEXT_BUDGET);
        assert_eq!(kinds(&mapped), vec![&IssueKind::Truncated { item: "既往歴" }]);
    }

    #[test]
    fn test_no_history() {
        let [name, age, treatment] = field::HISTORY[0];
        let record = fixture::with(&[(name, ""), (age, ""), (treatment, "")]);
        let t = map_as(VariantKind::Kenpo, &record).target;
        assert_eq!(t.get("HISTORY_DETAIL"), "");
        assert_eq!(t.get("HISTORY_FLAG"), "2");
    }

    #[test]
    fn test_parenthesized_only_history_counts_as_none() {
        let [name, age, treatment] = field::HISTORY[0];
        let record = fixture::with(&[(name, "（不明）"), (age, ""), (treatment, "")]);
        let t = map_as(VariantKind::Kenpo, &record).target;
        assert_eq!(t.get("HISTORY_DETAIL"), "");
        assert_eq!(t.get("HISTORY_FLAG"), "2");
    }

    #[test]
    fn test_symptoms() {
        let t = map_as(VariantKind::Kenpo, &fixture::sample()).target;
        assert_eq!(t.get("SYMPTOM_FLAG"), "2");
        assert_eq!(t.get("SYMPTOM_TEXT"), "特になし");

        let record = fixture::with(&[(field::SYMPTOMS[0], "頭痛"), (field::SYMPTOMS[3], "肩こり")]);
        let t = map_as(VariantKind::Kenpo, &record).target;
        assert_eq!(t.get("SYMPTOM_FLAG"), "1");
        assert_eq!(t.get("SYMPTOM_TEXT"), "頭痛 肩こり");
    }

    #[test]
    fn test_company_name_comes_from_catalogue() {
        let record = fixture::with(&[(field::COMPANY_NAME, "旧社名")]);
        let t = map_as(VariantKind::Jinji, &record).target;
        assert_eq!(t.get("COMPANY_NAME"), "株式会社みなと精機");
        assert_eq!(t.get("COMPANY_CODE"), "2000100100000001");
    }

    #[test]
    fn test_extra_blocks() {
        let t = map_as(VariantKind::Sangyoui, &fixture::sample()).target;
        assert_eq!(t.get("HEARING_R_1000"), "1");
        assert_eq!(t.get("VISION_R_NAKED"), "1.2");
        assert_eq!(t.get("CHEST_XRAY_PRESENCE"), "2");
        assert_eq!(t.get("WBC"), "6000");
        assert_eq!(t.get("URINE_OB"), "1");
    }

    #[test]
    fn test_short_record_does_not_panic() {
        let mapped = map_as(VariantKind::Kumiai, &SourceRecord::default());
        assert!(!mapped.issues.is_empty());
        assert_eq!(mapped.target.get("BIRTH_DATE"), "");
        assert_eq!(mapped.target.get("JISSHI_KBN"), "1");
    }
}
