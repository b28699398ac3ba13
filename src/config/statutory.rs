//! Built-in FY2025 (令和7年度) statutory tables.
//!
//! These are the tables the engine uses unless a caller loads another table
//! set with [`ConfigLoader`](super::ConfigLoader). They are built once, on
//! first use, and shared read-only for the lifetime of the process.

use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{
    GradeEntry, GradeTable, IncomeTaxRules, LinearBracket, LinearSchedule, Prefecture,
    PrefectureTable, RateTables, ResidentTaxRules, SocialInsuranceRates, SourceReference,
    StepSchedule, StepTier, TableMetadata,
};

/// Code of the prefecture used for unknown codes (Tokyo).
pub const DEFAULT_PREFECTURE_CODE: &str = "13";

const DEFAULT_PREFECTURE_INDEX: usize = 12;

/// Kyokai Kenpo health insurance rates by prefecture, in hundredths of a percent.
const PREFECTURES: [(&str, &str, i64); 47] = [
    ("01", "北海道", 1031),
    ("02", "青森県", 985),
    ("03", "岩手県", 962),
    ("04", "宮城県", 1011),
    ("05", "秋田県", 1001),
    ("06", "山形県", 975),
    ("07", "福島県", 962),
    ("08", "茨城県", 967),
    ("09", "栃木県", 982),
    ("10", "群馬県", 977),
    ("11", "埼玉県", 976),
    ("12", "千葉県", 979),
    ("13", "東京都", 991),
    ("14", "神奈川県", 992),
    ("15", "新潟県", 955),
    ("16", "富山県", 965),
    ("17", "石川県", 988),
    ("18", "福井県", 994),
    ("19", "山梨県", 989),
    ("20", "長野県", 969),
    ("21", "岐阜県", 993),
    ("22", "静岡県", 980),
    ("23", "愛知県", 1003),
    ("24", "三重県", 999),
    ("25", "滋賀県", 997),
    ("26", "京都府", 1003),
    ("27", "大阪府", 1024),
    ("28", "兵庫県", 1016),
    ("29", "奈良県", 1002),
    ("30", "和歌山県", 1019),
    ("31", "鳥取県", 993),
    ("32", "島根県", 994),
    ("33", "岡山県", 1017),
    ("34", "広島県", 997),
    ("35", "山口県", 1036),
    ("36", "徳島県", 1047),
    ("37", "香川県", 1021),
    ("38", "愛媛県", 1018),
    ("39", "高知県", 1013),
    ("40", "福岡県", 1031),
    ("41", "佐賀県", 1078),
    ("42", "長崎県", 1041),
    ("43", "熊本県", 1012),
    ("44", "大分県", 1025),
    ("45", "宮崎県", 1009),
    ("46", "鹿児島県", 1031),
    ("47", "沖縄県", 944),
];

/// Health insurance grades as `(grade, standard monthly amount, lower bound)`.
///
/// Each grade ends where the next one starts; the last grade is unbounded.
const HEALTH_GRADES: [(u32, i64, i64); 50] = [
    (1, 58_000, 0),
    (2, 68_000, 63_000),
    (3, 78_000, 73_000),
    (4, 88_000, 83_000),
    (5, 98_000, 93_000),
    (6, 104_000, 101_000),
    (7, 110_000, 107_000),
    (8, 118_000, 114_000),
    (9, 126_000, 122_000),
    (10, 134_000, 130_000),
    (11, 142_000, 138_000),
    (12, 150_000, 146_000),
    (13, 160_000, 155_000),
    (14, 170_000, 165_000),
    (15, 180_000, 175_000),
    (16, 190_000, 185_000),
    (17, 200_000, 195_000),
    (18, 220_000, 210_000),
    (19, 240_000, 230_000),
    (20, 260_000, 250_000),
    (21, 280_000, 270_000),
    (22, 300_000, 290_000),
    (23, 320_000, 310_000),
    (24, 340_000, 330_000),
    (25, 360_000, 350_000),
    (26, 380_000, 370_000),
    (27, 410_000, 395_000),
    (28, 440_000, 425_000),
    (29, 470_000, 455_000),
    (30, 500_000, 485_000),
    (31, 530_000, 515_000),
    (32, 560_000, 545_000),
    (33, 590_000, 575_000),
    (34, 620_000, 605_000),
    (35, 650_000, 635_000),
    (36, 680_000, 665_000),
    (37, 710_000, 695_000),
    (38, 750_000, 730_000),
    (39, 790_000, 770_000),
    (40, 830_000, 810_000),
    (41, 880_000, 855_000),
    (42, 930_000, 905_000),
    (43, 980_000, 955_000),
    (44, 1_030_000, 1_005_000),
    (45, 1_090_000, 1_055_000),
    (46, 1_150_000, 1_115_000),
    (47, 1_210_000, 1_175_000),
    (48, 1_270_000, 1_235_000),
    (49, 1_330_000, 1_295_000),
    (50, 1_390_000, 1_355_000),
];

const PENSION_STANDARD_FLOOR: i64 = 88_000;
const PENSION_STANDARD_CEILING: i64 = 650_000;

/// Salary-income deduction from 2025 onwards, keyed on annual income.
/// `(upper bound, rate in percent, subtract)`; flat tiers subtract a negative.
const SALARY_DEDUCTION: [(i64, i64, i64); 4] = [
    (1_900_000, 0, -650_000),
    (3_600_000, 30, -80_000),
    (6_600_000, 20, -440_000),
    (8_500_000, 10, -1_100_000),
];
const SALARY_DEDUCTION_CAP: (i64, i64) = (0, -1_950_000);

/// Income tax quick-calculation table `(upper bound, rate in percent, subtract)`.
const INCOME_TAX_BRACKETS: [(i64, i64, i64); 6] = [
    (1_949_000, 5, 0),
    (3_299_000, 10, 97_500),
    (6_949_000, 20, 427_500),
    (8_999_000, 23, 636_000),
    (17_999_000, 33, 1_536_000),
    (39_999_000, 40, 2_796_000),
];
const INCOME_TAX_TOP_BRACKET: (i64, i64) = (45, 4_796_000);

/// Income tax basic deduction keyed on salary income. The lowest tier
/// includes the 2025/2026 special addition.
const INCOME_TAX_BASIC_DEDUCTION: [(i64, i64); 6] = [
    (1_320_000, 950_000),
    (6_550_000, 580_000),
    (23_500_000, 480_000),
    (24_000_000, 480_000),
    (24_500_000, 320_000),
    (25_000_000, 160_000),
];

const INCOME_TAX_TRUNCATION_UNIT: i64 = 1_000;

/// Reconstruction special income tax, 2.1% of the base tax.
const SURTAX_RATE_PER_MILLE: i64 = 21;

/// Resident tax basic deduction keyed on salary income.
const RESIDENT_TAX_BASIC_DEDUCTION: [(i64, i64); 3] = [
    (24_000_000, 430_000),
    (24_500_000, 290_000),
    (25_000_000, 150_000),
];

const RESIDENT_TAX_LEVY_PERCENT: i64 = 10;

// Flat simplification of the adjustment credit: 50,000 yen basic deduction gap × 5%.
const RESIDENT_TAX_ADJUSTMENT_CREDIT: i64 = 2_500;

// Municipal 3,000 + prefectural 1,500 + forest environment tax 1,000.
const RESIDENT_TAX_PER_CAPITA_LEVY: i64 = 5_500;

const SOURCES: [(&str, &str); 6] = [
    (
        "health_insurance_rates",
        "https://www.kyoukaikenpo.or.jp/g7/cat330/sb3130/r07/250214/",
    ),
    (
        "pension_rates",
        "https://www.nenkin.go.jp/service/kounen/hokenryo/ryogaku/ryogakuhyo/index.html",
    ),
    (
        "employment_insurance_rates",
        "https://www.mhlw.go.jp/content/001401966.pdf",
    ),
    (
        "income_tax_rates",
        "https://www.nta.go.jp/taxes/shiraberu/taxanswer/shotoku/2260.htm",
    ),
    (
        "salary_income_deduction",
        "https://www.nta.go.jp/taxes/shiraberu/taxanswer/shotoku/1410.htm",
    ),
    (
        "basic_deduction",
        "https://www.nta.go.jp/users/gensen/2025kiso/index.htm",
    ),
];

static BUILTIN: LazyLock<RateTables> = LazyLock::new(fy2025);

/// Returns the built-in FY2025 tables.
///
/// # Example
///
/// ```
/// use take_home_engine::config::builtin;
///
/// let tables = builtin();
/// assert_eq!(tables.prefectures().all().len(), 47);
/// assert_eq!(tables.prefectures().default_prefecture().code, "13");
/// ```
pub fn builtin() -> &'static RateTables {
    &BUILTIN
}

fn yen(amount: i64) -> Decimal {
    Decimal::from(amount)
}

fn linear_schedule(bounded: &[(i64, i64, i64)], (rate, subtract): (i64, i64)) -> LinearSchedule {
    LinearSchedule {
        bounded: bounded
            .iter()
            .map(|&(up_to, percent, subtract)| LinearBracket {
                up_to: Some(yen(up_to)),
                rate: Decimal::new(percent, 2),
                subtract: yen(subtract),
            })
            .collect(),
        open: LinearBracket {
            up_to: None,
            rate: Decimal::new(rate, 2),
            subtract: yen(subtract),
        },
    }
}

/// Step schedules here all fall to zero above their last threshold.
fn step_schedule(bounded: &[(i64, i64)]) -> StepSchedule {
    StepSchedule {
        bounded: bounded
            .iter()
            .map(|&(up_to, amount)| StepTier {
                up_to: Some(yen(up_to)),
                amount: yen(amount),
            })
            .collect(),
        open: StepTier {
            up_to: None,
            amount: Decimal::ZERO,
        },
    }
}

fn prefecture(&(code, name, hundredths): &(&str, &str, i64)) -> Prefecture {
    Prefecture {
        code: code.to_string(),
        name: name.to_string(),
        health_insurance_rate_percent: Decimal::new(hundredths, 2),
    }
}

fn grade_table() -> GradeTable {
    let (top_grade, top_standard, top_lower) = HEALTH_GRADES[HEALTH_GRADES.len() - 1];
    GradeTable {
        bounded: HEALTH_GRADES
            .windows(2)
            .map(|pair| {
                let (grade, standard, lower) = pair[0];
                let (_, _, next_lower) = pair[1];
                GradeEntry {
                    grade,
                    standard_monthly: yen(standard),
                    lower_bound: yen(lower),
                    upper_bound: Some(yen(next_lower)),
                }
            })
            .collect(),
        top: GradeEntry {
            grade: top_grade,
            standard_monthly: yen(top_standard),
            lower_bound: yen(top_lower),
            upper_bound: None,
        },
    }
}

/// Builds the FY2025 table set. Every table here is exhaustive by construction.
fn fy2025() -> RateTables {
    let metadata = TableMetadata {
        revision: "FY2025".to_string(),
        name: "令和7年度 給与手取り計算".to_string(),
        effective_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap_or_default(),
        sources: SOURCES
            .iter()
            .map(|&(topic, url)| SourceReference {
                topic: topic.to_string(),
                url: url.to_string(),
            })
            .collect(),
    };

    let prefectures = PrefectureTable {
        prefectures: PREFECTURES.iter().map(prefecture).collect(),
        default: prefecture(&PREFECTURES[DEFAULT_PREFECTURE_INDEX]),
    };

    let social_insurance = SocialInsuranceRates {
        pension_rate: Decimal::new(183, 3),
        nursing_care_rate: Decimal::new(159, 4),
        employment_insurance_rate: Decimal::new(55, 4),
        pension_standard_floor: yen(PENSION_STANDARD_FLOOR),
        pension_standard_ceiling: yen(PENSION_STANDARD_CEILING),
    };

    let income_tax = IncomeTaxRules {
        basic_deduction: step_schedule(&INCOME_TAX_BASIC_DEDUCTION),
        brackets: linear_schedule(&INCOME_TAX_BRACKETS, INCOME_TAX_TOP_BRACKET),
        truncation_unit: yen(INCOME_TAX_TRUNCATION_UNIT),
        surtax_rate: Decimal::new(SURTAX_RATE_PER_MILLE, 3),
    };

    let resident_tax = ResidentTaxRules {
        basic_deduction: step_schedule(&RESIDENT_TAX_BASIC_DEDUCTION),
        income_levy_rate: Decimal::new(RESIDENT_TAX_LEVY_PERCENT, 2),
        adjustment_credit: yen(RESIDENT_TAX_ADJUSTMENT_CREDIT),
        per_capita_levy: yen(RESIDENT_TAX_PER_CAPITA_LEVY),
    };

    RateTables::from_parts(
        metadata,
        prefectures,
        grade_table(),
        social_insurance,
        linear_schedule(&SALARY_DEDUCTION, SALARY_DEDUCTION_CAP),
        income_tax,
        resident_tax,
    )
}
