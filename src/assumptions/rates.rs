//! Base rates per $1,000 of death benefit and the independent risk factors
//!
//! Rates are ANNUAL per $1,000 so that modal factors convert them straight
//! to billed amounts. Every factor except the sex adjustment is >= 1.0.

use crate::assumptions::conditions::Condition;
use crate::client::{PolicyType, Sex, SmokerStatus, TermLength};

/// Female rates are 95% of male rates
pub const FEMALE_RATE_ADJUSTMENT: f64 = 0.95;

/// Term rates are quoted on the 20-year curve; longer terms load 1% per extra year
const TERM_REFERENCE_YEARS: u32 = 20;
const TERM_LOAD_PER_YEAR: f64 = 0.01;

/// Age factor loads 1% per year above this age
const AGE_FACTOR_PIVOT: u8 = 30;
const AGE_LOAD_PER_YEAR: f64 = 0.01;

const TERM_SMOKER_FACTOR: f64 = 1.8;
const PERMANENT_SMOKER_FACTOR: f64 = 1.6;

/// Linear-in-age annual rate with a floor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRate {
    /// Minimum annual rate per $1,000
    pub floor: f64,
    /// Annual rate per $1,000 at age 30
    pub rate_at_30: f64,
    /// Change in rate per year of age
    pub slope: f64,
}

impl LinearRate {
    pub fn at_age(&self, age: u8) -> f64 {
        let years_from_30 = age as f64 - 30.0;
        (self.rate_at_30 + self.slope * years_from_30).max(self.floor)
    }
}

const TERM_RATE: LinearRate = LinearRate { floor: 0.36, rate_at_30: 0.72, slope: 0.024 };
const WHOLE_RATE: LinearRate = LinearRate { floor: 0.72, rate_at_30: 1.20, slope: 0.048 };
const UL_RATE: LinearRate = LinearRate { floor: 0.66, rate_at_30: 1.08, slope: 0.042 };
const IUL_RATE: LinearRate = LinearRate { floor: 0.72, rate_at_30: 1.14, slope: 0.042 };
const GUL_RATE: LinearRate = LinearRate { floor: 0.60, rate_at_30: 1.02, slope: 0.036 };

/// Final expense flat annual rates: (age below, rate)
const FINAL_EXPENSE_BANDS: [(u8, f64); 4] = [(50, 1.20), (60, 1.68), (70, 2.64), (80, 4.56)];
const FINAL_EXPENSE_TOP_RATE: f64 = 6.24;

/// The linear rate curve for a product, or None for the age-banded final expense scale
pub fn linear_rate(policy_type: PolicyType) -> Option<LinearRate> {
    match policy_type {
        PolicyType::Term => Some(TERM_RATE),
        PolicyType::Whole => Some(WHOLE_RATE),
        PolicyType::UniversalLife => Some(UL_RATE),
        PolicyType::IndexedUniversalLife => Some(IUL_RATE),
        PolicyType::GuaranteedUniversalLife => Some(GUL_RATE),
        PolicyType::FinalExpense => None,
    }
}

fn final_expense_rate(age: u8) -> f64 {
    FINAL_EXPENSE_BANDS
        .iter()
        .find(|(below, _)| age < *below)
        .map(|(_, rate)| *rate)
        .unwrap_or(FINAL_EXPENSE_TOP_RATE)
}

pub fn sex_adjustment(sex: Sex) -> f64 {
    match sex {
        Sex::Female => FEMALE_RATE_ADJUSTMENT,
        Sex::Male => 1.0,
    }
}

/// Annual base rate per $1,000 of death benefit, before any risk factor
pub fn base_rate_per_1k(age: u8, sex: Sex, policy_type: PolicyType) -> f64 {
    let rate = match linear_rate(policy_type) {
        Some(curve) => curve.at_age(age),
        None => final_expense_rate(age),
    };
    rate * sex_adjustment(sex)
}

/// Load for term periods beyond 20 years; 1.0 for every permanent product
pub fn term_factor(policy_type: PolicyType, term: TermLength) -> f64 {
    if !policy_type.is_term() {
        return 1.0;
    }
    let extra_years = term.years().saturating_sub(TERM_REFERENCE_YEARS);
    1.0 + extra_years as f64 * TERM_LOAD_PER_YEAR
}

pub fn age_factor(age: u8) -> f64 {
    1.0 + age.saturating_sub(AGE_FACTOR_PIVOT) as f64 * AGE_LOAD_PER_YEAR
}

pub fn smoker_factor(policy_type: PolicyType, smoker: SmokerStatus) -> f64 {
    match (smoker, policy_type) {
        (SmokerStatus::NonSmoker, _) => 1.0,
        (SmokerStatus::Smoker, PolicyType::Term) => TERM_SMOKER_FACTOR,
        (SmokerStatus::Smoker, _) => PERMANENT_SMOKER_FACTOR,
    }
}

/// Product of the selected conditions' multipliers (order-independent)
pub fn conditions_multiplier(conditions: &[Condition]) -> f64 {
    conditions.iter().map(|c| c.multiplier).product()
}
