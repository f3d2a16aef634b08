//! Premium composer and its inverse
//!
//! ```text
//! base   = (db / 1000) × base_rate_per_1k × term_factor
//! annual = base × age × smoker × product × conditions × underwriting
//! annual += riders(db, annual) + policy_fee × 12
//! billed = annual × modal_factor
//! ```

use crate::assumptions::{
    age_factor, base_rate_per_1k, conditions_multiplier, product_factor, smoker_factor,
    term_factor, Condition, RiderSchedule,
};
use crate::client::{PaymentMode, PolicyType, RiderSet, Sex, SmokerStatus, TermLength};
use crate::underwriting::{bmi, bmi_band, classify};
use super::result::{PremiumFactors, PremiumResult};
use super::solver::{bisect, round_death_benefit, MAX_DEATH_BENEFIT, MIN_DEATH_BENEFIT, SOLVER_ITERATIONS};

/// Everything the composer needs except the death benefit.
///
/// Values are taken as given: age clamping, fee lookup and rider eligibility
/// are the caller's job (see `QuoteRunner`).
#[derive(Debug, Clone, PartialEq)]
pub struct PricingInputs {
    pub age: u8,
    pub sex: Sex,
    pub smoker: SmokerStatus,
    pub policy_type: PolicyType,
    pub term: TermLength,
    pub height_inches: f64,
    pub weight_pounds: f64,
    /// Resolved condition records
    pub conditions: Vec<Condition>,
    pub riders: RiderSet,
    /// Monthly policy fee (dollars)
    pub policy_fee: f64,
    pub payment_mode: PaymentMode,
}

impl PricingInputs {
    /// Same inputs with a different rider selection
    pub fn with_riders(&self, riders: RiderSet) -> Self {
        Self {
            riders,
            ..self.clone()
        }
    }
}

/// Stateless premium engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PremiumEngine {
    riders: RiderSchedule,
}

impl PremiumEngine {
    /// Engine with the standard rider schedule
    pub const STANDARD: PremiumEngine = PremiumEngine { riders: RiderSchedule::STANDARD };

    pub fn new(riders: RiderSchedule) -> Self {
        Self { riders }
    }

    pub fn rider_schedule(&self) -> &RiderSchedule {
        &self.riders
    }

    /// Price `inputs` at `death_benefit`
    pub fn compute_premium(&self, inputs: &PricingInputs, death_benefit: f64) -> PremiumResult {
        let term = term_factor(inputs.policy_type, inputs.term);
        let base_per_1k = base_rate_per_1k(inputs.age, inputs.sex, inputs.policy_type) * term;
        let base = (death_benefit / 1000.0) * base_per_1k;

        let bmi = bmi(inputs.height_inches, inputs.weight_pounds);
        let bmi_info = bmi_band(bmi);
        let underwriting = classify(&inputs.conditions, &bmi_info);

        let factors = PremiumFactors {
            age: age_factor(inputs.age),
            smoker: smoker_factor(inputs.policy_type, inputs.smoker),
            product: product_factor(inputs.policy_type),
            conditions: conditions_multiplier(&inputs.conditions),
            term,
        };

        let risk_adjusted = base
            * factors.age
            * factors.smoker
            * factors.product
            * factors.conditions
            * underwriting.multiplier;

        // Percentage riders are charged on the premium before riders and fee
        let rider_cost = self.riders.annual_cost(&inputs.riders, death_benefit, risk_adjusted);
        let policy_fee = inputs.policy_fee * 12.0;

        let annual = risk_adjusted + rider_cost + policy_fee;
        let billed = annual * inputs.payment_mode.modal_factor();

        PremiumResult {
            death_benefit,
            annual,
            billed,
            base_per_1k,
            rider_cost,
            policy_fee,
            underwriting,
            bmi,
            bmi_info,
            factors,
        }
    }

    /// Death benefit whose billed premium is closest to (not above) `target_billed`,
    /// before rounding
    pub fn solve_death_benefit_exact(&self, target_billed: f64, inputs: &PricingInputs) -> f64 {
        bisect(target_billed, MIN_DEATH_BENEFIT, MAX_DEATH_BENEFIT, SOLVER_ITERATIONS, |db| {
            self.compute_premium(inputs, db).billed
        })
    }

    /// Death benefit a billed premium buys, rounded to the nearest $1,000.
    ///
    /// Targets below the premium at $1,000 return $1,000; targets above the
    /// premium at $5,000,000 return $5,000,000.
    pub fn solve_death_benefit(&self, target_billed: f64, inputs: &PricingInputs) -> f64 {
        round_death_benefit(self.solve_death_benefit_exact(target_billed, inputs))
    }
}

impl Default for PremiumEngine {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Price `inputs` at `death_benefit` with the standard engine
pub fn compute_premium(inputs: &PricingInputs, death_benefit: f64) -> PremiumResult {
    PremiumEngine::STANDARD.compute_premium(inputs, death_benefit)
}

/// Solve for death benefit with the standard engine
pub fn solve_death_benefit(target_billed: f64, inputs: &PricingInputs) -> f64 {
    PremiumEngine::STANDARD.solve_death_benefit(target_billed, inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RiderId;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn term_40_male() -> PricingInputs {
        PricingInputs {
            age: 40,
            sex: Sex::Male,
            smoker: SmokerStatus::NonSmoker,
            policy_type: PolicyType::Term,
            term: TermLength::Twenty,
            height_inches: 0.0,
            weight_pounds: 0.0,
            conditions: Vec::new(),
            riders: RiderSet::new(),
            policy_fee: 6.0,
            payment_mode: PaymentMode::Monthly,
        }
    }

    fn condition(id: &str, class_drop: u32, exclude: bool, multiplier: f64) -> Condition {
        Condition {
            id: id.to_string(),
            label: id.to_string(),
            category: "test".to_string(),
            class_drop,
            exclude,
            multiplier,
            tooltip: None,
        }
    }

    #[test]
    fn test_term_nonsmoker_500k() {
        let r = compute_premium(&term_40_male(), 500_000.0);

        // base = 500 × 0.96 = 480; × age 1.10 = 528; + fee 72 = 600
        assert_relative_eq!(r.base_per_1k, 0.96, epsilon = 1e-12);
        assert_relative_eq!(r.base_annual(), 480.0, epsilon = 1e-9);
        assert_relative_eq!(r.factors.age, 1.10, epsilon = 1e-12);
        assert_eq!(r.factors.smoker, 1.0);
        assert_eq!(r.factors.product, 1.0);
        assert_eq!(r.factors.conditions, 1.0);
        assert_eq!(r.factors.term, 1.0);
        assert_eq!(r.underwriting.label, "Preferred+");
        assert_relative_eq!(r.annual, 600.0, epsilon = 1e-9);
        assert_relative_eq!(r.billed, 54.0, epsilon = 1e-9);
    }

    #[test]
    fn test_term_smoker_500k() {
        let inputs = PricingInputs {
            smoker: SmokerStatus::Smoker,
            ..term_40_male()
        };
        let r = compute_premium(&inputs, 500_000.0);

        // 480 × 1.10 × 1.8 = 950.4; + 72 = 1022.4
        assert_eq!(r.factors.smoker, 1.8);
        assert_relative_eq!(r.annual, 1022.4, epsilon = 1e-9);
        assert_relative_eq!(r.billed, 92.016, epsilon = 1e-9);
    }

    #[test]
    fn test_billed_is_annual_times_modal() {
        for mode in PaymentMode::ALL {
            let inputs = PricingInputs {
                payment_mode: mode,
                ..term_40_male()
            };
            let r = compute_premium(&inputs, 250_000.0);
            assert_eq!(r.billed, r.annual * mode.modal_factor());
        }
    }

    #[test]
    fn test_term_load_applies_to_base_rate() {
        let inputs = PricingInputs {
            term: TermLength::Thirty,
            ..term_40_male()
        };
        let r = compute_premium(&inputs, 100_000.0);
        assert_relative_eq!(r.base_per_1k, 0.96 * 1.10, epsilon = 1e-12);
        assert_relative_eq!(r.factors.term, 1.10, epsilon = 1e-12);
    }

    #[test]
    fn test_riders_priced_on_pre_rider_premium() {
        let inputs = PricingInputs {
            riders: [RiderId::Waiver, RiderId::AccidentalDeath].into_iter().collect(),
            ..term_40_male()
        };
        let r = compute_premium(&inputs, 500_000.0);

        // Waiver on 528 -> 26.4/yr; ADB 500 × 0.02 × 12 = 120/yr
        assert_relative_eq!(r.risk_adjusted_annual(), 528.0, epsilon = 1e-9);
        assert_relative_eq!(r.rider_cost, 146.4, epsilon = 1e-9);
        assert_relative_eq!(r.annual, 528.0 + 146.4 + 72.0, epsilon = 1e-9);
    }

    #[test]
    fn test_substandard_and_conditions_multiply() {
        let inputs = PricingInputs {
            conditions: vec![condition("copd", 3, true, 1.30)],
            policy_fee: 0.0,
            payment_mode: PaymentMode::Annual,
            ..term_40_male()
        };
        let r = compute_premium(&inputs, 100_000.0);

        // drops 3 -> steps 1 -> Table A (1.25); conditions 1.30
        assert_eq!(r.underwriting.label, "Substandard (Table A)");
        assert_relative_eq!(r.annual, 96.0 * 1.10 * 1.30 * 1.25, epsilon = 1e-9);
    }

    #[test]
    fn test_bmi_reported_not_applied() {
        let inputs = PricingInputs {
            height_inches: 66.0,
            weight_pounds: 260.0, // BMI ~42: Obesity III, 3 drops
            ..term_40_male()
        };
        let r = compute_premium(&inputs, 500_000.0);

        assert_eq!(r.bmi_info.label(), "Obesity III");
        assert_eq!(r.bmi_info.multiplier, 1.35);
        assert_eq!(r.underwriting.label, "Substandard (Table A)");
        // Only the table multiplier reaches the premium
        assert_relative_eq!(r.annual, 528.0 * 1.25 + 72.0, epsilon = 1e-9);
    }

    #[test]
    fn test_risk_multipliers_are_loads() {
        let inputs = PricingInputs {
            age: 18,
            sex: Sex::Female,
            smoker: SmokerStatus::Smoker,
            policy_type: PolicyType::FinalExpense,
            height_inches: 60.0,
            weight_pounds: 95.0,
            conditions: vec![condition("asthma", 0, false, 1.05)],
            ..term_40_male()
        };
        let r = compute_premium(&inputs, 20_000.0);
        for m in [
            r.factors.age,
            r.factors.smoker,
            r.factors.product,
            r.factors.conditions,
            r.factors.term,
            r.underwriting.multiplier,
            r.bmi_info.multiplier,
        ] {
            assert!(m >= 1.0, "multiplier {} below 1.0", m);
        }
    }

    #[test]
    fn test_billed_strictly_increasing_in_death_benefit() {
        let inputs = PricingInputs {
            riders: RiderId::ALL.into_iter().collect(),
            conditions: vec![condition("afib", 2, false, 1.10)],
            ..term_40_male()
        };
        let mut prev = f64::NEG_INFINITY;
        for db in (1..=50).map(|k| k as f64 * 100_000.0) {
            let billed = compute_premium(&inputs, db).billed;
            assert!(billed > prev, "billed not increasing at {}", db);
            prev = billed;
        }
    }

    #[test]
    fn test_deterministic() {
        let inputs = PricingInputs {
            riders: RiderId::ALL.into_iter().collect(),
            conditions: vec![condition("a", 1, false, 1.07), condition("b", 1, false, 1.13)],
            height_inches: 69.0,
            weight_pounds: 201.0,
            ..term_40_male()
        };
        let a = compute_premium(&inputs, 333_333.0);
        let b = compute_premium(&inputs, 333_333.0);
        assert_eq!(a, b);
        assert_eq!(a.billed.to_bits(), b.billed.to_bits());
    }

    #[test]
    fn test_solve_below_floor_returns_minimum() {
        // Premium at $1,000 is (0.96 × 1.10 + 72) × 0.09 ≈ $6.58
        let db = solve_death_benefit(5.0, &term_40_male());
        assert_eq!(db, 1_000.0);
    }

    #[test]
    fn test_solve_above_ceiling_returns_maximum() {
        let db = solve_death_benefit(1e9, &term_40_male());
        assert_eq!(db, 5_000_000.0);
    }

    #[test]
    fn test_solve_round_trip() {
        let inputs = term_40_male();
        // Exact solution: (60 / 0.09 - 72) / 1.056 × 1000 ≈ 563,131
        let exact = PremiumEngine::STANDARD.solve_death_benefit_exact(60.0, &inputs);
        assert_abs_diff_eq!(compute_premium(&inputs, exact).billed, 60.0, epsilon = 0.01);

        let rounded = solve_death_benefit(60.0, &inputs);
        assert_eq!(rounded, 563_000.0);
        assert_abs_diff_eq!(compute_premium(&inputs, rounded).billed, 60.0, epsilon = 1.0);
    }

    #[test]
    fn test_solve_round_trip_with_riders_and_table() {
        let inputs = PricingInputs {
            policy_type: PolicyType::Whole,
            riders: [RiderId::AccidentalDeath, RiderId::Waiver, RiderId::LongTermCare]
                .into_iter()
                .collect(),
            conditions: vec![condition("chf", 1, true, 1.20)],
            ..term_40_male()
        };
        for target in [40.0, 150.0, 900.0] {
            let db = PremiumEngine::STANDARD.solve_death_benefit_exact(target, &inputs);
            assert!(db > MIN_DEATH_BENEFIT && db < MAX_DEATH_BENEFIT);
            assert_abs_diff_eq!(compute_premium(&inputs, db).billed, target, epsilon = 0.01);
        }
    }

    #[test]
    fn test_custom_rider_schedule() {
        let engine = PremiumEngine::new(RiderSchedule {
            child_flat: 8.0,
            ..RiderSchedule::STANDARD
        });
        assert_eq!(engine.rider_schedule().child_flat, 8.0);

        let inputs = PricingInputs {
            riders: [RiderId::Child].into_iter().collect(),
            ..term_40_male()
        };
        let r = engine.compute_premium(&inputs, 500_000.0);
        assert_relative_eq!(r.rider_cost, 96.0, epsilon = 1e-12);
        assert_relative_eq!(r.annual, 528.0 + 96.0 + 72.0, epsilon = 1e-9);
    }
}
