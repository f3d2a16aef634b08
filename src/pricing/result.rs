//! Premium output structures

use serde::{Deserialize, Serialize};

use crate::underwriting::{BmiInfo, UnderwritingResult};

/// Independent multipliers applied to the base premium
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PremiumFactors {
    pub age: f64,
    pub smoker: f64,
    pub product: f64,
    pub conditions: f64,
    /// Term-length load (folded into `base_per_1k`)
    pub term: f64,
}

/// Complete premium for one client at one death benefit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumResult {
    /// Death benefit priced (dollars)
    pub death_benefit: f64,

    /// Annual premium including riders and policy fee
    pub annual: f64,

    /// Amount billed per period: `annual × modal factor`
    pub billed: f64,

    /// Annual rate per $1,000 including the term load
    pub base_per_1k: f64,

    /// Annual riders cost
    pub rider_cost: f64,

    /// Annualized policy fee
    pub policy_fee: f64,

    pub underwriting: UnderwritingResult,

    /// Body-mass index (0 when not provided)
    pub bmi: f64,

    pub bmi_info: BmiInfo,

    pub factors: PremiumFactors,
}

impl PremiumResult {
    /// Annual base premium before any multiplier: `(db / 1000) × base_per_1k`
    pub fn base_annual(&self) -> f64 {
        (self.death_benefit / 1000.0) * self.base_per_1k
    }

    /// Annual premium after multipliers, before riders and policy fee
    pub fn risk_adjusted_annual(&self) -> f64 {
        self.annual - self.rider_cost - self.policy_fee
    }
}
