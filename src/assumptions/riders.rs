//! Optional rider pricing
//!
//! Riders are priced per month and annualized so they add directly to the
//! annual premium. Percentage riders are charged on the annual premium after
//! all risk multipliers but before riders and the policy fee.

use crate::client::{RiderId, RiderSet};

/// Monthly rider charges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiderSchedule {
    /// Accidental death: per $1,000 of death benefit per month
    pub adb_per_1k: f64,
    /// Waiver of premium: share of the annual base premium, spread monthly
    pub waiver_pct: f64,
    /// Child term: flat per month
    pub child_flat: f64,
    /// Long-term care: share of the annual base premium, spread monthly
    pub ltc_pct: f64,
    /// Long-term care minimum per month
    pub ltc_min: f64,
}

impl RiderSchedule {
    pub const STANDARD: RiderSchedule = RiderSchedule {
        adb_per_1k: 0.02,
        waiver_pct: 0.05,
        child_flat: 5.00,
        ltc_pct: 0.08,
        ltc_min: 10.00,
    };

    /// Monthly charge for one rider
    pub fn monthly_charge(&self, rider: RiderId, death_benefit: f64, base_premium: f64) -> f64 {
        match rider {
            RiderId::AccidentalDeath => (death_benefit / 1000.0) * self.adb_per_1k,
            RiderId::Waiver => base_premium * self.waiver_pct / 12.0,
            RiderId::Child => self.child_flat,
            RiderId::LongTermCare => (base_premium * self.ltc_pct / 12.0).max(self.ltc_min),
        }
    }

    /// Annual cost of the selected riders
    pub fn annual_cost(&self, riders: &RiderSet, death_benefit: f64, base_premium: f64) -> f64 {
        let monthly: f64 = riders
            .iter()
            .map(|&r| self.monthly_charge(r, death_benefit, base_premium))
            .sum();
        monthly * 12.0
    }
}

impl Default for RiderSchedule {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Annual cost of `riders` under the standard schedule
pub fn rider_cost(riders: &RiderSet, death_benefit: f64, base_premium: f64) -> f64 {
    RiderSchedule::STANDARD.annual_cost(riders, death_benefit, base_premium)
}
