//! Product features: product loads, modal factors, policy fees and rider availability

use crate::client::{PaymentMode, PolicyType, RiderId, UsState};

/// Annual premium -> billed amount per period
pub const MODAL_FACTOR_ANNUAL: f64 = 1.00;
pub const MODAL_FACTOR_SEMIANNUAL: f64 = 0.52;
pub const MODAL_FACTOR_QUARTERLY: f64 = 0.27;
pub const MODAL_FACTOR_MONTHLY: f64 = 0.09;

/// Monthly policy fee where no state override applies
pub const DEFAULT_POLICY_FEE: f64 = 6.0;

pub fn modal_factor(mode: PaymentMode) -> f64 {
    match mode {
        PaymentMode::Annual => MODAL_FACTOR_ANNUAL,
        PaymentMode::Semiannual => MODAL_FACTOR_SEMIANNUAL,
        PaymentMode::Quarterly => MODAL_FACTOR_QUARTERLY,
        PaymentMode::Monthly => MODAL_FACTOR_MONTHLY,
    }
}

/// Product-line load applied to every premium
pub fn product_factor(policy_type: PolicyType) -> f64 {
    match policy_type {
        PolicyType::Term => 1.00,
        PolicyType::Whole => 1.25,
        PolicyType::UniversalLife => 1.15,
        PolicyType::IndexedUniversalLife => 1.20,
        PolicyType::GuaranteedUniversalLife => 1.10,
        PolicyType::FinalExpense => 1.30,
    }
}

/// Monthly policy fee by state of residence
#[derive(Debug, Clone)]
pub struct PolicyFeeSchedule {
    /// State-specific monthly fees
    overrides: Vec<(UsState, f64)>,
    /// Fee for every other state
    default_fee: f64,
}

impl Default for PolicyFeeSchedule {
    fn default() -> Self {
        Self {
            overrides: vec![
                (UsState::FL, 8.0),
                (UsState::NY, 7.0),
                (UsState::CA, 7.0),
                (UsState::MI, 6.0),
            ],
            default_fee: DEFAULT_POLICY_FEE,
        }
    }
}

impl PolicyFeeSchedule {
    /// Monthly fee; the composer annualizes it
    pub fn monthly_fee(&self, state: UsState) -> f64 {
        self.overrides
            .iter()
            .find(|(st, _)| *st == state)
            .map(|(_, fee)| *fee)
            .unwrap_or(self.default_fee)
    }
}

/// Riders that cannot be issued in a state
#[derive(Debug, Clone)]
pub struct RiderAvailability {
    restricted: Vec<(UsState, RiderId)>,
}

impl Default for RiderAvailability {
    fn default() -> Self {
        Self {
            restricted: vec![(UsState::NY, RiderId::LongTermCare)],
        }
    }
}

impl RiderAvailability {
    pub fn is_available(&self, rider: RiderId, state: UsState) -> bool {
        !self.restricted.contains(&(state, rider))
    }
}

/// Combined product features
#[derive(Debug, Clone, Default)]
pub struct ProductFeatures {
    pub fees: PolicyFeeSchedule,
    pub riders: RiderAvailability,
}
