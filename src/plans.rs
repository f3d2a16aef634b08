//! Bronze / Silver / Gold plan recommendation
//!
//! Each tier is priced independently from the same base inputs. With a
//! target premium, the tier multiplier scales the premium target and each
//! tier solves for its own death benefit. With a death benefit, every tier
//! prices that death benefit and the multiplier scales the billed result.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::client::{Goal, PaymentMode, RiderId, RiderSet};
use crate::pricing::{PremiumEngine, PremiumResult, PricingInputs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanTier {
    Bronze,
    Silver,
    Gold,
}

impl PlanTier {
    pub const ALL: [PlanTier; 3] = [PlanTier::Bronze, PlanTier::Silver, PlanTier::Gold];

    pub fn multiplier(&self) -> f64 {
        match self {
            PlanTier::Bronze => 0.95,
            PlanTier::Silver => 1.00,
            PlanTier::Gold => 1.08,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlanTier::Bronze => "Bronze",
            PlanTier::Silver => "Silver",
            PlanTier::Gold => "Gold",
        }
    }

    /// Riders included in the tier given the client's own selection:
    /// Bronze none, Silver the selection (Waiver if empty), Gold Waiver + LTC + the selection
    pub fn riders(&self, selected: &RiderSet) -> RiderSet {
        match self {
            PlanTier::Bronze => RiderSet::new(),
            PlanTier::Silver if selected.is_empty() => [RiderId::Waiver].into_iter().collect(),
            PlanTier::Silver => selected.clone(),
            PlanTier::Gold => {
                let mut riders: RiderSet = [RiderId::Waiver, RiderId::LongTermCare].into_iter().collect();
                riders.extend(selected.iter().copied());
                riders
            }
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One priced tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierOffer {
    pub tier: PlanTier,

    pub multiplier: f64,

    /// Riders priced in this tier
    pub riders: RiderSet,

    /// Death benefit offered (dollars)
    pub death_benefit: f64,

    /// Amount billed per period after the tier multiplier
    pub billed: f64,

    /// `billed / modal factor`
    pub annual: f64,

    /// Unscaled premium at the tier's death benefit and riders
    pub premium: PremiumResult,
}

impl TierOffer {
    /// Price shown for the tier: the billed amount when paying monthly, otherwise annual
    pub fn display_price(&self, mode: PaymentMode) -> f64 {
        match mode {
            PaymentMode::Monthly => self.billed,
            _ => self.annual,
        }
    }
}

/// The three tiers for one client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecommendation {
    pub payment_mode: PaymentMode,
    pub offers: Vec<TierOffer>,
}

impl PlanRecommendation {
    pub fn offer(&self, tier: PlanTier) -> Option<&TierOffer> {
        self.offers.iter().find(|o| o.tier == tier)
    }
}

/// Price a single tier
pub fn price_tier<F>(
    engine: &PremiumEngine,
    inputs: &PricingInputs,
    goal: Goal,
    tier: PlanTier,
    rider_allowed: F,
) -> TierOffer
where
    F: Fn(RiderId) -> bool,
{
    let riders: RiderSet = tier
        .riders(&inputs.riders)
        .into_iter()
        .filter(|&r| rider_allowed(r))
        .collect();
    let tier_inputs = inputs.with_riders(riders.clone());
    let multiplier = tier.multiplier();
    let modal = inputs.payment_mode.modal_factor();

    let (death_benefit, billed, premium) = match goal {
        Goal::TargetPremium(target) => {
            let tier_target = target * multiplier;
            let db = engine.solve_death_benefit(tier_target, &tier_inputs);
            let premium = engine.compute_premium(&tier_inputs, db);
            (db, tier_target, premium)
        }
        Goal::DeathBenefit(db) => {
            let premium = engine.compute_premium(&tier_inputs, db);
            (db, premium.billed * multiplier, premium)
        }
    };

    TierOffer {
        tier,
        multiplier,
        riders,
        death_benefit,
        billed,
        annual: billed / modal,
        premium,
    }
}

/// Price Bronze, Silver and Gold; riders for which `rider_allowed` is false are left out
pub fn recommend_plans<F>(
    engine: &PremiumEngine,
    inputs: &PricingInputs,
    goal: Goal,
    rider_allowed: F,
) -> PlanRecommendation
where
    F: Fn(RiderId) -> bool,
{
    let offers = PlanTier::ALL
        .iter()
        .map(|&tier| price_tier(engine, inputs, goal, tier, &rider_allowed))
        .collect();

    PlanRecommendation {
        payment_mode: inputs.payment_mode,
        offers,
    }
}
