//! Quote runner for single and batch quoting
//!
//! Pre-loads reference data once, then quotes any number of clients. The
//! runner is where raw client input is made safe for the pricing core:
//! ages are clamped, non-finite numbers zeroed, state fees looked up,
//! ineligible riders dropped and condition ids resolved.

use std::path::Path;

use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use crate::assumptions::{Assumptions, RiderSchedule};
use crate::client::{ClientProfile, ClientRecord, Goal, RiderSet, MAX_AGE, MIN_AGE};
use crate::error::Result;
use crate::plans::{recommend_plans, PlanRecommendation};
use crate::pricing::{round_death_benefit, PremiumEngine, PremiumResult, PricingInputs, MIN_DEATH_BENEFIT};

/// A finished quote for one client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    /// The profile as priced, after sanitisation
    pub profile: ClientProfile,

    /// Death benefit priced and shown: nearest $1,000, at least $1,000
    pub death_benefit: f64,

    /// Premium at the priced death benefit with the client's own riders
    pub premium: PremiumResult,

    pub plans: PlanRecommendation,
}

impl Quote {
    /// Annual base premium before multipliers
    pub fn base_annual(&self) -> f64 {
        self.premium.base_annual()
    }

    pub fn underwriting_label(&self) -> &str {
        &self.premium.underwriting.label
    }

    /// e.g. "Age 1.10 · Smoker 1.00 · Product 1.00 · Cond 1.00 · Term 1.00"
    pub fn factor_summary(&self) -> String {
        let f = &self.premium.factors;
        let mut text = format!(
            "Age {:.2} · Smoker {:.2} · Product {:.2} · Cond {:.2}",
            f.age, f.smoker, f.product, f.conditions
        );
        if self.profile.policy_type.is_term() {
            text.push_str(&format!(" · Term {:.2}", f.term));
        }
        text
    }
}

/// Finite, positive, or zero
fn non_negative(x: f64) -> f64 {
    if x.is_finite() && x > 0.0 {
        x
    } else {
        0.0
    }
}

/// Pre-loaded quote runner
#[derive(Debug, Clone)]
pub struct QuoteRunner {
    assumptions: Assumptions,
    engine: PremiumEngine,
}

impl QuoteRunner {
    /// Runner over the reference data compiled into the binary
    pub fn embedded() -> Result<Self> {
        Ok(Self::with_assumptions(Assumptions::embedded()?))
    }

    /// Runner loading reference data from the default `data/` directory
    pub fn from_json() -> Result<Self> {
        Ok(Self::with_assumptions(Assumptions::from_json()?))
    }

    /// Runner loading reference data from a specific directory
    pub fn from_json_path(path: &Path) -> Result<Self> {
        Ok(Self::with_assumptions(Assumptions::from_json_path(path)?))
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            assumptions,
            engine: PremiumEngine::new(RiderSchedule::STANDARD),
        }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn engine(&self) -> &PremiumEngine {
        &self.engine
    }

    /// Bring a raw profile into the engine's input domain
    pub fn sanitize(&self, profile: &ClientProfile) -> ClientProfile {
        let mut clean = profile.clone();

        clean.age = profile.age.clamp(MIN_AGE, MAX_AGE);
        if clean.age != profile.age {
            debug!("age {} clamped to {}", profile.age, clean.age);
        }

        clean.height_inches = non_negative(profile.height_inches);
        clean.weight_pounds = non_negative(profile.weight_pounds);

        clean.goal = match profile.goal {
            Goal::DeathBenefit(db) => Goal::DeathBenefit(non_negative(db).max(MIN_DEATH_BENEFIT)),
            Goal::TargetPremium(tp) if non_negative(tp) > 0.0 => Goal::TargetPremium(tp),
            Goal::TargetPremium(tp) => {
                debug!("target premium {} not positive, pricing the minimum death benefit", tp);
                Goal::DeathBenefit(MIN_DEATH_BENEFIT)
            }
        };

        let availability = &self.assumptions.product.riders;
        let (riders, dropped): (RiderSet, RiderSet) = profile
            .riders
            .iter()
            .partition(|&&r| availability.is_available(r, profile.state));
        for rider in &dropped {
            debug!("{} rider not available in {}, removed", rider, profile.state.code());
        }
        clean.riders = riders;

        clean
    }

    /// Composer inputs for an already sanitised profile
    pub fn pricing_inputs(&self, profile: &ClientProfile) -> Result<PricingInputs> {
        let conditions = self.assumptions.conditions.resolve(&profile.conditions)?;

        Ok(PricingInputs {
            age: profile.age,
            sex: profile.sex,
            smoker: profile.smoker,
            policy_type: profile.policy_type,
            term: profile.term,
            height_inches: profile.height_inches,
            weight_pounds: profile.weight_pounds,
            conditions,
            riders: profile.riders.clone(),
            policy_fee: self.assumptions.product.fees.monthly_fee(profile.state),
            payment_mode: profile.payment_mode,
        })
    }

    /// Quote one client
    pub fn quote(&self, profile: &ClientProfile) -> Result<Quote> {
        let profile = self.sanitize(profile);
        let inputs = self.pricing_inputs(&profile)?;

        let death_benefit = match profile.goal {
            Goal::TargetPremium(target) => self.engine.solve_death_benefit(target, &inputs),
            Goal::DeathBenefit(db) => round_death_benefit(db),
        };
        let premium = self.engine.compute_premium(&inputs, death_benefit);

        // Tiers in death-benefit mode reuse the rounded death benefit
        let tier_goal = match profile.goal {
            Goal::TargetPremium(_) => profile.goal,
            Goal::DeathBenefit(_) => Goal::DeathBenefit(death_benefit),
        };
        let availability = &self.assumptions.product.riders;
        let plans = recommend_plans(&self.engine, &inputs, tier_goal, |r| {
            availability.is_available(r, profile.state)
        });

        Ok(Quote {
            death_benefit,
            premium,
            plans,
            profile,
        })
    }

    /// Quote many clients in parallel; results keep the input order
    pub fn quote_batch(&self, records: &[ClientRecord]) -> Vec<(String, Result<Quote>)> {
        records
            .par_iter()
            .map(|rec| (rec.client_id.clone(), self.quote(&rec.profile)))
            .collect()
    }
}
