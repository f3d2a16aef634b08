//! Premium composition and death benefit solving

mod engine;
mod result;
pub mod solver;

pub use engine::{compute_premium, solve_death_benefit, PremiumEngine, PricingInputs};
pub use result::{PremiumFactors, PremiumResult};
pub use solver::{round_death_benefit, MAX_DEATH_BENEFIT, MIN_DEATH_BENEFIT, SOLVER_ITERATIONS};
