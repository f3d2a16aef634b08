//! Atlas Pricing - life insurance quoting engine
//!
//! This library provides:
//! - Health assessment (BMI banding) and underwriting classification
//! - Rate tables, product factors and rider pricing
//! - Premium composition and the inverse death-benefit solve
//! - Bronze / Silver / Gold plan recommendation
//! - Single and batch quoting with reference data loaded from JSON
//! - Client export records and printable plan summaries

pub mod error;
pub mod client;
pub mod assumptions;
pub mod underwriting;
pub mod pricing;
pub mod plans;
pub mod quote;
pub mod export;

// Re-export commonly used types
pub use error::{QuoteError, Result};
pub use client::{ClientProfile, Goal, PaymentMode, PolicyType, RiderId, Sex, SmokerStatus, UsState};
pub use assumptions::{Assumptions, Condition, ConditionCatalog, CompanyProfile};
pub use underwriting::{UnderwritingClass, UnderwritingResult};
pub use pricing::{compute_premium, solve_death_benefit, PremiumEngine, PremiumResult, PricingInputs};
pub use plans::{recommend_plans, PlanRecommendation, PlanTier, TierOffer};
pub use quote::{Quote, QuoteRunner};
pub use export::{plan_summary_text, ClientExport};
