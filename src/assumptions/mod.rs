//! Pricing assumptions: rate tables, product features, riders and reference data

pub mod rates;
pub mod product;
mod riders;
mod conditions;
mod company;
pub mod loader;

pub use rates::{
    age_factor, base_rate_per_1k, conditions_multiplier, smoker_factor, term_factor, LinearRate,
};
pub use product::{modal_factor, product_factor, PolicyFeeSchedule, ProductFeatures, RiderAvailability};
pub use riders::{rider_cost, RiderSchedule};
pub use conditions::{Condition, ConditionCatalog, ConditionCategory};
pub use company::{Brand, CompanyProfile, Contact, Objection, Persona, Testimonial};
pub use loader::LoadedReferenceData;

use std::path::Path;

use crate::error::Result;

/// Container for everything a quote needs besides the client
#[derive(Debug, Clone)]
pub struct Assumptions {
    pub conditions: ConditionCatalog,
    pub company: CompanyProfile,
    pub objections: Vec<Objection>,
    pub product: ProductFeatures,
}

impl Assumptions {
    /// Assumptions built from the reference data compiled into the binary
    pub fn embedded() -> Result<Self> {
        Ok(Self::from_loaded(LoadedReferenceData::embedded()?))
    }

    /// Load reference data from the default location (data/), with embedded fallback
    pub fn from_json() -> Result<Self> {
        Ok(Self::from_loaded(LoadedReferenceData::load_default()?))
    }

    /// Load reference data from a specific directory, with embedded fallback
    pub fn from_json_path(path: &Path) -> Result<Self> {
        Ok(Self::from_loaded(LoadedReferenceData::load_with_fallback(path)?))
    }

    fn from_loaded(loaded: LoadedReferenceData) -> Self {
        Self {
            conditions: loaded.conditions,
            company: loaded.company,
            objections: loaded.objections,
            product: ProductFeatures::default(),
        }
    }
}
