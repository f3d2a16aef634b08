//! Health assessment and underwriting classification

mod health;
mod classifier;

pub use health::{bmi, bmi_band, BmiBand, BmiInfo};
pub use classifier::{classify, RateClass, TableRating, UnderwritingClass, UnderwritingResult};
