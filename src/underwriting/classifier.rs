//! Rate class / table rating from health conditions and build
//!
//! Condition class drops and the BMI drop are summed. Three or more drops,
//! or any condition flagged `exclude`, put the client on a substandard
//! table (A-D); otherwise the drops select Preferred+, Preferred or Standard.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::health::BmiInfo;
use crate::assumptions::Condition;

/// Drops at which the standard classes run out
const SUBSTANDARD_DROPS: u32 = 3;

/// Standard (non-rated) classes, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateClass {
    PreferredPlus,
    Preferred,
    Standard,
}

impl RateClass {
    const BY_DROPS: [RateClass; 3] = [RateClass::PreferredPlus, RateClass::Preferred, RateClass::Standard];

    pub fn from_drops(drops: u32) -> Self {
        Self::BY_DROPS[(drops as usize).min(2)]
    }

    pub fn label(&self) -> &'static str {
        match self {
            RateClass::PreferredPlus => "Preferred+",
            RateClass::Preferred => "Preferred",
            RateClass::Standard => "Standard",
        }
    }
}

/// Substandard table ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TableRating {
    A,
    B,
    C,
    D,
}

impl TableRating {
    const BY_STEP: [TableRating; 4] = [TableRating::A, TableRating::B, TableRating::C, TableRating::D];

    /// Table for a number of steps beyond Standard (1 = A), capped at D
    pub fn from_steps(steps: u32) -> Self {
        let idx = (steps.max(1) - 1).min(3) as usize;
        Self::BY_STEP[idx]
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            TableRating::A => 1.25,
            TableRating::B => 1.50,
            TableRating::C => 1.75,
            TableRating::D => 2.00,
        }
    }

    pub fn letter(&self) -> &'static str {
        match self {
            TableRating::A => "A",
            TableRating::B => "B",
            TableRating::C => "C",
            TableRating::D => "D",
        }
    }
}

/// Exactly one of a standard class or a table rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnderwritingClass {
    Standard(RateClass),
    Substandard(TableRating),
}

impl fmt::Display for UnderwritingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnderwritingClass::Standard(class) => f.write_str(class.label()),
            UnderwritingClass::Substandard(table) => write!(f, "Substandard (Table {})", table.letter()),
        }
    }
}

/// Outcome of underwriting one client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderwritingResult {
    pub class: UnderwritingClass,
    /// Display label, e.g. "Preferred" or "Substandard (Table B)"
    pub label: String,
    /// Premium multiplier; 1.0 for every standard class
    pub multiplier: f64,
    /// Total class drops from conditions and build
    pub drops: u32,
}

impl UnderwritingResult {
    fn new(class: UnderwritingClass, drops: u32) -> Self {
        let multiplier = match class {
            UnderwritingClass::Standard(_) => 1.00,
            UnderwritingClass::Substandard(table) => table.multiplier(),
        };
        Self {
            class,
            label: class.to_string(),
            multiplier,
            drops,
        }
    }

    pub fn table(&self) -> Option<TableRating> {
        match self.class {
            UnderwritingClass::Substandard(table) => Some(table),
            UnderwritingClass::Standard(_) => None,
        }
    }

    pub fn is_substandard(&self) -> bool {
        self.table().is_some()
    }
}

/// Classify a client from their selected conditions and build
pub fn classify(conditions: &[Condition], bmi: &BmiInfo) -> UnderwritingResult {
    let condition_drops: u32 = conditions.iter().map(|c| c.class_drop).sum();
    let drops = condition_drops + bmi.drop;
    let referred = conditions.iter().any(|c| c.exclude);

    let class = if referred || drops >= SUBSTANDARD_DROPS {
        // An excluded condition alone still lands on Table A
        let steps = drops.saturating_sub(2).max(1);
        UnderwritingClass::Substandard(TableRating::from_steps(steps))
    } else {
        UnderwritingClass::Standard(RateClass::from_drops(drops))
    };

    UnderwritingResult::new(class, drops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::underwriting::health::bmi_band;

    fn condition(id: &str, class_drop: u32, exclude: bool) -> Condition {
        Condition {
            id: id.to_string(),
            label: id.to_string(),
            category: "test".to_string(),
            class_drop,
            exclude,
            multiplier: 1.0,
            tooltip: None,
        }
    }

    #[test]
    fn test_clean_client_is_preferred_plus() {
        let uw = classify(&[], &BmiInfo::NOT_PROVIDED);
        assert_eq!(uw.label, "Preferred+");
        assert_eq!(uw.table(), None);
        assert_eq!(uw.multiplier, 1.0);
    }

    #[test]
    fn test_two_drops_is_standard() {
        let uw = classify(&[condition("diabetes", 2, false)], &BmiInfo::NOT_PROVIDED);
        assert_eq!(uw.class, UnderwritingClass::Standard(RateClass::Standard));
        assert_eq!(uw.label, "Standard");
        assert_eq!(uw.multiplier, 1.00);
    }

    #[test]
    fn test_exclude_forces_table_a() {
        let uw = classify(&[condition("cancer", 0, true)], &BmiInfo::NOT_PROVIDED);
        assert_eq!(uw.drops, 0);
        assert_eq!(uw.table(), Some(TableRating::A));
        assert_eq!(uw.label, "Substandard (Table A)");
        assert_eq!(uw.multiplier, 1.25);

        // Still Table A with two drops under the exclude branch
        let uw = classify(&[condition("chf", 2, true)], &BmiInfo::NOT_PROVIDED);
        assert_eq!(uw.table(), Some(TableRating::A));
    }

    #[test]
    fn test_drops_step_through_tables() {
        let obese = bmi_band(42.0); // 3 drops
        assert_eq!(classify(&[], &obese).table(), Some(TableRating::A));
        assert_eq!(classify(&[condition("a", 1, false)], &obese).table(), Some(TableRating::B));
        assert_eq!(classify(&[condition("a", 2, false)], &obese).table(), Some(TableRating::C));
        assert_eq!(classify(&[condition("a", 3, false)], &obese).table(), Some(TableRating::D));

        // Capped at D
        let uw = classify(&[condition("a", 5, false), condition("b", 4, false)], &obese);
        assert_eq!(uw.table(), Some(TableRating::D));
        assert_eq!(uw.multiplier, 2.00);
    }

    #[test]
    fn test_bmi_drop_counts_toward_class() {
        let obesity_1 = bmi_band(31.0);
        let uw = classify(&[condition("htn", 1, false)], &obesity_1);
        assert_eq!(uw.drops, 2);
        assert_eq!(uw.label, "Standard");
    }
}
