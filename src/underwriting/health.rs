//! Build (height/weight) assessment

use serde::{Deserialize, Serialize};

/// Converts lb/in² to kg/m²
const BMI_IMPERIAL_FACTOR: f64 = 703.0;

/// Body-mass index from height in inches and weight in pounds.
///
/// Returns 0 when either measurement is missing (zero, negative or not finite);
/// 0 means "not provided" downstream.
pub fn bmi(height_inches: f64, weight_pounds: f64) -> f64 {
    let provided = |x: f64| x.is_finite() && x > 0.0;
    if !provided(height_inches) || !provided(weight_pounds) {
        return 0.0;
    }
    (weight_pounds / (height_inches * height_inches)) * BMI_IMPERIAL_FACTOR
}

/// BMI rating band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiBand {
    NotProvided,
    Underweight,
    Healthy,
    Overweight,
    ObesityI,
    ObesityII,
    ObesityIII,
}

impl BmiBand {
    pub fn label(&self) -> &'static str {
        match self {
            BmiBand::NotProvided => "—",
            BmiBand::Underweight => "Underweight",
            BmiBand::Healthy => "Healthy",
            BmiBand::Overweight => "Overweight",
            BmiBand::ObesityI => "Obesity I",
            BmiBand::ObesityII => "Obesity II",
            BmiBand::ObesityIII => "Obesity III",
        }
    }
}

/// Rating effect of a client's build
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiInfo {
    pub band: BmiBand,
    /// Rate-class steps lost
    pub drop: u32,
    /// Build multiplier (>= 1.0)
    pub multiplier: f64,
}

impl BmiInfo {
    pub const NOT_PROVIDED: BmiInfo = BmiInfo { band: BmiBand::NotProvided, drop: 0, multiplier: 1.00 };

    pub fn label(&self) -> &'static str {
        self.band.label()
    }
}

/// Upper breakpoint (exclusive) of each band below Obesity III
const BANDS: [(f64, BmiInfo); 5] = [
    (18.5, BmiInfo { band: BmiBand::Underweight, drop: 0, multiplier: 1.03 }),
    (25.0, BmiInfo { band: BmiBand::Healthy, drop: 0, multiplier: 1.00 }),
    (30.0, BmiInfo { band: BmiBand::Overweight, drop: 0, multiplier: 1.05 }),
    (35.0, BmiInfo { band: BmiBand::ObesityI, drop: 1, multiplier: 1.10 }),
    (40.0, BmiInfo { band: BmiBand::ObesityII, drop: 2, multiplier: 1.20 }),
];

const OBESITY_III: BmiInfo = BmiInfo { band: BmiBand::ObesityIII, drop: 3, multiplier: 1.35 };

/// Band lookup; a BMI of 0 (not provided) carries no rating effect
pub fn bmi_band(bmi: f64) -> BmiInfo {
    if bmi.is_nan() || bmi <= 0.0 {
        return BmiInfo::NOT_PROVIDED;
    }
    BANDS
        .iter()
        .find(|(upper, _)| bmi < *upper)
        .map(|(_, info)| *info)
        .unwrap_or(OBESITY_III)
}
