//! Client profile and the enumerations a quote is built from

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::QuoteError;

/// Youngest age the rate tables accept
pub const MIN_AGE: u8 = 18;

/// Oldest age the rate tables accept
pub const MAX_AGE: u8 = 120;

/// Sex of the proposed insured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

impl FromStr for Sex {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" | "Male" | "male" => Ok(Sex::Male),
            "F" | "Female" | "female" => Ok(Sex::Female),
            other => Err(QuoteError::unknown("sex", other)),
        }
    }
}

/// Tobacco use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmokerStatus {
    #[serde(rename = "Y")]
    Smoker,
    #[serde(rename = "N")]
    NonSmoker,
}

impl SmokerStatus {
    pub fn is_smoker(&self) -> bool {
        matches!(self, SmokerStatus::Smoker)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SmokerStatus::Smoker => "Y",
            SmokerStatus::NonSmoker => "N",
        }
    }
}

impl FromStr for SmokerStatus {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Y" | "y" | "Yes" | "yes" => Ok(SmokerStatus::Smoker),
            "N" | "n" | "No" | "no" => Ok(SmokerStatus::NonSmoker),
            other => Err(QuoteError::unknown("smoker", other)),
        }
    }
}

/// Life insurance product line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyType {
    Term,
    Whole,
    #[serde(rename = "UL")]
    UniversalLife,
    #[serde(rename = "IUL")]
    IndexedUniversalLife,
    #[serde(rename = "GUL")]
    GuaranteedUniversalLife,
    #[serde(rename = "Final Expense", alias = "FinalExpense")]
    FinalExpense,
}

impl PolicyType {
    pub const ALL: [PolicyType; 6] = [
        PolicyType::Term,
        PolicyType::Whole,
        PolicyType::UniversalLife,
        PolicyType::IndexedUniversalLife,
        PolicyType::GuaranteedUniversalLife,
        PolicyType::FinalExpense,
    ];

    /// Display name matching the product menu
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyType::Term => "Term",
            PolicyType::Whole => "Whole",
            PolicyType::UniversalLife => "UL",
            PolicyType::IndexedUniversalLife => "IUL",
            PolicyType::GuaranteedUniversalLife => "GUL",
            PolicyType::FinalExpense => "Final Expense",
        }
    }

    pub fn is_term(&self) -> bool {
        matches!(self, PolicyType::Term)
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyType {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "FinalExpense" {
            return Ok(PolicyType::FinalExpense);
        }
        PolicyType::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| QuoteError::unknown("policy type", s))
    }
}

/// Level term period in years; only meaningful for Term products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TermLength {
    Ten,
    Fifteen,
    Twenty,
    TwentyFive,
    Thirty,
}

impl TermLength {
    pub const ALL: [TermLength; 5] = [
        TermLength::Ten,
        TermLength::Fifteen,
        TermLength::Twenty,
        TermLength::TwentyFive,
        TermLength::Thirty,
    ];

    pub fn years(&self) -> u32 {
        match self {
            TermLength::Ten => 10,
            TermLength::Fifteen => 15,
            TermLength::Twenty => 20,
            TermLength::TwentyFive => 25,
            TermLength::Thirty => 30,
        }
    }
}

impl Default for TermLength {
    fn default() -> Self {
        TermLength::Twenty
    }
}

impl TryFrom<u32> for TermLength {
    type Error = QuoteError;

    fn try_from(years: u32) -> Result<Self, Self::Error> {
        TermLength::ALL
            .iter()
            .copied()
            .find(|t| t.years() == years)
            .ok_or_else(|| QuoteError::unknown("term", &years.to_string()))
    }
}

impl From<TermLength> for u32 {
    fn from(term: TermLength) -> u32 {
        term.years()
    }
}

impl FromStr for TermLength {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let years: u32 = s
            .trim()
            .parse()
            .map_err(|_| QuoteError::unknown("term", s))?;
        TermLength::try_from(years)
    }
}

/// Billing frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMode {
    Annual,
    Semiannual,
    Quarterly,
    Monthly,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 4] = [
        PaymentMode::Annual,
        PaymentMode::Semiannual,
        PaymentMode::Quarterly,
        PaymentMode::Monthly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Annual => "Annual",
            PaymentMode::Semiannual => "Semiannual",
            PaymentMode::Quarterly => "Quarterly",
            PaymentMode::Monthly => "Monthly",
        }
    }

    /// Fraction of the annual premium billed each period
    pub fn modal_factor(&self) -> f64 {
        crate::assumptions::product::modal_factor(*self)
    }
}

impl Default for PaymentMode {
    fn default() -> Self {
        PaymentMode::Monthly
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMode {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PaymentMode::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| QuoteError::unknown("payment mode", s))
    }
}

/// Optional benefit riders
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiderId {
    /// Accidental death benefit
    #[serde(rename = "ADB")]
    AccidentalDeath,
    /// Waiver of premium
    Waiver,
    /// Child term
    Child,
    /// Long-term care
    #[serde(rename = "LTC")]
    LongTermCare,
}

impl RiderId {
    pub const ALL: [RiderId; 4] = [
        RiderId::AccidentalDeath,
        RiderId::Waiver,
        RiderId::Child,
        RiderId::LongTermCare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiderId::AccidentalDeath => "ADB",
            RiderId::Waiver => "Waiver",
            RiderId::Child => "Child",
            RiderId::LongTermCare => "LTC",
        }
    }
}

impl fmt::Display for RiderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiderId {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        RiderId::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| QuoteError::unknown("rider", s))
    }
}

/// Unique, ordered rider selection
pub type RiderSet = BTreeSet<RiderId>;

/// US states plus DC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsState {
    AL, AK, AZ, AR, CA, CO, CT, DE, FL, GA, HI, ID, IL, IN, IA, KS, KY, LA,
    ME, MD, MA, MI, MN, MS, MO, MT, NE, NV, NH, NJ, NM, NY, NC, ND, OH, OK,
    OR, PA, RI, SC, SD, TN, TX, UT, VT, VA, WA, WV, WI, WY, DC,
}

impl UsState {
    pub const ALL: [UsState; 51] = [
        UsState::AL, UsState::AK, UsState::AZ, UsState::AR, UsState::CA, UsState::CO,
        UsState::CT, UsState::DE, UsState::FL, UsState::GA, UsState::HI, UsState::ID,
        UsState::IL, UsState::IN, UsState::IA, UsState::KS, UsState::KY, UsState::LA,
        UsState::ME, UsState::MD, UsState::MA, UsState::MI, UsState::MN, UsState::MS,
        UsState::MO, UsState::MT, UsState::NE, UsState::NV, UsState::NH, UsState::NJ,
        UsState::NM, UsState::NY, UsState::NC, UsState::ND, UsState::OH, UsState::OK,
        UsState::OR, UsState::PA, UsState::RI, UsState::SC, UsState::SD, UsState::TN,
        UsState::TX, UsState::UT, UsState::VT, UsState::VA, UsState::WA, UsState::WV,
        UsState::WI, UsState::WY, UsState::DC,
    ];

    /// Two-letter postal code
    pub fn code(&self) -> &'static str {
        const CODES: [&str; 51] = [
            "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL",
            "IN", "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT",
            "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI",
            "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI", "WY", "DC",
        ];
        CODES[*self as usize]
    }
}

impl fmt::Display for UsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for UsState {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        UsState::ALL
            .iter()
            .copied()
            .find(|st| st.code() == code)
            .ok_or_else(|| QuoteError::unknown("state", s))
    }
}

/// What the client wants to fix: the face amount or the billed premium
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Price a given death benefit (dollars)
    DeathBenefit(f64),
    /// Find the death benefit a billed premium buys (dollars per billing period)
    TargetPremium(f64),
}

impl Goal {
    pub fn is_target_premium(&self) -> bool {
        matches!(self, Goal::TargetPremium(_))
    }
}

/// A single client's inputs for one quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    /// Age last birthday
    pub age: u8,

    pub sex: Sex,

    pub smoker: SmokerStatus,

    pub policy_type: PolicyType,

    /// Level term period (ignored unless `policy_type` is Term)
    #[serde(default)]
    pub term: TermLength,

    /// Height in inches (0 = not provided)
    #[serde(default)]
    pub height_inches: f64,

    /// Weight in pounds (0 = not provided)
    #[serde(default)]
    pub weight_pounds: f64,

    /// State of residence
    pub state: UsState,

    /// Selected condition ids from the catalog
    #[serde(default)]
    pub conditions: BTreeSet<String>,

    /// Selected riders
    #[serde(default)]
    pub riders: RiderSet,

    pub goal: Goal,

    #[serde(default)]
    pub payment_mode: PaymentMode,
}

impl ClientProfile {
    /// Create a profile with no build, conditions or riders, 20-year term, billed monthly
    pub fn new(
        age: u8,
        sex: Sex,
        smoker: SmokerStatus,
        policy_type: PolicyType,
        state: UsState,
        goal: Goal,
    ) -> Self {
        Self {
            age,
            sex,
            smoker,
            policy_type,
            term: TermLength::default(),
            height_inches: 0.0,
            weight_pounds: 0.0,
            state,
            conditions: BTreeSet::new(),
            riders: RiderSet::new(),
            goal,
            payment_mode: PaymentMode::default(),
        }
    }

    pub fn with_term(mut self, term: TermLength) -> Self {
        self.term = term;
        self
    }

    pub fn with_build(mut self, height_inches: f64, weight_pounds: f64) -> Self {
        self.height_inches = height_inches;
        self.weight_pounds = weight_pounds;
        self
    }

    pub fn with_conditions<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_riders<I: IntoIterator<Item = RiderId>>(mut self, riders: I) -> Self {
        self.riders = riders.into_iter().collect();
        self
    }

    pub fn with_payment_mode(mut self, mode: PaymentMode) -> Self {
        self.payment_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enums() {
        assert_eq!("F".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("Y".parse::<SmokerStatus>().unwrap(), SmokerStatus::Smoker);
        assert!(SmokerStatus::Smoker.is_smoker());
        assert!(!SmokerStatus::NonSmoker.is_smoker());
        assert_eq!("Final Expense".parse::<PolicyType>().unwrap(), PolicyType::FinalExpense);
        assert_eq!("FinalExpense".parse::<PolicyType>().unwrap(), PolicyType::FinalExpense);
        assert_eq!("IUL".parse::<PolicyType>().unwrap(), PolicyType::IndexedUniversalLife);
        assert_eq!("ny".parse::<UsState>().unwrap(), UsState::NY);
        assert_eq!("quarterly".parse::<PaymentMode>().unwrap(), PaymentMode::Quarterly);
        assert_eq!("LTC".parse::<RiderId>().unwrap(), RiderId::LongTermCare);

        assert!("Variable".parse::<PolicyType>().is_err());
        assert!("ZZ".parse::<UsState>().is_err());
    }

    #[test]
    fn test_state_codes_line_up() {
        for st in UsState::ALL {
            assert_eq!(st.code().parse::<UsState>().unwrap(), st);
        }
        assert_eq!(UsState::DC.code(), "DC");
        assert_eq!(UsState::MI.code(), "MI");
    }

    #[test]
    fn test_term_length() {
        assert_eq!(TermLength::default().years(), 20);
        assert_eq!(TermLength::try_from(30).unwrap(), TermLength::Thirty);
        assert!(TermLength::try_from(12).is_err());
    }

    #[test]
    fn test_profile_from_json() {
        let json = r#"{
            "age": 45,
            "sex": "F",
            "smoker": "N",
            "policy_type": "Final Expense",
            "state": "FL",
            "riders": ["Waiver", "ADB", "Waiver"],
            "conditions": ["asthma"],
            "goal": { "target_premium": 75.0 }
        }"#;
        let profile: ClientProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.policy_type, PolicyType::FinalExpense);
        assert_eq!(profile.term, TermLength::Twenty);
        assert_eq!(profile.payment_mode, PaymentMode::Monthly);
        assert_eq!(profile.riders.len(), 2);
        assert_eq!(profile.goal, Goal::TargetPremium(75.0));
        assert!(profile.goal.is_target_premium());
        assert!(!Goal::DeathBenefit(1_000.0).is_target_premium());
        assert_eq!(profile.height_inches, 0.0);
    }
}
