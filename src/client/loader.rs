//! Load client profiles from a quote batch CSV or a single JSON file

use super::{ClientProfile, Goal, RiderId, RiderSet, TermLength, MAX_AGE, MIN_AGE};
use crate::error::{QuoteError, Result};
use csv::Reader;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A client row from a batch file, keyed by the caller's id
#[derive(Debug, Clone)]
pub struct ClientRecord {
    pub client_id: String,
    pub profile: ClientProfile,
}

/// Raw CSV row matching the quote batch columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ClientID")]
    client_id: String,
    /// Clamped to 18-120 on conversion
    #[serde(rename = "Age")]
    age: f64,
    #[serde(rename = "Sex")]
    sex: String,
    #[serde(rename = "Smoker")]
    smoker: String,
    #[serde(rename = "PolicyType")]
    policy_type: String,
    #[serde(rename = "Term", default)]
    term: Option<u32>,
    #[serde(rename = "HeightIn", default)]
    height_in: Option<f64>,
    #[serde(rename = "WeightLb", default)]
    weight_lb: Option<f64>,
    #[serde(rename = "State")]
    state: String,
    /// Semicolon-separated condition ids
    #[serde(rename = "Conditions", default)]
    conditions: String,
    /// Semicolon-separated rider ids
    #[serde(rename = "Riders", default)]
    riders: String,
    /// "DB" (death benefit) or "TP" (target premium)
    #[serde(rename = "Goal")]
    goal: String,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "Mode", default)]
    mode: Option<String>,
}

fn split_list(field: &str) -> impl Iterator<Item = &str> {
    field.split(';').map(str::trim).filter(|s| !s.is_empty())
}

/// Age last birthday within the quotable range; unparseable ages count as 0
fn clamp_age(age: f64) -> u8 {
    let age = if age.is_finite() { age } else { 0.0 };
    age.clamp(MIN_AGE as f64, MAX_AGE as f64) as u8
}

impl CsvRow {
    fn into_record(self) -> Result<ClientRecord> {
        let goal = match self.goal.trim() {
            "DB" => Goal::DeathBenefit(self.amount),
            "TP" => Goal::TargetPremium(self.amount),
            other => return Err(QuoteError::unknown("goal", other)),
        };

        let term = match self.term {
            Some(years) => TermLength::try_from(years)?,
            None => TermLength::default(),
        };

        let riders = split_list(&self.riders)
            .map(|s| s.parse::<RiderId>())
            .collect::<Result<RiderSet>>()?;

        let conditions: BTreeSet<String> =
            split_list(&self.conditions).map(str::to_string).collect();

        let payment_mode = match self.mode.as_deref() {
            Some(m) if !m.trim().is_empty() => m.parse()?,
            _ => Default::default(),
        };

        Ok(ClientRecord {
            client_id: self.client_id,
            profile: ClientProfile {
                age: clamp_age(self.age),
                sex: self.sex.parse()?,
                smoker: self.smoker.parse()?,
                policy_type: self.policy_type.parse()?,
                term,
                height_inches: self.height_in.unwrap_or(0.0),
                weight_pounds: self.weight_lb.unwrap_or(0.0),
                state: self.state.parse()?,
                conditions,
                riders,
                goal,
                payment_mode,
            },
        })
    }
}

/// Load all client rows from a CSV file
pub fn load_clients<P: AsRef<Path>>(path: P) -> Result<Vec<ClientRecord>> {
    let file = File::open(path)?;
    load_clients_from_reader(file)
}

/// Load client rows from any reader (e.g., string buffer, network stream)
pub fn load_clients_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<ClientRecord>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        records.push(row.into_record()?);
    }

    Ok(records)
}

/// Load a single client profile from a JSON file
pub fn load_profile_json<P: AsRef<Path>>(path: P) -> Result<ClientProfile> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
