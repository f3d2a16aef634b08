//! Client export record and printable text
//!
//! Consumers of a finished quote: the JSON export of the client's inputs,
//! the plain-text plan summary, per-tier factor breakdowns and the fixed
//! explanation of the premium math.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{ClientProfile, PaymentMode};
use crate::error::Result;
use crate::plans::{PlanRecommendation, PlanTier, TierOffer};
use crate::quote::Quote;

/// Version tag written into every export
pub const EXPORT_VERSION: &str = "ppt-v1.0.0";

pub const CALCULATION_EXPLAINER: &str = "\
Premium math (annual base -> modal):
base = (DB/1k) x base_rate_per_1k(age, sex, product)
premium = base x age x smoker x product x conditions x UW
+ riders (annualized) + policy fee x 12
Modal billed = annual x modal_factor

Examples (annual per $1k):
Term(20): 0.72 + 0.024x(age-30) (min 0.36)
Whole: 1.20 + 0.048x(age-30) (min 0.72)
Final Expense: flat by decade (50s: 1.68; 60s: 2.64; 70s: 4.56)";

/// Saved copy of a client's inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientExport {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub inputs: ClientProfile,
}

impl ClientExport {
    /// Export stamped with the current time
    pub fn new(inputs: ClientProfile) -> Self {
        Self::at(inputs, Utc::now())
    }

    pub fn at(inputs: ClientProfile, timestamp: DateTime<Utc>) -> Self {
        Self {
            version: EXPORT_VERSION.to_string(),
            timestamp,
            inputs,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Suggested file name, e.g. `client_summary_1700000000000.json`
    pub fn file_name(&self) -> String {
        format!("client_summary_{}.json", self.timestamp.timestamp_millis())
    }
}

/// US dollar formatting: `$1,234.56`, or `$1,235` without cents
pub fn format_money(value: f64, cents: bool) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let scale = if cents { 100.0 } else { 1.0 };
    let units = (value.abs() * scale).round() as u64;
    let (whole, frac) = if cents { (units / 100, units % 100) } else { (units, 0) };

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && units > 0 { "-" } else { "" };
    if cents {
        format!("{}${}.{:02}", sign, grouped, frac)
    } else {
        format!("{}${}", sign, grouped)
    }
}

/// Text suitable for pasting into an email:
///
/// ```text
/// Recommendation (Monthly)
/// Bronze: $51.30, DB $500,000, Preferred+
/// ...
/// ```
pub fn plan_summary_text(plans: &PlanRecommendation) -> String {
    let mode = plans.payment_mode;
    let mut lines = vec![format!("Recommendation ({})", mode)];
    for offer in &plans.offers {
        lines.push(format!(
            "{}: {}, DB {}, {}",
            offer.tier,
            format_money(offer.display_price(mode), true),
            format_money(offer.death_benefit, false),
            offer.premium.underwriting.label
        ));
    }
    lines.join("\n")
}

/// Labelled factor breakdown for one tier
pub fn tier_breakdown(offer: &TierOffer, mode: PaymentMode) -> Vec<(&'static str, String)> {
    let f = &offer.premium.factors;
    let riders = if offer.riders.is_empty() {
        "None".to_string()
    } else {
        offer.riders.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(", ")
    };

    vec![
        ("Mode", mode.to_string()),
        ("Tier Multiplier", format!("{:.2}", offer.multiplier)),
        ("Product Factor", format!("{:.2}", f.product)),
        ("Age Factor", format!("{:.2}", f.age)),
        ("Smoker Factor", format!("{:.2}", f.smoker)),
        ("Conditions", format!("{:.2}", f.conditions)),
        ("Policy Fee", format_money(offer.premium.policy_fee / 12.0, true)),
        ("Riders", riders),
    ]
}

fn cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// One line of a batch quote output file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRow {
    #[serde(rename = "ClientID")]
    pub client_id: String,
    #[serde(rename = "UWClass")]
    pub uw_class: String,
    #[serde(rename = "DeathBenefit")]
    pub death_benefit: f64,
    #[serde(rename = "Annual")]
    pub annual: f64,
    #[serde(rename = "Billed")]
    pub billed: f64,
    #[serde(rename = "Mode")]
    pub mode: PaymentMode,
    #[serde(rename = "BronzeBilled")]
    pub bronze_billed: f64,
    #[serde(rename = "BronzeDB")]
    pub bronze_db: f64,
    #[serde(rename = "SilverBilled")]
    pub silver_billed: f64,
    #[serde(rename = "SilverDB")]
    pub silver_db: f64,
    #[serde(rename = "GoldBilled")]
    pub gold_billed: f64,
    #[serde(rename = "GoldDB")]
    pub gold_db: f64,
}

impl QuoteRow {
    pub fn new(client_id: &str, quote: &Quote) -> Self {
        let tier = |t: PlanTier| {
            quote
                .plans
                .offer(t)
                .map(|o| (cents(o.billed), o.death_benefit))
                .unwrap_or((0.0, 0.0))
        };
        let (bronze_billed, bronze_db) = tier(PlanTier::Bronze);
        let (silver_billed, silver_db) = tier(PlanTier::Silver);
        let (gold_billed, gold_db) = tier(PlanTier::Gold);

        Self {
            client_id: client_id.to_string(),
            uw_class: quote.underwriting_label().to_string(),
            death_benefit: quote.death_benefit,
            annual: cents(quote.premium.annual),
            billed: cents(quote.premium.billed),
            mode: quote.profile.payment_mode,
            bronze_billed,
            bronze_db,
            silver_billed,
            silver_db,
            gold_billed,
            gold_db,
        }
    }
}

/// Write batch rows as CSV with a header line
pub fn write_quote_rows<W: std::io::Write>(writer: W, rows: &[QuoteRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Goal, PolicyType, RiderId, Sex, SmokerStatus, UsState};
    use crate::plans::PlanTier;
    use crate::quote::QuoteRunner;
    use chrono::TimeZone;

    fn profile() -> ClientProfile {
        ClientProfile::new(
            40,
            Sex::Male,
            SmokerStatus::NonSmoker,
            PolicyType::Term,
            UsState::MI,
            Goal::DeathBenefit(500_000.0),
        )
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0, true), "$0.00");
        assert_eq!(format_money(54.0, true), "$54.00");
        assert_eq!(format_money(1234.567, true), "$1,234.57");
        assert_eq!(format_money(563_000.0, false), "$563,000");
        assert_eq!(format_money(1_000_000.4, false), "$1,000,000");
        assert_eq!(format_money(-12.5, true), "-$12.50");
        assert_eq!(format_money(f64::NAN, true), "$0.00");
    }

    #[test]
    fn test_export_record() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let export = ClientExport::at(profile(), ts);
        let json = export.to_json().unwrap();

        assert!(json.contains("\"version\": \"ppt-v1.0.0\""));
        assert!(json.contains("2024-03-01T12:00:00Z"));
        assert_eq!(export.file_name(), "client_summary_1709294400000.json");

        let back = ClientExport::from_json(&json).unwrap();
        assert_eq!(back, export);
    }

    #[test]
    fn test_plan_summary_text() {
        let runner = QuoteRunner::embedded().unwrap();
        let quote = runner.quote(&profile()).unwrap();
        let text = plan_summary_text(&quote.plans);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Recommendation (Monthly)");
        // Riderless premium is $54.00 billed; Bronze takes 95%
        assert_eq!(lines[1], "Bronze: $51.30, DB $500,000, Preferred+");
        assert!(lines[2].starts_with("Silver: "));
        assert!(lines[3].starts_with("Gold: "));
    }

    #[test]
    fn test_tier_breakdown() {
        let runner = QuoteRunner::embedded().unwrap();
        let quote = runner.quote(&profile().with_riders([RiderId::Child])).unwrap();

        let bronze = quote.plans.offer(PlanTier::Bronze).unwrap();
        let rows = tier_breakdown(bronze, quote.profile.payment_mode);
        assert_eq!(rows[0], ("Mode", "Monthly".to_string()));
        assert_eq!(rows[1], ("Tier Multiplier", "0.95".to_string()));
        assert_eq!(rows[6], ("Policy Fee", "$6.00".to_string()));
        assert_eq!(rows[7], ("Riders", "None".to_string()));

        let gold = quote.plans.offer(PlanTier::Gold).unwrap();
        let rows = tier_breakdown(gold, quote.profile.payment_mode);
        assert_eq!(rows[7], ("Riders", "Waiver, Child, LTC".to_string()));
    }

    #[test]
    fn test_quote_rows_quote_awkward_ids() {
        let runner = QuoteRunner::embedded().unwrap();
        let quote = runner.quote(&profile()).unwrap();
        let rows = vec![
            QuoteRow::new("Smith, \"Jr\"", &quote),
            QuoteRow::new("A-1002", &quote),
        ];

        let mut buf = Vec::new();
        write_quote_rows(&mut buf, &rows).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let back: Vec<QuoteRow> = reader.deserialize().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[0].client_id, "Smith, \"Jr\"");
        assert_eq!(back[0].uw_class, "Preferred+");
        assert_eq!(back[0].billed, 54.0);
        assert_eq!(back[0].bronze_billed, 51.3);
        assert_eq!(back[0].gold_db, 500_000.0);
        assert_eq!(back[1].client_id, "A-1002");
    }
}
