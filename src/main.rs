//! Atlas Pricing CLI
//!
//! Quotes a single client, given either as flags or as a profile JSON file

use anyhow::{Context, Result};
use atlas_pricing::assumptions::loader::DEFAULT_DATA_PATH;
use atlas_pricing::client::{load_profile_json, TermLength};
use atlas_pricing::export::{format_money, tier_breakdown, CALCULATION_EXPLAINER};
use atlas_pricing::{
    plan_summary_text, ClientExport, ClientProfile, Goal, PaymentMode, PolicyType, QuoteRunner,
    RiderId, Sex, SmokerStatus, UsState,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "atlas_pricing", about = "Life insurance quote: underwriting class, modal premium and plan tiers")]
struct Cli {
    #[arg(long, help = "Client profile JSON; replaces the individual client flags")]
    client: Option<PathBuf>,

    #[arg(long, default_value_t = 40)]
    age: u8,
    #[arg(long, default_value = "M", help = "M or F")]
    sex: Sex,
    #[arg(long, default_value = "N", help = "Y or N")]
    smoker: SmokerStatus,
    #[arg(long, default_value = "Term", help = "Term, Whole, UL, IUL, GUL or \"Final Expense\"")]
    policy_type: PolicyType,
    #[arg(long, default_value = "20", help = "Term period in years: 10, 15, 20, 25 or 30")]
    term: TermLength,
    #[arg(long, default_value_t = 0.0, help = "Height in inches")]
    height: f64,
    #[arg(long, default_value_t = 0.0, help = "Weight in pounds")]
    weight: f64,
    #[arg(long, default_value = "MI")]
    state: UsState,
    #[arg(long, value_delimiter = ',', help = "Condition ids, comma separated")]
    conditions: Vec<String>,
    #[arg(long, value_delimiter = ',', help = "ADB, Waiver, Child, LTC")]
    riders: Vec<RiderId>,
    #[arg(long, conflicts_with = "target_premium", help = "Death benefit to price (default $500,000)")]
    death_benefit: Option<f64>,
    #[arg(long, help = "Billed premium to solve the death benefit for")]
    target_premium: Option<f64>,
    #[arg(long, default_value = "Monthly", help = "Annual, Semiannual, Quarterly or Monthly")]
    mode: PaymentMode,

    #[arg(long, default_value = DEFAULT_DATA_PATH, help = "Directory holding conditions.json, company.json and objections.json")]
    data_dir: PathBuf,
    #[arg(long, help = "Print the client export record as JSON")]
    json: bool,
    #[arg(long, help = "Print only the plan summary text")]
    summary: bool,
    #[arg(long, help = "Print how the premium is calculated")]
    explain: bool,
    #[arg(long, help = "Print the carrier's presentation content")]
    about: bool,
}

impl Cli {
    fn profile(&self) -> Result<ClientProfile> {
        if let Some(path) = &self.client {
            return load_profile_json(path)
                .with_context(|| format!("reading client profile {}", path.display()));
        }

        let goal = match (self.target_premium, self.death_benefit) {
            (Some(tp), _) => Goal::TargetPremium(tp),
            (None, Some(db)) => Goal::DeathBenefit(db),
            (None, None) => Goal::DeathBenefit(500_000.0),
        };

        Ok(ClientProfile::new(self.age, self.sex, self.smoker, self.policy_type, self.state, goal)
            .with_term(self.term)
            .with_build(self.height, self.weight)
            .with_conditions(self.conditions.iter().cloned())
            .with_riders(self.riders.iter().copied())
            .with_payment_mode(self.mode))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.explain {
        println!("{}", CALCULATION_EXPLAINER);
        return Ok(());
    }

    let runner = QuoteRunner::from_json_path(&cli.data_dir)
        .with_context(|| format!("loading reference data from {}", cli.data_dir.display()))?;
    if cli.about {
        print_about(&runner);
        return Ok(());
    }
    let profile = cli.profile()?;
    let quote = runner.quote(&profile).context("quoting client")?;

    if cli.json {
        println!("{}", ClientExport::new(quote.profile.clone()).to_json()?);
        return Ok(());
    }
    if cli.summary {
        println!("{}", plan_summary_text(&quote.plans));
        return Ok(());
    }

    let p = &quote.profile;
    let r = &quote.premium;
    println!("{}", runner.assumptions().company.header());
    println!("{}\n", "=".repeat(40));

    println!("Client:");
    let smoker = if p.smoker.is_smoker() { "smoker" } else { "non-smoker" };
    println!("  Age {} {} {}, {}", p.age, p.sex.as_str(), smoker, p.state);
    println!("  Product: {}{}", p.policy_type, if p.policy_type.is_term() {
        format!(" ({} yr)", p.term.years())
    } else {
        String::new()
    });
    if r.bmi > 0.0 {
        println!("  BMI: {:.1} ({})", r.bmi, r.bmi_info.label());
    }
    println!();

    println!("Quote:");
    println!("  Underwriting: {}", quote.underwriting_label());
    let solved = if p.goal.is_target_premium() { " (solved for target premium)" } else { "" };
    println!("  Death Benefit: {}{}", format_money(quote.death_benefit, false), solved);
    println!("  Annual Base: {}", format_money(quote.base_annual(), true));
    println!("  Annual Premium: {}", format_money(r.annual, true));
    println!("  Billed ({}): {}", p.payment_mode, format_money(r.billed, true));
    println!("  {}", quote.factor_summary());
    println!();

    println!("{}", plan_summary_text(&quote.plans));
    for offer in &quote.plans.offers {
        println!("\n{}:", offer.tier);
        for (label, value) in tier_breakdown(offer, p.payment_mode) {
            println!("  {:<16} {}", label, value);
        }
    }

    Ok(())
}

fn print_about(runner: &QuoteRunner) {
    let a = runner.assumptions();
    let company = &a.company;
    println!("{}", company.header());
    println!("{}\n", "=".repeat(40));
    println!("{}\n", company.about);

    println!("Why us:");
    for d in &company.differentiators {
        println!("  - {}", d);
    }
    println!("\nWho we serve:");
    for persona in &company.personas {
        println!("  {}: {}", persona.title, persona.desc);
    }
    println!("\nWhat clients say:");
    for t in &company.testimonials {
        println!("  {}", t.attribution());
    }
    println!("\nCommon questions:");
    for o in &a.objections {
        println!("  Q: {}\n  A: {}", o.objection, o.response);
    }
    println!("\nFiling a claim:");
    for (i, step) in company.claims_steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!("\nContact: {} {} {}", company.contact.rep_name, company.contact.rep_phone, company.contact.rep_email);
}
