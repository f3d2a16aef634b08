//! JSON reference data loader
//!
//! Loads the condition catalog and company content from data/. Each file has
//! a copy compiled into the binary which is used when the file is missing or
//! unreadable.

use log::warn;
use std::fs;
use std::path::Path;

use super::company::{CompanyProfile, Objection};
use super::conditions::{CatalogFile, ConditionCatalog};
use crate::error::Result;

/// Default path to the reference data directory
pub const DEFAULT_DATA_PATH: &str = "data";

const CONDITIONS_FILE: &str = "conditions.json";
const COMPANY_FILE: &str = "company.json";
const OBJECTIONS_FILE: &str = "objections.json";

const EMBEDDED_CONDITIONS: &str = include_str!("../../data/conditions.json");
const EMBEDDED_COMPANY: &str = include_str!("../../data/company.json");
const EMBEDDED_OBJECTIONS: &str = include_str!("../../data/objections.json");

/// Load the condition catalog from `conditions.json` in the given directory
pub fn load_conditions(path: &Path) -> Result<ConditionCatalog> {
    let text = fs::read_to_string(path.join(CONDITIONS_FILE))?;
    parse_conditions(&text)
}

/// Load company content from `company.json` in the given directory
pub fn load_company(path: &Path) -> Result<CompanyProfile> {
    let text = fs::read_to_string(path.join(COMPANY_FILE))?;
    Ok(serde_json::from_str(&text)?)
}

/// Load objection handling from `objections.json` in the given directory
pub fn load_objections(path: &Path) -> Result<Vec<Objection>> {
    let text = fs::read_to_string(path.join(OBJECTIONS_FILE))?;
    Ok(serde_json::from_str(&text)?)
}

pub fn parse_conditions(text: &str) -> Result<ConditionCatalog> {
    let file: CatalogFile = serde_json::from_str(text)?;
    Ok(ConditionCatalog::from_file(file))
}

/// The condition catalog compiled into the binary
pub fn embedded_conditions() -> Result<ConditionCatalog> {
    parse_conditions(EMBEDDED_CONDITIONS)
}

/// The company content compiled into the binary
pub fn embedded_company() -> Result<CompanyProfile> {
    Ok(serde_json::from_str(EMBEDDED_COMPANY)?)
}

pub fn embedded_objections() -> Result<Vec<Objection>> {
    Ok(serde_json::from_str(EMBEDDED_OBJECTIONS)?)
}

/// All reference data needed to quote
pub struct LoadedReferenceData {
    pub conditions: ConditionCatalog,
    pub company: CompanyProfile,
    pub objections: Vec<Objection>,
}

impl LoadedReferenceData {
    /// Load from the default path, falling back to the embedded copies
    pub fn load_default() -> Result<Self> {
        Self::load_with_fallback(Path::new(DEFAULT_DATA_PATH))
    }

    /// Load from a specific path; any file that fails is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(Self {
            conditions: load_conditions(path)?,
            company: load_company(path)?,
            objections: load_objections(path)?,
        })
    }

    /// Load from a specific path, using the embedded copy of each file that fails
    pub fn load_with_fallback(path: &Path) -> Result<Self> {
        let conditions = match load_conditions(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("{}: {}; using embedded condition catalog", path.join(CONDITIONS_FILE).display(), e);
                embedded_conditions()?
            }
        };

        let company = match load_company(path) {
            Ok(company) => company,
            Err(e) => {
                warn!("{}: {}; using embedded company content", path.join(COMPANY_FILE).display(), e);
                embedded_company()?
            }
        };

        let objections = match load_objections(path) {
            Ok(objections) => objections,
            Err(e) => {
                warn!("{}: {}; using embedded objections", path.join(OBJECTIONS_FILE).display(), e);
                embedded_objections()?
            }
        };

        Ok(Self { conditions, company, objections })
    }

    /// Only the embedded copies
    pub fn embedded() -> Result<Self> {
        Ok(Self {
            conditions: embedded_conditions()?,
            company: embedded_company()?,
            objections: embedded_objections()?,
        })
    }
}
