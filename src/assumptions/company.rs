//! Carrier branding and contact content shown alongside a quote

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub logo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub rep_name: String,
    #[serde(default)]
    pub rep_phone: String,
    #[serde(default)]
    pub rep_email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub brand: Brand,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub differentiators: Vec<String>,
    #[serde(default)]
    pub claims_steps: Vec<String>,
    /// Client types the carrier targets
    #[serde(default)]
    pub personas: Vec<Persona>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub title: String,
    #[serde(default)]
    pub desc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
}

impl Testimonial {
    /// e.g. `"Fast and fair." - Dana K., Teacher`
    pub fn attribution(&self) -> String {
        if self.role.is_empty() {
            format!("\"{}\" - {}", self.quote, self.name)
        } else {
            format!("\"{}\" - {}, {}", self.quote, self.name, self.role)
        }
    }
}

/// A common client objection and the suggested answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objection {
    pub id: String,
    pub objection: String,
    pub response: String,
}

impl CompanyProfile {
    /// One-line header for printed quotes, e.g. "Atlas Life - Protection that keeps its promises"
    pub fn header(&self) -> String {
        if self.brand.tagline.is_empty() {
            self.brand.name.clone()
        } else {
            format!("{} - {}", self.brand.name, self.brand.tagline)
        }
    }
}
