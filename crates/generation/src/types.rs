use std::fmt;

use budget::Priced;
use serde::{Deserialize, Serialize};

/// Recipient gender as submitted by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Six coarse age bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "10s")]
    Teens,
    #[serde(rename = "20s")]
    Twenties,
    #[serde(rename = "30s")]
    Thirties,
    #[serde(rename = "40s")]
    Forties,
    #[serde(rename = "50s")]
    Fifties,
    #[serde(rename = "60s+")]
    SixtiesPlus,
}

impl AgeBracket {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBracket::Teens => "10s",
            AgeBracket::Twenties => "20s",
            AgeBracket::Thirties => "30s",
            AgeBracket::Forties => "40s",
            AgeBracket::Fifties => "50s",
            AgeBracket::SixtiesPlus => "60s+",
        }
    }
}

/// Gift occasion. Known ids map to variants; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occasion {
    Birthday,
    Anniversary,
    Christmas,
    Valentine,
    Wedding,
    Birth,
    Farewell,
    Respect,
    Other,
    #[serde(untagged)]
    Custom(String),
}

impl Occasion {
    /// Human-readable wording used in prompts and logs.
    pub fn describe(&self) -> &str {
        match self {
            Occasion::Birthday => "birthday",
            Occasion::Anniversary => "anniversary",
            Occasion::Christmas => "Christmas",
            Occasion::Valentine => "Valentine's Day",
            Occasion::Wedding => "wedding celebration",
            Occasion::Birth => "birth of a baby",
            Occasion::Farewell => "farewell or job transfer",
            Occasion::Respect => "Respect for the Aged Day",
            Occasion::Other => "general occasion",
            Occasion::Custom(text) => text.as_str(),
        }
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

fn default_item_count() -> u32 {
    3
}

/// Constraints submitted for one recommendation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub recipient_gender: Gender,
    pub recipient_age: AgeBracket,
    /// Free-text relation such as "friend" or "boss".
    #[serde(default)]
    pub relation: String,
    /// Budget per item in the smallest currency unit.
    pub budget: u64,
    /// Vibe tags ("stylish", "practical", ...). May be empty.
    #[serde(default)]
    pub vibe: Vec<String>,
    pub situation: Occasion,
    #[serde(default)]
    pub is_bulk_order: bool,
    #[serde(default = "default_item_count")]
    pub item_count: u32,
}

/// One suggestion as produced by the generation service, after schema checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCandidate {
    pub name: String,
    pub price: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub category: String,
}

impl Priced for RawCandidate {
    fn price(&self) -> u64 {
        self.price
    }
}
