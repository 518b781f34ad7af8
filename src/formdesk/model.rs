use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identity of a committed record.
///
/// Generated once at submit time and never rewritten. Selection and deletion
/// match on this, never on position or field contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Record key cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<&str> for RecordKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One committed form submission.
///
/// Field names serialize in camelCase, which is the persisted layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub key: RecordKey,
    pub prefix: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub nationality: String,
    pub id_card: String,
    /// Selected gender tags joined with `", "`.
    pub gender: String,
    pub phone_country: String,
    pub phone_number: String,
    pub passport: String,
    pub expected_salary: f64,
}

impl Record {
    /// Freezes a draft into a record under the given key.
    pub fn from_draft(key: RecordKey, draft: &Draft) -> Self {
        Self {
            key,
            prefix: draft.prefix.clone(),
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            birth_date: draft.birth_date.clone(),
            nationality: draft.nationality.clone(),
            id_card: draft.id_card.clone(),
            gender: draft.gender.clone(),
            phone_country: draft.phone_country.clone(),
            phone_number: draft.phone_number.clone(),
            passport: draft.passport.clone(),
            expected_salary: draft.expected_salary,
        }
    }

    pub fn full_name(&self) -> String {
        [self.prefix.as_str(), &self.first_name, &self.last_name]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The in-progress entry being edited. Has no key until it is submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub prefix: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub nationality: String,
    pub id_card: String,
    pub gender: String,
    pub phone_country: String,
    pub phone_number: String,
    pub passport: String,
    pub expected_salary: f64,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Restores the all-empty initial value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Title options offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    Mr,
    Mrs,
    Ms,
}

impl Prefix {
    pub fn as_str(self) -> &'static str {
        match self {
            Prefix::Mr => "Mr.",
            Prefix::Mrs => "Mrs.",
            Prefix::Ms => "Ms.",
        }
    }
}

/// Nationality options offered by the form, stored by their Thai labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nationality {
    Thai,
    French,
    American,
}

impl Nationality {
    pub fn as_str(self) -> &'static str {
        match self {
            Nationality::Thai => "ไทย",
            Nationality::French => "ฝรั่งเศส",
            Nationality::American => "อเมริกา",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenderTag {
    Male,
    Female,
    Unsex,
}

impl GenderTag {
    pub fn as_str(self) -> &'static str {
        match self {
            GenderTag::Male => "male",
            GenderTag::Female => "female",
            GenderTag::Unsex => "unsex",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneCountry {
    Th,
    Us,
    Fr,
}

impl PhoneCountry {
    pub fn as_str(self) -> &'static str {
        match self {
            PhoneCountry::Th => "th",
            PhoneCountry::Us => "us",
            PhoneCountry::Fr => "fr",
        }
    }

    pub fn dial_code(self) -> &'static str {
        match self {
            PhoneCountry::Th => "+66",
            PhoneCountry::Us => "+1",
            PhoneCountry::Fr => "+33",
        }
    }

    /// Looks up a stored country code such as `"th"`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "th" => Some(PhoneCountry::Th),
            "us" => Some(PhoneCountry::Us),
            "fr" => Some(PhoneCountry::Fr),
            _ => None,
        }
    }
}
