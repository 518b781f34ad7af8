//! # Field Updater
//!
//! Edits to the draft are expressed as a [`FieldUpdate`]: one variant per
//! editable field, each carrying its proper value type. A well-typed update
//! always applies, so [`Draft::apply`] cannot fail.
//!
//! Input that arrives dynamically (a field name plus a JSON value, as a UI or
//! an import would supply it) goes through [`FieldUpdate::from_json`], which is
//! where type mismatches are caught. A rejected update leaves the draft
//! untouched and reports the reason; callers that prefer to ignore bad input
//! can drop the error.
//!
//! | Field            | Accepted value        | Stored as            |
//! |------------------|-----------------------|----------------------|
//! | `prefix` etc.    | string                | the string           |
//! | `gender`         | array of strings      | joined with `", "`   |
//! | `expectedSalary` | number                | the number           |
//! | `key`            | never                 | assigned at submit   |

use crate::error::{FormError, Result};
use crate::model::Draft;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const GENDER_SEPARATOR: &str = ", ";

/// Fields the form marks as required before it can be submitted.
pub const REQUIRED_FIELDS: [FormField; 5] = [
    FormField::Prefix,
    FormField::FirstName,
    FormField::LastName,
    FormField::BirthDate,
    FormField::Nationality,
];

/// An editable draft field, named as in the persisted layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Prefix,
    FirstName,
    LastName,
    BirthDate,
    Nationality,
    IdCard,
    Gender,
    PhoneCountry,
    PhoneNumber,
    Passport,
    ExpectedSalary,
}

impl FormField {
    pub const ALL: [FormField; 11] = [
        FormField::Prefix,
        FormField::FirstName,
        FormField::LastName,
        FormField::BirthDate,
        FormField::Nationality,
        FormField::IdCard,
        FormField::Gender,
        FormField::PhoneCountry,
        FormField::PhoneNumber,
        FormField::Passport,
        FormField::ExpectedSalary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormField::Prefix => "prefix",
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::BirthDate => "birthDate",
            FormField::Nationality => "nationality",
            FormField::IdCard => "idCard",
            FormField::Gender => "gender",
            FormField::PhoneCountry => "phoneCountry",
            FormField::PhoneNumber => "phoneNumber",
            FormField::Passport => "passport",
            FormField::ExpectedSalary => "expectedSalary",
        }
    }

    fn expected(self) -> &'static str {
        match self {
            FormField::Gender => "a list of strings",
            FormField::ExpectedSalary => "a number",
            _ => "a string",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "key" {
            return Err(FormError::ReadOnlyField(s.to_string()));
        }
        FormField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// A single, well-typed mutation of the draft.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Prefix(String),
    FirstName(String),
    LastName(String),
    BirthDate(String),
    Nationality(String),
    IdCard(String),
    /// Selected tags, kept in input order.
    Gender(Vec<String>),
    PhoneCountry(String),
    PhoneNumber(String),
    Passport(String),
    ExpectedSalary(f64),
}

impl FieldUpdate {
    pub fn field(&self) -> FormField {
        match self {
            FieldUpdate::Prefix(_) => FormField::Prefix,
            FieldUpdate::FirstName(_) => FormField::FirstName,
            FieldUpdate::LastName(_) => FormField::LastName,
            FieldUpdate::BirthDate(_) => FormField::BirthDate,
            FieldUpdate::Nationality(_) => FormField::Nationality,
            FieldUpdate::IdCard(_) => FormField::IdCard,
            FieldUpdate::Gender(_) => FormField::Gender,
            FieldUpdate::PhoneCountry(_) => FormField::PhoneCountry,
            FieldUpdate::PhoneNumber(_) => FormField::PhoneNumber,
            FieldUpdate::Passport(_) => FormField::Passport,
            FieldUpdate::ExpectedSalary(_) => FormField::ExpectedSalary,
        }
    }

    /// Builds an update from a dynamically typed value.
    ///
    /// Fails with [`FormError::FieldType`] when the value's shape does not
    /// match the field.
    pub fn from_json(field: FormField, value: &Value) -> Result<Self> {
        let mismatch = || FormError::FieldType {
            field: field.name(),
            expected: field.expected(),
        };

        let text = || value.as_str().map(str::to_string).ok_or_else(mismatch);

        Ok(match field {
            FormField::Prefix => FieldUpdate::Prefix(text()?),
            FormField::FirstName => FieldUpdate::FirstName(text()?),
            FormField::LastName => FieldUpdate::LastName(text()?),
            FormField::BirthDate => FieldUpdate::BirthDate(text()?),
            FormField::Nationality => FieldUpdate::Nationality(text()?),
            FormField::IdCard => FieldUpdate::IdCard(text()?),
            FormField::PhoneCountry => FieldUpdate::PhoneCountry(text()?),
            FormField::PhoneNumber => FieldUpdate::PhoneNumber(text()?),
            FormField::Passport => FieldUpdate::Passport(text()?),
            FormField::Gender => {
                let tags = value
                    .as_array()
                    .ok_or_else(mismatch)?
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(mismatch)?;
                FieldUpdate::Gender(tags)
            }
            FormField::ExpectedSalary => {
                FieldUpdate::ExpectedSalary(value.as_f64().ok_or_else(mismatch)?)
            }
        })
    }
}

impl Draft {
    /// Current text of a string-valued field. `None` for `expectedSalary`.
    pub fn text(&self, field: FormField) -> Option<&str> {
        let value = match field {
            FormField::Prefix => &self.prefix,
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::BirthDate => &self.birth_date,
            FormField::Nationality => &self.nationality,
            FormField::IdCard => &self.id_card,
            FormField::Gender => &self.gender,
            FormField::PhoneCountry => &self.phone_country,
            FormField::PhoneNumber => &self.phone_number,
            FormField::Passport => &self.passport,
            FormField::ExpectedSalary => return None,
        };
        Some(value.as_str())
    }

    /// Required fields that are still blank.
    pub fn missing_required(&self) -> Vec<FormField> {
        REQUIRED_FIELDS
            .into_iter()
            .filter(|field| self.text(*field).is_some_and(|v| v.trim().is_empty()))
            .collect()
    }

    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Prefix(v) => self.prefix = v,
            FieldUpdate::FirstName(v) => self.first_name = v,
            FieldUpdate::LastName(v) => self.last_name = v,
            FieldUpdate::BirthDate(v) => self.birth_date = v,
            FieldUpdate::Nationality(v) => self.nationality = v,
            FieldUpdate::IdCard(v) => self.id_card = v,
            FieldUpdate::Gender(tags) => self.gender = tags.join(GENDER_SEPARATOR),
            FieldUpdate::PhoneCountry(v) => self.phone_country = v,
            FieldUpdate::PhoneNumber(v) => self.phone_number = v,
            FieldUpdate::Passport(v) => self.passport = v,
            FieldUpdate::ExpectedSalary(v) => self.expected_salary = v,
        }
    }

    /// Applies a field edit given by name and dynamic value.
    ///
    /// On any rejection the draft is left exactly as it was.
    pub fn update(&mut self, field: &str, value: &Value) -> Result<()> {
        let update = field
            .parse::<FormField>()
            .and_then(|field| FieldUpdate::from_json(field, value));

        match update {
            Ok(update) => {
                self.apply(update);
                Ok(())
            }
            Err(e) => {
                debug!(field, error = %e, "draft update rejected");
                Err(e)
            }
        }
    }
}
