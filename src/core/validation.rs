// ============================================================================
// Boundary Validation for New Records
// ============================================================================
//
// Drafts coming from a creation form are checked here, field by field, before
// anything reaches the store. A rejected draft never enters the collection.
//
// ============================================================================

use super::types::{Record, RecordId, Role, Status};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern");
}

pub const MIN_AGE: i64 = 18;
pub const MAX_AGE: i64 = 100;

/// Per-field validation messages, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Unvalidated input for a record about to be created
///
/// Numeric fields are optional so that an empty form field can be told apart
/// from an out-of-range one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    pub name: String,
    pub email: String,
    pub age: Option<i64>,
    pub department: String,
    pub salary: Option<i64>,
    pub status: Status,
    pub role: Role,
}

impl Default for NewRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            age: None,
            department: "Engineering".to_string(),
            salary: None,
            status: Status::Active,
            role: Role::Viewer,
        }
    }
}

impl NewRecord {
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.checked_numbers().map(|_| ())
    }

    /// Run every field check, returning the accepted age and salary
    fn checked_numbers(&self) -> std::result::Result<(u32, u64), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name.trim().is_empty() {
            errors.add("name", "Name is required");
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", "Email is required");
        } else if !EMAIL_RE.is_match(email) {
            errors.add("email", "Invalid email");
        }

        let age = match self.age {
            Some(age) if (MIN_AGE..=MAX_AGE).contains(&age) => age as u32,
            _ => {
                errors.add("age", format!("Age must be {}-{}", MIN_AGE, MAX_AGE));
                0
            }
        };

        let salary = match self.salary {
            Some(salary) if salary >= 0 => salary as u64,
            _ => {
                errors.add("salary", "Salary must be positive");
                0
            }
        };

        if errors.is_empty() { Ok((age, salary)) } else { Err(errors) }
    }

    /// Validate and build the record that will be handed to the store
    ///
    /// The name is trimmed, the email trimmed and lowercased, permissions come
    /// from the role defaults and the record starts unpinned.
    pub fn into_record(
        self,
        join_date: NaiveDate,
    ) -> std::result::Result<Record, ValidationErrors> {
        let (age, salary) = self.checked_numbers()?;

        Ok(Record::new(
            RecordId::generate(),
            self.name.trim(),
            self.email.trim().to_lowercase(),
        )
        .age(age)
        .department(self.department)
        .salary(salary)
        .joined(join_date)
        .status(self.status)
        .role(self.role))
    }
}
