// This file is part of the terraform-provider-context project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use time::{macros::format_description, Date};

use crate::cloud::VALID_CLOUD_PROVIDERS;
use crate::tags::ContextConfig;
use crate::utils::DisplayJoinable;

lazy_static! {
    static ref SHORT_CODE_REGEX: Regex =
        Regex::new(r"^[a-z][a-z0-9-]{0,6}[a-z0-9]$|^[a-z]$").unwrap();
    static ref DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

const MAX_SHORT_CODE_LENGTH: usize = 8;

pub const ENVIRONMENT_TYPES: &[&str] = &[
    "None",
    "Ephemeral",
    "Development",
    "Testing",
    "UAT",
    "Production",
    "MissionCritical",
];

pub const AVAILABILITY_LEVELS: &[&str] =
    &["preemptable", "spot", "standard", "dedicated", "isolated"];

pub const SENSITIVITY_LEVELS: &[&str] =
    &["public", "internal", "confidential", "restricted", "critical"];

/// A configuration field violating its format constraint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} '{value}': {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: String,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type ValidationResult = Result<(), ValidationError>;

fn validate_short_code(field: &'static str, value: &str) -> ValidationResult {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() > MAX_SHORT_CODE_LENGTH {
        return Err(ValidationError::new(
            field,
            value,
            format!("must be 1-{MAX_SHORT_CODE_LENGTH} characters, got {}", value.len()),
        ));
    }
    if !SHORT_CODE_REGEX.is_match(value) {
        return Err(ValidationError::new(
            field,
            value,
            format!("must be lowercase alphanumeric with hyphens (1-{MAX_SHORT_CODE_LENGTH} chars)"),
        ));
    }
    Ok(())
}

fn validate_one_of(field: &'static str, value: &str, allowed: &[&str]) -> ValidationResult {
    if value.is_empty() || allowed.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            value,
            format!("must be one of: {}", allowed.iter().join_with(", ")),
        ))
    }
}

pub fn validate_namespace(namespace: &str) -> ValidationResult {
    validate_short_code("namespace", namespace)
}

pub fn validate_environment(environment: &str) -> ValidationResult {
    validate_short_code("environment", environment)
}

pub fn validate_cloud_provider(provider: &str) -> ValidationResult {
    validate_one_of("cloud_provider", provider, VALID_CLOUD_PROVIDERS)
}

pub fn validate_environment_type(environment_type: &str) -> ValidationResult {
    validate_one_of("environment_type", environment_type, ENVIRONMENT_TYPES)
}

pub fn validate_availability(availability: &str) -> ValidationResult {
    validate_one_of("availability", availability, AVAILABILITY_LEVELS)
}

pub fn validate_sensitivity(sensitivity: &str) -> ValidationResult {
    validate_one_of("sensitivity", sensitivity, SENSITIVITY_LEVELS)
}

pub fn validate_deletion_date(date: &str) -> ValidationResult {
    if date.is_empty() {
        return Ok(());
    }
    if !DATE_REGEX.is_match(date) {
        return Err(ValidationError::new(
            "deletion_date",
            date,
            "must be in YYYY-MM-DD format",
        ));
    }
    Date::parse(date, format_description!("[year]-[month]-[day]"))
        .map(|_| ())
        .map_err(|err| ValidationError::new("deletion_date", date, err.to_string()))
}

pub fn validate_emails(field: &'static str, emails: &[String]) -> ValidationResult {
    match emails
        .iter()
        .find(|email| !email.is_empty() && !EMAIL_REGEX.is_match(email))
    {
        Some(email) => Err(ValidationError::new(field, email, "invalid email format")),
        None => Ok(()),
    }
}

/// Check every constrained field, stopping at the first violation
pub fn validate_config(config: &ContextConfig) -> ValidationResult {
    validate_namespace(&config.namespace)?;
    validate_environment(&config.environment)?;
    validate_environment_type(&config.environment_type)?;
    validate_availability(&config.availability)?;
    validate_sensitivity(&config.sensitivity)?;
    validate_deletion_date(&config.deletion_date)?;
    validate_emails("product_owners", &config.product_owners)?;
    validate_emails("code_owners", &config.code_owners)?;
    validate_emails("data_owners", &config.data_owners)?;
    Ok(())
}
