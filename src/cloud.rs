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

lazy_static! {
    static ref GCP_KEY_REGEX: Regex = Regex::new(r"^[a-z][a-z0-9_-]*$").unwrap();
}

/// Cloud provider identifiers accepted by the provider configuration
pub const VALID_CLOUD_PROVIDERS: &[&str] =
    &["dc", "aws", "az", "gcp", "oci", "ibm", "do", "vul", "ali", "cv"];

/// Identifier used when no cloud provider is configured
pub const DEFAULT_CLOUD_PROVIDER: &str = "dc";

/// Tag formatting rules of a cloud provider
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloudRules {
    #[default]
    Default,
    Aws,
    Azure,
    Gcp,
}

impl CloudRules {
    /// Resolve the rules of a cloud provider identifier.
    ///
    /// Identifiers without dedicated rules (including unknown ones) use the default rules.
    pub fn from_identifier(provider: &str) -> Self {
        match provider {
            "aws" => Self::Aws,
            "az" => Self::Azure,
            "gcp" => Self::Gcp,
            _ => Self::Default,
        }
    }

    pub fn max_tag_length(self) -> usize {
        match self {
            Self::Default | Self::Gcp => 63,
            Self::Aws | Self::Azure => 256,
        }
    }

    /// Separator between a platform and an identifier, and between list elements
    pub fn delimiter(self) -> &'static str {
        match self {
            Self::Default | Self::Azure => ";",
            Self::Aws => " ",
            Self::Gcp => "_",
        }
    }

    /// Placeholder for unset values
    pub fn not_applicable(self) -> &'static str {
        match self {
            Self::Default | Self::Aws => "N/A",
            Self::Azure => "NotApplicable",
            Self::Gcp => "not_applicable",
        }
    }

    pub fn sanitize_tag_value(self, value: &str) -> String {
        match self {
            Self::Default => value
                .chars()
                .map(|c| {
                    if matches!(c, '<' | '>' | '%' | '&' | '\\' | '?') {
                        '_'
                    } else {
                        c
                    }
                })
                .collect(),
            Self::Aws => value
                .chars()
                .map(|c| if is_aws_value_char(c) { c } else { '_' })
                .collect(),
            Self::Azure => value
                .chars()
                .filter(|c| !matches!(c, ' ' | '<' | '>' | '%' | '&' | '\\' | '?' | '/' | '#' | ':'))
                .collect(),
            Self::Gcp => value
                .to_lowercase()
                .chars()
                .map(|c| {
                    if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-' {
                        c
                    } else {
                        '-'
                    }
                })
                .collect(),
        }
    }

    pub fn is_valid_tag_key(self, key: &str) -> bool {
        match self {
            Self::Default => true,
            Self::Aws => key.chars().all(|c| {
                c.is_ascii_alphanumeric() || matches!(c, ' ' | '+' | '-' | '=' | '.' | '_' | ':' | '/')
            }),
            Self::Azure => !key
                .chars()
                .any(|c| matches!(c, '<' | '>' | '%' | '&' | '\\' | '?' | '/')),
            Self::Gcp => GCP_KEY_REGEX.is_match(key),
        }
    }
}

fn is_aws_value_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | ':' | '=' | '+' | '@' | '_' | '/' | '-')
}
