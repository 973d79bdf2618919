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

use crate::utils::DisplayJoinable;

pub const MAX_NAME_PREFIX_LENGTH: usize = 24;
pub const MIN_NAME_PREFIX_LENGTH: usize = 2;

lazy_static! {
    static ref NAME_PREFIX_REGEX: Regex = Regex::new(r"^[a-z][a-z0-9-]{0,22}[a-z0-9]$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("at least one of namespace, name, or environment must be provided")]
    AllEmpty,
    #[error("name prefix '{0}' is too short, must be at least {MIN_NAME_PREFIX_LENGTH} characters")]
    TooShort(String),
    #[error("name prefix '{0}' must start with a letter, end with a letter or digit, and contain only lowercase letters, digits and hyphens")]
    InvalidFormat(String),
}

/// Builds the name prefix shared by all the resources of a context
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NameGenerator<'a> {
    pub namespace: &'a str,
    pub name: &'a str,
    pub environment: &'a str,
}

impl<'a> NameGenerator<'a> {
    pub fn new(namespace: &'a str, name: &'a str, environment: &'a str) -> Self {
        Self {
            namespace,
            name,
            environment,
        }
    }

    pub fn generate(&self) -> Result<String, NameError> {
        let parts = [self.namespace, self.name, self.environment];
        if parts.iter().all(|part| part.is_empty()) {
            return Err(NameError::AllEmpty);
        }

        let joined = if self.namespace.is_empty() && self.environment.is_empty() {
            self.name.to_lowercase()
        } else {
            parts
                .iter()
                .filter(|part| !part.is_empty())
                .join_with("-")
                .to_string()
                .to_lowercase()
        };

        if joined.chars().count() < MIN_NAME_PREFIX_LENGTH {
            return Err(NameError::TooShort(joined));
        }

        let prefix = if joined.chars().count() > MAX_NAME_PREFIX_LENGTH {
            self.truncate(&joined)
        } else {
            joined
        };

        if NAME_PREFIX_REGEX.is_match(&prefix) {
            Ok(prefix)
        } else {
            Err(NameError::InvalidFormat(prefix))
        }
    }

    /// Shorten an overlong prefix, keeping namespace and environment whole when possible
    fn truncate(&self, joined: &str) -> String {
        let namespace_len = self.namespace.chars().count();
        let environment_len = self.environment.chars().count();

        if !self.namespace.is_empty() && !self.name.is_empty() && !self.environment.is_empty() {
            let available = MAX_NAME_PREFIX_LENGTH as isize
                - namespace_len as isize
                - environment_len as isize
                - 2;
            if available >= MIN_NAME_PREFIX_LENGTH as isize {
                let mut name: String = self
                    .name
                    .to_lowercase()
                    .chars()
                    .take(available as usize)
                    .collect();
                if name.ends_with('-') {
                    name.pop();
                }
                return format!(
                    "{}-{}-{}",
                    self.namespace.to_lowercase(),
                    name,
                    self.environment.to_lowercase()
                );
            }
        }

        let mut prefix: String = joined.chars().take(MAX_NAME_PREFIX_LENGTH).collect();
        while prefix.ends_with('-') && prefix.chars().count() > MIN_NAME_PREFIX_LENGTH {
            prefix.pop();
        }
        if prefix.chars().last().is_some_and(|c| !c.is_alphanumeric()) {
            prefix.pop();
        }
        prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(namespace: &str, name: &str, environment: &str) -> Result<String, NameError> {
        NameGenerator::new(namespace, name, environment).generate()
    }

    #[test]
    fn standard_format() {
        assert_eq!(generate("myorg", "app", "prod").unwrap(), "myorg-app-prod");
        assert_eq!(generate("", "myapp", "").unwrap(), "myapp");
        assert_eq!(generate("org", "service", "").unwrap(), "org-service");
        assert_eq!(generate("", "service", "dev").unwrap(), "service-dev");
        assert_eq!(generate("org", "", "dev").unwrap(), "org-dev");
    }

    #[test]
    fn lowercases() {
        assert_eq!(
            generate("MyOrg", "MyApp", "PROD").unwrap(),
            "myorg-myapp-prod"
        );
    }

    #[test]
    fn minimum_length() {
        assert_eq!(generate("", "", ""), Err(NameError::AllEmpty));
        assert_eq!(generate("", "a", ""), Err(NameError::TooShort("a".into())));
        assert_eq!(generate("", "ab", "").unwrap(), "ab");
    }

    #[test]
    fn under_limit_is_not_truncated() {
        let prefix = generate("ab", "abcdefghijklmnop", "cd").unwrap();
        assert_eq!(prefix, "ab-abcdefghijklmnop-cd");
        assert_eq!(prefix.len(), 22);
    }

    #[test]
    fn truncates_name_segment_only() {
        assert_eq!(
            generate("myorg", "verylongappname", "prod").unwrap(),
            "myorg-verylongappna-prod"
        );
        assert_eq!(
            generate("org", "application-service-x", "dev").unwrap(),
            "org-application-serv-dev"
        );
    }

    #[test]
    fn truncated_name_drops_trailing_hyphen() {
        // available = 24 - 3 - 3 - 2 = 16, "service-account-" ends with a hyphen
        assert_eq!(
            generate("org", "service-account-name", "dev").unwrap(),
            "org-service-account-dev"
        );
    }

    #[test]
    fn falls_back_to_hard_truncation() {
        // available = 24 - 11 - 10 - 2 < 2
        assert_eq!(
            generate("verylongorg", "verylongappname", "production").unwrap(),
            "verylongorg-verylongappn"
        );
        assert_eq!(
            generate("", "verylongapplicationnamethatshouldbetruncated", "").unwrap(),
            "verylongapplicationnamet"
        );
    }

    #[test]
    fn hard_truncation_strips_trailing_hyphens() {
        // the 24th character is a hyphen
        assert_eq!(
            generate("", "abcdefghijklmnopqrstuvw--xyz", "").unwrap(),
            "abcdefghijklmnopqrstuvw"
        );
        assert_eq!(
            generate("longnamespace", "b", "longenvironment").unwrap(),
            "longnamespace-b-longenvi"
        );
    }

    #[test]
    fn truncation_never_ends_with_hyphen() {
        let names = [
            "a-b-c-d-e-f-g-h-i-j-k-l-m-n-o-p",
            "service-account-name",
            "x----------------------------y",
            "abcdefghijklmnopqrstuvwxyz",
        ];
        for namespace in ["", "ns", "my-org"] {
            for environment in ["", "qa", "pre-prod"] {
                for name in names {
                    if let Ok(prefix) = generate(namespace, name, environment) {
                        assert!(!prefix.ends_with('-'), "{prefix}");
                        assert!(prefix.len() >= MIN_NAME_PREFIX_LENGTH);
                        assert!(prefix.len() <= MAX_NAME_PREFIX_LENGTH);
                        if !namespace.is_empty() && !environment.is_empty() {
                            assert!(prefix.starts_with(&format!("{namespace}-")), "{prefix}");
                            assert!(prefix.ends_with(&format!("-{environment}")), "{prefix}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn invalid_format() {
        assert_eq!(
            generate("", "1app", ""),
            Err(NameError::InvalidFormat("1app".into()))
        );
        assert_eq!(
            generate("", "my_app", ""),
            Err(NameError::InvalidFormat("my_app".into()))
        );
        assert_eq!(
            generate("", "app-", ""),
            Err(NameError::InvalidFormat("app-".into()))
        );
    }
}
