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

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use tf_provider::data_source::DynamicDataSource;
use tf_provider::resource::DynamicResource;
use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType};
use tf_provider::value::ValueString;
use tf_provider::{map, AttributePath, Block, Description, Diagnostics, Provider, Schema, ValueEmpty};

use crate::cloud::{CloudRules, DEFAULT_CLOUD_PROVIDER};
use crate::context::ContextDataSource;
use crate::git::RepoMetadataCache;
use crate::utils::known_str;
use crate::validation::validate_cloud_provider;

pub const DEFAULT_TAG_PREFIX: &str = "bc-";

/// Provider-level settings shared with the data sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub cloud_provider: String,
    pub tag_prefix: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            cloud_provider: DEFAULT_CLOUD_PROVIDER.to_string(),
            tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
        }
    }
}

impl ProviderSettings {
    pub fn cloud_rules(&self) -> CloudRules {
        CloudRules::from_identifier(&self.cloud_provider)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextProviderConfig<'a> {
    pub cloud_provider: ValueString<'a>,
    pub tag_prefix: ValueString<'a>,
}

#[derive(Debug, Default, Clone)]
pub struct ContextProvider {
    settings: Arc<RwLock<ProviderSettings>>,
    repo: Arc<RepoMetadataCache>,
}

impl ContextProvider {
    /// Settings in effect, defaults until configured
    pub async fn settings(&self) -> ProviderSettings {
        self.settings.read().await.clone()
    }
}

#[async_trait]
impl Provider for ContextProvider {
    type Config<'a> = ContextProviderConfig<'a>;
    type MetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        let optional_string = |description: &str| Attribute {
            attr_type: AttributeType::String,
            description: Description::plain(description),
            constraint: AttributeConstraint::Optional,
            sensitive: false,
            deprecated: false,
        };

        Some(Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes: HashMap::from([
                    (
                        "cloud_provider".to_string(),
                        optional_string(
                            "Cloud provider for tag formatting: dc, aws, az, gcp, oci, ibm, do, vul, ali, cv (default: dc)",
                        ),
                    ),
                    (
                        "tag_prefix".to_string(),
                        optional_string("Prefix added to every generated tag key (default: bc-)"),
                    ),
                ]),
                description: Description::plain("Naming and tagging context"),
                ..Default::default()
            },
        })
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::Config<'a>) -> Option<()> {
        if let Some(cloud_provider) = known_str(&config.cloud_provider) {
            if let Err(err) = validate_cloud_provider(cloud_provider) {
                diags.error(
                    "Invalid cloud_provider",
                    err.to_string(),
                    AttributePath::new("cloud_provider"),
                );
            }
        }

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn configure<'a>(
        &self,
        _diags: &mut Diagnostics,
        terraform_version: String,
        config: Self::Config<'a>,
    ) -> Option<()> {
        let defaults = ProviderSettings::default();
        let settings = ProviderSettings {
            cloud_provider: known_str(&config.cloud_provider)
                .unwrap_or(&defaults.cloud_provider)
                .to_string(),
            tag_prefix: known_str(&config.tag_prefix)
                .unwrap_or(&defaults.tag_prefix)
                .to_string(),
        };

        tracing::debug!(
            terraform_version = %terraform_version,
            cloud_provider = %settings.cloud_provider,
            tag_prefix = %settings.tag_prefix,
            "provider configured"
        );

        *self.settings.write().await = settings;
        Some(())
    }

    fn get_resources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn DynamicResource>>> {
        Some(HashMap::new())
    }

    fn get_data_sources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn DynamicDataSource>>> {
        Some(map! {
            "context" => ContextDataSource::new(self.settings.clone(), self.repo.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::string_value;

    #[tokio::test]
    async fn configure_keeps_defaults_for_null_values() {
        let provider = ContextProvider::default();
        let mut diags = Diagnostics::default();

        provider
            .configure(&mut diags, "1.9.0".to_string(), ContextProviderConfig::default())
            .await;

        assert_eq!(provider.settings().await, ProviderSettings::default());
        assert_eq!(provider.settings().await.cloud_rules(), CloudRules::Default);
    }

    #[tokio::test]
    async fn configure_stores_settings() {
        let provider = ContextProvider::default();
        let mut diags = Diagnostics::default();
        let config = ContextProviderConfig {
            cloud_provider: string_value("gcp"),
            tag_prefix: string_value("acme-"),
        };

        assert!(provider.validate(&mut diags, config.clone()).await.is_some());
        provider
            .configure(&mut diags, "1.9.0".to_string(), config)
            .await;

        let settings = provider.settings().await;
        assert_eq!(settings.cloud_rules(), CloudRules::Gcp);
        assert_eq!(settings.tag_prefix, "acme-");
    }

    #[tokio::test]
    async fn validate_rejects_unknown_cloud_provider() {
        let provider = ContextProvider::default();
        let mut diags = Diagnostics::default();
        let config = ContextProviderConfig {
            cloud_provider: string_value("heroku"),
            ..Default::default()
        };

        assert!(provider.validate(&mut diags, config).await.is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[test]
    fn exposes_context_data_source() {
        let mut diags = Diagnostics::default();
        let data_sources = ContextProvider::default()
            .get_data_sources(&mut diags)
            .unwrap_or_default();

        assert_eq!(data_sources.len(), 1);
        assert!(data_sources.contains_key("context"));
    }
}
