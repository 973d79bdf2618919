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

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tf_provider::value::{Value, ValueList, ValueMap, ValueString};
use tf_provider::{AttributePath, DataSource, Diagnostics, Schema, ValueEmpty};

use crate::context_provider::ProviderSettings;
use crate::generate::{generate, GeneratedContext};
use crate::git::RepoMetadataCache;
use crate::tags::{
    tags_as_comma_separated_string, tags_as_kvp_list, tags_as_list_of_maps, TagSet,
};
use crate::utils::{string_list_value, string_map_value, string_value, WithSchema, WithValidate};

use super::state::{ContextInput, ContextState};

#[derive(Debug, Default, Clone)]
pub struct ContextDataSource {
    settings: Arc<RwLock<ProviderSettings>>,
    repo: Arc<RepoMetadataCache>,
}

impl ContextDataSource {
    pub fn new(settings: Arc<RwLock<ProviderSettings>>, repo: Arc<RepoMetadataCache>) -> Self {
        Self { settings, repo }
    }
}

fn list_of_maps<'a>(tags: &TagSet) -> ValueList<ValueMap<'a, ValueString<'a>>> {
    Value::Value(
        tags_as_list_of_maps(tags)
            .into_iter()
            .map(|pair| string_map_value([("key", pair.key), ("value", pair.value)]))
            .collect(),
    )
}

fn fill_outputs(state: &mut ContextState, generated: &GeneratedContext) {
    let GeneratedContext {
        config,
        name_prefix,
        tags,
        data_tags,
    } = generated;

    state.id = string_value(name_prefix);
    state.name_prefix = string_value(name_prefix);

    state.tags = string_map_value(tags);
    state.tags_as_list_of_maps = list_of_maps(tags);
    state.tags_as_kvp_list = string_list_value(tags_as_kvp_list(tags));
    state.tags_as_comma_separated_string = string_value(tags_as_comma_separated_string(tags));

    state.data_tags = string_map_value(data_tags);
    state.data_tags_as_list_of_maps = list_of_maps(data_tags);
    state.data_tags_as_kvp_list = string_list_value(tags_as_kvp_list(data_tags));
    state.data_tags_as_comma_separated_string =
        string_value(tags_as_comma_separated_string(data_tags));

    state.context_output = Value::Value(ContextInput::from(config));
}

#[async_trait]
impl DataSource for ContextDataSource {
    type State<'a> = ContextState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(ContextState::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        config.validate(diags, AttributePath::default());

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let settings = self.settings.read().await.clone();
        let cloud = settings.cloud_rules();

        let generated =
            match generate(config.resolve(), cloud, &settings.tag_prefix, &self.repo).await {
                Ok(generated) => generated,
                Err(err) => {
                    diags.error(
                        "Failed to generate context",
                        err.to_string(),
                        AttributePath::new(err.field()),
                    );
                    return None;
                }
            };

        let mut invalid_keys = generated
            .tags
            .keys()
            .chain(generated.data_tags.keys())
            .filter(|key| !cloud.is_valid_tag_key(key))
            .collect::<Vec<_>>();
        invalid_keys.sort();
        for key in invalid_keys {
            diags.warning(
                "Invalid tag key",
                format!(
                    "tag key '{key}' does not match the format expected by cloud provider '{}'",
                    settings.cloud_provider
                ),
                AttributePath::new("tags").key(key.clone()),
            );
        }

        let mut state = config;
        fill_outputs(&mut state, &generated);
        Some(state)
    }
}
