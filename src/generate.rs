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

use crate::cloud::CloudRules;
use crate::error::Result;
use crate::git::RepoMetadataCache;
use crate::naming::NameGenerator;
use crate::tags::{process_ephemeral_environment, ContextConfig, TagProcessor, TagSet};
use crate::validation::validate_config;

/// Everything derived from one context configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedContext {
    /// The configuration after defaulting of the ephemeral deletion date
    pub config: ContextConfig,
    pub name_prefix: String,
    pub tags: TagSet,
    pub data_tags: TagSet,
}

/// Validate the configuration, then derive its name prefix and tags.
///
/// Nothing is generated if any field is invalid.
pub async fn generate(
    mut config: ContextConfig,
    cloud: CloudRules,
    tag_prefix: &str,
    repo: &RepoMetadataCache,
) -> Result<GeneratedContext> {
    validate_config(&config)?;
    process_ephemeral_environment(&mut config);

    let name_prefix =
        NameGenerator::new(&config.namespace, &config.name, &config.environment).generate()?;

    let processor = TagProcessor::new(cloud, tag_prefix, repo);
    let tags = processor.process(&config).await;
    let data_tags = processor.process_data_tags(&config);

    tracing::debug!(
        name_prefix = %name_prefix,
        tags_count = tags.len(),
        data_tags_count = data_tags.len(),
        "generated context"
    );

    Ok(GeneratedContext {
        config,
        name_prefix,
        tags,
        data_tags,
    })
}
