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

use crate::cloud::CloudRules;
use crate::git::RepoMetadataCache;
use crate::utils::DisplayJoinable;

use super::{ContextConfig, TagSet};

/// Assembles the resource tags and the data tags of a context
#[derive(Debug, Clone, Copy)]
pub struct TagProcessor<'a> {
    cloud: CloudRules,
    tag_prefix: &'a str,
    repo: &'a RepoMetadataCache,
}

/// Unprefixed tags being assembled, before sanitization
struct TagBuilder {
    cloud: CloudRules,
    include_not_applicable: bool,
    tags: TagSet,
}

impl TagBuilder {
    fn new(cloud: CloudRules, include_not_applicable: bool) -> Self {
        Self {
            cloud,
            include_not_applicable,
            tags: TagSet::new(),
        }
    }

    /// Set the value, or the placeholder if it is empty, or nothing
    fn add(&mut self, key: &str, value: &str) {
        if !value.is_empty() {
            self.tags.insert(key.to_string(), value.to_string());
        } else if self.include_not_applicable {
            self.tags
                .insert(key.to_string(), self.cloud.not_applicable().to_string());
        }
    }

    fn add_list(&mut self, key: &str, values: &[String]) {
        let joined = values.iter().join_with(self.cloud.delimiter()).to_string();
        self.add(key, &joined);
    }

    /// `platform<delimiter>id` when prefixing applies, the bare id otherwise
    fn add_prefixed(&mut self, key: &str, prefix_enabled: bool, platform: &str, id: &str) {
        if prefix_enabled && !platform.is_empty() && !id.is_empty() {
            let value = format!("{platform}{}{id}", self.cloud.delimiter());
            self.add(key, &value);
        } else {
            self.add(key, id);
        }
    }

    /// With a platform, only the present ids are set, as `platform<delimiter>id`
    fn add_system_ids(&mut self, prefix_enabled: bool, platform: &str, ids: &[(&str, &str)]) {
        if prefix_enabled && !platform.is_empty() {
            for (key, id) in ids.iter().filter(|(_, id)| !id.is_empty()) {
                let value = format!("{platform}{}{id}", self.cloud.delimiter());
                self.tags.insert(key.to_string(), value);
            }
        } else {
            for (key, id) in ids {
                self.add(key, id);
            }
        }
    }

    fn merge(&mut self, additional: &HashMap<String, String>) {
        self.tags
            .extend(additional.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    fn finish(self, tag_prefix: &str) -> TagSet {
        let cloud = self.cloud;
        let max_length = cloud.max_tag_length();
        self.tags
            .into_iter()
            .map(|(key, value)| {
                let value = cloud
                    .sanitize_tag_value(&value)
                    .chars()
                    .take(max_length)
                    .collect();
                (format!("{tag_prefix}{key}"), value)
            })
            .collect()
    }
}

impl<'a> TagProcessor<'a> {
    pub fn new(cloud: CloudRules, tag_prefix: &'a str, repo: &'a RepoMetadataCache) -> Self {
        Self {
            cloud,
            tag_prefix,
            repo,
        }
    }

    /// Build the resource tags
    pub async fn process(&self, config: &ContextConfig) -> TagSet {
        let mut tags = TagBuilder::new(self.cloud, config.not_applicable_enabled);

        tags.add("environment", &config.environment_name);
        tags.add("availability", &config.availability);
        tags.add("managedby", &config.managedby);
        tags.add("deletiondate", &config.deletion_date);
        tags.add("costcenter", &config.cost_center);

        tags.add_prefixed(
            "pmprojectcode",
            config.system_prefixes_enabled,
            &config.pm_platform,
            &config.pm_project_code,
        );
        tags.add_system_ids(
            config.system_prefixes_enabled,
            &config.itsm_platform,
            &[
                ("itsmsystemid", config.itsm_system_id.as_str()),
                ("itsmcomponentid", config.itsm_component_id.as_str()),
                ("itsminstanceid", config.itsm_instance_id.as_str()),
            ],
        );

        if config.owner_tags_enabled {
            tags.add_list("productowners", &config.product_owners);
            tags.add_list("codeowners", &config.code_owners);
        }

        tags.add("securityreview", &config.security_review);
        tags.add("privacyreview", &config.privacy_review);

        if config.source_repo_tags_enabled {
            let metadata = self.repo.get().await;
            tags.add("sourcerepo", &metadata.repo_url);
            tags.add("sourcecommit", &metadata.commit_hash);
        }

        tags.merge(&config.additional_tags);
        tags.finish(self.tag_prefix)
    }

    /// Build the data classification tags
    pub fn process_data_tags(&self, config: &ContextConfig) -> TagSet {
        let mut tags = TagBuilder::new(self.cloud, config.not_applicable_enabled);

        tags.add("sensitivity", &config.sensitivity);
        tags.add_list("dataregs", &config.data_regs);
        if config.owner_tags_enabled {
            tags.add_list("dataowners", &config.data_owners);
        }

        tags.merge(&config.additional_data_tags);
        tags.finish(self.tag_prefix)
    }
}
