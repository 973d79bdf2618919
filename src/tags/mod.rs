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

use time::{macros::format_description, Date, Duration, OffsetDateTime};

mod format;
mod processor;

pub use format::{
    tags_as_comma_separated_string, tags_as_kvp_list, tags_as_list_of_maps, TagPair,
};
pub use processor::TagProcessor;

/// Tags keyed by their prefixed name
pub type TagSet = HashMap<String, String>;

pub const EPHEMERAL_ENVIRONMENT_TYPE: &str = "Ephemeral";

/// Lifetime given to ephemeral environments without an explicit deletion date
pub const EPHEMERAL_LIFETIME_DAYS: i64 = 90;

/// Resolved configuration of a context.
///
/// Empty strings and empty collections stand for unset values.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    pub namespace: String,
    pub name: String,
    pub environment: String,
    pub environment_name: String,
    pub environment_type: String,

    pub enabled: bool,
    pub availability: String,
    pub managedby: String,
    pub deletion_date: String,

    pub pm_platform: String,
    pub pm_project_code: String,

    pub itsm_platform: String,
    pub itsm_system_id: String,
    pub itsm_component_id: String,
    pub itsm_instance_id: String,

    pub cost_center: String,
    pub product_owners: Vec<String>,
    pub code_owners: Vec<String>,
    pub data_owners: Vec<String>,

    pub sensitivity: String,
    pub data_regs: Vec<String>,
    pub security_review: String,
    pub privacy_review: String,

    pub source_repo_tags_enabled: bool,
    pub system_prefixes_enabled: bool,
    pub not_applicable_enabled: bool,
    pub owner_tags_enabled: bool,

    pub additional_tags: HashMap<String, String>,
    pub additional_data_tags: HashMap<String, String>,
}

/// Give ephemeral environments a deletion date when they have none
pub fn process_ephemeral_environment(config: &mut ContextConfig) {
    apply_ephemeral_deletion_date(config, OffsetDateTime::now_utc().date());
}

pub fn apply_ephemeral_deletion_date(config: &mut ContextConfig, today: Date) {
    if config.environment_type != EPHEMERAL_ENVIRONMENT_TYPE || !config.deletion_date.is_empty() {
        return;
    }

    let deletion_date = today.saturating_add(Duration::days(EPHEMERAL_LIFETIME_DAYS));
    match deletion_date.format(format_description!("[year]-[month]-[day]")) {
        Ok(formatted) => config.deletion_date = formatted,
        Err(err) => tracing::warn!("could not format deletion date {deletion_date}: {err}"),
    }
}
