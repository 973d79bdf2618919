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

use tf_provider::value::{Value, ValueBool, ValueList, ValueMap, ValueString};

use crate::tags::ContextConfig;
use crate::utils::{
    known_str, known_string_map, known_strings, string_list_value, string_map_value, string_value,
};

use super::state::{ContextInput, ContextState};

pub(super) const DEFAULT_AVAILABILITY: &str = "preemptable";
pub(super) const DEFAULT_MANAGED_BY: &str = "terraform";
pub(super) const DEFAULT_SENSITIVITY: &str = "confidential";

fn merge_string(own: &ValueString, parent: Option<&ValueString>) -> String {
    known_str(own)
        .or_else(|| parent.and_then(known_str))
        .unwrap_or_default()
        .to_string()
}

fn merge_bool(own: &ValueBool, parent: Option<&ValueBool>, default: bool) -> bool {
    match (own, parent) {
        (Value::Value(value), _) => *value,
        (_, Some(Value::Value(value))) => *value,
        _ => default,
    }
}

fn merge_list(own: &ValueList<ValueString>, parent: Option<&ValueList<ValueString>>) -> Vec<String> {
    known_strings(own)
        .or_else(|| parent.and_then(known_strings))
        .unwrap_or_default()
}

/// Entries of the parent, overridden by the entries of the child
fn merge_map(
    own: &ValueMap<ValueString>,
    parent: Option<&ValueMap<ValueString>>,
) -> HashMap<String, String> {
    let mut merged = parent.and_then(known_string_map).unwrap_or_default();
    merged.extend(known_string_map(own).unwrap_or_default());
    merged
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

impl<'a> ContextState<'a> {
    /// Resolve the configuration: own values, then parent context values, then defaults
    pub fn resolve(&self) -> ContextConfig {
        let parent = match &self.parent_context {
            Value::Value(parent) => Some(parent),
            _ => None,
        };

        macro_rules! string {
            ($field:ident) => {
                merge_string(&self.$field, parent.map(|p| &p.$field))
            };
        }
        macro_rules! boolean {
            ($field:ident) => {
                merge_bool(&self.$field, parent.map(|p| &p.$field), true)
            };
        }
        macro_rules! list {
            ($field:ident) => {
                merge_list(&self.$field, parent.map(|p| &p.$field))
            };
        }
        macro_rules! map {
            ($field:ident) => {
                merge_map(&self.$field, parent.map(|p| &p.$field))
            };
        }

        ContextConfig {
            // The name belongs to the resource and is never inherited
            name: known_str(&self.name).unwrap_or_default().to_string(),

            namespace: string!(namespace),
            environment: string!(environment),
            environment_name: string!(environment_name),
            environment_type: string!(environment_type),

            enabled: boolean!(enabled),
            availability: or_default(string!(availability), DEFAULT_AVAILABILITY),
            managedby: or_default(string!(managedby), DEFAULT_MANAGED_BY),
            deletion_date: string!(deletion_date),

            pm_platform: string!(pm_platform),
            pm_project_code: string!(pm_project_code),

            itsm_platform: string!(itsm_platform),
            itsm_system_id: string!(itsm_system_id),
            itsm_component_id: string!(itsm_component_id),
            itsm_instance_id: string!(itsm_instance_id),

            cost_center: string!(cost_center),
            product_owners: list!(product_owners),
            code_owners: list!(code_owners),
            data_owners: list!(data_owners),

            sensitivity: or_default(string!(sensitivity), DEFAULT_SENSITIVITY),
            data_regs: list!(data_regs),
            security_review: string!(security_review),
            privacy_review: string!(privacy_review),

            source_repo_tags_enabled: boolean!(source_repo_tags_enabled),
            system_prefixes_enabled: boolean!(system_prefixes_enabled),
            not_applicable_enabled: boolean!(not_applicable_enabled),
            owner_tags_enabled: boolean!(owner_tags_enabled),

            additional_tags: map!(additional_tags),
            additional_data_tags: map!(additional_data_tags),
        }
    }
}

impl<'a> From<&ContextConfig> for ContextInput<'a> {
    fn from(config: &ContextConfig) -> Self {
        Self {
            namespace: string_value(&config.namespace),
            environment: string_value(&config.environment),
            environment_name: string_value(&config.environment_name),
            environment_type: string_value(&config.environment_type),
            enabled: Value::Value(config.enabled),
            availability: string_value(&config.availability),
            managedby: string_value(&config.managedby),
            deletion_date: string_value(&config.deletion_date),
            pm_platform: string_value(&config.pm_platform),
            pm_project_code: string_value(&config.pm_project_code),
            itsm_platform: string_value(&config.itsm_platform),
            itsm_system_id: string_value(&config.itsm_system_id),
            itsm_component_id: string_value(&config.itsm_component_id),
            itsm_instance_id: string_value(&config.itsm_instance_id),
            cost_center: string_value(&config.cost_center),
            product_owners: string_list_value(&config.product_owners),
            code_owners: string_list_value(&config.code_owners),
            data_owners: string_list_value(&config.data_owners),
            sensitivity: string_value(&config.sensitivity),
            data_regs: string_list_value(&config.data_regs),
            security_review: string_value(&config.security_review),
            privacy_review: string_value(&config.privacy_review),
            source_repo_tags_enabled: Value::Value(config.source_repo_tags_enabled),
            system_prefixes_enabled: Value::Value(config.system_prefixes_enabled),
            not_applicable_enabled: Value::Value(config.not_applicable_enabled),
            owner_tags_enabled: Value::Value(config.owner_tags_enabled),
            additional_tags: string_map_value(&config.additional_tags),
            additional_data_tags: string_map_value(&config.additional_data_tags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_parent() {
        let config = ContextState {
            name: string_value("app"),
            ..Default::default()
        }
        .resolve();

        assert_eq!(config.name, "app");
        assert_eq!(config.availability, DEFAULT_AVAILABILITY);
        assert_eq!(config.managedby, DEFAULT_MANAGED_BY);
        assert_eq!(config.sensitivity, DEFAULT_SENSITIVITY);
        assert!(config.enabled);
        assert!(config.source_repo_tags_enabled);
        assert!(config.system_prefixes_enabled);
        assert!(config.not_applicable_enabled);
        assert!(config.owner_tags_enabled);
        assert!(config.product_owners.is_empty());
        assert!(config.additional_tags.is_empty());
    }

    #[test]
    fn child_overrides_parent() {
        let parent = ContextInput {
            namespace: string_value("parent"),
            environment: string_value("dev"),
            owner_tags_enabled: Value::Value(false),
            code_owners: string_list_value(["parent@example.com"]),
            additional_tags: string_map_value([("team", "parent"), ("tier", "web")]),
            ..Default::default()
        };
        let config = ContextState {
            parent_context: Value::Value(parent),
            name: string_value("app"),
            environment: string_value("prod"),
            code_owners: string_list_value(["child@example.com"]),
            additional_tags: string_map_value([("team", "child")]),
            ..Default::default()
        }
        .resolve();

        assert_eq!(config.namespace, "parent");
        assert_eq!(config.environment, "prod");
        assert!(!config.owner_tags_enabled);
        assert_eq!(config.code_owners, vec!["child@example.com".to_string()]);
        assert_eq!(
            config.additional_tags,
            HashMap::from([
                ("team".to_string(), "child".to_string()),
                ("tier".to_string(), "web".to_string()),
            ])
        );
    }

    #[test]
    fn empty_child_list_is_kept() {
        let parent = ContextInput {
            data_regs: string_list_value(["GDPR"]),
            ..Default::default()
        };
        let config = ContextState {
            parent_context: Value::Value(parent),
            data_regs: string_list_value(Vec::<String>::new()),
            ..Default::default()
        }
        .resolve();

        assert!(config.data_regs.is_empty());
    }

    #[test]
    fn output_round_trips_as_parent() {
        let first = ContextState {
            namespace: string_value("org"),
            name: string_value("app"),
            availability: string_value("spot"),
            data_regs: string_list_value(["GDPR"]),
            not_applicable_enabled: Value::Value(false),
            ..Default::default()
        }
        .resolve();

        let second = ContextState {
            parent_context: Value::Value(ContextInput::from(&first)),
            name: string_value("app"),
            ..Default::default()
        }
        .resolve();

        assert_eq!(first, second);
    }
}
