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

use serde::{Deserialize, Serialize};
use tf_provider::schema::{
    Attribute, AttributeConstraint, AttributeType, Block, Description, Schema,
};
use tf_provider::value::{Value, ValueBool, ValueList, ValueMap, ValueString};

use crate::utils::WithSchema;

#[derive(Debug, Clone, Copy)]
enum FieldType {
    String,
    Bool,
    StringList,
    StringMap,
}

impl FieldType {
    fn attr_type(self) -> AttributeType {
        match self {
            FieldType::String => AttributeType::String,
            FieldType::Bool => AttributeType::Bool,
            FieldType::StringList => AttributeType::List(Box::new(AttributeType::String)),
            FieldType::StringMap => AttributeType::Map(Box::new(AttributeType::String)),
        }
    }
}

/// Fields a child context inherits from its parent, in schema order
const INHERITABLE_FIELDS: &[(&str, FieldType, &str)] = &[
    ("namespace", FieldType::String, "Organization or business unit identifier (1-8 chars, lowercase alphanumeric with hyphens)"),
    ("environment", FieldType::String, "Environment abbreviation (1-8 chars, lowercase alphanumeric with hyphens)"),
    ("environment_name", FieldType::String, "Full environment name"),
    ("environment_type", FieldType::String, "One of: None, Ephemeral, Development, Testing, UAT, Production, MissionCritical"),
    ("enabled", FieldType::Bool, "Enable/disable resource creation"),
    ("availability", FieldType::String, "Availability requirement: preemptable, spot, standard, dedicated, isolated"),
    ("managedby", FieldType::String, "Management platform identifier"),
    ("deletion_date", FieldType::String, "Resource deletion date (YYYY-MM-DD format)"),
    ("pm_platform", FieldType::String, "Project management platform (e.g., JIRA, SNOW)"),
    ("pm_project_code", FieldType::String, "Project code/prefix"),
    ("itsm_platform", FieldType::String, "IT Service Management platform"),
    ("itsm_system_id", FieldType::String, "ITSM system identifier"),
    ("itsm_component_id", FieldType::String, "ITSM component identifier"),
    ("itsm_instance_id", FieldType::String, "ITSM instance identifier"),
    ("cost_center", FieldType::String, "Cost center for billing"),
    ("product_owners", FieldType::StringList, "Product owner email addresses"),
    ("code_owners", FieldType::StringList, "Code owner email addresses"),
    ("data_owners", FieldType::StringList, "Data owner email addresses"),
    ("sensitivity", FieldType::String, "Data sensitivity level: public, internal, confidential, restricted, critical"),
    ("data_regs", FieldType::StringList, "Data compliance regulations"),
    ("security_review", FieldType::String, "Security review identifier/date"),
    ("privacy_review", FieldType::String, "Privacy review identifier/date"),
    ("source_repo_tags_enabled", FieldType::Bool, "Include git repository tags"),
    ("system_prefixes_enabled", FieldType::Bool, "Add platform prefixes to system IDs"),
    ("not_applicable_enabled", FieldType::Bool, "Include N/A tags for null values"),
    ("owner_tags_enabled", FieldType::Bool, "Include owner tags"),
    ("additional_tags", FieldType::StringMap, "Custom tags to merge"),
    ("additional_data_tags", FieldType::StringMap, "Custom data-specific tags to merge"),
];

const COMPUTED_FIELDS: &[(&str, FieldType, &str)] = &[
    ("id", FieldType::String, "Unique identifier for this data source instance"),
    ("name_prefix", FieldType::String, "Computed name prefix"),
    ("tags", FieldType::StringMap, "Normalized tag map"),
    ("data_tags", FieldType::StringMap, "Data-specific tags"),
    ("tags_as_kvp_list", FieldType::StringList, "Tags as key=value pairs"),
    ("tags_as_comma_separated_string", FieldType::String, "Tags as comma-separated string"),
    ("data_tags_as_kvp_list", FieldType::StringList, "Data tags as key=value pairs"),
    ("data_tags_as_comma_separated_string", FieldType::String, "Data tags as comma-separated string"),
];

fn attribute(attr_type: AttributeType, description: &str, constraint: AttributeConstraint) -> Attribute {
    Attribute {
        attr_type,
        description: Description::plain(description),
        constraint,
        sensitive: false,
        deprecated: false,
    }
}

/// Object type of `parent_context` and `context_output`
fn context_object_type() -> AttributeType {
    AttributeType::Object(
        INHERITABLE_FIELDS
            .iter()
            .map(|(name, field_type, _)| (name.to_string(), field_type.attr_type()))
            .collect(),
    )
}

/// Values shared between a parent context and its children
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextInput<'a> {
    pub namespace: ValueString<'a>,
    pub environment: ValueString<'a>,
    pub environment_name: ValueString<'a>,
    pub environment_type: ValueString<'a>,
    pub enabled: ValueBool,
    pub availability: ValueString<'a>,
    pub managedby: ValueString<'a>,
    pub deletion_date: ValueString<'a>,
    pub pm_platform: ValueString<'a>,
    pub pm_project_code: ValueString<'a>,
    pub itsm_platform: ValueString<'a>,
    pub itsm_system_id: ValueString<'a>,
    pub itsm_component_id: ValueString<'a>,
    pub itsm_instance_id: ValueString<'a>,
    pub cost_center: ValueString<'a>,
    pub product_owners: ValueList<ValueString<'a>>,
    pub code_owners: ValueList<ValueString<'a>>,
    pub data_owners: ValueList<ValueString<'a>>,
    pub sensitivity: ValueString<'a>,
    pub data_regs: ValueList<ValueString<'a>>,
    pub security_review: ValueString<'a>,
    pub privacy_review: ValueString<'a>,
    pub source_repo_tags_enabled: ValueBool,
    pub system_prefixes_enabled: ValueBool,
    pub not_applicable_enabled: ValueBool,
    pub owner_tags_enabled: ValueBool,
    pub additional_tags: ValueMap<'a, ValueString<'a>>,
    pub additional_data_tags: ValueMap<'a, ValueString<'a>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextState<'a> {
    pub parent_context: Value<ContextInput<'a>>,

    pub namespace: ValueString<'a>,
    pub name: ValueString<'a>,
    pub environment: ValueString<'a>,
    pub environment_name: ValueString<'a>,
    pub environment_type: ValueString<'a>,
    pub enabled: ValueBool,
    pub availability: ValueString<'a>,
    pub managedby: ValueString<'a>,
    pub deletion_date: ValueString<'a>,
    pub pm_platform: ValueString<'a>,
    pub pm_project_code: ValueString<'a>,
    pub itsm_platform: ValueString<'a>,
    pub itsm_system_id: ValueString<'a>,
    pub itsm_component_id: ValueString<'a>,
    pub itsm_instance_id: ValueString<'a>,
    pub cost_center: ValueString<'a>,
    pub product_owners: ValueList<ValueString<'a>>,
    pub code_owners: ValueList<ValueString<'a>>,
    pub data_owners: ValueList<ValueString<'a>>,
    pub sensitivity: ValueString<'a>,
    pub data_regs: ValueList<ValueString<'a>>,
    pub security_review: ValueString<'a>,
    pub privacy_review: ValueString<'a>,
    pub source_repo_tags_enabled: ValueBool,
    pub system_prefixes_enabled: ValueBool,
    pub not_applicable_enabled: ValueBool,
    pub owner_tags_enabled: ValueBool,
    pub additional_tags: ValueMap<'a, ValueString<'a>>,
    pub additional_data_tags: ValueMap<'a, ValueString<'a>>,

    pub id: ValueString<'a>,
    pub name_prefix: ValueString<'a>,
    pub tags: ValueMap<'a, ValueString<'a>>,
    pub data_tags: ValueMap<'a, ValueString<'a>>,
    pub tags_as_list_of_maps: ValueList<ValueMap<'a, ValueString<'a>>>,
    pub tags_as_kvp_list: ValueList<ValueString<'a>>,
    pub tags_as_comma_separated_string: ValueString<'a>,
    pub data_tags_as_list_of_maps: ValueList<ValueMap<'a, ValueString<'a>>>,
    pub data_tags_as_kvp_list: ValueList<ValueString<'a>>,
    pub data_tags_as_comma_separated_string: ValueString<'a>,
    pub context_output: Value<ContextInput<'a>>,
}

impl<'a> WithSchema for ContextState<'a> {
    fn schema() -> Schema {
        let list_of_maps = AttributeType::List(Box::new(AttributeType::Map(Box::new(
            AttributeType::String,
        ))));

        let mut attributes: HashMap<String, Attribute> = INHERITABLE_FIELDS
            .iter()
            .map(|(name, field_type, description)| {
                (
                    name.to_string(),
                    attribute(field_type.attr_type(), description, AttributeConstraint::Optional),
                )
            })
            .chain(COMPUTED_FIELDS.iter().map(|(name, field_type, description)| {
                (
                    name.to_string(),
                    attribute(field_type.attr_type(), description, AttributeConstraint::Computed),
                )
            }))
            .collect();

        attributes.extend([
            (
                "name".to_string(),
                attribute(
                    AttributeType::String,
                    "Unique resource name (combined name_prefix must be 2-24 chars)",
                    AttributeConstraint::Optional,
                ),
            ),
            (
                "parent_context".to_string(),
                attribute(
                    context_object_type(),
                    "Parent context values to inherit. Child context can override individual fields.",
                    AttributeConstraint::Optional,
                ),
            ),
            (
                "tags_as_list_of_maps".to_string(),
                attribute(
                    list_of_maps.clone(),
                    "Tags as a list of {key, value} maps",
                    AttributeConstraint::Computed,
                ),
            ),
            (
                "data_tags_as_list_of_maps".to_string(),
                attribute(
                    list_of_maps,
                    "Data tags as a list of {key, value} maps",
                    AttributeConstraint::Computed,
                ),
            ),
            (
                "context_output".to_string(),
                attribute(
                    context_object_type(),
                    "Resolved context values that can be used as input for child contexts",
                    AttributeConstraint::Computed,
                ),
            ),
        ]);

        Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes,
                description: Description::plain(
                    "Generates standardized naming conventions and cloud-provider-specific tags for infrastructure resources. Supports parent/child context inheritance.",
                ),
                ..Default::default()
            },
        }
    }
}
