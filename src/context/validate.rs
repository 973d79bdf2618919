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

use tf_provider::value::{Value, ValueList, ValueString};
use tf_provider::{AttributePath, Diagnostics};

use crate::utils::{known_str, known_strings, WithValidate};
use crate::validation::{
    validate_availability, validate_deletion_date, validate_emails, validate_environment,
    validate_environment_type, validate_namespace, validate_sensitivity, ValidationResult,
};

use super::state::{ContextInput, ContextState};

fn check_str(
    diags: &mut Diagnostics,
    attr_path: &AttributePath,
    field: &'static str,
    value: &ValueString,
    validator: fn(&str) -> ValidationResult,
) {
    if let Some(value) = known_str(value) {
        if let Err(err) = validator(value) {
            diags.error(
                format!("Invalid {field}"),
                err.to_string(),
                attr_path.clone().attribute(field),
            );
        }
    }
}

fn check_emails(
    diags: &mut Diagnostics,
    attr_path: &AttributePath,
    field: &'static str,
    value: &ValueList<ValueString>,
) {
    // Unknown elements are skipped, they are checked again on read
    if let Some(emails) = known_strings(value) {
        if let Err(err) = validate_emails(field, &emails) {
            diags.error(
                format!("Invalid {field}"),
                err.to_string(),
                attr_path.clone().attribute(field),
            );
        }
    }
}

macro_rules! validate_fields {
    ($source:expr, $diags:expr, $attr_path:expr) => {{
        let source = $source;
        let diags: &mut Diagnostics = $diags;
        let attr_path: &AttributePath = $attr_path;

        check_str(diags, attr_path, "namespace", &source.namespace, validate_namespace);
        check_str(diags, attr_path, "environment", &source.environment, validate_environment);
        check_str(
            diags,
            attr_path,
            "environment_type",
            &source.environment_type,
            validate_environment_type,
        );
        check_str(diags, attr_path, "availability", &source.availability, validate_availability);
        check_str(diags, attr_path, "sensitivity", &source.sensitivity, validate_sensitivity);
        check_str(diags, attr_path, "deletion_date", &source.deletion_date, validate_deletion_date);
        check_emails(diags, attr_path, "product_owners", &source.product_owners);
        check_emails(diags, attr_path, "code_owners", &source.code_owners);
        check_emails(diags, attr_path, "data_owners", &source.data_owners);
    }};
}

impl<'a> WithValidate for ContextInput<'a> {
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        validate_fields!(self, diags, &attr_path);
    }
}

impl<'a> WithValidate for ContextState<'a> {
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        if let Value::Value(parent) = &self.parent_context {
            parent.validate(diags, attr_path.clone().attribute("parent_context"));
        }
        validate_fields!(self, diags, &attr_path);
    }
}
