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

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use tf_provider::value::{Value, ValueList, ValueMap, ValueString};
use tf_provider::{AttributePath, Diagnostics, Schema};

pub(crate) trait WithSchema {
    fn schema() -> Schema;
}

pub(crate) trait WithValidate {
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath);
}

/// The string if it is known and not null
pub(crate) fn known_str<'b>(value: &'b ValueString<'_>) -> Option<&'b str> {
    match value {
        Value::Value(s) => Some(s.as_ref()),
        _ => None,
    }
}

/// The known elements of a list, `None` if the list itself is null or unknown
pub(crate) fn known_strings(value: &ValueList<ValueString<'_>>) -> Option<Vec<String>> {
    match value {
        Value::Value(list) => Some(
            list.iter()
                .filter_map(known_str)
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    }
}

/// The known entries of a map, `None` if the map itself is null or unknown
pub(crate) fn known_string_map(
    value: &ValueMap<'_, ValueString<'_>>,
) -> Option<HashMap<String, String>> {
    match value {
        Value::Value(map) => Some(
            map.iter()
                .filter_map(|(k, v)| Some((k.to_string(), known_str(v)?.to_string())))
                .collect(),
        ),
        _ => None,
    }
}

pub(crate) fn string_value<'a>(s: impl Into<String>) -> ValueString<'a> {
    Value::Value(Cow::Owned(s.into()))
}

pub(crate) fn string_list_value<'a, I, S>(items: I) -> ValueList<ValueString<'a>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Value::Value(items.into_iter().map(|s| string_value(s)).collect())
}

pub(crate) fn string_map_value<'a, I, K, V>(entries: I) -> ValueMap<'a, ValueString<'a>>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    Value::Value(
        entries
            .into_iter()
            .map(|(k, v)| (Cow::Owned(k.into()), string_value(v)))
            .collect::<BTreeMap<_, _>>(),
    )
}

pub struct DisplayJoiner<'a, T, I>
where
    T: Iterator<Item = I>,
    I: std::fmt::Display,
{
    iter: RefCell<T>,
    sep: &'a str,
}

pub trait DisplayJoinable {
    type Joiner<'a>;
    fn join_with(self, sep: &str) -> Self::Joiner<'_>;
}

impl<T, I> DisplayJoinable for T
where
    T: Iterator<Item = I>,
    I: std::fmt::Display,
{
    type Joiner<'a> = DisplayJoiner<'a, T, I>;

    fn join_with(self, sep: &str) -> Self::Joiner<'_> {
        DisplayJoiner {
            iter: RefCell::new(self),
            sep,
        }
    }
}

impl<'a, T, I> std::fmt::Display for DisplayJoiner<'a, T, I>
where
    T: Iterator<Item = I>,
    I: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut sep = "";
        let mut iter = self.iter.try_borrow_mut().or(Err(std::fmt::Error))?;
        for elt in iter.by_ref() {
            f.write_str(sep)?;
            f.write_fmt(format_args!("{elt}"))?;
            sep = self.sep;
        }
        Ok(())
    }
}
