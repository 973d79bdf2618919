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

use crate::utils::DisplayJoinable;

use super::TagSet;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TagPair {
    pub key: String,
    pub value: String,
}

fn sorted(tags: &TagSet) -> Vec<(&String, &String)> {
    let mut entries: Vec<_> = tags.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    entries
}

/// One `{key, value}` pair per tag, sorted by key
pub fn tags_as_list_of_maps(tags: &TagSet) -> Vec<TagPair> {
    sorted(tags)
        .into_iter()
        .map(|(key, value)| TagPair {
            key: key.clone(),
            value: value.clone(),
        })
        .collect()
}

/// `key=value` strings sorted by key
pub fn tags_as_kvp_list(tags: &TagSet) -> Vec<String> {
    sorted(tags)
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect()
}

pub fn tags_as_comma_separated_string(tags: &TagSet) -> String {
    tags_as_kvp_list(tags).iter().join_with(",").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_set(pairs: &[(&str, &str)]) -> TagSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn formats_sorted_by_key() {
        let tags = tag_set(&[
            ("bc-managedby", "terraform"),
            ("bc-availability", "spot"),
            ("bc-environment", "Production"),
        ]);

        assert_eq!(
            tags_as_list_of_maps(&tags),
            vec![
                TagPair {
                    key: "bc-availability".into(),
                    value: "spot".into()
                },
                TagPair {
                    key: "bc-environment".into(),
                    value: "Production".into()
                },
                TagPair {
                    key: "bc-managedby".into(),
                    value: "terraform".into()
                },
            ]
        );
        assert_eq!(
            tags_as_kvp_list(&tags),
            vec![
                "bc-availability=spot",
                "bc-environment=Production",
                "bc-managedby=terraform",
            ]
        );
        assert_eq!(
            tags_as_comma_separated_string(&tags),
            "bc-availability=spot,bc-environment=Production,bc-managedby=terraform"
        );
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let pairs = [("c", "3"), ("a", "1"), ("b", "2"), ("d", "4")];
        let forward = tag_set(&pairs);
        let mut reversed = pairs;
        reversed.reverse();
        let backward = tag_set(&reversed);

        assert_eq!(
            tags_as_comma_separated_string(&forward),
            tags_as_comma_separated_string(&backward)
        );
        assert_eq!(tags_as_kvp_list(&forward), tags_as_kvp_list(&backward));
        assert_eq!(
            tags_as_list_of_maps(&forward),
            tags_as_list_of_maps(&backward)
        );
    }

    #[test]
    fn empty_tags() {
        let tags = TagSet::new();
        assert!(tags_as_list_of_maps(&tags).is_empty());
        assert!(tags_as_kvp_list(&tags).is_empty());
        assert_eq!(tags_as_comma_separated_string(&tags), "");
    }
}
