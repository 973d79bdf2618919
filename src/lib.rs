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

//! Terraform provider generating standardized name prefixes and cloud tags.
//!
//! The generation pipeline ([`generate::generate`]) is usable on its own;
//! [`ContextProvider`] exposes it to Terraform as the `context` data source.

pub mod cloud;
pub mod context;
pub mod context_provider;
pub mod error;
pub mod generate;
pub mod git;
pub mod naming;
pub mod tags;
pub mod validation;

mod utils;

pub use cloud::CloudRules;
pub use context_provider::{ContextProvider, ProviderSettings};
pub use error::{Error, Result};
pub use generate::{generate, GeneratedContext};
pub use git::{RepoMetadata, RepoMetadataCache, RepoQuery};
pub use naming::{NameError, NameGenerator};
pub use tags::{ContextConfig, TagProcessor, TagSet};
