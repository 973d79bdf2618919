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

use thiserror::Error;

use crate::naming::NameError;
use crate::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to generate name prefix: {0}")]
    NameGeneration(#[from] NameError),
}

impl Error {
    /// Attribute the error is about
    pub fn field(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.field,
            Self::NameGeneration(_) => "name",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
