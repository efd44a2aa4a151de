// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// A term and its occurrence count, returned by the terms query families.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TermRecord {
    pub term: String,
    pub frequency: u64,
}

impl TermRecord {
    pub fn new(term: String, frequency: u64) -> Self {
        Self { term, frequency }
    }
}
