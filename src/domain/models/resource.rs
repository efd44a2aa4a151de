// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A content record returned by the search backend for content and
/// attribute queries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceRecord {
    pub name: String,
    pub path: String,
    pub media_type: Option<String>,
    pub author: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub score: f64,
    pub snippet: Option<String>,
}

impl Default for ResourceRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            path: String::new(),
            media_type: None,
            author: None,
            created_at: None,
            score: 0.0,
            snippet: None,
        }
    }
}

impl ResourceRecord {
    pub fn new(name: String, path: String) -> Self {
        Self {
            name,
            path,
            ..Default::default()
        }
    }
}
