// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::resource::ResourceRecord;
use crate::domain::models::term::TermRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct ContentSearchRequestDto {
    #[validate(length(min = 1, message = "Query cannot be empty"))]
    pub query: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AttributeSearchRequestDto {
    #[validate(length(min = 1, message = "At least one field is required"))]
    pub fields: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct TermsSearchRequestDto {
    #[validate(length(min = 1, message = "At least one field is required"))]
    pub fields: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct TermsQuerySearchRequestDto {
    #[validate(length(min = 1, message = "Query cannot be empty"))]
    pub query: String,
    #[validate(length(min = 1, message = "Facet field cannot be empty"))]
    pub facet_field: String,
}

#[derive(Debug, Serialize)]
pub struct ResourceSearchResponseDto {
    pub total: usize,
    pub results: Vec<ResourceRecord>,
}

#[derive(Debug, Serialize)]
pub struct TermSearchResponseDto {
    pub total: usize,
    pub results: Vec<TermRecord>,
}
