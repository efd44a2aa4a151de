// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer identifier of an isolated tenant sharing this process.
///
/// Two values are reserved: [`TenantId::SUPER`] for the root tenant, which is
/// always permitted to use the index, and [`TenantId::INVALID`] for "no tenant
/// could be resolved for this call".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub i32);

impl TenantId {
    /// 超级租户（根租户）的保留ID
    pub const SUPER: TenantId = TenantId(-1234);
    /// 无法解析租户时的保留ID
    pub const INVALID: TenantId = TenantId(-1);

    pub fn is_super(&self) -> bool {
        *self == Self::SUPER
    }

    /// Whether this id can name a real tenant: non-negative, or the super tenant.
    pub fn is_valid(&self) -> bool {
        self.0 >= 0 || self.is_super()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for TenantId {
    fn from(id: i32) -> Self {
        TenantId(id)
    }
}
