// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含服务器、搜索后端和后台索引任务等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 搜索后端配置
    pub backend: BackendSettings,
    /// 后台索引任务配置
    pub indexing: IndexingSettings,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 搜索后端配置设置
#[derive(Debug, Deserialize)]
pub struct BackendSettings {
    /// 搜索后端基础URL
    pub url: String,
    /// 超级租户使用的根集合名称，租户集合在此基础上派生
    pub root_collection: String,
    /// 请求超时时间（秒）
    pub request_timeout: Option<u64>,
    /// 单次查询返回的最大记录数
    pub row_limit: Option<u32>,
}

/// 后台索引任务配置设置
#[derive(Debug, Deserialize)]
pub struct IndexingSettings {
    /// 是否启用后台索引任务
    pub enabled: bool,
    /// 索引维护周期（秒）
    pub interval_secs: u64,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default backend settings
            .set_default("backend.url", "http://127.0.0.1:8983/solr")?
            .set_default("backend.root_collection", "registry")?
            .set_default("backend.request_timeout", 30)?
            .set_default("backend.row_limit", 100)?
            // Default indexing settings
            .set_default("indexing.enabled", true)?
            .set_default("indexing.interval_secs", 60)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("INDEXRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
