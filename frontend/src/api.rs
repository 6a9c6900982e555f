//! 浏览器端的客户端组合
//!
//! 把客户端库的泛型组件落到具体实现：fetch + localStorage + setTimeout。

use crate::web::{BrowserTokenStore, FetchHttpClient, TimerDelay};
use leptos::prelude::*;
use std::rc::Rc;
use thatnewai::config::{ENV_API_URL, ENV_TOKEN_KEY};
use thatnewai::{ApiResult, CatalogApi, ClientConfig, SessionManager};

pub type Api = CatalogApi<FetchHttpClient, BrowserTokenStore>;
pub type Session = SessionManager<FetchHttpClient, BrowserTokenStore, TimerDelay>;

/// 构建期注入的配置（`THATNEWAI_API_URL=... trunk build`）
pub fn client_config() -> ClientConfig {
    ClientConfig::from_lookup(|key| match key {
        ENV_API_URL => option_env!("THATNEWAI_API_URL").map(str::to_string),
        ENV_TOKEN_KEY => option_env!("THATNEWAI_TOKEN_KEY").map(str::to_string),
        _ => None,
    })
}

/// 前端共享的服务，通过 Context 提供
#[derive(Clone)]
pub struct Services {
    pub config: ClientConfig,
    pub api: Api,
}

impl Services {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let api = CatalogApi::new(
            &config.api_base_url,
            FetchHttpClient,
            BrowserTokenStore::new(config.token_storage_key.clone()),
        )?;
        Ok(Self { config, api })
    }

    pub fn session(&self) -> Session {
        SessionManager::new(
            Rc::new(self.api.clone()),
            TimerDelay,
            self.config.session_retry_delay,
        )
    }
}

pub fn use_services() -> Services {
    use_context::<Services>().expect("Services should be provided")
}

/// 页面里最常用的：拿一份 API 客户端
pub fn use_api() -> Api {
    use_services().api
}
