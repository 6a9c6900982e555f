//! ThatNewAI 目录客户端
//!
//! 平台无关的客户端层，浏览器前端和原生工具共用：
//! - `request`: HTTP 抽象 (`HttpClient`)
//! - `api`: 每个后端接口一个方法，返回规范化后的数据
//! - `session`: 登录 / 会话恢复 / 登出
//! - `timing`: 防抖与请求代次
//! - `storage` / `config`: 令牌存储与运行时配置

pub mod api;
pub mod config;
pub mod error;
pub mod request;
pub mod session;
pub mod storage;
pub mod timing;

pub use api::{CatalogApi, HomeFeed};
pub use config::ClientConfig;
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use session::SessionManager;
pub use storage::{MemoryTokenStore, TokenStore};
pub use timing::{Delay, RequestGenerations, Ticket, debounce};

#[cfg(not(target_arch = "wasm32"))]
pub use request::ReqwestHttpClient;
#[cfg(not(target_arch = "wasm32"))]
pub use timing::TokioDelay;

/// 原生平台的默认组合：reqwest + 内存令牌 + tokio 定时器
#[cfg(not(target_arch = "wasm32"))]
pub type NativeSession = SessionManager<ReqwestHttpClient, MemoryTokenStore, TokioDelay>;

/// 按配置构建原生平台的会话管理器
#[cfg(not(target_arch = "wasm32"))]
pub fn native_session(config: &ClientConfig) -> ApiResult<NativeSession> {
    let api = CatalogApi::new(
        &config.api_base_url,
        ReqwestHttpClient::new(),
        MemoryTokenStore::new(),
    )?;
    Ok(SessionManager::new(
        std::rc::Rc::new(api),
        TokioDelay,
        config.session_retry_delay,
    ))
}
