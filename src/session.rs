//! 会话管理：登录 / 恢复 / 登出
//!
//! 状态本身（[`SessionState`]）是纯数据，由 UI 层保存在 signal 里；
//! 这里只负责和后端、令牌存储打交道，然后给出下一个状态。

use crate::api::CatalogApi;
use crate::error::{ApiError, ApiResult};
use crate::request::HttpClient;
use crate::storage::TokenStore;
use crate::timing::Delay;
use std::rc::Rc;
use std::time::Duration;
use thatnewai_shared::{LoginRequest, RegisterRequest, SessionState, User};

pub struct SessionManager<C, S, D> {
    api: Rc<CatalogApi<C, S>>,
    delay: D,
    retry_delay: Duration,
}

impl<C: HttpClient, S: TokenStore, D: Delay> SessionManager<C, S, D> {
    pub fn new(api: Rc<CatalogApi<C, S>>, delay: D, retry_delay: Duration) -> Self {
        Self {
            api,
            delay,
            retry_delay,
        }
    }

    pub fn api(&self) -> &Rc<CatalogApi<C, S>> {
        &self.api
    }

    fn tokens(&self) -> &S {
        self.api.tokens()
    }

    /// 页面加载时恢复会话
    ///
    /// 没有令牌时直接返回 `Unauthenticated`，不发请求。
    /// 获取当前用户失败会等待 `retry_delay` 后重试一次；仍失败则清除令牌。
    pub async fn restore(&self) -> SessionState {
        if self.tokens().get().is_none() {
            return SessionState::Unauthenticated;
        }

        match self.api.current_user().await {
            Ok(user) => return SessionState::Authenticated(user),
            Err(e) => {
                tracing::warn!(error = %e, retry_in = ?self.retry_delay, "session restore failed, retrying once");
            }
        }

        self.delay.sleep(self.retry_delay).await;

        match self.api.current_user().await {
            Ok(user) => SessionState::Authenticated(user),
            Err(e) => {
                tracing::warn!(error = %e, "session restore failed again, clearing token");
                self.clear_token();
                SessionState::Unauthenticated
            }
        }
    }

    /// 登录
    ///
    /// 换取令牌 -> 用该令牌获取当前用户 -> 两步都成功后才保存令牌。
    /// 任一步失败都不会留下令牌。
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<User> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::invalid_input("email and password are required")
                .in_op("session.login"));
        }

        let credentials = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let login = self
            .api
            .exchange_credentials(&credentials)
            .await
            .map_err(|e| e.in_op("session.login"))?;

        let user = self
            .api
            .current_user_with_token(&login.access_token)
            .await
            .map_err(|e| e.in_op("session.login"))?;

        if !self.tokens().set(&login.access_token) {
            return Err(ApiError::storage("could not persist the auth token").in_op("session.login"));
        }

        tracing::info!(user = %user.email, admin = user.is_admin, "logged in");
        Ok(user)
    }

    /// 登出：同步清除令牌，不访问网络
    pub fn logout(&self) -> SessionState {
        self.clear_token();
        tracing::info!("logged out");
        SessionState::Unauthenticated
    }

    /// 页面遇到 401 时降级会话；其他错误不影响会话
    pub fn downgrade(&self, err: &ApiError) -> Option<SessionState> {
        if !err.is_unauthorized() {
            return None;
        }
        tracing::info!(error = %err, "token rejected, dropping session");
        self.clear_token();
        Some(SessionState::Unauthenticated)
    }

    /// 注册新账号（不会自动登录）
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<User> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(ApiError::invalid_input("email and password are required")
                .in_op("session.register"));
        }
        self.api.register(request).await
    }

    fn clear_token(&self) {
        if !self.tokens().delete() {
            tracing::warn!("failed to delete the stored auth token");
        }
    }
}
