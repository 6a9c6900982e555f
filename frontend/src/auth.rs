//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的会话信号执行守卫；状态转移本身由 `thatnewai::SessionManager` 完成。

use crate::api::Services;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thatnewai::{ApiError, ApiResult};
use thatnewai_shared::{RegisterRequest, SessionState, User};

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话状态（只读）
    pub state: ReadSignal<SessionState>,
    /// 设置会话状态（写入）
    pub set_state: WriteSignal<SessionState>,
}

impl AuthContext {
    /// 创建新的认证上下文，初始为未认证
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::default());
        Self { state, set_state }
    }

    /// 获取会话状态信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<SessionState> {
        let state = self.state;
        Signal::derive(move || state.get())
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user().cloned())
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 先进入 `Loading`，再用存储的令牌恢复会话（失败会重试一次）。
pub fn init_auth(ctx: &AuthContext, services: &Services) {
    let set_state = ctx.set_state;
    set_state.set(SessionState::Loading);

    let session = services.session();
    spawn_local(async move {
        let restored = session.restore().await;
        set_state.set(restored);
    });
}

/// 登录
///
/// 期间状态为 `Loading`；失败回到未认证并返回错误。
pub async fn login(
    ctx: &AuthContext,
    services: &Services,
    email: String,
    password: String,
) -> ApiResult<User> {
    ctx.set_state.set(SessionState::Loading);

    match services.session().login(&email, &password).await {
        Ok(user) => {
            ctx.set_state.set(SessionState::Authenticated(user.clone()));
            Ok(user)
        }
        Err(e) => {
            ctx.set_state.set(SessionState::Unauthenticated);
            Err(e)
        }
    }
}

/// 注册（不会自动登录）
pub async fn register(services: &Services, request: RegisterRequest) -> ApiResult<User> {
    services.session().register(&request).await
}

/// 注销并清除状态
///
/// 导航由路由服务的守卫自动处理。
pub fn logout(ctx: &AuthContext, services: &Services) {
    ctx.set_state.set(services.session().logout());
}

/// 页面请求遇到 401 时调用：清除令牌并降级为未认证
pub fn handle_api_error(ctx: &AuthContext, services: &Services, err: &ApiError) {
    if let Some(state) = services.session().downgrade(err) {
        ctx.set_state.set(state);
    }
}
