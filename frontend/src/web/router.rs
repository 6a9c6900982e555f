//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程；
//! 验证逻辑本身是 `thatnewai_shared::route::guard` 这个纯函数。

use leptos::prelude::*;
use thatnewai_shared::SessionState;
use thatnewai_shared::route::{AppRoute, GuardDecision, guard};
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径（含查询串）
fn current_url() -> String {
    web_sys::window()
        .map(|w| {
            let location = w.location();
            let path = location.pathname().unwrap_or_else(|_| "/".to_string());
            let search = location.search().unwrap_or_default();
            format!("{path}{search}")
        })
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入会话状态信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 会话状态（注入的信号，实现解耦）
    session: Signal<SessionState>,
}

impl RouterService {
    /// 创建新的路由服务
    fn new(session: Signal<SessionState>) -> Self {
        let initial_route = AppRoute::from_url(&current_url());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            session,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 当前路由的守卫结论（响应式）
    ///
    /// 用 Memo 去重：会话变化但结论不变时不重新渲染页面。
    pub fn decision(&self) -> Memo<GuardDecision> {
        let current_route = self.current_route;
        let session = self.session;
        Memo::new(move |_| guard(&current_route.get(), &session.get()))
    }

    /// **核心方法：导航**
    ///
    /// 流程：请求 -> 加载；验证由 `setup_guard` 中的 Effect 统一处理，
    /// 这样会话状态变化（恢复完成、登出、401 降级）时也会重新验证。
    pub fn navigate(&self, path: &str) {
        self.go(AppRoute::from_url(path));
    }

    pub fn go(&self, route: AppRoute) {
        push_history_state(&route.to_path());
        self.set_route.set(route);
        scroll_to_top();
    }

    /// 用新路由替换当前历史记录（不新增后退记录）
    pub fn replace(&self, route: AppRoute) {
        replace_history_state(&route.to_path());
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;

        let closure = Closure::<dyn Fn()>::new(move || {
            set_route.set(AppRoute::from_url(&current_url()));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 路由或会话变化时执行守卫，需要时重定向
    fn setup_guard(&self) {
        let router = *self;

        Effect::new(move |_| {
            let route = router.current_route.get();
            let session = router.session.get();

            if let GuardDecision::Redirect(target) = guard(&route, &session) {
                tracing::debug!(from = %route, to = %target, "route guard redirect");
                router.replace(target);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<SessionState>) -> RouterService {
    let router = RouterService::new(session);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_guard();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话状态信号
    session: Signal<SessionState>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 根据当前路由与守卫结论渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();
    let decision = router.decision();

    move || match decision.get() {
        GuardDecision::Allow => matcher(router.current_route().get()),
        GuardDecision::Pending => view! {
            <div class="flex items-center justify-center min-h-[60vh]">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
        // 重定向由 setup_guard 处理
        GuardDecision::Redirect(_) => ().into_any(),
    }
}

/// 站内链接
///
/// 拦截点击改为 pushState 导航；保留 `href` 以支持新标签页打开。
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let to_clone = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        router.navigate(&to_clone);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
