//! ThatNewAI 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `thatnewai_shared::route`: 路由定义与守卫（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态管理
//! - `remote`: 页面数据加载
//! - `components`: UI 组件层

mod api;
mod auth;
mod remote;
mod components {
    pub mod admin {
        pub mod dashboard;
        mod form_state;
        pub mod post_form;
        pub mod tool_form;
    }
    pub mod cards;
    pub mod catalog;
    pub mod home;
    pub mod login;
    pub mod navbar;
    pub mod news;
    pub mod pagination;
    pub mod search;
    pub mod search_box;
    pub mod status;
    pub mod submit;
}

use crate::api::{Services, client_config};
use crate::auth::{AuthContext, init_auth};
use crate::components::admin::dashboard::DashboardPage;
use crate::components::admin::post_form::PostFormPage;
use crate::components::admin::tool_form::ToolFormPage;
use crate::components::catalog::{CategoriesPage, CategoryPage, LatestPage, ToolDetailPage};
use crate::components::home::HomePage;
use crate::components::login::{LoginPage, RegisterPage};
use crate::components::navbar::Navbar;
use crate::components::news::{NewsDetailPage, NewsPage};
use crate::components::search::SearchPage;
use crate::components::submit::SubmitPage;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub mod web {
    mod http;
    pub mod logger;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::FetchHttpClient;
    pub use storage::BrowserTokenStore;
    pub use timer::TimerDelay;
}

use thatnewai_shared::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Search { query } => view! { <SearchPage query=query /> }.into_any(),
        AppRoute::Categories => view! { <CategoriesPage /> }.into_any(),
        AppRoute::Category { slug } => view! { <CategoryPage slug=slug /> }.into_any(),
        AppRoute::Tool { slug } => view! { <ToolDetailPage slug=slug /> }.into_any(),
        AppRoute::Latest => view! { <LatestPage /> }.into_any(),
        AppRoute::Submit => view! { <SubmitPage /> }.into_any(),
        AppRoute::News => view! { <NewsPage /> }.into_any(),
        AppRoute::NewsDetail { slug } => view! { <NewsDetailPage slug=slug /> }.into_any(),
        AppRoute::Login { from } => view! { <LoginPage from=from /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::AdminDashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::AdminNewTool => view! { <ToolFormPage slug=None /> }.into_any(),
        AppRoute::AdminEditTool { slug } => view! { <ToolFormPage slug=Some(slug) /> }.into_any(),
        AppRoute::AdminNewPost => view! { <PostFormPage slug=None /> }.into_any(),
        AppRoute::AdminEditPost { slug } => view! { <PostFormPage slug=Some(slug) /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[60vh]">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <a href="/" class="btn btn-primary mt-6">"Back home"</a>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 构建客户端服务（配置错误时无法继续）
    let config = client_config();
    let services = match Services::new(config) {
        Ok(services) => services,
        Err(e) => {
            tracing::error!(error = %e, "invalid client configuration");
            return view! {
                <div role="alert" class="alert alert-error m-8">
                    <span>{format!("Invalid configuration: {e}")}</span>
                </div>
            }
            .into_any();
        }
    };
    provide_context(services.clone());

    // 2. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 3. 用存储的令牌恢复会话
    init_auth(&auth_ctx, &services);

    // 4. 获取会话状态信号，用于注入路由服务（解耦！）
    let session = auth_ctx.session_signal();

    view! {
        // 5. 路由器组件：注入会话信号实现守卫
        <Router session=session>
            <Navbar />
            <main class="min-h-screen bg-base-200">
                <RouterOutlet matcher=route_matcher />
            </main>
        </Router>
    }
    .into_any()
}
