//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、它们的访问级别，以及路由守卫的判定逻辑。

use crate::session::SessionState;
use std::borrow::Cow;
use std::fmt::Display;

/// 访问级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// 需要管理员
    Admin,
}

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Home,
    Search {
        query: String,
    },
    Categories,
    Category {
        slug: String,
    },
    Tool {
        slug: String,
    },
    Latest,
    Submit,
    News,
    NewsDetail {
        slug: String,
    },
    /// 登录页，`from` 为登录后返回的路径
    Login {
        from: Option<String>,
    },
    Register,
    AdminDashboard,
    AdminNewTool,
    AdminEditTool {
        slug: String,
    },
    AdminNewPost,
    AdminEditPost {
        slug: String,
    },
    /// 页面未找到
    NotFound,
}

fn decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| segment.to_string())
}

fn query_param(query: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

impl AppRoute {
    /// 将 `path[?query]` 解析为路由枚举
    pub fn from_url(url: &str) -> Self {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(decode)
            .collect();
        let parts: Vec<&str> = segments.iter().map(String::as_str).collect();

        match parts.as_slice() {
            [] => Self::Home,
            ["search"] => Self::Search {
                query: query_param(query, "q").unwrap_or_default(),
            },
            ["categories"] => Self::Categories,
            ["category", slug] => Self::Category {
                slug: slug.to_string(),
            },
            ["tool", slug] => Self::Tool {
                slug: slug.to_string(),
            },
            ["latest"] => Self::Latest,
            ["submit"] => Self::Submit,
            ["ai-news"] => Self::News,
            ["news", slug] => Self::NewsDetail {
                slug: slug.to_string(),
            },
            ["login"] => Self::Login {
                from: query_param(query, "from").filter(|f| !f.is_empty()),
            },
            ["register"] => Self::Register,
            ["admin"] | ["admin", "dashboard"] => Self::AdminDashboard,
            ["admin", "tools", "new"] => Self::AdminNewTool,
            ["admin", "tools", slug, "edit"] => Self::AdminEditTool {
                slug: slug.to_string(),
            },
            ["admin", "posts", "new"] => Self::AdminNewPost,
            ["admin", "posts", slug, "edit"] => Self::AdminEditPost {
                slug: slug.to_string(),
            },
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL（含查询串）
    pub fn to_path(&self) -> String {
        let enc = |s: &str| urlencoding::encode(s).into_owned();
        match self {
            Self::Home => "/".to_string(),
            Self::Search { query } if query.is_empty() => "/search".to_string(),
            Self::Search { query } => format!("/search?q={}", enc(query)),
            Self::Categories => "/categories".to_string(),
            Self::Category { slug } => format!("/category/{}", enc(slug)),
            Self::Tool { slug } => format!("/tool/{}", enc(slug)),
            Self::Latest => "/latest".to_string(),
            Self::Submit => "/submit".to_string(),
            Self::News => "/ai-news".to_string(),
            Self::NewsDetail { slug } => format!("/news/{}", enc(slug)),
            Self::Login { from: None } => "/login".to_string(),
            Self::Login { from: Some(from) } => format!("/login?from={}", enc(from)),
            Self::Register => "/register".to_string(),
            Self::AdminDashboard => "/admin/dashboard".to_string(),
            Self::AdminNewTool => "/admin/tools/new".to_string(),
            Self::AdminEditTool { slug } => format!("/admin/tools/{}/edit", enc(slug)),
            Self::AdminNewPost => "/admin/posts/new".to_string(),
            Self::AdminEditPost { slug } => format!("/admin/posts/{}/edit", enc(slug)),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由的访问级别**
    pub fn access(&self) -> Access {
        match self {
            Self::AdminDashboard
            | Self::AdminNewTool
            | Self::AdminEditTool { .. }
            | Self::AdminNewPost
            | Self::AdminEditPost { .. } => Access::Admin,
            _ => Access::Public,
        }
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login { .. } | Self::Register)
    }

    /// 认证失败时的重定向目标：带上原路径
    pub fn auth_failure_redirect(original: &AppRoute) -> Self {
        Self::Login {
            from: Some(original.to_path()),
        }
    }

    /// 登录成功后的去向：只接受站内相对路径
    pub fn auth_success_redirect(from: Option<&str>) -> Self {
        from.and_then(safe_return_path)
            .map(Self::from_url)
            .filter(|route| !matches!(route, Self::Login { .. } | Self::NotFound))
            .unwrap_or_default()
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// `/x` 合法；`//evil.com`、`https://...`、`javascript:` 等一律拒绝
pub fn safe_return_path(from: &str) -> Option<&str> {
    let from = from.trim();
    let ok = from.starts_with('/') && !from.starts_with("//") && !from.contains('\\');
    ok.then_some(from)
}

// =========================================================
// 路由守卫 (Route Guard)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// 会话还在加载，先渲染占位
    Pending,
    Allow,
    Redirect(AppRoute),
}

/// 根据会话状态决定是否放行
pub fn guard(route: &AppRoute, session: &SessionState) -> GuardDecision {
    match (route.access(), session) {
        (Access::Public, SessionState::Authenticated(_))
            if route.should_redirect_when_authenticated() =>
        {
            let from = match route {
                AppRoute::Login { from } => from.as_deref(),
                _ => None,
            };
            GuardDecision::Redirect(AppRoute::auth_success_redirect(from))
        }
        (Access::Public, _) => GuardDecision::Allow,
        (_, SessionState::Loading) => GuardDecision::Pending,
        (_, SessionState::Unauthenticated) => {
            GuardDecision::Redirect(AppRoute::auth_failure_redirect(route))
        }
        (Access::Admin, SessionState::Authenticated(user)) if !user.is_admin => {
            GuardDecision::Redirect(AppRoute::Home)
        }
        (_, SessionState::Authenticated(_)) => GuardDecision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::User;
    use rstest::rstest;

    fn session(is_admin: bool) -> SessionState {
        SessionState::Authenticated(User {
            id: "1".into(),
            email: "a@b.c".into(),
            full_name: String::new(),
            is_active: true,
            is_admin,
            created_at: String::new(),
            updated_at: String::new(),
            last_login: None,
        })
    }

    #[rstest]
    #[case("/", AppRoute::Home)]
    #[case("/search?q=image%20gen", AppRoute::Search { query: "image gen".into() })]
    #[case("/search", AppRoute::Search { query: String::new() })]
    #[case("/category/chat-bots", AppRoute::Category { slug: "chat-bots".into() })]
    #[case("/tool/my-tool/", AppRoute::Tool { slug: "my-tool".into() })]
    #[case("/ai-news", AppRoute::News)]
    #[case("/news/launch%20day", AppRoute::NewsDetail { slug: "launch day".into() })]
    #[case("/login?from=%2Fadmin%2Fdashboard", AppRoute::Login { from: Some("/admin/dashboard".into()) })]
    #[case("/admin", AppRoute::AdminDashboard)]
    #[case("/admin/tools/x/edit", AppRoute::AdminEditTool { slug: "x".into() })]
    #[case("/admin/posts/new", AppRoute::AdminNewPost)]
    #[case("/nope/at/all", AppRoute::NotFound)]
    fn test_from_url(#[case] url: &str, #[case] expected: AppRoute) {
        assert_eq!(AppRoute::from_url(url), expected);
    }

    #[rstest]
    #[case(AppRoute::Search { query: "a b&c".into() })]
    #[case(AppRoute::NewsDetail { slug: "launch day".into() })]
    #[case(AppRoute::Login { from: Some("/admin/tools/x/edit".into()) })]
    #[case(AppRoute::AdminEditPost { slug: "p".into() })]
    fn test_path_parses_back(#[case] route: AppRoute) {
        assert_eq!(AppRoute::from_url(&route.to_path()), route);
    }

    #[rstest]
    #[case(AppRoute::Submit, Access::Public)]
    #[case(AppRoute::Latest, Access::Public)]
    #[case(AppRoute::Login { from: None }, Access::Public)]
    #[case(AppRoute::AdminDashboard, Access::Admin)]
    #[case(AppRoute::AdminEditPost { slug: "p".into() }, Access::Admin)]
    fn test_access_levels(#[case] route: AppRoute, #[case] expected: Access) {
        assert_eq!(route.access(), expected);
    }

    #[test]
    fn test_admin_path_while_unauthenticated_redirects_with_from() {
        let decision = guard(&AppRoute::AdminDashboard, &SessionState::Unauthenticated);
        assert_eq!(
            decision,
            GuardDecision::Redirect(AppRoute::Login {
                from: Some("/admin/dashboard".into())
            })
        );
    }

    #[test]
    fn test_non_admin_is_sent_home() {
        assert_eq!(
            guard(&AppRoute::AdminNewTool, &session(false)),
            GuardDecision::Redirect(AppRoute::Home)
        );
        assert_eq!(guard(&AppRoute::AdminNewTool, &session(true)), GuardDecision::Allow);
    }

    #[test]
    fn test_loading_is_pending_on_protected_routes_only() {
        assert_eq!(
            guard(&AppRoute::AdminDashboard, &SessionState::Loading),
            GuardDecision::Pending
        );
        assert_eq!(guard(&AppRoute::Latest, &SessionState::Loading), GuardDecision::Allow);
    }

    #[test]
    fn test_authenticated_user_leaves_login_page() {
        let login = AppRoute::Login {
            from: Some("/admin/posts/new".into()),
        };
        assert_eq!(
            guard(&login, &session(true)),
            GuardDecision::Redirect(AppRoute::AdminNewPost)
        );

        let login = AppRoute::Login { from: None };
        assert_eq!(guard(&login, &session(false)), GuardDecision::Redirect(AppRoute::Home));
        assert_eq!(
            guard(&login, &SessionState::Unauthenticated),
            GuardDecision::Allow
        );
    }

    #[rstest]
    #[case(Some("/tool/x"), AppRoute::Tool { slug: "x".into() })]
    #[case(Some("//evil.example"), AppRoute::Home)]
    #[case(Some("https://evil.example/"), AppRoute::Home)]
    #[case(Some("/login?from=/login"), AppRoute::Home)]
    #[case(None, AppRoute::Home)]
    fn test_auth_success_redirect(#[case] from: Option<&str>, #[case] expected: AppRoute) {
        assert_eq!(AppRoute::auth_success_redirect(from), expected);
    }
}
