//! ThatNewAI 共享领域层
//!
//! 纯数据与纯逻辑，不做任何 I/O：
//! - 领域模型（规范形态 / canonical shape）
//! - `normalize`: 把后端松散的 JSON 解析成规范记录
//! - `pagination`: 分页元数据与翻页控件状态
//! - `route` / `session`: 路由表、路由守卫与会话状态机

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub mod date;
pub mod normalize;
pub mod pagination;
pub mod protocol;
pub mod route;
pub mod search;
pub mod session;
pub mod slug;

pub use pagination::{PaginatedResponse, Pager};
pub use search::{SearchHit, SearchResponse, SearchResult};
pub use session::SessionState;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const PLACEHOLDER_LOGO: &str = "/placeholder.svg";
pub const DEFAULT_CATEGORY_ICON: &str = "default-icon";

/// 后台表单可选的分类
pub const TOOL_CATEGORIES: &[&str] = &[
    "LLM",
    "AI Agent Framework",
    "Tool",
    "Computer Vision",
    "Speech Recognition",
    "NLP",
    "Other",
];

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 规范化后的收费模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PricingType {
    Free,
    Paid,
    Freemium,
    #[default]
    Unknown,
}

impl PricingType {
    /// 不区分大小写地解析 `"Free"` / `"free"` 之类的标签，无法识别时为 `Unknown`
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("free") {
            Self::Free
        } else if label.eq_ignore_ascii_case("freemium") {
            Self::Freemium
        } else if label.eq_ignore_ascii_case("paid") {
            Self::Paid
        } else {
            Self::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Paid => "Paid",
            Self::Freemium => "Freemium",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PricingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 后台写接口使用的小写 `type` 字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolType {
    #[default]
    Free,
    Paid,
    Freemium,
}

impl ToolType {
    pub const ALL: [ToolType; 3] = [ToolType::Free, ToolType::Paid, ToolType::Freemium];

    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Paid => "paid",
            Self::Freemium => "freemium",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match PricingType::from_label(key) {
            PricingType::Free => Some(Self::Free),
            PricingType::Paid => Some(Self::Paid),
            PricingType::Freemium => Some(Self::Freemium),
            PricingType::Unknown => None,
        }
    }
}

impl From<ToolType> for PricingType {
    fn from(t: ToolType) -> Self {
        match t {
            ToolType::Free => PricingType::Free,
            ToolType::Paid => PricingType::Paid,
            ToolType::Freemium => PricingType::Freemium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub categories: Vec<String>,
    pub short_description: String,
    pub logo: String,
    pub rating: f64,
    pub pricing_type: PricingType,
    pub website_url: String,
    pub created_at: DateTime<Utc>,
}

impl Tool {
    pub fn primary_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub icon: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NewsItem {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Markdown 正文
    pub content: String,
    pub image: String,
    pub date: String,
    pub author: String,
    pub read_time: String,
    pub category: String,
}

/// 当前登录用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: String,
    pub updated_at: String,
    pub last_login: Option<String>,
}

impl User {
    /// 导航栏上显示的名字
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.email
        } else {
            &self.full_name
        }
    }
}

// =========================================================
// 认证请求 (Auth Payloads)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

// =========================================================
// 后台写入模型 (Admin Payloads)
// =========================================================

/// 新建 / 编辑工具时提交的表单内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ToolDraft {
    pub name: String,
    #[serde(default)]
    pub slug: String,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub kind: ToolType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl ToolDraft {
    /// 提交前补齐 slug（由名称生成）
    pub fn with_generated_slug(mut self) -> Self {
        self.slug = slug::slugify_title(&self.name);
        self
    }
}

/// MongoDB 扩展 JSON 的日期包装 `{"$date": "..."}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MongoDate {
    #[serde(rename = "$date")]
    pub date: DateTime<Utc>,
}

/// 后台 "invention" 文章
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InventionPost {
    pub title: String,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub kind: ToolType,
    pub thumbnails: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<MongoDate>,
}

impl InventionPost {
    /// 保存前盖上处理时间，并按标题重新生成 slug
    pub fn prepare(mut self, now: DateTime<Utc>) -> Self {
        self.slug = slug::slugify_title(&self.title);
        self.processed_at = Some(MongoDate { date: now });
        self
    }
}

/// 逗号分隔的标签输入 -> 标签列表
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
