//! 搜索结果模型
//!
//! 排序完全交给后端 (`sort_by=relevance`)，这里只负责解析。

use crate::normalize::{
    NormalizeError, NormalizeResult, as_object, extract_id, extract_list, first_str, parse_each,
    string_or_default,
};
use crate::pagination::{estimate_total, server_total, total_pages};
use crate::route::AppRoute;
use crate::slug::slugify;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 单条搜索命中
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    pub date: String,
    /// 站内可导航的路径
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchResult {
    Tool(SearchHit),
    News(SearchHit),
}

impl SearchResult {
    pub fn hit(&self) -> &SearchHit {
        match self {
            Self::Tool(hit) | Self::News(hit) => hit,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tool(_) => "tool",
            Self::News(_) => "news",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<SearchResult>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub query: String,
    pub content_type: String,
}

impl SearchResponse {
    /// 空查询 / 无结果
    pub fn empty(query: &str, page: u32, per_page: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: page.max(1),
            per_page: per_page.max(1),
            total_pages: 1,
            query: query.to_string(),
            content_type: "all".to_string(),
        }
    }
}

// =========================================================
// 解析
// =========================================================

/// 后端有时返回 `/tools/{slug}`，站内路由是 `/tool/{slug}`
fn canonical_url(raw: &str) -> String {
    match raw.strip_prefix("/tools/") {
        Some(rest) => format!("/tool/{rest}"),
        None => raw.to_string(),
    }
}

pub fn parse_search_result(raw: &Value) -> NormalizeResult<SearchResult> {
    let obj = as_object(raw)?;
    let kind = first_str(obj, &["type"]).ok_or(NormalizeError::MissingField("type"))?;
    let name = first_str(obj, &["name", "title"])
        .ok_or(NormalizeError::MissingField("name"))?
        .to_string();
    let slug = first_str(obj, &["slug"])
        .map(str::to_string)
        .unwrap_or_else(|| slugify(&name));

    let hit = |route: AppRoute| SearchHit {
        id: extract_id(obj).unwrap_or_else(|| slug.clone()),
        description: string_or_default(obj, &["description"]),
        category: string_or_default(obj, &["category"]),
        date: string_or_default(obj, &["date", "created_at"]),
        url: first_str(obj, &["url"])
            .map(canonical_url)
            .unwrap_or_else(|| route.to_path()),
        name: name.clone(),
        slug: slug.clone(),
    };

    match kind {
        "tool" => Ok(SearchResult::Tool(hit(AppRoute::Tool { slug: slug.clone() }))),
        "news" => Ok(SearchResult::News(hit(AppRoute::NewsDetail { slug: slug.clone() }))),
        other => Err(NormalizeError::UnknownKind(other.to_string())),
    }
}

/// 解析搜索响应；无法识别的条目跳过
pub fn parse_search_response(
    raw: &Value,
    query: &str,
    page: u32,
    per_page: u32,
) -> NormalizeResult<SearchResponse> {
    let list = extract_list(raw)?;
    let items = parse_each(list, "search result", parse_search_result);

    let page = page.max(1);
    let per_page = per_page.max(1);
    let total = server_total(raw).unwrap_or_else(|| estimate_total(page, per_page, list.len()));
    let content_type = raw
        .get("content_type")
        .and_then(Value::as_str)
        .unwrap_or("all")
        .to_string();

    Ok(SearchResponse {
        items,
        total,
        page,
        per_page,
        total_pages: total_pages(total, per_page),
        query: query.to_string(),
        content_type,
    })
}
