//! 数据规范化模块
//!
//! 后端的返回结构并不统一（`category` / `categories`、`logo` / `logo_url` /
//! `resource_url`、`type` / `pricing_type` ...）。这里把原始 JSON 显式地解析为
//! 规范记录，失败时返回可区分的 [`NormalizeError`]，而不是静默填充。

use crate::date::{coerce_timestamp, parse_value};
use crate::slug::slugify;
use crate::{
    Category, DEFAULT_CATEGORY_ICON, InventionPost, MongoDate, NewsItem, PLACEHOLDER_LOGO, PricingType, Tool,
    ToolDraft, ToolType, User,
};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// 结构不对（不是对象 / 数组，或缺少 `items` / `data`）
    #[error("invalid data format: {0}")]
    InvalidFormat(String),
    /// 集合为空
    #[error("invalid data format: empty collection")]
    EmptyCollection,
    /// 单个实体缺少 `id`
    #[error("entity has no identifying id")]
    MissingId,
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("unknown result type `{0}`")]
    UnknownKind(String),
}

pub type NormalizeResult<T> = Result<T, NormalizeError>;

// =========================================================
// 字段读取工具
// =========================================================

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn as_object(raw: &Value) -> NormalizeResult<&Map<String, Value>> {
    raw.as_object().ok_or_else(|| {
        NormalizeError::InvalidFormat(format!("expected an object, got {}", kind_of(raw)))
    })
}

/// 按顺序取第一个非空字符串字段
pub(crate) fn first_str<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .filter_map(Value::as_str)
        .find(|s| !s.trim().is_empty())
}

pub(crate) fn string_or_default(obj: &Map<String, Value>, keys: &[&str]) -> String {
    first_str(obj, keys).unwrap_or_default().to_string()
}

fn string_list(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

/// 取实体 id：`id` 或 `_id`，支持字符串、数字和 `{"$oid": ...}`
pub fn extract_id(obj: &Map<String, Value>) -> Option<String> {
    ["id", "_id"]
        .iter()
        .filter_map(|k| obj.get(*k))
        .find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Object(inner) => inner
                .get("$oid")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            _ => None,
        })
}

/// 单实体接口：没有 id 视为 "未找到"
pub fn ensure_identified(raw: &Value) -> NormalizeResult<()> {
    match raw.as_object() {
        Some(obj) if extract_id(obj).is_some() => Ok(()),
        _ => Err(NormalizeError::MissingId),
    }
}

// =========================================================
// 集合提取
// =========================================================

/// 取出列表：顶层数组，或对象里的 `items` / `data` 数组（允许为空）
pub fn extract_list(raw: &Value) -> NormalizeResult<&[Value]> {
    match raw {
        Value::Array(items) => Ok(items),
        Value::Object(obj) => ["items", "data"]
            .iter()
            .find_map(|k| obj.get(*k).and_then(Value::as_array))
            .map(Vec::as_slice)
            .ok_or_else(|| {
                NormalizeError::InvalidFormat("response has no `items` or `data` array".into())
            }),
        other => Err(NormalizeError::InvalidFormat(format!(
            "expected an array or an envelope object, got {}",
            kind_of(other)
        ))),
    }
}

/// 同 [`extract_list`]，但空列表也视为格式错误
pub fn extract_collection(raw: &Value) -> NormalizeResult<&[Value]> {
    let items = extract_list(raw)?;
    if items.is_empty() {
        return Err(NormalizeError::EmptyCollection);
    }
    Ok(items)
}

/// 逐项解析；单项失败记录日志后跳过
pub fn parse_each<T>(
    items: &[Value],
    what: &'static str,
    parse: impl Fn(&Value) -> NormalizeResult<T>,
) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match parse(item) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed {what}");
                None
            }
        })
        .collect()
}

// =========================================================
// Tool
// =========================================================

fn tool_categories(obj: &Map<String, Value>) -> Vec<String> {
    match (obj.get("categories"), obj.get("category")) {
        (Some(Value::Array(items)), _) => string_list(items),
        (_, Some(Value::Array(items))) => string_list(items),
        (_, Some(Value::String(s))) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn tool_pricing(obj: &Map<String, Value>) -> PricingType {
    if let Some(label) = first_str(obj, &["pricing_type"]) {
        return PricingType::from_label(label);
    }
    obj.get("type")
        .and_then(Value::as_str)
        .map(PricingType::from_label)
        .unwrap_or_default()
}

/// 解析列表中的工具（缺少 id 时以 slug 代替）
pub fn parse_tool(raw: &Value) -> NormalizeResult<Tool> {
    parse_tool_at(raw, Utc::now())
}

/// 同 [`parse_tool`]，`now` 作为 `created_at` 缺失时的取值
pub fn parse_tool_at(raw: &Value, now: DateTime<Utc>) -> NormalizeResult<Tool> {
    let obj = as_object(raw)?;
    let name = first_str(obj, &["name"])
        .ok_or(NormalizeError::MissingField("name"))?
        .to_string();
    let slug = first_str(obj, &["slug"])
        .map(str::to_string)
        .unwrap_or_else(|| slugify(&name));
    let id = extract_id(obj).unwrap_or_else(|| slug.clone());

    Ok(Tool {
        id,
        categories: tool_categories(obj),
        short_description: string_or_default(obj, &["description", "short_description"]),
        logo: first_str(obj, &["logo", "logo_url", "resource_url"])
            .unwrap_or(PLACEHOLDER_LOGO)
            .to_string(),
        rating: obj
            .get("rating")
            .and_then(Value::as_f64)
            .filter(|r| r.is_finite())
            .unwrap_or(0.0),
        pricing_type: tool_pricing(obj),
        website_url: string_or_default(obj, &["website_url", "resource_url"]),
        created_at: coerce_timestamp(obj.get("created_at"), now),
        name,
        slug,
    })
}

/// 工具详情：必须带 id
pub fn parse_tool_detail(raw: &Value) -> NormalizeResult<Tool> {
    ensure_identified(raw)?;
    parse_tool(raw)
}

/// 编辑表单回填：直接读取后端的写入字段
pub fn parse_tool_draft(raw: &Value) -> NormalizeResult<ToolDraft> {
    let obj = as_object(raw)?;
    let name = first_str(obj, &["name"])
        .ok_or(NormalizeError::MissingField("name"))?
        .to_string();

    let kind = first_str(obj, &["type", "pricing_type"])
        .and_then(ToolType::from_key)
        .unwrap_or_default();

    Ok(ToolDraft {
        slug: first_str(obj, &["slug"])
            .map(str::to_string)
            .unwrap_or_else(|| slugify(&name)),
        category: tool_categories(obj).into_iter().next().unwrap_or_default(),
        description: string_or_default(obj, &["description", "short_description"]),
        tags: obj
            .get("tags")
            .and_then(Value::as_array)
            .map(|t| string_list(t))
            .unwrap_or_default(),
        kind,
        resource_url: first_str(obj, &["resource_url", "website_url"]).map(str::to_string),
        featured: obj.get("featured").and_then(Value::as_bool).unwrap_or(false),
        name,
    })
}

// =========================================================
// Category
// =========================================================

fn generated_category_id() -> String {
    let simple = uuid::Uuid::new_v4().simple().to_string();
    format!("category-{}", &simple[..9])
}

pub fn parse_category(raw: &Value) -> NormalizeResult<Category> {
    let obj = as_object(raw)?;
    let name = first_str(obj, &["name"])
        .ok_or(NormalizeError::MissingField("name"))?
        .to_string();

    Ok(Category {
        id: extract_id(obj).unwrap_or_else(generated_category_id),
        slug: first_str(obj, &["slug"])
            .map(str::to_string)
            .unwrap_or_else(|| slugify(&name)),
        icon: first_str(obj, &["icon"])
            .unwrap_or(DEFAULT_CATEGORY_ICON)
            .to_string(),
        count: obj.get("count").and_then(Value::as_u64).unwrap_or(0),
        name,
    })
}

// =========================================================
// News
// =========================================================

pub fn parse_news_item(raw: &Value) -> NormalizeResult<NewsItem> {
    let obj = as_object(raw)?;
    let title = string_or_default(obj, &["title", "name"]);
    let slug = first_str(obj, &["slug"])
        .map(str::to_string)
        .unwrap_or_else(|| slugify(&title));
    let id = match extract_id(obj) {
        Some(id) => id,
        None if !slug.is_empty() => slug.clone(),
        None => return Err(NormalizeError::MissingId),
    };

    Ok(NewsItem {
        id,
        slug,
        title,
        description: string_or_default(obj, &["description", "summary"]),
        content: string_or_default(obj, &["content"]),
        image: string_or_default(obj, &["image", "image_url"]),
        date: string_or_default(obj, &["date", "published_at", "created_at"]),
        author: string_or_default(obj, &["author"]),
        read_time: string_or_default(obj, &["read_time"]),
        category: string_or_default(obj, &["category"]),
    })
}

/// 新闻详情：必须带 id
pub fn parse_news_detail(raw: &Value) -> NormalizeResult<NewsItem> {
    ensure_identified(raw)?;
    parse_news_item(raw)
}

// =========================================================
// User / Invention
// =========================================================

pub fn parse_user(raw: &Value) -> NormalizeResult<User> {
    let obj = as_object(raw)?;
    let id = extract_id(obj).ok_or(NormalizeError::MissingId)?;
    let email = first_str(obj, &["email"])
        .ok_or(NormalizeError::MissingField("email"))?
        .to_string();

    Ok(User {
        id,
        email,
        full_name: string_or_default(obj, &["full_name"]),
        is_active: obj.get("is_active").and_then(Value::as_bool).unwrap_or(true),
        is_admin: obj.get("is_admin").and_then(Value::as_bool).unwrap_or(false),
        created_at: string_or_default(obj, &["created_at"]),
        updated_at: string_or_default(obj, &["updated_at"]),
        last_login: first_str(obj, &["last_login"]).map(str::to_string),
    })
}

/// 后台文章：逐字段读取，缺失或无法识别的字段取默认值
pub fn parse_invention_post(raw: &Value) -> NormalizeResult<InventionPost> {
    let obj = as_object(raw)?;

    let thumbnails = obj
        .get("thumbnails")
        .and_then(Value::as_object)
        .map(|t| {
            t.iter()
                .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                .collect()
        })
        .unwrap_or_default();

    let processed_at = obj.get("processed_at").and_then(|value| {
        let parsed = parse_value(value);
        if parsed.is_none() && !value.is_null() {
            tracing::debug!(raw = %value, "unrecognised processed_at, dropping it");
        }
        parsed.map(|date| MongoDate { date })
    });

    Ok(InventionPost {
        title: string_or_default(obj, &["title"]),
        name: string_or_default(obj, &["name"]),
        slug: string_or_default(obj, &["slug"]),
        category: string_or_default(obj, &["category"]),
        description: string_or_default(obj, &["description"]),
        tags: obj
            .get("tags")
            .and_then(Value::as_array)
            .map(|t| string_list(t))
            .unwrap_or_default(),
        kind: first_str(obj, &["type"])
            .and_then(ToolType::from_key)
            .unwrap_or_default(),
        thumbnails,
        processed_at,
    })
}

#[cfg(test)]
mod tests;
