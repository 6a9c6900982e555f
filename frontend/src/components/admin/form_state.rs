//! 表单状态管理模块
//!
//! 将零散的 signal 整合为结构体，负责：
//! - 数据的持有
//! - 从已有记录回填
//! - 数据到请求对象的转换

use leptos::prelude::*;
use std::collections::BTreeMap;
use thatnewai_shared::{InventionPost, TOOL_CATEGORIES, ToolDraft, ToolType, parse_tags};

/// 工具表单状态
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct ToolFormState {
    pub name: RwSignal<String>,
    pub category: RwSignal<String>,
    pub description: RwSignal<String>,
    /// 逗号分隔的原始输入
    pub tags: RwSignal<String>,
    pub kind: RwSignal<ToolType>,
    pub resource_url: RwSignal<String>,
    pub featured: RwSignal<bool>,
}

impl ToolFormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            category: RwSignal::new(TOOL_CATEGORIES[0].to_string()),
            description: RwSignal::new(String::new()),
            tags: RwSignal::new(String::new()),
            kind: RwSignal::new(ToolType::Free),
            resource_url: RwSignal::new(String::new()),
            featured: RwSignal::new(false),
        }
    }

    /// 编辑时用已有记录回填
    pub fn fill(&self, draft: &ToolDraft) {
        self.name.set(draft.name.clone());
        self.category.set(draft.category.clone());
        self.description.set(draft.description.clone());
        self.tags.set(draft.tags.join(", "));
        self.kind.set(draft.kind);
        self.resource_url
            .set(draft.resource_url.clone().unwrap_or_default());
        self.featured.set(draft.featured);
    }

    /// 将表单状态转换为请求对象；slug 由名称生成
    pub fn to_draft(&self) -> ToolDraft {
        let resource_url = self.resource_url.get();
        let resource_url = if resource_url.trim().is_empty() {
            None
        } else {
            Some(resource_url.trim().to_string())
        };

        ToolDraft {
            name: self.name.get().trim().to_string(),
            slug: String::new(),
            category: self.category.get(),
            description: self.description.get(),
            tags: parse_tags(&self.tags.get()),
            kind: self.kind.get(),
            resource_url,
            featured: self.featured.get(),
        }
        .with_generated_slug()
    }
}

impl Default for ToolFormState {
    fn default() -> Self {
        Self::new()
    }
}

/// 文章表单状态
#[derive(Clone, Copy)]
pub struct PostFormState {
    pub title: RwSignal<String>,
    pub category: RwSignal<String>,
    pub description: RwSignal<String>,
    pub tags: RwSignal<String>,
    pub kind: RwSignal<ToolType>,
    /// 编辑时原样保留，不在表单中修改
    pub thumbnails: RwSignal<BTreeMap<String, String>>,
}

impl PostFormState {
    pub fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            category: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            tags: RwSignal::new(String::new()),
            kind: RwSignal::new(ToolType::Free),
            thumbnails: RwSignal::new(BTreeMap::new()),
        }
    }

    pub fn fill(&self, post: &InventionPost) {
        self.title.set(post.title.clone());
        self.category.set(post.category.clone());
        self.description.set(post.description.clone());
        self.tags.set(post.tags.join(", "));
        self.kind.set(post.kind);
        self.thumbnails.set(post.thumbnails.clone());
    }

    /// 转换为请求对象；调用方负责 `prepare` 盖上处理时间
    pub fn to_post(&self) -> InventionPost {
        let title = self.title.get().trim().to_string();
        InventionPost {
            name: title.clone(),
            title,
            slug: String::new(),
            category: self.category.get(),
            description: self.description.get(),
            tags: parse_tags(&self.tags.get()),
            kind: self.kind.get(),
            thumbnails: self.thumbnails.get(),
            processed_at: None,
        }
    }
}

impl Default for PostFormState {
    fn default() -> Self {
        Self::new()
    }
}
