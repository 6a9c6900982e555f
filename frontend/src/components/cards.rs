//! 工具 / 分类 / 新闻卡片

use crate::web::router::Link;
use leptos::prelude::*;
use thatnewai_shared::route::AppRoute;
use thatnewai_shared::{Category, NewsItem, PricingType, Tool};

fn pricing_badge(pricing: PricingType) -> &'static str {
    match pricing {
        PricingType::Free => "badge badge-success",
        PricingType::Freemium => "badge badge-info",
        PricingType::Paid => "badge badge-warning",
        PricingType::Unknown => "badge badge-ghost",
    }
}

#[component]
pub fn ToolCard(tool: Tool) -> impl IntoView {
    let href = AppRoute::Tool {
        slug: tool.slug.clone(),
    }
    .to_path();
    let category = tool.primary_category().map(str::to_string);

    view! {
        <Link to=href class="card bg-base-100 shadow hover:shadow-xl transition-shadow">
            <div class="card-body">
                <div class="flex items-center gap-3">
                    <img src=tool.logo.clone() alt=tool.name.clone() class="w-10 h-10 rounded-lg object-cover" />
                    <h3 class="card-title text-base">{tool.name.clone()}</h3>
                </div>
                <p class="text-sm text-base-content/70 line-clamp-2">{tool.short_description.clone()}</p>
                <div class="card-actions justify-between items-center mt-2">
                    {category.map(|c| view! { <span class="badge badge-outline">{c}</span> })}
                    <span class=pricing_badge(tool.pricing_type)>{tool.pricing_type.as_str()}</span>
                </div>
            </div>
        </Link>
    }
}

/// 工具网格
#[component]
pub fn ToolGrid(tools: Vec<Tool>) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4">
            {tools.into_iter().map(|tool| view! { <ToolCard tool=tool /> }).collect_view()}
        </div>
    }
}

#[component]
pub fn CategoryCard(category: Category) -> impl IntoView {
    let href = AppRoute::Category {
        slug: category.slug.clone(),
    }
    .to_path();

    view! {
        <Link to=href class="card bg-base-100 shadow hover:shadow-lg transition-shadow">
            <div class="card-body items-center text-center p-4">
                <div class="text-xs text-base-content/50">{category.icon.clone()}</div>
                <h3 class="font-semibold">{category.name.clone()}</h3>
                <span class="text-sm text-base-content/60">{format!("{} tools", category.count)}</span>
            </div>
        </Link>
    }
}

#[component]
pub fn NewsCard(item: NewsItem) -> impl IntoView {
    let href = AppRoute::NewsDetail {
        slug: item.slug.clone(),
    }
    .to_path();
    let image = (!item.image.is_empty()).then(|| item.image.clone());

    view! {
        <Link to=href class="card bg-base-100 shadow hover:shadow-lg transition-shadow">
            {image.map(|src| view! {
                <figure><img src=src alt="" class="h-40 w-full object-cover" /></figure>
            })}
            <div class="card-body">
                <div class="text-xs text-base-content/50">
                    {item.date.clone()} " · " {item.read_time.clone()}
                </div>
                <h3 class="card-title text-base">{item.title.clone()}</h3>
                <p class="text-sm text-base-content/70 line-clamp-3">{item.description.clone()}</p>
            </div>
        </Link>
    }
}
