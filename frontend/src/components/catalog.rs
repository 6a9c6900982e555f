//! 目录浏览页面：分类、分类下的工具、工具详情、最新工具

use crate::api::{use_api, use_services};
use crate::components::cards::{CategoryCard, ToolGrid};
use crate::components::pagination::PaginationControls;
use crate::components::status::EmptyState;
use crate::remote::Remote;
use crate::web::router::Link;
use leptos::prelude::*;
use thatnewai_shared::route::AppRoute;
use thatnewai_shared::{Category, PaginatedResponse, Pager, Tool};

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let categories = Remote::<Vec<Category>>::new();

    let load = move || {
        let api = api.get_value();
        categories.load(async move { api.get_categories().await });
    };
    load();

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8">
            <h1 class="text-3xl font-bold mb-6">"Categories"</h1>
            {categories.view(load, |list| view! {
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                    {list.into_iter().map(|category| view! { <CategoryCard category=category /> }).collect_view()}
                </div>
            }
            .into_any())}
        </div>
    }
}

#[component]
pub fn CategoryPage(slug: String) -> impl IntoView {
    let api = StoredValue::new(use_api());
    let tools = Remote::<Vec<Tool>>::new();
    let slug = StoredValue::new(slug);

    let load = move || {
        let api = api.get_value();
        let slug = slug.get_value();
        tools.load(async move { api.get_tools_by_category(&slug).await });
    };
    load();

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8">
            <div class="breadcrumbs text-sm mb-2">
                <ul>
                    <li><Link to="/categories">"Categories"</Link></li>
                    <li>{slug.get_value()}</li>
                </ul>
            </div>
            <h1 class="text-3xl font-bold mb-6">{slug.get_value()}</h1>
            {tools.view(load, |list| view! { <ToolGrid tools=list /> }.into_any())}
        </div>
    }
}

#[component]
pub fn ToolDetailPage(slug: String) -> impl IntoView {
    let api = StoredValue::new(use_api());
    let tool = Remote::<Tool>::new();
    let slug = StoredValue::new(slug);

    let load = move || {
        let api = api.get_value();
        let slug = slug.get_value();
        tool.load(async move { api.get_tool(&slug).await });
    };
    load();

    view! {
        <div class="max-w-4xl mx-auto p-4 md:p-8">
            {tool.view(load, |tool| {
                let category = tool.primary_category().map(str::to_string);
                let categories = tool.categories.clone();
                view! {
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body gap-4">
                            <div class="flex items-center gap-4">
                                <img src=tool.logo.clone() alt=tool.name.clone() class="w-16 h-16 rounded-xl object-cover" />
                                <div>
                                    <h1 class="text-3xl font-bold">{tool.name.clone()}</h1>
                                    <div class="flex gap-2 mt-1">
                                        <span class="badge badge-primary">{tool.pricing_type.as_str()}</span>
                                        {(tool.rating > 0.0).then(|| view! {
                                            <span class="badge badge-ghost">{format!("★ {:.1}", tool.rating)}</span>
                                        })}
                                    </div>
                                </div>
                            </div>
                            <p class="text-base-content/80">{tool.short_description.clone()}</p>
                            <div class="flex flex-wrap gap-2">
                                {categories.into_iter().map(|c| view! { <span class="badge badge-outline">{c}</span> }).collect_view()}
                            </div>
                            <div class="text-xs text-base-content/50">
                                "Added " {tool.created_at.format("%Y-%m-%d").to_string()}
                            </div>
                            <div class="card-actions justify-end">
                                {category.map(|c| view! {
                                    <Link to=AppRoute::Category { slug: c }.to_path() class="btn btn-ghost">"More like this"</Link>
                                })}
                                {(!tool.website_url.is_empty()).then(|| view! {
                                    <a href=tool.website_url.clone() target="_blank" rel="noopener noreferrer" class="btn btn-primary">
                                        "Visit website"
                                    </a>
                                })}
                            </div>
                        </div>
                    </div>
                }
                .into_any()
            })}
        </div>
    }
}

#[component]
pub fn LatestPage() -> impl IntoView {
    let services = use_services();
    let per_page = services.config.default_per_page;
    let api = StoredValue::new(services.api);
    let page = RwSignal::new(1u32);
    let tools = Remote::<PaginatedResponse<Tool>>::new();

    // 页码变化时重新加载
    Effect::new(move |_| {
        let page = page.get();
        let api = api.get_value();
        tools.load(async move { api.get_tools(page, per_page).await });
    });

    let pager = Signal::derive(move || {
        tools
            .data
            .with(|d| d.as_ref().map(PaginatedResponse::pager))
            .unwrap_or_else(|| Pager::new(page.get(), per_page, 1))
    });

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8">
            <h1 class="text-3xl font-bold mb-6">"Latest AI tools"</h1>
            {tools.view(move || page.update(|_| {}), |resp| {
                if resp.is_empty() {
                    view! { <EmptyState message="No tools yet." /> }.into_any()
                } else {
                    view! { <ToolGrid tools=resp.data /> }.into_any()
                }
            })}
            <PaginationControls pager=pager on_change=move |p| page.set(p) />
        </div>
    }
}
