//! AI 新闻列表与详情

use crate::api::{use_api, use_services};
use crate::components::cards::NewsCard;
use crate::components::pagination::PaginationControls;
use crate::components::status::EmptyState;
use crate::remote::Remote;
use crate::web::router::Link;
use leptos::prelude::*;
use thatnewai_shared::route::AppRoute;
use thatnewai_shared::{NewsItem, PaginatedResponse, Pager};

#[component]
pub fn NewsPage() -> impl IntoView {
    let services = use_services();
    let per_page = services.config.default_per_page;
    let api = StoredValue::new(services.api);
    let page = RwSignal::new(1u32);
    let news = Remote::<PaginatedResponse<NewsItem>>::new();

    Effect::new(move |_| {
        let page = page.get();
        let api = api.get_value();
        news.load(async move { api.get_news(page, per_page).await });
    });

    // 总数是估算的：翻到末页之后可能拿到空页，此时退回上一页
    Effect::new(move |_| {
        let settle = news
            .data
            .with(|d| d.as_ref().and_then(PaginatedResponse::settle_empty_page));
        if let Some(previous) = settle {
            tracing::debug!(from = page.get_untracked(), to = previous, "empty news page, stepping back");
            page.set(previous);
        }
    });

    let pager = Signal::derive(move || {
        news.data
            .with(|d| d.as_ref().map(PaginatedResponse::pager))
            .unwrap_or_else(|| Pager::new(page.get(), per_page, 1))
    });

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8">
            <h1 class="text-3xl font-bold mb-6">"AI News"</h1>
            {news.view(move || page.update(|_| {}), |resp| {
                if resp.is_empty() {
                    view! { <EmptyState message="No news yet." /> }.into_any()
                } else {
                    view! {
                        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                            {resp.data.into_iter().map(|item| view! { <NewsCard item=item /> }).collect_view()}
                        </div>
                    }
                    .into_any()
                }
            })}
            <PaginationControls pager=pager on_change=move |p| page.set(p) />
        </div>
    }
}

/// 正文按空行分段
fn paragraphs(content: &str) -> Vec<String> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| p.trim_start_matches('#').trim().to_string())
        .collect()
}

#[component]
pub fn NewsDetailPage(slug: String) -> impl IntoView {
    let api = StoredValue::new(use_api());
    let item = Remote::<NewsItem>::new();
    let slug = StoredValue::new(slug);

    let load = move || {
        let api = api.get_value();
        let slug = slug.get_value();
        item.load(async move { api.get_news_item(&slug).await });
    };
    load();

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8">
            <Link to=AppRoute::News.to_path() class="link link-hover text-sm">"← Back to news"</Link>
            {item.view(load, |item| {
                let body = if item.content.is_empty() {
                    vec![item.description.clone()]
                } else {
                    paragraphs(&item.content)
                };
                view! {
                    <article class="prose lg:prose-lg mt-4">
                        <h1>{item.title.clone()}</h1>
                        <p class="text-sm text-base-content/60">
                            {item.author.clone()} " · " {item.date.clone()} " · " {item.read_time.clone()}
                        </p>
                        {(!item.image.is_empty()).then(|| view! {
                            <img src=item.image.clone() alt="" class="rounded-xl" />
                        })}
                        {body.into_iter().map(|p| view! { <p>{p}</p> }).collect_view()}
                    </article>
                }
                .into_any()
            })}
        </div>
    }
}
