use crate::api::use_services;
use crate::components::pagination::PaginationControls;
use crate::components::search_box::SearchBox;
use crate::components::status::EmptyState;
use crate::remote::Remote;
use crate::web::router::Link;
use leptos::prelude::*;
use thatnewai_shared::{Pager, SearchResponse, SearchResult};

#[component]
fn SearchResultRow(result: SearchResult) -> impl IntoView {
    let kind = result.kind();
    let hit = result.hit().clone();

    view! {
        <li class="card bg-base-100 shadow-sm">
            <Link to=hit.url class="card-body p-4">
                <div class="flex items-center gap-2">
                    <span class="badge badge-ghost badge-sm">{kind}</span>
                    <h3 class="font-semibold">{hit.name}</h3>
                    <span class="text-xs text-base-content/50 ml-auto">{hit.category}</span>
                </div>
                <p class="text-sm text-base-content/70 line-clamp-2">{hit.description}</p>
            </Link>
        </li>
    }
}

#[component]
pub fn SearchPage(query: String) -> impl IntoView {
    let services = use_services();
    let per_page = services.config.default_per_page;
    let api = StoredValue::new(services.api);
    let query = StoredValue::new(query);
    let page = RwSignal::new(1u32);
    let results = Remote::<SearchResponse>::new();

    Effect::new(move |_| {
        let page = page.get();
        let api = api.get_value();
        let query = query.get_value();
        results.load(async move { api.search(&query, page, per_page).await });
    });

    let pager = Signal::derive(move || {
        results
            .data
            .with(|d| {
                d.as_ref()
                    .map(|r| Pager::new(r.page, r.per_page, r.total_pages))
            })
            .unwrap_or_else(|| Pager::new(page.get(), per_page, 1))
    });

    view! {
        <div class="max-w-4xl mx-auto p-4 md:p-8 space-y-6">
            <SearchBox initial=query.get_value() />
            {results.view(move || page.update(|_| {}), |resp| {
                if resp.query.is_empty() {
                    view! { <EmptyState message="Type something to search." /> }.into_any()
                } else if resp.items.is_empty() {
                    view! { <EmptyState message=format!("No results for \"{}\".", resp.query) /> }.into_any()
                } else {
                    view! {
                        <p class="text-sm text-base-content/60">
                            {format!("{} results for \"{}\"", resp.total, resp.query)}
                        </p>
                        <ul class="space-y-3">
                            {resp.items.into_iter().map(|r| view! { <SearchResultRow result=r /> }).collect_view()}
                        </ul>
                    }
                    .into_any()
                }
            })}
            <PaginationControls pager=pager on_change=move |p| page.set(p) />
        </div>
    }
}
