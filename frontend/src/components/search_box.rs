//! 边输入边搜索的搜索框
//!
//! 每次按键发出新的请求代次；停顿超过防抖时间后才真正请求，
//! 且只有最新一次请求的结果会显示。

use crate::api::use_services;
use crate::web::TimerDelay;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thatnewai::{RequestGenerations, debounce};
use thatnewai_shared::SearchResult;
use thatnewai_shared::route::AppRoute;

const SUGGESTION_COUNT: u32 = 5;

#[component]
pub fn SearchBox(
    #[prop(optional, into)] initial: String,
    #[prop(optional)] suggestions: bool,
) -> impl IntoView {
    let services = use_services();
    let router = use_router();

    let query = RwSignal::new(initial);
    let hits = RwSignal::new(Vec::<SearchResult>::new());
    let generations = StoredValue::new(RequestGenerations::new());

    let on_cleanup_gens = generations.get_value();
    on_cleanup(move || on_cleanup_gens.invalidate());

    let api = StoredValue::new(services.api.clone());
    let debounce_for = services.config.search_debounce;

    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        query.set(value.clone());
        if !suggestions {
            return;
        }

        let ticket = generations.with_value(RequestGenerations::issue);
        if value.trim().is_empty() {
            hits.set(Vec::new());
            return;
        }

        let api = api.get_value();
        spawn_local(async move {
            if !debounce(&TimerDelay, &ticket, debounce_for).await {
                return;
            }
            match api.search(&value, 1, SUGGESTION_COUNT).await {
                Ok(resp) if ticket.is_current() => hits.set(resp.items),
                Ok(_) => {}
                Err(e) => tracing::warn!(query = %value, error = %e, "search suggestions failed"),
            }
        });
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        generations.with_value(RequestGenerations::invalidate);
        hits.set(Vec::new());

        let q = query.get_untracked().trim().to_string();
        if !q.is_empty() {
            router.go(AppRoute::Search { query: q });
        }
    };

    view! {
        <form class="relative w-full max-w-2xl" on:submit=on_submit>
            <div class="join w-full">
                <input
                    type="search"
                    class="input input-bordered join-item w-full"
                    placeholder="Search AI tools and news..."
                    prop:value=query
                    on:input=on_input
                />
                <button class="btn btn-primary join-item">"Search"</button>
            </div>
            <Show when=move || hits.with(|h| !h.is_empty())>
                <ul class="menu bg-base-100 rounded-box shadow-lg absolute z-20 w-full mt-1">
                    <For
                        each=move || hits.get()
                        key=|hit| hit.hit().url.clone()
                        children=move |hit| {
                            let kind = hit.kind();
                            let entry = hit.hit().clone();
                            view! {
                                <li>
                                    <Link to=entry.url>
                                        <span class="badge badge-ghost badge-sm">{kind}</span>
                                        {entry.name}
                                    </Link>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </form>
    }
}
