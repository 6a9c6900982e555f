use crate::api::use_api;
use crate::components::cards::{CategoryCard, ToolGrid};
use crate::components::search_box::SearchBox;
use crate::components::status::{ErrorAlert, Spinner};
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thatnewai::HomeFeed;

const LATEST_COUNT: u32 = 6;
const FEATURED_CATEGORIES: usize = 8;

#[component]
pub fn HomePage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let feed = RwSignal::new(Option::<HomeFeed>::None);

    // 两份数据并发请求，各自独立成败
    let load = move || {
        feed.set(None);
        let api = api.get_value();
        spawn_local(async move {
            feed.set(Some(api.home(LATEST_COUNT).await));
        });
    };
    load();

    let section = move |render: fn(&HomeFeed) -> AnyView| {
        move || match feed.with(|f| f.as_ref().map(render)) {
            Some(view) => view,
            None => view! { <Spinner /> }.into_any(),
        }
    };

    view! {
        <div class="hero bg-base-200 py-16">
            <div class="hero-content flex-col text-center">
                <h1 class="text-4xl md:text-5xl font-bold">"Discover the newest AI tools"</h1>
                <p class="text-base-content/70 max-w-xl">
                    "A curated directory of AI products, frameworks and news."
                </p>
                <SearchBox suggestions=true />
            </div>
        </div>

        <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-12">
            <section>
                <div class="flex justify-between items-center mb-4">
                    <h2 class="text-2xl font-bold">"Browse by category"</h2>
                    <Link to="/categories" class="link link-primary">"All categories"</Link>
                </div>
                {section(|feed| match &feed.categories {
                    Ok(categories) => view! {
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                            {categories
                                .iter()
                                .take(FEATURED_CATEGORIES)
                                .cloned()
                                .map(|category| view! { <CategoryCard category=category /> })
                                .collect_view()}
                        </div>
                    }
                    .into_any(),
                    Err(e) => view! { <ErrorAlert error=e.clone() /> }.into_any(),
                })}
            </section>

            <section>
                <div class="flex justify-between items-center mb-4">
                    <h2 class="text-2xl font-bold">"Latest tools"</h2>
                    <Link to="/latest" class="link link-primary">"See all"</Link>
                </div>
                {section(|feed| match &feed.latest {
                    Ok(tools) => view! { <ToolGrid tools=tools.clone() /> }.into_any(),
                    Err(e) => view! { <ErrorAlert error=e.clone() /> }.into_any(),
                })}
            </section>

            <div class="text-center">
                <button class="btn btn-ghost btn-sm" on:click=move |_| load()>"Refresh"</button>
            </div>
        </div>
    }
}
