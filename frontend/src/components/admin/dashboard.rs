use crate::api::use_services;
use crate::auth::{handle_api_error, use_auth};
use crate::components::pagination::PaginationControls;
use crate::components::status::Toast;
use crate::remote::Remote;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thatnewai::ApiResult;
use thatnewai_shared::route::AppRoute;
use thatnewai_shared::{InventionPost, PaginatedResponse, Pager, Tool};

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let services = use_services();
    let router = use_router();
    let per_page = services.config.default_per_page;
    let services = StoredValue::new(services);

    let page = RwSignal::new(1u32);
    let tools = Remote::<PaginatedResponse<Tool>>::new();
    let posts = Remote::<Vec<InventionPost>>::new();
    let notification = RwSignal::new(Option::<(String, bool)>::None); // 消息内容, 是否出错

    let load_tools = move || {
        let api = services.with_value(|s| s.api.clone());
        let page = page.get_untracked();
        tools.load(async move { api.get_tools(page, per_page).await });
    };
    let load_posts = move || {
        let api = services.with_value(|s| s.api.clone());
        posts.load(async move { api.get_posts().await });
    };

    // 页码变化时重新加载
    Effect::new(move |_| {
        page.track();
        load_tools();
    });
    load_posts();

    // 写操作的统一收尾：通知 + 401 降级
    let report = move |result: ApiResult<()>, done: &str| match result {
        Ok(()) => {
            notification.set(Some((done.to_string(), false)));
            true
        }
        Err(e) => {
            services.with_value(|s| handle_api_error(&auth, s, &e));
            notification.set(Some((format!("Failed: {}", e.message()), true)));
            false
        }
    };

    let handle_delete_tool = move |slug: String| {
        if !confirm("Are you sure you want to delete this tool?") {
            return;
        }
        let api = services.with_value(|s| s.api.clone());
        spawn_local(async move {
            if report(api.delete_tool(&slug).await, "Tool deleted") {
                load_tools();
            }
        });
    };

    let handle_delete_post = move |slug: String| {
        if !confirm("Are you sure you want to delete this post?") {
            return;
        }
        let api = services.with_value(|s| s.api.clone());
        spawn_local(async move {
            if report(api.delete_post(&slug).await, "Post deleted") {
                posts
                    .data
                    .update(|list| {
                        if let Some(list) = list {
                            list.retain(|p| p.slug != slug);
                        }
                    });
            }
        });
    };

    let pager = Signal::derive(move || {
        tools
            .data
            .with(|d| d.as_ref().map(PaginatedResponse::pager))
            .unwrap_or_else(|| Pager::new(page.get(), per_page, 1))
    });
    let total_tools = move || tools.data.with(|d| d.as_ref().map_or(0, |r| r.total));
    let total_posts = move || posts.data.with(|d| d.as_ref().map_or(0, Vec::len));

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-7xl mx-auto space-y-8">
                <Toast notification=notification />

                <div class="flex flex-wrap items-center justify-between gap-4">
                    <div>
                        <h1 class="text-3xl font-bold">"Admin dashboard"</h1>
                        <p class="text-base-content/70 text-sm">
                            {move || auth.user().map(|u| format!("Signed in as {}", u.email)).unwrap_or_default()}
                        </p>
                    </div>
                    <div class="flex gap-2">
                        <button class="btn btn-primary" on:click=move |_| router.go(AppRoute::AdminNewTool)>
                            "New tool"
                        </button>
                        <button class="btn btn-outline" on:click=move |_| router.go(AppRoute::AdminNewPost)>
                            "New post"
                        </button>
                    </div>
                </div>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-title">"Tools"</div>
                        <div class="stat-value text-primary">{total_tools}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Invention posts"</div>
                        <div class="stat-value text-secondary">{total_posts}</div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <h3 class="card-title p-6 pb-2">"Tools"</h3>
                        <div class="overflow-x-auto w-full">
                            {tools.view(load_tools, move |resp| view! {
                                <table class="table table-zebra w-full">
                                    <thead>
                                        <tr>
                                            <th>"Name"</th>
                                            <th class="hidden md:table-cell">"Category"</th>
                                            <th class="hidden md:table-cell">"Pricing"</th>
                                            <th></th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {resp.data.into_iter().map(|tool| {
                                            let slug = tool.slug.clone();
                                            let edit = AppRoute::AdminEditTool { slug: tool.slug.clone() }.to_path();
                                            view! {
                                                <tr>
                                                    <td class="font-semibold">{tool.name.clone()}</td>
                                                    <td class="hidden md:table-cell">{tool.categories.join(", ")}</td>
                                                    <td class="hidden md:table-cell">
                                                        <span class="badge badge-outline">{tool.pricing_type.as_str()}</span>
                                                    </td>
                                                    <td class="text-right space-x-2">
                                                        <Link to=edit class="btn btn-ghost btn-xs">"Edit"</Link>
                                                        <button
                                                            class="btn btn-ghost btn-xs text-error"
                                                            on:click=move |_| handle_delete_tool(slug.clone())
                                                        >
                                                            "Delete"
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        }).collect_view()}
                                    </tbody>
                                </table>
                            }
                            .into_any())}
                        </div>
                        <PaginationControls pager=pager on_change=move |p| page.set(p) />
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title">"Invention posts"</h3>
                        {posts.view(load_posts, move |list| {
                            if list.is_empty() {
                                return view! {
                                    <p class="text-base-content/50">"No posts yet."</p>
                                }
                                .into_any();
                            }
                            view! {
                                <ul class="divide-y divide-base-200">
                                    {list.into_iter().map(|post| {
                                        let slug = post.slug.clone();
                                        let edit = AppRoute::AdminEditPost { slug: post.slug.clone() }.to_path();
                                        view! {
                                            <li class="flex items-center justify-between py-2">
                                                <span>{post.title.clone()}</span>
                                                <span class="space-x-2">
                                                    <Link to=edit class="btn btn-ghost btn-xs">"Edit"</Link>
                                                    <button
                                                        class="btn btn-ghost btn-xs text-error"
                                                        on:click=move |_| handle_delete_post(slug.clone())
                                                    >
                                                        "Delete"
                                                    </button>
                                                </span>
                                            </li>
                                        }
                                    }).collect_view()}
                                </ul>
                            }
                            .into_any()
                        })}
                    </div>
                </div>
            </div>
        </div>
    }
}
