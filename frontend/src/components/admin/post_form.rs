use super::form_state::PostFormState;
use crate::api::use_services;
use crate::auth::{handle_api_error, use_auth};
use crate::components::status::{Spinner, Toast};
use crate::web::router::use_router;
use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thatnewai_shared::ToolType;
use thatnewai_shared::route::AppRoute;
use thatnewai_shared::slug::slugify_title;

/// 新建 / 编辑 invention 文章；`slug` 为 `None` 时是新建
#[component]
pub fn PostFormPage(slug: Option<String>) -> impl IntoView {
    let auth = use_auth();
    let services = StoredValue::new(use_services());
    let router = use_router();
    let form = PostFormState::new();
    let editing = StoredValue::new(slug);

    let (is_loading, set_is_loading) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let notification = RwSignal::new(Option::<(String, bool)>::None);

    if let Some(slug) = editing.get_value() {
        set_is_loading.set(true);
        let api = services.with_value(|s| s.api.clone());
        spawn_local(async move {
            match api.get_post(&slug).await {
                Ok(post) => form.fill(&post),
                Err(e) => {
                    tracing::warn!(slug = %slug, error = %e, "failed to load post for editing");
                    services.with_value(|s| handle_api_error(&auth, s, &e));
                    router.replace(AppRoute::AdminDashboard);
                }
            }
            set_is_loading.set(false);
        });
    }

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let post = form.to_post();
        if post.title.is_empty() {
            notification.set(Some(("Title is required".to_string(), true)));
            return;
        }
        let post = post.prepare(Utc::now());

        set_is_submitting.set(true);
        let api = services.with_value(|s| s.api.clone());
        let editing = editing.get_value();
        spawn_local(async move {
            let result = match &editing {
                Some(slug) => api.update_post(slug, &post).await,
                None => api.create_post(&post).await,
            };
            match result {
                Ok(()) => router.go(AppRoute::AdminDashboard),
                Err(e) => {
                    services.with_value(|s| handle_api_error(&auth, s, &e));
                    notification.set(Some((format!("Failed to save post: {}", e.message()), true)));
                }
            }
            set_is_submitting.set(false);
        });
    };

    let on_delete = move |_| {
        let Some(slug) = editing.get_value() else {
            return;
        };
        let api = services.with_value(|s| s.api.clone());
        spawn_local(async move {
            match api.delete_post(&slug).await {
                Ok(()) => router.go(AppRoute::AdminDashboard),
                Err(e) => {
                    services.with_value(|s| handle_api_error(&auth, s, &e));
                    notification.set(Some((format!("Failed to delete post: {}", e.message()), true)));
                }
            }
        });
    };

    let is_editing = editing.with_value(Option::is_some);

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8">
            <Toast notification=notification />
            <h1 class="text-3xl font-bold mb-6 text-center">
                {if is_editing { "Edit AI invention post" } else { "Add new AI invention post" }}
            </h1>
            <Show when=move || !is_loading.get() fallback=|| view! { <Spinner /> }>
                <form class="card bg-base-100 shadow-xl card-body gap-2" on:submit=on_submit>
                    <div class="form-control">
                        <label class="label"><span class="label-text">"Title"</span></label>
                        <input
                            type="text"
                            class="input input-bordered"
                            prop:value=form.title
                            on:input=move |ev| form.title.set(event_target_value(&ev))
                            required
                        />
                        <span class="label-text-alt mt-1 text-base-content/50">
                            {move || format!("slug: {}", slugify_title(&form.title.get()))}
                        </span>
                    </div>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Category"</span></label>
                            <input
                                type="text"
                                class="input input-bordered"
                                prop:value=form.category
                                on:input=move |ev| form.category.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Type"</span></label>
                            <select
                                class="select select-bordered"
                                on:change=move |ev| {
                                    if let Some(kind) = ToolType::from_key(&event_target_value(&ev)) {
                                        form.kind.set(kind);
                                    }
                                }
                            >
                                {ToolType::ALL
                                    .iter()
                                    .map(|k| {
                                        let k = *k;
                                        view! { <option value=k.as_key() selected=move || form.kind.get() == k>{k.as_key()}</option> }
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                    </div>
                    <div class="form-control">
                        <label class="label"><span class="label-text">"Description"</span></label>
                        <textarea
                            class="textarea textarea-bordered h-40"
                            prop:value=form.description
                            on:input=move |ev| form.description.set(event_target_value(&ev))
                        ></textarea>
                    </div>
                    <div class="form-control">
                        <label class="label"><span class="label-text">"Tags (comma separated)"</span></label>
                        <input
                            type="text"
                            class="input input-bordered"
                            prop:value=form.tags
                            on:input=move |ev| form.tags.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="card-actions justify-between mt-4">
                        <div>
                            <Show when=move || is_editing>
                                <button type="button" class="btn btn-error btn-outline" on:click=on_delete>
                                    "Delete"
                                </button>
                            </Show>
                        </div>
                        <div class="flex gap-2">
                            <button
                                type="button"
                                class="btn btn-ghost"
                                on:click=move |_| router.go(AppRoute::AdminDashboard)
                            >
                                "Cancel"
                            </button>
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() { "Saving..." } else { "Save" }}
                            </button>
                        </div>
                    </div>
                </form>
            </Show>
        </div>
    }
}
