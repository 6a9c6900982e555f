use super::form_state::ToolFormState;
use crate::api::use_services;
use crate::auth::{handle_api_error, use_auth};
use crate::components::status::{Spinner, Toast};
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thatnewai_shared::route::AppRoute;
use thatnewai_shared::{TOOL_CATEGORIES, ToolType};

/// 工具的基础信息输入
#[component]
fn ToolFields(form: ToolFormState) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label"><span class="label-text">"Name"</span></label>
            <input
                type="text"
                class="input input-bordered"
                prop:value=form.name
                on:input=move |ev| form.name.set(event_target_value(&ev))
                required
            />
        </div>
        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
            <div class="form-control">
                <label class="label"><span class="label-text">"Category"</span></label>
                <select
                    class="select select-bordered"
                    on:change=move |ev| form.category.set(event_target_value(&ev))
                >
                    {TOOL_CATEGORIES
                        .iter()
                        .map(|c| view! { <option value=*c selected=move || form.category.get() == *c>{*c}</option> })
                        .collect_view()}
                </select>
            </div>
            <div class="form-control">
                <label class="label"><span class="label-text">"Pricing"</span></label>
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
                class="textarea textarea-bordered h-32"
                prop:value=form.description
                on:input=move |ev| form.description.set(event_target_value(&ev))
                required
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
        <div class="form-control">
            <label class="label"><span class="label-text">"Resource URL"</span></label>
            <input
                type="url"
                class="input input-bordered"
                placeholder="https://"
                prop:value=form.resource_url
                on:input=move |ev| form.resource_url.set(event_target_value(&ev))
            />
        </div>
        <label class="label cursor-pointer justify-start gap-3">
            <input
                type="checkbox"
                class="checkbox checkbox-primary"
                prop:checked=form.featured
                on:change=move |ev| form.featured.set(event_target_checked(&ev))
            />
            <span class="label-text">"Featured"</span>
        </label>
    }
}

/// 新建 / 编辑工具；`slug` 为 `None` 时是新建
#[component]
pub fn ToolFormPage(slug: Option<String>) -> impl IntoView {
    let auth = use_auth();
    let services = StoredValue::new(use_services());
    let router = use_router();
    let form = ToolFormState::new();
    let editing = StoredValue::new(slug);

    let (is_loading, set_is_loading) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let notification = RwSignal::new(Option::<(String, bool)>::None);

    // 编辑：回填已有记录；失败回到后台首页
    if let Some(slug) = editing.get_value() {
        set_is_loading.set(true);
        let api = services.with_value(|s| s.api.clone());
        spawn_local(async move {
            match api.get_tool_draft(&slug).await {
                Ok(draft) => form.fill(&draft),
                Err(e) => {
                    tracing::warn!(slug = %slug, error = %e, "failed to load tool for editing");
                    services.with_value(|s| handle_api_error(&auth, s, &e));
                    router.replace(AppRoute::AdminDashboard);
                }
            }
            set_is_loading.set(false);
        });
    }

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.to_draft();
        if draft.name.is_empty() {
            notification.set(Some(("Name is required".to_string(), true)));
            return;
        }

        set_is_submitting.set(true);
        let api = services.with_value(|s| s.api.clone());
        let editing = editing.get_value();
        spawn_local(async move {
            let result = match &editing {
                Some(slug) => api.update_tool(slug, &draft).await,
                None => api.create_tool(&draft).await,
            };
            match result {
                Ok(()) => router.go(AppRoute::AdminDashboard),
                Err(e) => {
                    services.with_value(|s| handle_api_error(&auth, s, &e));
                    notification.set(Some((format!("Failed to save tool: {}", e.message()), true)));
                }
            }
            set_is_submitting.set(false);
        });
    };

    let title = if editing.with_value(Option::is_some) {
        "Edit tool"
    } else {
        "Add new tool"
    };

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8">
            <Toast notification=notification />
            <h1 class="text-3xl font-bold mb-6 text-center">{title}</h1>
            <Show when=move || !is_loading.get() fallback=|| view! { <Spinner /> }>
                <form class="card bg-base-100 shadow-xl card-body gap-2" on:submit=on_submit>
                    <ToolFields form=form />
                    <div class="card-actions justify-end mt-4">
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
                </form>
            </Show>
        </div>
    }
}
