use leptos::prelude::*;
use thatnewai_shared::{TOOL_CATEGORIES, ToolType};

/// 提交工具
///
/// 后端没有公开的提交接口，只在本地确认收到。
#[component]
pub fn SubmitPage() -> impl IntoView {
    let name = RwSignal::new(String::new());
    let website = RwSignal::new(String::new());
    let category = RwSignal::new(TOOL_CATEGORIES[0].to_string());
    let kind = RwSignal::new(ToolType::Free);
    let description = RwSignal::new(String::new());
    let submitted = RwSignal::new(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        tracing::info!(
            name = %name.get_untracked(),
            category = %category.get_untracked(),
            kind = kind.get_untracked().as_key(),
            "tool submitted"
        );
        submitted.set(true);
    };

    view! {
        <div class="max-w-2xl mx-auto p-4 md:p-8">
            <h1 class="text-3xl font-bold mb-6">"Submit a tool"</h1>
            <Show
                when=move || !submitted.get()
                fallback=move || view! {
                    <div role="alert" class="alert alert-success">
                        <span>{move || format!("Thanks! \"{}\" has been submitted for review.", name.get())}</span>
                    </div>
                }
            >
                <form class="card bg-base-100 shadow-xl card-body gap-4" on:submit=on_submit>
                    <input
                        type="text"
                        placeholder="Tool name"
                        class="input input-bordered"
                        prop:value=name
                        on:input=move |ev| name.set(event_target_value(&ev))
                        required
                    />
                    <input
                        type="url"
                        placeholder="https://"
                        class="input input-bordered"
                        prop:value=website
                        on:input=move |ev| website.set(event_target_value(&ev))
                        required
                    />
                    <select
                        class="select select-bordered"
                        on:change=move |ev| category.set(event_target_value(&ev))
                    >
                        {TOOL_CATEGORIES
                            .iter()
                            .map(|c| view! { <option value=*c selected=move || category.get() == *c>{*c}</option> })
                            .collect_view()}
                    </select>
                    <select
                        class="select select-bordered"
                        on:change=move |ev| {
                            if let Some(k) = ToolType::from_key(&event_target_value(&ev)) {
                                kind.set(k);
                            }
                        }
                    >
                        {ToolType::ALL
                            .iter()
                            .map(|k| view! { <option value=k.as_key()>{k.as_key()}</option> })
                            .collect_view()}
                    </select>
                    <textarea
                        class="textarea textarea-bordered h-32"
                        placeholder="What does it do?"
                        prop:value=description
                        on:input=move |ev| description.set(event_target_value(&ev))
                    ></textarea>
                    <button class="btn btn-primary">"Submit"</button>
                </form>
            </Show>
        </div>
    }
}
