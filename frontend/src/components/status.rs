//! 加载、错误、通知等状态展示

use leptos::prelude::*;
use thatnewai::{ApiError, ApiErrorKind};

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-16">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

fn headline(err: &ApiError) -> &'static str {
    match err.kind {
        ApiErrorKind::Network => "Could not reach the server",
        ApiErrorKind::InvalidData | ApiErrorKind::Serialization => {
            "The server returned data we could not read"
        }
        ApiErrorKind::NotFound => "Not found",
        ApiErrorKind::Unauthorized => "Please sign in again",
        _ => "Something went wrong",
    }
}

/// 错误提示；401 不提供重试
#[component]
pub fn ErrorAlert(
    error: ApiError,
    #[prop(optional, into)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    let retry = on_retry.filter(|_| !error.is_unauthorized());

    view! {
        <div role="alert" class="alert alert-error my-6">
            <svg xmlns="http://www.w3.org/2000/svg" class="stroke-current shrink-0 h-6 w-6" fill="none" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 14l2-2m0 0l2-2m-2 2l-2-2m2 2l2 2m7-2a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>
            <div>
                <h3 class="font-bold">{headline(&error)}</h3>
                <div class="text-xs opacity-80">{error.message().to_string()}</div>
            </div>
            {retry.map(|cb| view! {
                <button class="btn btn-sm" on:click=move |_| cb.run(())>"Retry"</button>
            })}
        </div>
    }
}

/// 空结果提示
#[component]
pub fn EmptyState(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="text-center py-16 text-base-content/50">{message}</div>
    }
}

/// 右上角通知（消息内容, 是否出错），3 秒后自动清除
#[component]
pub fn Toast(notification: RwSignal<Option<(String, bool)>>) -> impl IntoView {
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    view! {
        <Show when=move || notification.with(Option::is_some)>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    let is_err = notification.with(|n| n.as_ref().is_some_and(|(_, e)| *e));
                    if is_err { "alert alert-error shadow-lg" } else { "alert alert-success shadow-lg" }
                }>
                    <span>
                        {move || notification.with(|n| n.as_ref().map(|(m, _)| m.clone()).unwrap_or_default())}
                    </span>
                </div>
            </div>
        </Show>
    }
}
