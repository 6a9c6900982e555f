use crate::api::use_services;
use crate::auth::{login, register, use_auth};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thatnewai_shared::RegisterRequest;
use thatnewai_shared::route::AppRoute;

fn error_banner(error_msg: ReadSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error_msg.get().is_some()>
            <div role="alert" class="alert alert-error text-sm py-2">
                <svg xmlns="http://www.w3.org/2000/svg" class="stroke-current shrink-0 h-6 w-6" fill="none" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 14l2-2m0 0l2-2m-2 2l-2-2m2 2l2 2m7-2a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>
                <span>{move || error_msg.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

/// 登录页
///
/// 成功后返回 `from` 指向的页面（只接受站内相对路径）。
/// 已登录用户访问此页由路由守卫重定向。
#[component]
pub fn LoginPage(from: Option<String>) -> impl IntoView {
    let auth = use_auth();
    let services = StoredValue::new(use_services());
    let router = use_router();
    let from = StoredValue::new(from);

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().trim().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let services = services.get_value();
        spawn_local(async move {
            match login(&auth, &services, email.get_untracked(), password.get_untracked()).await {
                Ok(_) => {
                    let target = from.with_value(|f| AppRoute::auth_success_redirect(f.as_deref()));
                    router.replace(target);
                }
                Err(e) if e.is_unauthorized() => {
                    set_error_msg.set(Some("Invalid email or password.".to_string()));
                }
                Err(e) => set_error_msg.set(Some(format!("Sign in failed: {}", e.message()))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Welcome back"</h1>
                    <p class="text-base-content/70">"Sign in to manage your tools"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        {error_banner(error_msg)}

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "No account? " <Link to="/register" class="link link-primary">"Sign up"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let services = StoredValue::new(use_services());
    let router = use_router();

    let (full_name, set_full_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        set_error_msg.set(None);

        let request = RegisterRequest {
            email: email.get().trim().to_string(),
            password: password.get(),
            full_name: full_name.get().trim().to_string(),
        };
        let services = services.get_value();
        spawn_local(async move {
            match register(&services, request).await {
                // 注册不会自动登录
                Ok(_) => router.go(AppRoute::Login { from: None }),
                Err(e) => set_error_msg.set(Some(format!("Sign up failed: {}", e.message()))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold mb-4">"Create an account"</h1>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        {error_banner(error_msg)}

                        <input
                            type="text"
                            placeholder="Full name"
                            on:input=move |ev| set_full_name.set(event_target_value(&ev))
                            prop:value=full_name
                            class="input input-bordered"
                        />
                        <input
                            type="email"
                            placeholder="Email"
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            prop:value=email
                            class="input input-bordered"
                            required
                        />
                        <input
                            type="password"
                            placeholder="Password"
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                            class="input input-bordered"
                            required
                        />
                        <button class="btn btn-primary mt-4" disabled=move || is_submitting.get()>
                            "Sign up"
                        </button>
                        <p class="text-sm text-center mt-2">
                            "Already registered? " <Link to="/login" class="link link-primary">"Sign in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
