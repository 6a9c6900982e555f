use crate::api::use_services;
use crate::auth::{logout, use_auth};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use thatnewai_shared::SessionState;
use thatnewai_shared::route::AppRoute;

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let services = StoredValue::new(use_services());
    let router = use_router();

    let on_logout = move |_| {
        services.with_value(|s| logout(&auth, s));
        router.go(AppRoute::Home);
    };

    view! {
        <div class="navbar bg-base-100 shadow-md sticky top-0 z-30">
            <div class="flex-1 gap-2">
                <Link to="/" class="btn btn-ghost text-xl">"ThatNewAI"</Link>
                <ul class="menu menu-horizontal px-1 hidden md:flex">
                    <li><Link to="/categories">"Categories"</Link></li>
                    <li><Link to="/latest">"Latest"</Link></li>
                    <li><Link to="/ai-news">"AI News"</Link></li>
                    <li><Link to="/submit">"Submit"</Link></li>
                </ul>
            </div>
            <div class="flex-none gap-2">
                {move || match auth.state.get() {
                    SessionState::Loading => view! {
                        <span class="loading loading-dots loading-sm"></span>
                    }
                    .into_any(),
                    SessionState::Unauthenticated => view! {
                        <Link to="/login" class="btn btn-ghost btn-sm">"Sign in"</Link>
                        <Link to="/register" class="btn btn-primary btn-sm">"Sign up"</Link>
                    }
                    .into_any(),
                    SessionState::Authenticated(user) => {
                        let is_admin = user.is_admin;
                        view! {
                            <span class="text-sm hidden md:inline">{user.display_name().to_string()}</span>
                            <Show when=move || is_admin>
                                <Link to="/admin" class="btn btn-outline btn-sm">"Admin"</Link>
                            </Show>
                            <button class="btn btn-ghost btn-sm" on:click=on_logout>"Sign out"</button>
                        }
                        .into_any()
                    }
                }}
            </div>
        </div>
    }
}
