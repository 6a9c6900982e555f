//! 分页控件

use leptos::prelude::*;
use thatnewai_shared::Pager;

const WINDOW: u32 = 5;

/// 上一页 / 页码 / 下一页；边界按钮禁用
#[component]
pub fn PaginationControls(
    #[prop(into)] pager: Signal<Pager>,
    #[prop(into)] on_change: Callback<u32>,
) -> impl IntoView {
    let go = move |target: Option<u32>| {
        if let Some(page) = target {
            on_change.run(page);
        }
    };

    view! {
        <div class="join flex justify-center my-8">
            <button
                class="join-item btn"
                disabled=move || !pager.get().has_prev()
                on:click=move |_| go(pager.get().prev())
            >
                "«"
            </button>
            <For
                each=move || pager.get().page_window(WINDOW)
                key=|page| *page
                children=move |page| {
                    view! {
                        <button
                            class=move || {
                                if pager.get().current_page == page {
                                    "join-item btn btn-active"
                                } else {
                                    "join-item btn"
                                }
                            }
                            on:click=move |_| go(Some(pager.get().go_to(page)))
                        >
                            {page}
                        </button>
                    }
                }
            />
            <button
                class="join-item btn"
                disabled=move || !pager.get().has_next()
                on:click=move |_| go(pager.get().next())
            >
                "»"
            </button>
        </div>
    }
}
