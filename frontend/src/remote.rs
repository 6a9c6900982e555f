//! 页面数据加载
//!
//! 每个页面持有一份 `Remote<T>`：数据、错误、加载标记三个信号，
//! 加上请求代次。参数变化时旧请求的结果会被丢弃。

use crate::api::{Services, use_services};
use crate::auth::{AuthContext, handle_api_error, use_auth};
use crate::components::status::{ErrorAlert, Spinner};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use thatnewai::{ApiError, ApiResult, RequestGenerations};

pub struct Remote<T: Send + Sync + 'static> {
    pub data: RwSignal<Option<T>>,
    pub error: RwSignal<Option<ApiError>>,
    pub loading: RwSignal<bool>,
    generations: StoredValue<RequestGenerations>,
    services: StoredValue<Services>,
    auth: AuthContext,
}

impl<T: Send + Sync + 'static> Clone for Remote<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for Remote<T> {}

impl<T: Send + Sync + 'static> Remote<T> {
    /// 必须在组件内创建（需要读取 Context）
    pub fn new() -> Self {
        let generations = RequestGenerations::new();

        // 卸载后到达的响应一律丢弃
        let on_unmount = generations.clone();
        on_cleanup(move || on_unmount.invalidate());

        Self {
            data: RwSignal::new(None),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            generations: StoredValue::new(generations),
            services: StoredValue::new(use_services()),
            auth: use_auth(),
        }
    }

    /// 发起加载；只有最新一次的结果会写入信号
    pub fn load<Fut>(&self, fut: Fut)
    where
        Fut: Future<Output = ApiResult<T>> + 'static,
    {
        let ticket = self.generations.with_value(RequestGenerations::issue);
        let this = *self;

        this.loading.set(true);
        this.error.set(None);

        spawn_local(async move {
            let result = fut.await;
            if !ticket.is_current() {
                tracing::trace!(generation = ticket.generation(), "stale response dropped");
                return;
            }

            match result {
                Ok(value) => this.data.set(Some(value)),
                Err(e) => {
                    tracing::warn!(error = %e, "page load failed");
                    this.services
                        .with_value(|services| handle_api_error(&this.auth, services, &e));
                    this.data.set(None);
                    this.error.set(Some(e));
                }
            }
            this.loading.set(false);
        });
    }
}

impl<T: Clone + Send + Sync + 'static> Remote<T> {
    /// 加载中 / 出错 / 数据三态的统一渲染
    pub fn view(
        self,
        retry: impl Fn() + Copy + Send + Sync + 'static,
        body: impl Fn(T) -> AnyView + Send + Sync + 'static,
    ) -> impl IntoView {
        move || {
            if let Some(e) = self.error.get() {
                return view! { <ErrorAlert error=e on_retry=move |_| retry() /> }.into_any();
            }
            if self.loading.get() {
                return view! { <Spinner /> }.into_any();
            }
            match self.data.get() {
                Some(data) => body(data),
                None => view! { <Spinner /> }.into_any(),
            }
        }
    }
}
