//! 定时器封装模块
//!
//! 使用 `web_sys` 的原生 `setTimeout` 替代 `gloo-timers`。

use std::time::Duration;
use thatnewai::Delay;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// 基于 `setTimeout` 的异步等待
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerDelay;

#[async_trait::async_trait(?Send)]
impl Delay for TimerDelay {
    async fn sleep(&self, duration: Duration) {
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);

        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let scheduled = web_sys::window().and_then(|window| {
                window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
                    .ok()
            });
            // 没有 window（或调度失败）时立即完成
            if scheduled.is_none() {
                let _ = resolve.call0(&JsValue::NULL);
            }
        });

        if let Err(e) = JsFuture::from(promise).await {
            tracing::warn!(error = ?e, "timer promise rejected");
        }
    }
}
