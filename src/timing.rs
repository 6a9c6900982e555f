//! 延时、防抖与请求代次
//!
//! 浏览器是单线程事件循环，旧请求的响应可能晚于新请求到达。
//! 每次发起请求前取一张 [`Ticket`]，响应回来时只有仍是最新的 ticket 才能写入状态。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[cfg(test)]
use std::cell::RefCell;

/// 异步等待
#[async_trait::async_trait(?Send)]
pub trait Delay {
    async fn sleep(&self, duration: Duration);
}

#[async_trait::async_trait(?Send)]
impl<D: Delay + ?Sized> Delay for std::rc::Rc<D> {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[cfg(not(target_arch = "wasm32"))]
#[async_trait::async_trait(?Send)]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// 测试用：立即返回，并记录请求过的时长
#[cfg(test)]
#[derive(Debug, Default)]
pub struct InstantDelay {
    pub slept: RefCell<Vec<Duration>>,
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl Delay for InstantDelay {
    async fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}

// =========================================================
// 请求代次 (Request Generations)
// =========================================================

/// 单调递增的请求计数器；克隆后共享计数
#[derive(Debug, Clone, Default)]
pub struct RequestGenerations {
    current: Arc<AtomicU64>,
}

/// 某一次请求的凭证
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl RequestGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// 发起新请求；之前发出的 ticket 全部失效
    pub fn issue(&self) -> Ticket {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            generation,
            current: Arc::clone(&self.current),
        }
    }

    /// 让所有未完成的请求失效（例如组件卸载）
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// 等待 `duration` 后报告 ticket 是否仍然有效
///
/// 输入期间每次按键都 issue 新 ticket，只有停顿足够久的那次会返回 true。
pub async fn debounce<D: Delay + ?Sized>(delay: &D, ticket: &Ticket, duration: Duration) -> bool {
    delay.sleep(duration).await;
    let alive = ticket.is_current();
    if !alive {
        tracing::trace!(generation = ticket.generation(), "debounced input superseded");
    }
    alive
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let generations = RequestGenerations::new();
        let first = generations.issue();
        assert!(first.is_current());

        let second = generations.issue();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert!(second.generation() > first.generation());

        generations.invalidate();
        assert!(!second.is_current());
    }

    #[test]
    fn test_clones_share_the_counter() {
        let generations = RequestGenerations::new();
        let ticket = generations.issue();
        generations.clone().issue();
        assert!(!ticket.is_current());
    }

    #[tokio::test]
    async fn test_debounce_reports_survival() {
        let delay = InstantDelay::default();
        let generations = RequestGenerations::new();

        let ticket = generations.issue();
        assert!(debounce(&delay, &ticket, Duration::from_millis(300)).await);

        let stale = generations.issue();
        generations.issue();
        assert!(!debounce(&delay, &stale, Duration::from_millis(300)).await);

        assert_eq!(
            *delay.slept.borrow(),
            vec![Duration::from_millis(300), Duration::from_millis(300)]
        );
    }

    #[tokio::test]
    async fn test_tokio_delay_sleeps() {
        let start = tokio::time::Instant::now();
        TokioDelay.sleep(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
