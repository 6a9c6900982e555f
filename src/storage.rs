//! 令牌存储抽象
//!
//! 浏览器里是 localStorage，测试和原生平台用内存实现。
//! 接口和 localStorage 一样是同步的。

use std::rc::Rc;
use std::sync::{Arc, Mutex};

pub trait TokenStore {
    fn get(&self) -> Option<String>;
    /// 写入成功返回 true
    fn set(&self, token: &str) -> bool;
    /// 删除成功返回 true
    fn delete(&self) -> bool;
}

impl<S: TokenStore + ?Sized> TokenStore for Rc<S> {
    fn get(&self) -> Option<String> {
        (**self).get()
    }

    fn set(&self, token: &str) -> bool {
        (**self).set(token)
    }

    fn delete(&self) -> bool {
        (**self).delete()
    }
}

/// 内存中的令牌；克隆后共享同一份数据
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.set(token);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    fn set(&self, token: &str) -> bool {
        match self.token.lock() {
            Ok(mut slot) => {
                *slot = Some(token.to_string());
                true
            }
            Err(_) => false,
        }
    }

    fn delete(&self) -> bool {
        match self.token.lock() {
            Ok(mut slot) => {
                *slot = None;
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_is_shared_between_clones() {
        let store = MemoryTokenStore::new();
        let other = store.clone();

        assert_eq!(store.get(), None);
        assert!(other.set("abc"));
        assert_eq!(store.get().as_deref(), Some("abc"));
        assert!(store.delete());
        assert_eq!(other.get(), None);
    }
}
