//! 会话管理
//!
//! 令牌的持久化交给 `TokenStore`，`Session` 把它与 `on_unauthorized` 回调绑在一起，
//! 由 UI 层决定令牌失效后如何导航。

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

/// 令牌存储抽象（浏览器中为 LocalStorage）
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// 进程内的令牌存储，用于测试与非浏览器环境
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    token: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.save(token);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}

/// 显式的会话对象，注入到每个 API 客户端
#[derive(Clone)]
pub struct Session<S> {
    store: S,
    on_unauthorized: Rc<dyn Fn()>,
}

impl<S: TokenStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            on_unauthorized: Rc::new(|| {}),
        }
    }

    /// 设置令牌被后端拒绝时的回调
    pub fn with_on_unauthorized(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Rc::new(callback);
        self
    }

    /// 当前令牌，空字符串视为不存在
    pub fn token(&self) -> Option<String> {
        self.store.load().filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn persist(&self, token: &str) {
        debug!("persisting session token");
        self.store.save(token);
    }

    /// 清除令牌并通知 UI 层
    pub fn invalidate(&self) {
        warn!("session token rejected by backend, clearing");
        self.store.clear();
        (self.on_unauthorized)();
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn invalidate_clears_token_and_fires_callback() {
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let session = Session::new(MemoryTokenStore::with_token("abc123"))
            .with_on_unauthorized(move || counter.set(counter.get() + 1));

        assert!(session.is_authenticated());
        session.invalidate();

        assert!(!session.is_authenticated());
        assert_eq!(session.store().load(), None);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn empty_token_is_not_a_session() {
        let session = Session::new(MemoryTokenStore::with_token(""));
        assert_eq!(session.token(), None);
    }
}
