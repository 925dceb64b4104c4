//! 会话上下文
//!
//! 令牌本身保存在 LocalStorage，这里只维护一个响应式的"是否已登录"信号，
//! 并注入到路由服务实现守卫。令牌被后端拒绝时由 API 层调用 `mark_logged_out`，
//! 路由服务监听信号变化完成跳转。

use bookstore_shared::TokenStore;
use leptos::prelude::*;
use tracing::info;

use crate::config::AppConfig;
use crate::web::LocalTokenStore;

/// 会话上下文
#[derive(Clone, Copy)]
pub struct SessionContext {
    is_authenticated: RwSignal<bool>,
    token_key: &'static str,
}

impl SessionContext {
    /// 根据 LocalStorage 中是否已有令牌初始化
    pub fn new(config: &AppConfig) -> Self {
        let store = LocalTokenStore::new(config.token_key);
        let has_token = store.load().is_some_and(|t| !t.is_empty());
        Self {
            is_authenticated: RwSignal::new(has_token),
            token_key: config.token_key,
        }
    }

    pub fn token_store(&self) -> LocalTokenStore {
        LocalTokenStore::new(self.token_key)
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        self.is_authenticated.into()
    }

    /// 令牌已保存后调用，触发路由跳转
    pub fn mark_logged_in(&self) {
        self.is_authenticated.set(true);
    }

    /// 令牌已清除后调用
    pub fn mark_logged_out(&self) {
        if self.is_authenticated.get_untracked() {
            info!("session ended");
            self.is_authenticated.set(false);
        }
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}
