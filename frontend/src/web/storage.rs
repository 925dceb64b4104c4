//! 会话令牌的 LocalStorage 持久化

use bookstore_shared::TokenStore;
use tracing::warn;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// 把会话令牌保存在 LocalStorage 的固定键下
#[derive(Debug, Clone, Copy)]
pub struct LocalTokenStore {
    key: &'static str,
}

impl LocalTokenStore {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        local_storage()?.get_item(self.key).ok()?
    }

    fn save(&self, token: &str) {
        let stored = local_storage().is_some_and(|s| s.set_item(self.key, token).is_ok());
        if !stored {
            warn!(key = self.key, "failed to persist token");
        }
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            // 删除失败时令牌留在浏览器里，但会话信号已经登出
            let _ = storage.remove_item(self.key);
        }
    }
}
