//! 运行时配置
//!
//! 后端地址可在编译期通过 `BOOKSTORE_API_BASE` 覆盖，其余取默认值。

use bookstore_shared::DEFAULT_AUTH_ROLE;
use leptos::prelude::*;

// =========================================================
// 常量定义
// =========================================================

const DEFAULT_API_BASE: &str = "http://localhost:4000/api/v1";
const DEFAULT_TOKEN_KEY: &str = "token";
const DEFAULT_LOGIN_REDIRECT_MS: u64 = 1000;
const DEFAULT_ORDER_REDIRECT_MS: u64 = 1500;
const DEFAULT_AUTH_NOTICE_MS: u64 = 4000;
const DEFAULT_NOTICE_MS: u64 = 6000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base: &'static str,
    /// LocalStorage 中保存令牌的键
    pub token_key: &'static str,
    /// 会话失效时跳转到的登录角色
    pub default_role: &'static str,
    /// 登录成功后等待多久再跳转，让提示可见
    pub login_redirect_ms: u64,
    /// 下单成功后等待多久再跳转到订单页
    pub order_redirect_ms: u64,
    pub auth_notice_ms: u64,
    pub notice_ms: u64,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self {
            api_base: option_env!("BOOKSTORE_API_BASE").unwrap_or(DEFAULT_API_BASE),
            ..Self::default()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE,
            token_key: DEFAULT_TOKEN_KEY,
            default_role: DEFAULT_AUTH_ROLE,
            login_redirect_ms: DEFAULT_LOGIN_REDIRECT_MS,
            order_redirect_ms: DEFAULT_ORDER_REDIRECT_MS,
            auth_notice_ms: DEFAULT_AUTH_NOTICE_MS,
            notice_ms: DEFAULT_NOTICE_MS,
        }
    }
}

pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().unwrap_or_default()
}
