//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;

use bookstore_shared::DEFAULT_AUTH_ROLE;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    /// 登录 / 注册页，`role` 作为后端路径段
    Auth { role: String },
    /// 书目列表 (需要认证)
    Dashboard,
    /// 书籍详情 (需要认证)
    Book { id: String },
    /// 购物车 (需要认证)
    Cart,
    /// 心愿单 (需要认证)
    Wishlist,
    /// 订单历史 (需要认证)
    Orders,
    /// 页面未找到
    NotFound,
}

impl Default for AppRoute {
    fn default() -> Self {
        Self::auth(DEFAULT_AUTH_ROLE)
    }
}

impl AppRoute {
    pub fn auth(role: &str) -> Self {
        Self::Auth {
            role: role.to_string(),
        }
    }

    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        match segments.as_slice() {
            [] | [""] => Self::Dashboard,
            ["dashboard"] => Self::Dashboard,
            ["auth"] => Self::default(),
            ["auth", role] if !role.is_empty() => Self::auth(role),
            ["book", id] if !id.is_empty() => Self::Book { id: id.to_string() },
            ["cart"] => Self::Cart,
            ["wishlist"] => Self::Wishlist,
            ["order"] => Self::Orders,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Auth { role } => format!("/auth/{role}"),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Book { id } => format!("/book/{id}"),
            Self::Cart => "/cart".to_string(),
            Self::Wishlist => "/wishlist".to_string(),
            Self::Orders => "/order".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Book { .. } | Self::Cart | Self::Wishlist | Self::Orders
        )
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::default()
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 把 `/path?query` 拆分为路径与不带 `?` 的查询串
pub fn split_target(target: &str) -> (&str, &str) {
    match target.split_once('?') {
        Some((path, query)) => (path, query),
        None => (target, ""),
    }
}

/// 拼接路径与查询串，查询串为空时不带 `?`
pub fn join_target(path: &str, query: &str) -> String {
    let query = query.trim_start_matches('?');
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}
