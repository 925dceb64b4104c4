//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。
//!
//! 查询串单独保存在一个信号里，只改查询串时不会重新挂载页面。

use leptos::prelude::*;
use tracing::{debug, info};
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, join_target, split_target};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 获取当前查询串（不含 `?`）
fn current_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .map(|s| s.trim_start_matches('?').to_string())
        .unwrap_or_default()
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(url));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(url));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证检查信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 当前查询串
    query: ReadSignal<String>,
    set_query: WriteSignal<String>,
    /// 认证状态检查（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// # Arguments
    /// * `is_authenticated` - 认证状态信号，由外部注入实现解耦
    fn new(is_authenticated: Signal<bool>) -> Self {
        // 1. 初始化当前路由（从 URL 解析）
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);
        let (query, set_query) = signal(current_query());

        Self {
            current_route,
            set_route,
            query,
            set_query,
            is_authenticated,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 获取当前查询串信号
    pub fn query(&self) -> ReadSignal<String> {
        self.query
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    /// `target` 可以带查询串，例如 `/dashboard?page=2`。
    pub fn navigate(&self, target: &str) {
        let (path, query) = split_target(target);
        self.navigate_to_route(AppRoute::from_path(path), query, true);
    }

    /// 只替换当前页面的查询串，不产生新的历史记录
    pub fn replace_query(&self, query: &str) {
        let url = join_target(&self.current_route.get_untracked().to_path(), query);
        replace_history_state(&url);
        self.commit(None, query);
    }

    /// 仅在值变化时写入信号，避免无关订阅者重跑
    fn commit(&self, route: Option<AppRoute>, query: &str) {
        if let Some(route) = route {
            if self.current_route.get_untracked() != route {
                self.set_route.set(route);
            }
        }
        let query = query.trim_start_matches('?');
        if self.query.get_untracked() != query {
            self.set_query.set(query.to_string());
        }
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `query` - 目标查询串，重定向时丢弃
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, query: &str, use_push: bool) {
        let is_auth = self.is_authenticated.get_untracked();
        let write_history = |url: &str| {
            if use_push {
                push_history_state(url);
            } else {
                replace_history_state(url);
            }
        };

        // --- Step 1: 验证目标路由 ---
        // 如果目标需要认证但用户未认证
        if target_route.requires_auth() && !is_auth {
            info!(route = %target_route, "access denied, redirecting to login");
            let redirect = AppRoute::auth_failure_redirect();
            write_history(&redirect.to_path());
            self.commit(Some(redirect), "");
            return;
        }

        // 如果用户已认证但访问登录页，重定向到书目页
        if target_route.should_redirect_when_authenticated() && is_auth {
            info!("already authenticated, redirecting to dashboard");
            let redirect = AppRoute::auth_success_redirect();
            write_history(&redirect.to_path());
            self.commit(Some(redirect), "");
            return;
        }

        // --- Step 2: 加载页面 (更新状态) ---
        debug!(route = %target_route, query, "navigating");
        write_history(&join_target(&target_route.to_path(), query));
        self.commit(Some(target_route), query);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            let query = current_query();

            // popstate 时也执行守卫逻辑
            if target_route.requires_auth() && !router.is_authenticated.get_untracked() {
                let redirect = AppRoute::auth_failure_redirect();
                replace_history_state(&redirect.to_path());
                router.commit(Some(redirect), "");
            } else {
                router.commit(Some(target_route), &query);
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置认证状态变化时的自动重定向
    fn setup_auth_redirect(&self) {
        let router = *self;

        // 使用 Effect 监听认证状态变化
        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let route = router.current_route.get_untracked();

            if is_auth {
                // 用户刚登录，如果在登录页则重定向到书目页
                if route.should_redirect_when_authenticated() {
                    info!("logged in, redirecting to dashboard");
                    let redirect = AppRoute::auth_success_redirect();
                    push_history_state(&redirect.to_path());
                    router.commit(Some(redirect), "");
                }
            } else if route.requires_auth() {
                // 会话失效，如果在受保护页面则重定向到登录
                info!("logged out, redirecting to login");
                let redirect = AppRoute::auth_failure_redirect();
                push_history_state(&redirect.to_path());
                router.commit(Some(redirect), "");
            }
        });
    }

    /// 首次加载时对地址栏中的路由执行一次守卫
    fn guard_initial_route(&self) {
        let route = self.current_route.get_untracked();
        let query = self.query.get_untracked();
        self.navigate_to_route(route, &query, false);
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    // 初始化监听器
    router.init_popstate_listener();
    router.guard_initial_route();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，拦截点击改由路由服务导航
#[component]
pub fn Link(
    /// 目标路径，可带查询串
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
