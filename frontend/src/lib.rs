//! 书店前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `session`: 会话状态管理
//! - `api`: API 客户端装配
//! - `components`: UI 组件层
//!
//! 与平台无关的业务逻辑都在 `bookstore-shared` 中。

mod api;
mod config;
mod session;
mod components {
    pub mod auth_card;
    pub mod book_card;
    pub mod book_page;
    pub mod books_container;
    pub mod cart_page;
    pub mod customer_form;
    pub mod dashboard;
    pub mod header;
    mod icons;
    pub mod notification;
    pub mod order_page;
    pub mod wishlist_page;
}

use crate::components::auth_card::AuthCard;
use crate::components::book_page::BookPage;
use crate::components::cart_page::CartPage;
use crate::components::dashboard::DashboardPage;
use crate::components::order_page::OrderPage;
use crate::components::wishlist_page::WishlistPage;
use crate::config::AppConfig;
use crate::session::SessionContext;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::FetchTransport;
    pub use storage::LocalTokenStore;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Auth { role } => view! { <AuthCard role=role /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Book { id } => view! { <BookPage id=id /> }.into_any(),
        AppRoute::Cart => view! { <CartPage /> }.into_any(),
        AppRoute::Wishlist => view! { <WishlistPage /> }.into_any(),
        AppRoute::Orders => view! { <OrderPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 配置
    let config = AppConfig::from_build_env();
    provide_context(config);

    // 2. 创建会话上下文（从 LocalStorage 判断是否已登录）
    let session = SessionContext::new(&config);
    provide_context(session);

    // 3. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = session.is_authenticated_signal();

    view! {
        // 4. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
