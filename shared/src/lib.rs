//! 书店前端共享核心
//!
//! 与平台无关的部分都放在这里，可以在原生目标上直接测试：
//! - `model` / `protocol`: 领域模型与后端接口定义
//! - `session` / `client`: 会话与传输层抽象，以及统一的 API 客户端
//! - `auth` / `catalog` / `book` / `cart` / `customer` / `wishlist` / `order`: 各视图的非标记逻辑

pub mod auth;
pub mod book;
pub mod cart;
pub mod catalog;
pub mod client;
pub mod customer;
pub mod error;
pub mod model;
pub mod notice;
pub mod order;
pub mod protocol;
pub mod serde_helper;
pub mod session;
pub mod wishlist;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ClientConfig, HttpRequest, HttpResponse, Reply, StoreClient, Transport};
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use model::{
    Book, BookListing, CartLine, CustomerAddress, LoginData, NewCustomer, OrderLineItem,
    PlacedOrder, UpdatedCartLine, WishlistLine,
};
pub use notice::{Notice, Severity};
pub use session::{MemoryTokenStore, Session, TokenStore};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 登录/注册路径中默认使用的角色段
pub const DEFAULT_AUTH_ROLE: &str = "user";

/// 后端用来表示令牌失效的消息
pub const TOKEN_REJECTION_MESSAGES: [&str; 2] = ["jwt expired", "jwt malformed"];
