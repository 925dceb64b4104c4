//! 统一的 API 客户端
//!
//! 每个后端操作都经过 [`StoreClient::execute`]：附加令牌、解包 `{ code, message, data }`，
//! 令牌被拒绝时清理会话。具体的网络实现通过 [`Transport`] 注入。

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::model::{
    Book, BookListing, CartLine, CustomerAddress, LoginData, NewCustomer, OrderLineItem,
    PlacedOrder, UpdatedCartLine, WishlistLine,
};
use crate::catalog::CatalogQuery;
use crate::protocol::*;
use crate::session::{Session, TokenStore};
use crate::{CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};

// =========================================================
// 传输层抽象 (Transport Abstraction)
// =========================================================

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_http_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 发送一次 HTTP 请求
///
/// 只有请求无法送达时才返回错误；任何 HTTP 状态码都作为 `Ok` 交回客户端解析。
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// 客户端配置
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// 成功响应的数据与后端消息
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub data: T,
    pub message: Option<String>,
}

// =========================================================
// StoreClient
// =========================================================

pub struct StoreClient<T, S> {
    transport: T,
    session: Session<S>,
    config: ClientConfig,
}

impl<T: Clone, S: Clone> Clone for StoreClient<T, S> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            session: self.session.clone(),
            config: self.config.clone(),
        }
    }
}

impl<T: Transport, S: TokenStore> StoreClient<T, S> {
    pub fn new(transport: T, session: Session<S>, config: ClientConfig) -> Self {
        Self {
            transport,
            session,
            config,
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// 执行请求，同时返回后端消息
    pub async fn execute_with_message<R: ApiRequest>(
        &self,
        req: &R,
    ) -> ApiResult<Reply<R::Response>> {
        let url = self.config.url(&req.path());
        let mut http = HttpRequest::new(&url, R::METHOD);

        if let Some(body) = req.body() {
            http = http
                .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
                .with_body(body);
        }
        if R::AUTHENTICATED {
            if let Some(token) = self.session.token() {
                http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {token}"));
            }
        }

        debug!(method = R::METHOD.as_str(), %url, "sending request");
        let response = self.transport.send(http).await?;

        // 非 2xx 状态下后端同样返回包装体，优先解析它
        let envelope: Envelope<Value> = match serde_json::from_str(&response.body) {
            Ok(envelope) => envelope,
            Err(e) if response.is_http_success() => return Err(e.into()),
            Err(_) => {
                warn!(status = response.status, %url, "non-JSON error response");
                return Err(ApiError::backend(response.status, ""));
            }
        };

        if R::AUTHENTICATED && envelope.is_token_rejection() {
            self.session.invalidate();
            return Err(ApiError::unauthorized(
                envelope.message.unwrap_or_default(),
            ));
        }

        if !envelope.is_success() {
            warn!(code = envelope.code, %url, message = ?envelope.message, "request rejected");
            return Err(ApiError::backend(
                envelope.code,
                envelope.message.unwrap_or_default(),
            ));
        }

        let data = match envelope.data {
            None | Some(Value::Null) => R::Response::default(),
            Some(value) => serde_json::from_value(value)?,
        };
        Ok(Reply {
            data,
            message: envelope.message,
        })
    }

    pub async fn execute<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        self.execute_with_message(req).await.map(|reply| reply.data)
    }

    // =========================================================
    // 认证
    // =========================================================

    pub async fn login(&self, role: &str, email: &str, password: &str) -> ApiResult<Reply<LoginData>> {
        self.execute_with_message(&LoginRequest {
            role: role.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
    }

    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<Reply<Value>> {
        self.execute_with_message(req).await
    }

    // =========================================================
    // 目录
    // =========================================================

    /// 查询失败时退化为空列表，不作为错误上报
    pub async fn fetch_books(&self, query: &CatalogQuery) -> BookListing {
        match self
            .execute(&ListBooksRequest {
                query: query.clone(),
            })
            .await
        {
            Ok(listing) => listing,
            Err(e) => {
                warn!(error = %e, "failed to fetch books");
                BookListing::default()
            }
        }
    }

    pub async fn fetch_book(&self, id: &str) -> ApiResult<Option<Book>> {
        let detail = self.execute(&GetBookRequest { id: id.to_string() }).await?;
        Ok(detail.data)
    }

    // =========================================================
    // 购物车
    // =========================================================

    pub async fn add_to_cart(&self, book_id: &str) -> ApiResult<Reply<Value>> {
        self.execute_with_message(&AddToCartRequest {
            book_id: book_id.to_string(),
        })
        .await
    }

    pub async fn get_cart(&self) -> ApiResult<Vec<CartLine>> {
        self.execute(&ListCartRequest).await
    }

    pub async fn update_cart(&self, cart_item_id: &str, quantity: u32) -> ApiResult<UpdatedCartLine> {
        self.execute(&UpdateCartRequest {
            cart_item_id: cart_item_id.to_string(),
            quantity,
        })
        .await
    }

    pub async fn remove_from_cart(&self, cart_item_id: &str) -> ApiResult<Reply<Value>> {
        self.execute_with_message(&RemoveFromCartRequest {
            cart_item_id: cart_item_id.to_string(),
        })
        .await
    }

    // =========================================================
    // 心愿单
    // =========================================================

    pub async fn add_to_wishlist(&self, book_id: &str) -> ApiResult<Reply<Value>> {
        self.execute_with_message(&AddToWishlistRequest {
            book_id: book_id.to_string(),
        })
        .await
    }

    pub async fn get_wishlist(&self) -> ApiResult<Vec<WishlistLine>> {
        self.execute(&ListWishlistRequest).await
    }

    pub async fn remove_from_wishlist(&self, wishlist_item_id: &str) -> ApiResult<Reply<Value>> {
        self.execute_with_message(&RemoveFromWishlistRequest {
            wishlist_item_id: wishlist_item_id.to_string(),
        })
        .await
    }

    pub async fn clear_wishlist(&self) -> ApiResult<Reply<Value>> {
        self.execute_with_message(&ClearWishlistRequest).await
    }

    // =========================================================
    // 客户与订单
    // =========================================================

    pub async fn add_customer(&self, customer: NewCustomer) -> ApiResult<Reply<CustomerAddress>> {
        self.execute_with_message(&AddCustomerRequest { customer }).await
    }

    pub async fn get_customers(&self) -> ApiResult<Vec<CustomerAddress>> {
        self.execute(&ListCustomersRequest).await
    }

    pub async fn place_order(&self) -> ApiResult<PlacedOrder> {
        self.execute(&PlaceOrderRequest).await
    }

    pub async fn get_orders(&self) -> ApiResult<Vec<OrderLineItem>> {
        self.execute(&ListOrdersRequest).await
    }
}
