use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::catalog::CatalogQuery;
use crate::model::{
    BookDetailData, BookListing, CartLine, CustomerAddress, LoginData, NewCustomer,
    OrderLineItem, PlacedOrder, UpdatedCartLine, WishlistLine,
};
use crate::TOKEN_REJECTION_MESSAGES;

/// 后端统一响应包装 `{ code, message, data }`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// 令牌过期或格式错误
    pub fn is_token_rejection(&self) -> bool {
        self.message
            .as_deref()
            .is_some_and(|m| TOKEN_REJECTION_MESSAGES.contains(&m))
    }
}

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The `data` payload carried by a successful envelope.
    /// A missing or `null` payload decodes to `Default::default()`.
    type Response: DeserializeOwned + Default;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the bearer token is attached and token rejections end the session.
    const AUTHENTICATED: bool = true;

    /// The URL path relative to the API base, including any query string.
    fn path(&self) -> String;

    /// JSON body, if the endpoint takes one.
    fn body(&self) -> Option<Value> {
        None
    }
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    #[serde(skip)]
    pub role: String,
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = LoginData;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        format!("/{}/login", self.role)
    }

    fn body(&self) -> Option<Value> {
        serde_json::to_value(self).ok()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(skip)]
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl ApiRequest for RegisterRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        format!("/{}/register", self.role)
    }

    fn body(&self) -> Option<Value> {
        serde_json::to_value(self).ok()
    }
}

// =========================================================
// Catalog
// =========================================================

#[derive(Debug, Clone)]
pub struct ListBooksRequest {
    pub query: CatalogQuery,
}

impl ApiRequest for ListBooksRequest {
    type Response = BookListing;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/book?{}", self.query.to_api_query())
    }
}

#[derive(Debug, Clone)]
pub struct GetBookRequest {
    pub id: String,
}

impl ApiRequest for GetBookRequest {
    type Response = BookDetailData;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/book/{}", self.id)
    }
}

// =========================================================
// Cart
// =========================================================

/// 加入购物车，数量固定为 1
#[derive(Debug, Clone)]
pub struct AddToCartRequest {
    pub book_id: String,
}

impl ApiRequest for AddToCartRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/cart".to_string()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "book_id": self.book_id, "quantity": 1 }))
    }
}

#[derive(Debug, Clone)]
pub struct ListCartRequest;

impl ApiRequest for ListCartRequest {
    type Response = Vec<CartLine>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/cart".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct UpdateCartRequest {
    pub cart_item_id: String,
    pub quantity: u32,
}

impl ApiRequest for UpdateCartRequest {
    type Response = UpdatedCartLine;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/cart/{}", self.cart_item_id)
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "quantity": self.quantity }))
    }
}

#[derive(Debug, Clone)]
pub struct RemoveFromCartRequest {
    pub cart_item_id: String,
}

impl ApiRequest for RemoveFromCartRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/cart/{}", self.cart_item_id)
    }
}

// =========================================================
// Wishlist
// =========================================================

#[derive(Debug, Clone)]
pub struct AddToWishlistRequest {
    pub book_id: String,
}

impl ApiRequest for AddToWishlistRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/wishlist".to_string()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "book_id": self.book_id }))
    }
}

#[derive(Debug, Clone)]
pub struct ListWishlistRequest;

impl ApiRequest for ListWishlistRequest {
    type Response = Vec<WishlistLine>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/wishlist".to_string()
    }
}

/// 移除心愿单条目（后端使用 PUT）
#[derive(Debug, Clone)]
pub struct RemoveFromWishlistRequest {
    pub wishlist_item_id: String,
}

impl ApiRequest for RemoveFromWishlistRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/wishlist/{}", self.wishlist_item_id)
    }

    fn body(&self) -> Option<Value> {
        Some(json!({}))
    }
}

#[derive(Debug, Clone)]
pub struct ClearWishlistRequest;

impl ApiRequest for ClearWishlistRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        "/wishlist".to_string()
    }
}

// =========================================================
// Customer
// =========================================================

#[derive(Debug, Clone)]
pub struct AddCustomerRequest {
    pub customer: NewCustomer,
}

impl ApiRequest for AddCustomerRequest {
    type Response = CustomerAddress;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/customer".to_string()
    }

    fn body(&self) -> Option<Value> {
        serde_json::to_value(&self.customer).ok()
    }
}

#[derive(Debug, Clone)]
pub struct ListCustomersRequest;

impl ApiRequest for ListCustomersRequest {
    type Response = Vec<CustomerAddress>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/customer".to_string()
    }
}

// =========================================================
// Order
// =========================================================

/// 下单，空请求体
#[derive(Debug, Clone)]
pub struct PlaceOrderRequest;

impl ApiRequest for PlaceOrderRequest {
    type Response = PlacedOrder;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/order".to_string()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({}))
    }
}

#[derive(Debug, Clone)]
pub struct ListOrdersRequest;

impl ApiRequest for ListOrdersRequest {
    type Response = Vec<OrderLineItem>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/order".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SortKey;

    #[test]
    fn envelope_success_range() {
        let ok: Envelope<Value> = serde_json::from_str(r#"{"code": 201, "data": null}"#).unwrap();
        let redirect: Envelope<Value> = serde_json::from_str(r#"{"code": 300}"#).unwrap();
        let missing: Envelope<Value> = serde_json::from_str("{}").unwrap();

        assert!(ok.is_success());
        assert!(!redirect.is_success());
        assert!(!missing.is_success());
    }

    #[test]
    fn envelope_detects_token_rejection() {
        for message in ["jwt expired", "jwt malformed"] {
            let env: Envelope<Value> =
                serde_json::from_value(json!({ "code": 401, "message": message })).unwrap();
            assert!(env.is_token_rejection());
        }
        let env: Envelope<Value> =
            serde_json::from_value(json!({ "code": 401, "message": "invalid signature" })).unwrap();
        assert!(!env.is_token_rejection());
    }

    #[test]
    fn request_paths_and_bodies() {
        let login = LoginRequest {
            role: "admin".into(),
            email: "a@b.c".into(),
            password: "pw".into(),
        };
        assert_eq!(login.path(), "/admin/login");
        assert_eq!(login.body(), Some(json!({ "email": "a@b.c", "password": "pw" })));

        let register = RegisterRequest {
            role: "user".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "j@d.com".into(),
            password: "pw".into(),
        };
        assert_eq!(register.path(), "/user/register");
        assert_eq!(
            register.body(),
            Some(json!({ "firstName": "John", "lastName": "Doe", "email": "j@d.com", "password": "pw" }))
        );

        let list = ListBooksRequest {
            query: CatalogQuery::default().with_sort(SortKey::PriceHighToLow),
        };
        assert_eq!(list.path(), "/book?page=1&limit=24&sortBy=price_high_to_low&search=");

        let update = UpdateCartRequest {
            cart_item_id: "c9".into(),
            quantity: 3,
        };
        assert_eq!(update.path(), "/cart/c9");
        assert_eq!(UpdateCartRequest::METHOD, HttpMethod::Put);
        assert_eq!(update.body(), Some(json!({ "quantity": 3 })));

        let add = AddToCartRequest { book_id: "b1".into() };
        assert_eq!(add.body(), Some(json!({ "book_id": "b1", "quantity": 1 })));

        assert_eq!(RemoveFromWishlistRequest::METHOD, HttpMethod::Put);
        assert_eq!(ClearWishlistRequest::METHOD, HttpMethod::Delete);
        assert_eq!(PlaceOrderRequest.body(), Some(json!({})));
    }
}
