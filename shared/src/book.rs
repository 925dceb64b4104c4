//! 书籍详情
//!
//! 详情页同时展示该书是否已在购物车 / 心愿单中，已加入时对应按钮不可再点。

use tracing::warn;

use crate::client::{StoreClient, Transport};
use crate::model::Book;
use crate::notice::Notice;
use crate::session::TokenStore;

pub const MSG_NOT_FOUND: &str = "Book not found";
pub const FALLBACK_ADD_TO_CART: &str = "Failed to add book to cart";
pub const FALLBACK_ADD_TO_WISHLIST: &str = "Failed to add book to wishlist";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookDetail {
    pub book: Book,
    pub in_cart: bool,
    pub in_wishlist: bool,
}

impl BookDetail {
    pub fn can_add_to_cart(&self) -> bool {
        !self.in_cart && !self.book.is_out_of_stock()
    }

    pub fn can_add_to_wishlist(&self) -> bool {
        !self.in_wishlist
    }
}

/// 加载详情与购物车 / 心愿单成员关系
///
/// 成员关系查询失败时按未加入处理，不影响详情展示。
pub async fn load_detail<T, S>(client: &StoreClient<T, S>, id: &str) -> Result<BookDetail, Notice>
where
    T: Transport,
    S: TokenStore,
{
    let book = match client.fetch_book(id).await {
        Ok(Some(book)) => book,
        Ok(None) => return Err(Notice::error(MSG_NOT_FOUND)),
        Err(e) => return Err(Notice::from_error(&e, MSG_NOT_FOUND)),
    };

    let in_cart = match client.get_cart().await {
        Ok(lines) => lines.iter().any(|l| l.book_id == book.id),
        Err(e) => {
            warn!(error = %e, "cart membership unavailable");
            false
        }
    };
    let in_wishlist = match client.get_wishlist().await {
        Ok(lines) => lines.iter().any(|l| l.book_id == book.id),
        Err(e) => {
            warn!(error = %e, "wishlist membership unavailable");
            false
        }
    };

    Ok(BookDetail {
        book,
        in_cart,
        in_wishlist,
    })
}

/// 已在购物车或缺货时不发请求，直接返回原状态
pub async fn add_to_cart<T, S>(
    client: &StoreClient<T, S>,
    detail: &BookDetail,
) -> Result<BookDetail, Notice>
where
    T: Transport,
    S: TokenStore,
{
    if !detail.can_add_to_cart() {
        return Ok(detail.clone());
    }
    client
        .add_to_cart(&detail.book.id)
        .await
        .map_err(|e| Notice::from_error(&e, FALLBACK_ADD_TO_CART))?;
    Ok(BookDetail {
        in_cart: true,
        ..detail.clone()
    })
}

pub async fn add_to_wishlist<T, S>(
    client: &StoreClient<T, S>,
    detail: &BookDetail,
) -> Result<BookDetail, Notice>
where
    T: Transport,
    S: TokenStore,
{
    if !detail.can_add_to_wishlist() {
        return Ok(detail.clone());
    }
    client
        .add_to_wishlist(&detail.book.id)
        .await
        .map_err(|e| Notice::from_error(&e, FALLBACK_ADD_TO_WISHLIST))?;
    Ok(BookDetail {
        in_wishlist: true,
        ..detail.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockTransport, client_with};
    use serde_json::json;

    fn book_reply(quantity: u32) -> serde_json::Value {
        json!({
            "code": 200,
            "data": { "data": { "id": "b1", "bookName": "Dune", "author": "Frank Herbert",
                                "price": 1500, "discountPrice": 1200, "quantity": quantity } }
        })
    }

    #[tokio::test]
    async fn detail_reports_cart_and_wishlist_membership() {
        let transport = MockTransport::new();
        transport.respond(200, book_reply(3));
        transport.respond(200, json!({ "code": 200, "data": [{ "cartItemId": "c1", "bookId": "b1" }] }));
        transport.respond(200, json!({ "code": 200, "data": [{ "wishlistItemId": "w1", "bookId": "b9" }] }));
        let (client, _) = client_with(&transport, Some("t"));

        let detail = load_detail(&client, "b1").await.unwrap();

        assert_eq!(detail.book.book_name, "Dune");
        assert!(detail.in_cart);
        assert!(!detail.in_wishlist);
        assert!(!detail.can_add_to_cart());
        assert!(detail.can_add_to_wishlist());
        assert_eq!(transport.calls(), vec!["GET /book/b1", "GET /cart", "GET /wishlist"]);
    }

    #[tokio::test]
    async fn membership_failures_do_not_hide_the_book() {
        let transport = MockTransport::new();
        transport.respond(200, book_reply(0));
        transport.fail("offline");
        transport.respond(500, json!({ "code": 500 }));
        let (client, _) = client_with(&transport, Some("t"));

        let detail = load_detail(&client, "b1").await.unwrap();

        assert!(!detail.in_cart);
        assert!(!detail.in_wishlist);
        // 缺货时不能加入购物车
        assert!(!detail.can_add_to_cart());
    }

    #[tokio::test]
    async fn adding_marks_membership_once() {
        let transport = MockTransport::new();
        transport.respond(201, json!({ "code": 201, "message": "Added" }));
        transport.respond(201, json!({ "code": 201 }));
        let (client, _) = client_with(&transport, Some("t"));
        let detail = BookDetail {
            book: Book {
                id: "b1".into(),
                quantity: 2,
                ..Default::default()
            },
            ..Default::default()
        };

        let in_cart = add_to_cart(&client, &detail).await.unwrap();
        let again = add_to_cart(&client, &in_cart).await.unwrap();
        let wished = add_to_wishlist(&client, &again).await.unwrap();

        assert!(again.in_cart);
        assert!(wished.in_wishlist);
        assert_eq!(transport.calls(), vec!["POST /cart", "POST /wishlist"]);
    }

    #[tokio::test]
    async fn missing_book_is_an_error_notice() {
        let transport = MockTransport::new();
        transport.respond(200, json!({ "code": 200, "data": {} }));
        let (client, _) = client_with(&transport, Some("t"));

        let err = load_detail(&client, "zz").await.unwrap_err();

        assert_eq!(err, Notice::error(MSG_NOT_FOUND));
        assert_eq!(transport.call_count(), 1);
    }
}
