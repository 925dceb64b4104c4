//! 心愿单
//!
//! 与购物车一样，流程函数只在后端确认后产出 `WishlistAction`。

use crate::client::{StoreClient, Transport};
use crate::model::WishlistLine;
use crate::notice::Notice;
use crate::session::TokenStore;

pub const MSG_CLEARED: &str = "Wishlist cleared successfully";
pub const FALLBACK_FETCH: &str = "Failed to fetch wishlist items";
pub const FALLBACK_REMOVE: &str = "Failed to remove item from wishlist";
pub const FALLBACK_CLEAR: &str = "Failed to clear wishlist";

/// 后端确认后的心愿单变更
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WishlistAction {
    Remove(String),
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WishlistState {
    lines: Vec<WishlistLine>,
}

impl WishlistState {
    pub fn new(lines: Vec<WishlistLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[WishlistLine] {
        &self.lines
    }

    pub fn apply(&self, action: &WishlistAction) -> Self {
        match action {
            WishlistAction::Remove(wishlist_item_id) => Self {
                lines: self
                    .lines
                    .iter()
                    .filter(|l| &l.wishlist_item_id != wishlist_item_id)
                    .cloned()
                    .collect(),
            },
            WishlistAction::Clear => Self::default(),
        }
    }

    pub fn contains_book(&self, book_id: &str) -> bool {
        self.lines.iter().any(|l| l.book_id == book_id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub async fn load_wishlist<T, S>(client: &StoreClient<T, S>) -> Result<WishlistState, Notice>
where
    T: Transport,
    S: TokenStore,
{
    client
        .get_wishlist()
        .await
        .map(WishlistState::new)
        .map_err(|e| Notice::from_error(&e, FALLBACK_FETCH))
}

pub async fn remove_line<T, S>(
    client: &StoreClient<T, S>,
    wishlist_item_id: &str,
) -> Result<WishlistAction, Notice>
where
    T: Transport,
    S: TokenStore,
{
    client
        .remove_from_wishlist(wishlist_item_id)
        .await
        .map_err(|e| Notice::from_error(&e, FALLBACK_REMOVE))?;
    Ok(WishlistAction::Remove(wishlist_item_id.to_string()))
}

/// 清空心愿单，成功时附带确认提示
pub async fn clear<T, S>(client: &StoreClient<T, S>) -> Result<(WishlistAction, Notice), Notice>
where
    T: Transport,
    S: TokenStore,
{
    client
        .clear_wishlist()
        .await
        .map_err(|e| Notice::from_error(&e, FALLBACK_CLEAR))?;
    Ok((WishlistAction::Clear, Notice::success(MSG_CLEARED)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockTransport, client_with};
    use serde_json::json;

    fn sample() -> WishlistState {
        WishlistState::new(vec![
            WishlistLine {
                wishlist_item_id: "w1".into(),
                book_id: "b1".into(),
                ..Default::default()
            },
            WishlistLine {
                wishlist_item_id: "w2".into(),
                book_id: "b2".into(),
                ..Default::default()
            },
        ])
    }

    #[tokio::test]
    async fn remove_uses_put_and_drops_line() {
        let transport = MockTransport::new();
        transport.respond(200, json!({ "code": 200 }));
        let (client, _) = client_with(&transport, Some("t"));

        let action = remove_line(&client, "w1").await.unwrap();
        let next = sample().apply(&action);

        assert_eq!(transport.calls(), vec!["PUT /wishlist/w1"]);
        assert!(!next.contains_book("b1"));
        assert!(next.contains_book("b2"));
    }

    #[tokio::test]
    async fn clear_reports_success() {
        let transport = MockTransport::new();
        transport.respond(200, json!({ "code": 200, "message": "ok" }));
        let (client, _) = client_with(&transport, Some("t"));

        let (action, notice) = clear(&client).await.unwrap();

        assert!(sample().apply(&action).is_empty());
        assert_eq!(notice, Notice::success(MSG_CLEARED));
        assert_eq!(transport.calls(), vec!["DELETE /wishlist"]);
    }

    #[tokio::test]
    async fn failures_surface_message() {
        let transport = MockTransport::new();
        transport.respond(404, json!({ "code": 404, "message": "Wishlist item not found" }));
        transport.respond(500, json!({ "code": 500 }));
        let (client, _) = client_with(&transport, Some("t"));

        let removed = remove_line(&client, "w9").await.unwrap_err();
        let cleared = clear(&client).await.unwrap_err();

        assert_eq!(removed.message, "Wishlist item not found");
        assert_eq!(cleared, Notice::error(FALLBACK_CLEAR));
    }
}
