//! 购物车
//!
//! `CartState` 是不可变的行集合，通过 `CartAction` 产生新状态；只有后端确认后才应用变更。
//! 小计与总价始终来自后端，客户端只做求和。

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, info};

use crate::client::{StoreClient, Transport};
use crate::error::ApiError;
use crate::customer::AddressBook;
use crate::model::CartLine;
use crate::notice::Notice;
use crate::session::TokenStore;


pub const MSG_SELECT_ADDRESS: &str = "Please select a shipping address";
pub const FALLBACK_FETCH: &str = "Failed to fetch cart items";
pub const FALLBACK_UPDATE: &str = "Failed to update quantity";
pub const FALLBACK_REMOVE: &str = "Failed to remove item from cart";
pub const FALLBACK_ORDER: &str = "Failed to place order";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Increment,
    Decrement,
}

/// 本地拒绝的数量变更
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("Only {0} books available")]
    StockLimit(u32),
    #[error("Quantity cannot be less than 1")]
    Minimum,
    #[error("Cart item not found")]
    UnknownLine,
}

impl QuantityError {
    pub fn to_notice(&self) -> Notice {
        Notice::warning(self.to_string())
    }
}

// =========================================================
// 状态 (State)
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, cart_item_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.cart_item_id == cart_item_id)
    }

    /// 检查数量边界，返回应发送给后端的新数量
    pub fn plan_change(
        &self,
        cart_item_id: &str,
        change: QuantityChange,
    ) -> Result<u32, QuantityError> {
        let line = self.get(cart_item_id).ok_or(QuantityError::UnknownLine)?;
        match change {
            QuantityChange::Increment if line.quantity >= line.available_quantity => {
                Err(QuantityError::StockLimit(line.available_quantity))
            }
            QuantityChange::Increment => Ok(line.quantity + 1),
            QuantityChange::Decrement if line.quantity <= 1 => Err(QuantityError::Minimum),
            QuantityChange::Decrement => Ok(line.quantity - 1),
        }
    }

    /// 应用一次已确认的变更
    pub fn apply(&self, action: &CartAction) -> Self {
        match action {
            CartAction::SetQuantity {
                cart_item_id,
                quantity,
                total,
            } => Self {
                lines: self
                    .lines
                    .iter()
                    .map(|l| {
                        if &l.cart_item_id == cart_item_id {
                            CartLine {
                                quantity: *quantity,
                                total: *total,
                                ..l.clone()
                            }
                        } else {
                            l.clone()
                        }
                    })
                    .collect(),
            },
            CartAction::Remove(cart_item_id) => Self {
                lines: self
                    .lines
                    .iter()
                    .filter(|l| &l.cart_item_id != cart_item_id)
                    .cloned()
                    .collect(),
            },
            CartAction::Clear => Self::default(),
            CartAction::Replace(lines) => Self::new(lines.clone()),
        }
    }

    /// 各行服务端小计之和
    pub fn grand_total(&self) -> f64 {
        self.lines.iter().map(|l| l.total).sum()
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

/// 后端确认后的购物车变更
///
/// 流程函数只产出变更，由调用方应用到当时最新的状态上，
/// 多个请求交错返回时互不覆盖。对不存在的行应用变更不产生效果。
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    SetQuantity {
        cart_item_id: String,
        quantity: u32,
        total: f64,
    },
    Remove(String),
    Clear,
    Replace(Vec<CartLine>),
}

/// 正在等待响应的操作集合，同一个键同时只允许一个请求
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InFlight {
    keys: HashSet<String>,
}

impl InFlight {
    pub const PLACE_ORDER: &'static str = "place-order";

    /// 键已在等待中时返回 `false`
    pub fn try_begin(&mut self, key: &str) -> bool {
        self.keys.insert(key.to_string())
    }

    pub fn finish(&mut self, key: &str) {
        self.keys.remove(key);
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

// =========================================================
// 流程 (Flows)
// =========================================================

pub async fn load_cart<T, S>(client: &StoreClient<T, S>) -> Result<CartState, Notice>
where
    T: Transport,
    S: TokenStore,
{
    client
        .get_cart()
        .await
        .map(CartState::new)
        .map_err(|e| Notice::from_error(&e, FALLBACK_FETCH))
}

/// 校验边界后发送新数量，成功时返回后端确认的数量与小计
pub async fn change_quantity<T, S>(
    client: &StoreClient<T, S>,
    state: &CartState,
    cart_item_id: &str,
    change: QuantityChange,
) -> Result<CartAction, Notice>
where
    T: Transport,
    S: TokenStore,
{
    let quantity = state.plan_change(cart_item_id, change).map_err(|e| {
        debug!(cart_item_id, error = %e, "quantity change rejected locally");
        e.to_notice()
    })?;

    let updated = client
        .update_cart(cart_item_id, quantity)
        .await
        .map_err(|e| Notice::from_error(&e, FALLBACK_UPDATE))?;
    // 小计只认后端给出的值
    let total = updated.total.ok_or_else(|| {
        let e = ApiError::decode("cart update reply carries no total");
        debug!(cart_item_id, error = %e, "quantity change left unapplied");
        Notice::from_error(&e, FALLBACK_UPDATE)
    })?;

    Ok(CartAction::SetQuantity {
        cart_item_id: cart_item_id.to_string(),
        quantity: updated.quantity.unwrap_or(quantity),
        total,
    })
}

pub async fn remove_line<T, S>(
    client: &StoreClient<T, S>,
    cart_item_id: &str,
) -> Result<CartAction, Notice>
where
    T: Transport,
    S: TokenStore,
{
    client
        .remove_from_cart(cart_item_id)
        .await
        .map_err(|e| Notice::from_error(&e, FALLBACK_REMOVE))?;
    Ok(CartAction::Remove(cart_item_id.to_string()))
}

/// 下单成功：订单号与确认提示，调用方随后应用 `CartAction::Clear`
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPlaced {
    pub order_id: String,
    pub notice: Notice,
}

/// 下单；没有选中地址时直接拒绝，失败时购物车保持不变
pub async fn place_order<T, S>(
    client: &StoreClient<T, S>,
    addresses: &AddressBook,
) -> Result<OrderPlaced, Notice>
where
    T: Transport,
    S: TokenStore,
{
    if !addresses.can_place_order() {
        debug!("order refused: no shipping address selected");
        return Err(Notice::warning(MSG_SELECT_ADDRESS));
    }

    let placed = client
        .place_order()
        .await
        .map_err(|e| Notice::from_error(&e, FALLBACK_ORDER))?;

    info!(order_id = %placed.order_id, "order placed");
    Ok(OrderPlaced {
        notice: Notice::success(format!(
            "Order placed successfully! Order ID: {}",
            placed.order_id
        )),
        order_id: placed.order_id,
    })
}
