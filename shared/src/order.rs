//! 订单历史
//!
//! 后端返回扁平的订单条目列表，这里按订单号分组并按创建时间倒序排列。

use chrono::{DateTime, Local, Utc};

use crate::client::{StoreClient, Transport};
use crate::model::OrderLineItem;
use crate::notice::Notice;
use crate::serde_helper::parse_timestamp;
use crate::session::TokenStore;

pub const FALLBACK_FETCH: &str = "Failed to fetch orders";

/// 同一订单号下的条目
#[derive(Debug, Clone, PartialEq)]
pub struct OrderGroup {
    pub order_id: String,
    /// 取自该订单第一次出现的条目
    pub created_at: String,
    pub items: Vec<OrderLineItem>,
}

impl OrderGroup {
    pub fn placed_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// 本地时区的下单时间，无法解析时原样返回
    pub fn placed_on_label(&self) -> String {
        match self.placed_at() {
            Some(at) => at
                .with_timezone(&Local)
                .format("%d %b %Y, %H:%M")
                .to_string(),
            None => self.created_at.clone(),
        }
    }
}

/// 按订单号分组，组内保持后端顺序，组间按创建时间倒序（无法解析的排在最后）
pub fn group_orders(items: Vec<OrderLineItem>) -> Vec<OrderGroup> {
    let mut groups: Vec<OrderGroup> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.order_id == item.order_id) {
            Some(group) => group.items.push(item),
            None => groups.push(OrderGroup {
                order_id: item.order_id.clone(),
                created_at: item.created_at.clone(),
                items: vec![item],
            }),
        }
    }
    // sort_by 是稳定排序，时间相同的组保持首次出现的顺序
    groups.sort_by(|a, b| b.placed_at().cmp(&a.placed_at()));
    groups
}

pub async fn load_orders<T, S>(client: &StoreClient<T, S>) -> Result<Vec<OrderGroup>, Notice>
where
    T: Transport,
    S: TokenStore,
{
    client
        .get_orders()
        .await
        .map(group_orders)
        .map_err(|e| Notice::from_error(&e, FALLBACK_FETCH))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(item_id: &str, order_id: &str, created_at: &str) -> OrderLineItem {
        OrderLineItem {
            order_item_id: item_id.into(),
            order_id: order_id.into(),
            created_at: created_at.into(),
            total: 100.0,
            ..Default::default()
        }
    }

    fn order_ids(groups: &[OrderGroup]) -> Vec<&str> {
        groups.iter().map(|g| g.order_id.as_str()).collect()
    }

    #[test]
    fn newest_order_comes_first() {
        let groups = group_orders(vec![
            item("1", "A", "2024-01-01T10:00:00Z"),
            item("2", "B", "2024-02-01T10:00:00Z"),
        ]);
        assert_eq!(order_ids(&groups), vec!["B", "A"]);
    }

    #[test]
    fn items_keep_backend_order_within_group() {
        let groups = group_orders(vec![
            item("3", "A", "2024-01-01T10:00:00Z"),
            item("1", "B", "2024-02-01T10:00:00Z"),
            item("2", "A", "2024-03-01T10:00:00Z"),
        ]);

        let a = &groups[1];
        let ids: Vec<_> = a.items.iter().map(|i| i.order_item_id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2"]);
        // 首个条目决定组的时间
        assert_eq!(a.created_at, "2024-01-01T10:00:00Z");
    }

    #[test]
    fn line_totals_are_shown_as_received() {
        let mut pricey = item("2", "A", "2024-01-01T10:00:00Z");
        pricey.total = 250.5;
        let groups = group_orders(vec![item("1", "A", "2024-01-01T10:00:00Z"), pricey]);

        let totals: Vec<f64> = groups[0].items.iter().map(|i| i.total).collect();
        assert_eq!(totals, vec![100.0, 250.5]);
    }

    #[test]
    fn unparseable_timestamps_sort_last_and_ties_are_stable() {
        let groups = group_orders(vec![
            item("1", "X", "garbage"),
            item("2", "A", "2024-01-01 10:00:00"),
            item("3", "B", "2024-01-01 10:00:00"),
        ]);
        assert_eq!(order_ids(&groups), vec!["A", "B", "X"]);
        assert_eq!(groups[2].placed_on_label(), "garbage");
    }

    #[test]
    fn empty_history_has_no_groups() {
        assert!(group_orders(Vec::new()).is_empty());
    }
}
