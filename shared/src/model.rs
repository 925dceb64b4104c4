use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_helper::{
    lenient_f64, lenient_opt_f64, lenient_opt_u32, lenient_u32, parse_timestamp, string_or_number,
};

// =========================================================
// 目录 (Catalog)
// =========================================================

/// 后端目录中的一本书，客户端只读
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Book {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub book_name: String,
    pub author: String,
    pub book_image: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub discount_price: f64,
    /// 可用库存
    #[serde(deserialize_with = "lenient_u32")]
    pub quantity: u32,
    pub description: String,
}

impl Book {
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }
}

/// 分页查询结果：当前页的书以及总记录数
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookListing {
    pub books: Vec<Book>,
    pub total_records: u64,
}

/// `GET /book/{id}` 的数据多包了一层 `{ data: Book }`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BookDetailData {
    pub data: Option<Book>,
}

// =========================================================
// 购物车 / 心愿单 (Cart & Wishlist)
// =========================================================

/// 购物车中的一行，书的字段做了冗余
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CartLine {
    #[serde(deserialize_with = "string_or_number")]
    pub cart_item_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub book_id: String,
    pub book_name: String,
    pub author: String,
    pub book_image: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub discount_price: f64,
    #[serde(deserialize_with = "lenient_u32")]
    pub quantity: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub available_quantity: u32,
    /// 服务端计算的小计，客户端从不自行计算
    #[serde(deserialize_with = "lenient_f64")]
    pub total: f64,
}

/// `PUT /cart/{id}` 返回的更新结果
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdatedCartLine {
    #[serde(deserialize_with = "lenient_opt_u32")]
    pub quantity: Option<u32>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub total: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WishlistLine {
    #[serde(deserialize_with = "string_or_number")]
    pub wishlist_item_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub book_id: String,
    pub book_name: String,
    pub author: String,
    pub book_image: String,
}

// =========================================================
// 客户与订单 (Customer & Order)
// =========================================================

/// 已保存的收货地址
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerAddress {
    #[serde(alias = "id", deserialize_with = "string_or_number")]
    pub customer_id: String,
    #[serde(alias = "full_name")]
    pub full_name: String,
    #[serde(alias = "mobile_number", deserialize_with = "string_or_number")]
    pub mobile_number: String,
    pub address: String,
    pub city: String,
    pub state: String,
}

impl CustomerAddress {
    /// 地址选择框中展示的文本
    pub fn label(&self) -> String {
        format!("{}, {}, {}", self.address, self.city, self.state)
    }
}

/// `POST /customer` 请求体
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewCustomer {
    pub full_name: String,
    pub mobile_number: String,
    pub address: String,
    pub city: String,
    pub state: String,
}

/// 订单中的一个条目；同一订单的条目共享 `order_id` 与 `created_at`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderLineItem {
    #[serde(deserialize_with = "string_or_number")]
    pub order_item_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub order_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub created_at: String,
    pub book_name: String,
    pub author: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub quantity: u32,
    #[serde(deserialize_with = "lenient_f64")]
    pub discount_price: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub total: f64,
}

impl OrderLineItem {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlacedOrder {
    #[serde(deserialize_with = "string_or_number")]
    pub order_id: String,
}

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LoginData {
    pub token: String,
}

/// 金额展示，整数金额不带小数
pub fn format_price(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("Rs. {amount:.0}")
    } else {
        format!("Rs. {amount:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cart_line_from_backend_payload() {
        let line: CartLine = serde_json::from_value(json!({
            "cartItemId": 7,
            "bookId": "b-1",
            "bookName": "Dune",
            "author": "Frank Herbert",
            "bookImage": "https://img/dune.png",
            "price": "1500.00",
            "discountPrice": 1200,
            "quantity": 2,
            "availableQuantity": 5,
            "total": 2400
        }))
        .unwrap();

        assert_eq!(line.cart_item_id, "7");
        assert_eq!(line.price, 1500.0);
        assert_eq!(line.available_quantity, 5);
        assert_eq!(line.total, 2400.0);
    }

    #[test]
    fn customer_accepts_both_id_spellings() {
        let listed: CustomerAddress = serde_json::from_value(json!({
            "customerId": "c-1", "fullName": "Jane Roe", "mobileNumber": 9876543210u64,
            "address": "12 Lake Rd", "city": "Pune", "state": "MH"
        }))
        .unwrap();
        let created: CustomerAddress = serde_json::from_value(json!({
            "id": "c-2", "full_name": "Jane Roe", "mobile_number": "9876543210",
            "address": "12 Lake Rd", "city": "Pune", "state": "MH"
        }))
        .unwrap();

        assert_eq!(listed.customer_id, "c-1");
        assert_eq!(listed.mobile_number, "9876543210");
        assert_eq!(created.customer_id, "c-2");
        assert_eq!(created.full_name, "Jane Roe");
        assert_eq!(created.label(), "12 Lake Rd, Pune, MH");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let book: Book = serde_json::from_value(json!({ "id": 3, "bookName": "Emma" })).unwrap();
        assert_eq!(book.id, "3");
        assert!(book.is_out_of_stock());

        let listing: BookListing = serde_json::from_value(json!({})).unwrap();
        assert!(listing.books.is_empty());
        assert_eq!(listing.total_records, 0);
    }

    #[test]
    fn prices_render_without_trailing_zeroes() {
        assert_eq!(format_price(499.0), "Rs. 499");
        assert_eq!(format_price(499.5), "Rs. 499.50");
    }
}
