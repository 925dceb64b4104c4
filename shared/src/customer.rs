//! 收货地址
//!
//! 地址列表对客户端来说只追加不删除；第一次加载时自动选中第一条，新保存的地址立即被选中。

use tracing::debug;

use crate::client::{StoreClient, Transport};
use crate::error::{ApiError, ApiResult};
use crate::model::{CustomerAddress, NewCustomer};
use crate::notice::Notice;
use crate::session::TokenStore;

pub const MSG_FIELDS_REQUIRED: &str = "All customer fields are required";
pub const MSG_SAVED: &str = "Customer details saved successfully";
pub const FALLBACK_SAVE: &str = "Failed to save customer details";
pub const FALLBACK_FETCH: &str = "Failed to fetch customer addresses";

/// 新地址表单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub full_name: String,
    pub mobile_number: String,
    pub address: String,
    pub city: String,
    pub state: String,
}

impl CustomerForm {
    pub fn validate(&self) -> ApiResult<()> {
        let fields = [
            &self.full_name,
            &self.mobile_number,
            &self.address,
            &self.city,
            &self.state,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ApiError::validation(MSG_FIELDS_REQUIRED));
        }
        Ok(())
    }

    pub fn to_request(&self) -> NewCustomer {
        NewCustomer {
            full_name: self.full_name.trim().to_string(),
            mobile_number: self.mobile_number.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressBook {
    addresses: Vec<CustomerAddress>,
    selected: Option<String>,
}

impl AddressBook {
    pub fn new(addresses: Vec<CustomerAddress>) -> Self {
        let selected = addresses.first().map(|a| a.customer_id.clone());
        Self {
            addresses,
            selected,
        }
    }

    pub fn addresses(&self) -> &[CustomerAddress] {
        &self.addresses
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&CustomerAddress> {
        let id = self.selected.as_deref()?;
        self.addresses.iter().find(|a| a.customer_id == id)
    }

    /// 追加并选中新地址
    pub fn with_added(&self, address: CustomerAddress) -> Self {
        let selected = Some(address.customer_id.clone());
        let mut addresses = self.addresses.clone();
        addresses.push(address);
        Self {
            addresses,
            selected,
        }
    }

    /// 选中已有地址；未知 id 保持原样
    pub fn select(&self, customer_id: &str) -> Self {
        if !self.addresses.iter().any(|a| a.customer_id == customer_id) {
            return self.clone();
        }
        Self {
            addresses: self.addresses.clone(),
            selected: Some(customer_id.to_string()),
        }
    }

    pub fn can_place_order(&self) -> bool {
        self.selected().is_some()
    }
}

pub async fn load_addresses<T, S>(client: &StoreClient<T, S>) -> Result<AddressBook, Notice>
where
    T: Transport,
    S: TokenStore,
{
    client
        .get_customers()
        .await
        .map(AddressBook::new)
        .map_err(|e| Notice::from_error(&e, FALLBACK_FETCH))
}

/// 保存新地址，成功时返回追加后的地址簿与成功提示
pub async fn save_address<T, S>(
    client: &StoreClient<T, S>,
    book: &AddressBook,
    form: &CustomerForm,
) -> Result<(AddressBook, Notice), Notice>
where
    T: Transport,
    S: TokenStore,
{
    if let Err(e) = form.validate() {
        debug!("customer form rejected locally");
        return Err(Notice::from_error(&e, FALLBACK_SAVE));
    }
    let reply = client
        .add_customer(form.to_request())
        .await
        .map_err(|e| Notice::from_error(&e, FALLBACK_SAVE))?;
    Ok((book.with_added(reply.data), Notice::success(MSG_SAVED)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockTransport, client_with};
    use serde_json::json;

    fn address(id: &str) -> CustomerAddress {
        CustomerAddress {
            customer_id: id.into(),
            full_name: "Jane Roe".into(),
            mobile_number: "9876543210".into(),
            address: "12 Lake Rd".into(),
            city: "Pune".into(),
            state: "MH".into(),
        }
    }

    fn filled_form() -> CustomerForm {
        CustomerForm {
            full_name: "Jane Roe".into(),
            mobile_number: "9876543210".into(),
            address: "12 Lake Rd".into(),
            city: "Pune".into(),
            state: "MH".into(),
        }
    }

    #[test]
    fn first_address_is_selected_on_load() {
        let book = AddressBook::new(vec![address("c1"), address("c2")]);
        assert_eq!(book.selected_id(), Some("c1"));
        assert!(book.can_place_order());

        let empty = AddressBook::new(Vec::new());
        assert_eq!(empty.selected(), None);
        assert!(!empty.can_place_order());
    }

    #[test]
    fn added_address_is_appended_and_selected() {
        let book = AddressBook::new(vec![address("c1")]).with_added(address("c2"));
        let ids: Vec<_> = book.addresses().iter().map(|a| a.customer_id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2"]);
        assert_eq!(book.selected_id(), Some("c2"));
    }

    #[test]
    fn selecting_unknown_id_keeps_selection() {
        let book = AddressBook::new(vec![address("c1"), address("c2")]);
        assert_eq!(book.select("c2").selected_id(), Some("c2"));
        assert_eq!(book.select("zz").selected_id(), Some("c1"));
    }

    #[tokio::test]
    async fn incomplete_form_is_rejected_without_request() {
        let transport = MockTransport::new();
        let (client, _) = client_with(&transport, Some("t"));
        let form = CustomerForm {
            city: " ".into(),
            ..filled_form()
        };

        let err = save_address(&client, &AddressBook::default(), &form).await.unwrap_err();

        assert_eq!(err, Notice::error(MSG_FIELDS_REQUIRED));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn saved_address_uses_snake_case_body() {
        let transport = MockTransport::new();
        transport.respond(201, json!({
            "code": 201,
            "data": { "id": "c9", "full_name": "Jane Roe", "mobile_number": "9876543210",
                      "address": "12 Lake Rd", "city": "Pune", "state": "MH" }
        }));
        let (client, _) = client_with(&transport, Some("t"));

        let (book, notice) = save_address(&client, &AddressBook::new(vec![address("c1")]), &filled_form())
            .await
            .unwrap();

        assert_eq!(notice, Notice::success(MSG_SAVED));
        assert_eq!(book.selected_id(), Some("c9"));
        assert_eq!(book.addresses().len(), 2);

        let body: serde_json::Value =
            serde_json::from_str(transport.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["full_name"], "Jane Roe");
        assert_eq!(body["mobile_number"], "9876543210");
    }

    #[tokio::test]
    async fn failed_save_surfaces_fallback() {
        let transport = MockTransport::new();
        transport.respond(500, json!({ "code": 500 }));
        let (client, _) = client_with(&transport, Some("t"));

        let err = save_address(&client, &AddressBook::default(), &filled_form()).await.unwrap_err();

        assert_eq!(err, Notice::error(FALLBACK_SAVE));
    }
}
