use bookstore_shared::Notice;
use bookstore_shared::customer::{self, AddressBook, CustomerForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;

/// 收货信息表单，保存成功后追加到地址簿并选中新地址
#[component]
pub fn CustomerDetails(
    addresses: RwSignal<AddressBook>,
    notice: RwSignal<Option<Notice>>,
) -> impl IntoView {
    let api = use_api();

    let form = RwSignal::new(CustomerForm::default());
    let (saving, set_saving) = signal(false);

    let on_save = move |_| {
        if saving.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        set_saving.set(true);
        spawn_local(async move {
            let client = api.client();
            let book = addresses.get_untracked();
            match customer::save_address(&client, &book, &current).await {
                Ok((updated, n)) => {
                    addresses.set(updated);
                    form.set(CustomerForm::default());
                    notice.set(Some(n));
                }
                Err(n) => notice.set(Some(n)),
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">"Customer Details"</h3>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    {text_field(form, "Full Name", "full_name", |f| &mut f.full_name)}
                    {text_field(form, "Mobile Number", "mobile_number", |f| &mut f.mobile_number)}
                </div>
                {text_field(form, "Address", "address", |f| &mut f.address)}
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    {text_field(form, "City/Town", "city", |f| &mut f.city)}
                    {text_field(form, "State", "state", |f| &mut f.state)}
                </div>
                <div class="card-actions justify-end mt-4">
                    <button class="btn btn-primary" disabled=move || saving.get() on:click=on_save>
                        {move || if saving.get() {
                            view! { <span class="loading loading-spinner"></span> }.into_any()
                        } else {
                            "Continue".into_any()
                        }}
                    </button>
                </div>
            </div>
        </div>
    }
}

/// 绑定表单中一个字段的输入框
fn text_field(
    form: RwSignal<CustomerForm>,
    label: &'static str,
    id: &'static str,
    field: fn(&mut CustomerForm) -> &mut String,
) -> impl IntoView {
    view! {
        <div class="form-control w-full">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type="text"
                class="input input-bordered w-full"
                prop:value=move || {
                    let mut current = form.get();
                    std::mem::take(field(&mut current))
                }
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| *field(f) = value);
                }
            />
        </div>
    }
}
