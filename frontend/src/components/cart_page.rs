//! 购物车页面
//!
//! 所有后端确认的变更都以 `CartAction` 应用到最新状态上；
//! 同一行的数量修改 / 删除以及下单都经过 `InFlight` 防止重复提交。

use std::time::Duration;

use bookstore_shared::cart::{self, CartAction, CartState, InFlight, QuantityChange};
use bookstore_shared::customer::{self, AddressBook};
use bookstore_shared::CartLine;
use bookstore_shared::model::format_price;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::customer_form::CustomerDetails;
use crate::components::header::Header;
use crate::components::icons::{MapPin, Minus, Plus, Trash2};
use crate::components::notification::{Notification, use_notice};
use crate::web::router::Link;

#[component]
pub fn CartPage() -> impl IntoView {
    let api = use_api();
    let config = api.config();
    let notice = use_notice(config.notice_ms);

    let cart_state = RwSignal::new(CartState::default());
    let addresses = RwSignal::new(AddressBook::default());
    let in_flight = RwSignal::new(InFlight::default());
    let (loading, set_loading) = signal(true);

    // 初始加载：购物车与地址簿各自独立，失败互不影响
    spawn_local(async move {
        let client = api.client();
        match cart::load_cart(&client).await {
            Ok(state) => cart_state.set(state),
            Err(n) => notice.set(Some(n)),
        }
        set_loading.set(false);
    });
    spawn_local(async move {
        let client = api.client();
        match customer::load_addresses(&client).await {
            Ok(book) => addresses.set(book),
            Err(n) => notice.set(Some(n)),
        }
    });

    let begin = move |key: &str| in_flight.try_update(|f| f.try_begin(key)).unwrap_or(false);
    let finish = move |key: String| in_flight.update(|f| f.finish(&key));
    let apply = move |action: CartAction| cart_state.update(|c| *c = c.apply(&action));

    let on_quantity = move |cart_item_id: String, change: QuantityChange| {
        if !begin(&cart_item_id) {
            return;
        }
        spawn_local(async move {
            let client = api.client();
            let snapshot = cart_state.get_untracked();
            match cart::change_quantity(&client, &snapshot, &cart_item_id, change).await {
                Ok(action) => apply(action),
                Err(n) => notice.set(Some(n)),
            }
            finish(cart_item_id);
        });
    };

    let on_remove = move |cart_item_id: String| {
        if !begin(&cart_item_id) {
            return;
        }
        spawn_local(async move {
            let client = api.client();
            match cart::remove_line(&client, &cart_item_id).await {
                Ok(action) => apply(action),
                Err(n) => notice.set(Some(n)),
            }
            finish(cart_item_id);
        });
    };

    let on_place_order = move |_| {
        if !begin(InFlight::PLACE_ORDER) {
            return;
        }
        spawn_local(async move {
            let client = api.client();
            let book = addresses.get_untracked();
            match cart::place_order(&client, &book).await {
                Ok(placed) => {
                    apply(CartAction::Clear);
                    notice.set(Some(placed.notice));
                    let router = api.router();
                    set_timeout(
                        move || router.navigate("/order"),
                        Duration::from_millis(config.order_redirect_ms),
                    );
                }
                Err(n) => notice.set(Some(n)),
            }
            finish(InFlight::PLACE_ORDER.to_string());
        });
    };

    let on_select_address = move |ev: leptos::web_sys::Event| {
        let id = event_target_value(&ev);
        addresses.update(|b| *b = b.select(&id));
    };

    let is_pending = move |key: &str| in_flight.with(|f| f.is_pending(key));
    let line_count = move || cart_state.with(|c| c.len());

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <Header />
            <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-6">
                <div class="breadcrumbs text-sm">
                    <ul>
                        <li><Link to="/dashboard">"Home"</Link></li>
                        <li class="font-bold">"My Cart"</li>
                    </ul>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <div class="flex flex-wrap items-center justify-between gap-4">
                            <h2 class="card-title">"My Cart (" {line_count} ")"</h2>
                            <label class="flex items-center gap-2">
                                <MapPin attr:class="h-5 w-5 text-primary" />
                                <select class="select select-bordered select-sm w-72" on:change=on_select_address>
                                    {move || {
                                        let book = addresses.get();
                                        if book.addresses().is_empty() {
                                            return view! {
                                                <option value="" disabled=true selected=true>"No addresses available"</option>
                                            }
                                            .into_any();
                                        }
                                        let selected = book.selected_id().map(str::to_string);
                                        book.addresses()
                                            .iter()
                                            .map(|addr| {
                                                let is_selected = selected.as_deref() == Some(addr.customer_id.as_str());
                                                view! {
                                                    <option value=addr.customer_id.clone() prop:selected=is_selected>
                                                        {addr.label()}
                                                    </option>
                                                }
                                            })
                                            .collect_view()
                                            .into_any()
                                    }}
                                </select>
                            </label>
                        </div>

                        <Show
                            when=move || { line_count() > 0 }
                            fallback=move || view! {
                                <div class="text-center py-12 text-base-content/60">
                                    {move || if loading.get() {
                                        view! { <span class="loading loading-spinner loading-lg"></span> }.into_any()
                                    } else {
                                        "Your cart is empty".into_any()
                                    }}
                                </div>
                            }
                        >
                            <div class="divide-y divide-base-300">
                                <For
                                    each=move || cart_state.with(|c| c.lines().to_vec())
                                    key=|line| (line.cart_item_id.clone(), line.quantity, line.total.to_bits())
                                    children=move |line: CartLine| {
                                        let id = line.cart_item_id.clone();
                                        let busy_id = id.clone();
                                        let busy = Memo::new(move |_| is_pending(&busy_id));
                                        let dec_id = id.clone();
                                        let inc_id = id.clone();
                                        view! {
                                            <div class="flex gap-4 py-4">
                                                <img src=line.book_image alt=line.book_name.clone() class="w-20 h-28 object-cover rounded" />
                                                <div class="flex-1 space-y-1">
                                                    <h3 class="font-bold">{line.book_name}</h3>
                                                    <p class="text-sm text-base-content/60">"by " {line.author}</p>
                                                    <div class="flex items-center gap-2">
                                                        <span class="font-bold">{format_price(line.discount_price)}</span>
                                                        <span class="text-sm text-base-content/60 line-through">{format_price(line.price)}</span>
                                                    </div>
                                                    <div class="flex items-center gap-2 mt-2">
                                                        <button
                                                            class="btn btn-outline btn-xs btn-square"
                                                            disabled=move || busy.get()
                                                            on:click=move |_| on_quantity(dec_id.clone(), QuantityChange::Decrement)
                                                        >
                                                            <Minus attr:class="h-3 w-3" />
                                                        </button>
                                                        <span class="w-8 text-center">{line.quantity}</span>
                                                        <button
                                                            class="btn btn-outline btn-xs btn-square"
                                                            disabled=move || busy.get()
                                                            on:click=move |_| on_quantity(inc_id.clone(), QuantityChange::Increment)
                                                        >
                                                            <Plus attr:class="h-3 w-3" />
                                                        </button>
                                                        <button
                                                            class="btn btn-ghost btn-xs text-error gap-1"
                                                            disabled=move || busy.get()
                                                            on:click=move |_| on_remove(id.clone())
                                                        >
                                                            <Trash2 attr:class="h-3 w-3" /> "Remove"
                                                        </button>
                                                    </div>
                                                </div>
                                                <div class="text-right">
                                                    <div class="font-bold">{format_price(line.total)}</div>
                                                    <div class="text-sm text-base-content/60">"(Total)"</div>
                                                </div>
                                            </div>
                                        }
                                    }
                                />
                            </div>
                            <div class="flex flex-wrap items-center justify-between gap-4 pt-4 border-t border-base-300">
                                <span class="text-lg font-bold">
                                    "Grand Total: " {move || format_price(cart_state.with(|c| c.grand_total()))}
                                </span>
                                <button
                                    class="btn btn-primary"
                                    disabled=move || {
                                        !addresses.with(|b| b.can_place_order()) || is_pending(InFlight::PLACE_ORDER)
                                    }
                                    on:click=on_place_order
                                >
                                    {move || if is_pending(InFlight::PLACE_ORDER) {
                                        view! { <span class="loading loading-spinner"></span> }.into_any()
                                    } else {
                                        "Place Order".into_any()
                                    }}
                                </button>
                            </div>
                        </Show>
                    </div>
                </div>

                <CustomerDetails addresses=addresses notice=notice />
            </div>
            <Notification notice=notice />
        </div>
    }
}
