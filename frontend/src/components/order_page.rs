use bookstore_shared::model::format_price;
use bookstore_shared::order::{self, OrderGroup};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::header::Header;
use crate::components::icons::Package;
use crate::components::notification::{Notification, use_notice};

#[component]
pub fn OrderPage() -> impl IntoView {
    let api = use_api();
    let notice = use_notice(api.config().notice_ms);

    let groups = RwSignal::new(Vec::<OrderGroup>::new());
    let (loading, set_loading) = signal(true);

    spawn_local(async move {
        let client = api.client();
        match order::load_orders(&client).await {
            Ok(loaded) => groups.set(loaded),
            Err(n) => notice.set(Some(n)),
        }
        set_loading.set(false);
    });

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <Header />
            <div class="max-w-4xl mx-auto p-4 md:p-8 space-y-6">
                <div class="flex flex-col items-center gap-2 text-primary">
                    <Package attr:class="h-16 w-16" />
                </div>
                <h2 class="text-2xl font-bold">"Your Orders"</h2>

                <Show
                    when=move || groups.with(|g| !g.is_empty())
                    fallback=move || view! {
                        <div class="text-center py-12 text-base-content/60">
                            {move || if loading.get() {
                                view! { <span class="loading loading-spinner loading-lg"></span> }.into_any()
                            } else {
                                "No orders found".into_any()
                            }}
                        </div>
                    }
                >
                    <For
                        each=move || groups.get()
                        key=|group| group.order_id.clone()
                        children=move |group: OrderGroup| {
                            let placed_on = group.placed_on_label();
                            view! {
                                <div class="card bg-base-100 shadow-md">
                                    <div class="card-body">
                                        <div>
                                            <h3 class="card-title">"Order ID: " {group.order_id}</h3>
                                            <p class="text-sm text-base-content/60">"Placed on: " {placed_on}</p>
                                        </div>
                                        <div class="divide-y divide-base-300">
                                            {group
                                                .items
                                                .into_iter()
                                                .map(|item| view! {
                                                    <div class="py-3 grid grid-cols-2 md:grid-cols-5 gap-2 text-sm">
                                                        <span>"Book: " {item.book_name}</span>
                                                        <span>"Author: " {item.author}</span>
                                                        <span>"Quantity: " {item.quantity}</span>
                                                        <span>"Price: " {format_price(item.discount_price)}</span>
                                                        <span>"Total: " {format_price(item.total)}</span>
                                                    </div>
                                                })
                                                .collect_view()}
                                        </div>
                                    </div>
                                </div>
                            }
                        }
                    />
                </Show>
            </div>
            <Notification notice=notice />
        </div>
    }
}
