use bookstore_shared::book::{self, BookDetail};
use bookstore_shared::model::format_price;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::header::Header;
use crate::components::icons::{Heart, ShoppingCart};
use crate::components::notification::{Notification, use_notice};
use crate::web::router::Link;

#[derive(Debug, Clone, PartialEq)]
enum LoadState {
    Loading,
    Ready(BookDetail),
    Missing(String),
}

#[component]
pub fn BookPage(id: String) -> impl IntoView {
    let api = use_api();
    let notice = use_notice(api.config().notice_ms);

    let state = RwSignal::new(LoadState::Loading);
    let (adding, set_adding) = signal(false);

    spawn_local(async move {
        let client = api.client();
        match book::load_detail(&client, &id).await {
            Ok(detail) => state.set(LoadState::Ready(detail)),
            Err(n) => {
                state.set(LoadState::Missing(n.message.clone()));
                notice.set(Some(n));
            }
        }
    });

    let detail = move || match state.get_untracked() {
        LoadState::Ready(detail) => Some(detail),
        _ => None,
    };

    // 两个添加按钮共用同一个等待标记，响应返回前不再发请求
    let run_add = move |to_cart: bool| {
        let Some(current) = detail() else {
            return;
        };
        if adding.get_untracked() {
            return;
        }
        set_adding.set(true);
        spawn_local(async move {
            let client = api.client();
            let result = if to_cart {
                book::add_to_cart(&client, &current).await
            } else {
                book::add_to_wishlist(&client, &current).await
            };
            match result {
                Ok(updated) => state.set(LoadState::Ready(updated)),
                Err(n) => notice.set(Some(n)),
            }
            set_adding.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <Header />
            {move || match state.get() {
                LoadState::Loading => view! {
                    <div class="flex items-center justify-center h-96">
                        <span class="loading loading-spinner loading-lg"></span>
                    </div>
                }
                .into_any(),
                LoadState::Missing(message) => view! {
                    <div class="text-center py-24 text-xl text-base-content/60">{message}</div>
                }
                .into_any(),
                LoadState::Ready(detail) => {
                    let BookDetail { book, in_cart, in_wishlist } = detail.clone();
                    let cart_disabled = !detail.can_add_to_cart();
                    let out_of_stock = book.is_out_of_stock();
                    view! {
                        <div class="max-w-6xl mx-auto p-4 md:p-8 space-y-4">
                            <div class="breadcrumbs text-sm">
                                <ul>
                                    <li><Link to="/dashboard">"Home"</Link></li>
                                    <li class="font-bold">{book.book_name.clone()}</li>
                                </ul>
                            </div>
                            <div class="flex flex-col md:flex-row gap-8">
                                <div class="flex flex-col items-center gap-6 md:w-2/5">
                                    <div class="relative border-2 border-base-300 rounded-lg overflow-hidden shadow-2xl w-72">
                                        <img src=book.book_image.clone() alt=book.book_name.clone() class="w-full h-[450px] object-cover" />
                                        <Show when=move || out_of_stock>
                                            <div class="absolute inset-x-0 top-1/2 -translate-y-1/2 bg-black/40 text-white text-center py-2 font-bold">
                                                "Out of Stock"
                                            </div>
                                        </Show>
                                    </div>
                                    <div class="flex gap-4 w-full">
                                        <button
                                            class=if in_cart { "btn btn-outline btn-primary flex-1" } else { "btn btn-primary flex-1" }
                                            disabled=move || cart_disabled || adding.get()
                                            on:click=move |_| run_add(true)
                                        >
                                            <ShoppingCart attr:class="h-5 w-5" />
                                            {if in_cart { "Added✓" } else { "Add to Bag" }}
                                        </button>
                                        <button
                                            class=if in_wishlist { "btn btn-outline flex-1" } else { "btn btn-neutral flex-1" }
                                            disabled=move || in_wishlist || adding.get()
                                            on:click=move |_| run_add(false)
                                        >
                                            <Heart attr:class="h-5 w-5" />
                                            {if in_wishlist { "Added✓" } else { "Wishlist" }}
                                        </button>
                                    </div>
                                </div>

                                <div class="flex-1 space-y-3">
                                    <h1 class="text-3xl font-bold">{book.book_name}</h1>
                                    <p class="text-base-content/60">"by: " {book.author}</p>
                                    <div class="flex items-center gap-2">
                                        <span class="badge badge-success text-white rounded">"4.5 ★"</span>
                                        <span class="text-sm text-base-content/60">"(" {book.quantity} ")"</span>
                                    </div>
                                    <div class="flex items-center gap-4">
                                        <span class="text-2xl font-bold">{format_price(book.discount_price)}</span>
                                        <span class="text-base-content/60 line-through">{format_price(book.price)}</span>
                                    </div>
                                    <div class="divider"></div>
                                    <h2 class="text-lg">"Book Details"</h2>
                                    <p class="text-sm text-base-content/70">{book.description}</p>
                                </div>
                            </div>
                        </div>
                    }
                    .into_any()
                }
            }}
            <Notification notice=notice />
        </div>
    }
}
