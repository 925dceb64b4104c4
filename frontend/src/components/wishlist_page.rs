use bookstore_shared::WishlistLine;
use bookstore_shared::wishlist::{self, WishlistAction, WishlistState};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::header::Header;
use crate::components::icons::Trash2;
use crate::components::notification::{Notification, use_notice};
use crate::web::router::Link;

#[component]
pub fn WishlistPage() -> impl IntoView {
    let api = use_api();
    let notice = use_notice(api.config().notice_ms);

    let wishlist_state = RwSignal::new(WishlistState::default());
    let (loading, set_loading) = signal(true);
    let (clearing, set_clearing) = signal(false);

    spawn_local(async move {
        let client = api.client();
        match wishlist::load_wishlist(&client).await {
            Ok(state) => wishlist_state.set(state),
            Err(n) => notice.set(Some(n)),
        }
        set_loading.set(false);
    });

    let apply = move |action: WishlistAction| wishlist_state.update(|w| *w = w.apply(&action));

    let on_remove = move |wishlist_item_id: String| {
        spawn_local(async move {
            let client = api.client();
            match wishlist::remove_line(&client, &wishlist_item_id).await {
                Ok(action) => apply(action),
                Err(n) => notice.set(Some(n)),
            }
        });
    };

    let on_clear = move |_| {
        if clearing.get_untracked() {
            return;
        }
        set_clearing.set(true);
        spawn_local(async move {
            let client = api.client();
            match wishlist::clear(&client).await {
                Ok((action, n)) => {
                    apply(action);
                    notice.set(Some(n));
                }
                Err(n) => notice.set(Some(n)),
            }
            set_clearing.set(false);
        });
    };

    let line_count = move || wishlist_state.with(|w| w.len());

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <Header />
            <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-6">
                <div class="breadcrumbs text-sm">
                    <ul>
                        <li><Link to="/dashboard">"Home"</Link></li>
                        <li class="font-bold">"My Wishlist"</li>
                    </ul>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">"My Wishlist (" {line_count} ")"</h2>
                        <Show
                            when=move || { line_count() > 0 }
                            fallback=move || view! {
                                <div class="text-center py-12 text-base-content/60">
                                    {move || if loading.get() {
                                        view! { <span class="loading loading-spinner loading-lg"></span> }.into_any()
                                    } else {
                                        "Your wishlist is empty".into_any()
                                    }}
                                </div>
                            }
                        >
                            <div class="divide-y divide-base-300">
                                <For
                                    each=move || wishlist_state.with(|w| w.lines().to_vec())
                                    key=|line| line.wishlist_item_id.clone()
                                    children=move |line: WishlistLine| {
                                        let id = line.wishlist_item_id.clone();
                                        view! {
                                            <div class="flex gap-4 py-4 items-center">
                                                <img src=line.book_image alt=line.book_name.clone() class="w-20 h-28 object-cover rounded" />
                                                <div class="flex-1 space-y-1">
                                                    <h3 class="font-bold">{line.book_name}</h3>
                                                    <p class="text-sm text-base-content/60">"by " {line.author}</p>
                                                </div>
                                                <button
                                                    class="btn btn-ghost btn-sm text-error gap-1"
                                                    on:click=move |_| on_remove(id.clone())
                                                >
                                                    <Trash2 attr:class="h-4 w-4" /> "Remove"
                                                </button>
                                            </div>
                                        }
                                    }
                                />
                            </div>
                            <div class="card-actions justify-end pt-4 border-t border-base-300">
                                <button class="btn btn-primary" disabled=move || clearing.get() on:click=on_clear>
                                    "Clear Wishlist"
                                </button>
                            </div>
                        </Show>
                    </div>
                </div>
            </div>
            <Notification notice=notice />
        </div>
    }
}
