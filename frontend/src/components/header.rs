use bookstore_shared::catalog::CatalogQuery;
use leptos::prelude::*;

use crate::components::icons::{BookOpen, Heart, Package, Search, ShoppingCart};
use crate::web::router::{Link, use_router};

/// 顶部导航栏：Logo、搜索框与购物车 / 心愿单 / 订单入口
#[component]
pub fn Header() -> impl IntoView {
    let router = use_router();

    let (term, set_term) = signal(String::new());

    // 地址栏中的搜索词变化时同步到输入框
    Effect::new(move |_| {
        let query = CatalogQuery::from_query_string(&router.query().get());
        set_term.set(query.search);
    });

    let on_search = move || {
        let query = CatalogQuery::from_query_string(&router.query().get_untracked())
            .with_search(&term.get_untracked());
        router.navigate(&format!("/dashboard?{}", query.to_url_query()));
    };

    view! {
        <div class="navbar bg-primary text-primary-content shadow-xl px-4 md:px-16 gap-4">
            <div class="flex-none">
                <Link to="/dashboard" class="btn btn-ghost text-xl gap-2">
                    <BookOpen attr:class="h-6 w-6" />
                    <span class="hidden md:inline">"Bookstore"</span>
                </Link>
            </div>

            <div class="flex-1 justify-center">
                <label class="input input-bordered flex items-center gap-2 w-full md:w-3/4 text-base-content">
                    <button type="button" aria-label="search books" on:click=move |_| on_search()>
                        <Search attr:class="h-4 w-4 opacity-70" />
                    </button>
                    <input
                        type="text"
                        class="grow"
                        placeholder="Search books..."
                        prop:value=term
                        on:input=move |ev| set_term.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::web_sys::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                on_search();
                            }
                        }
                    />
                </label>
            </div>

            <div class="flex-none gap-1">
                <div class="tooltip tooltip-bottom" data-tip="Cart">
                    <Link to="/cart" class="btn btn-ghost btn-circle">
                        <ShoppingCart attr:class="h-5 w-5" />
                    </Link>
                </div>
                <div class="tooltip tooltip-bottom" data-tip="Wishlist">
                    <Link to="/wishlist" class="btn btn-ghost btn-circle">
                        <Heart attr:class="h-5 w-5" />
                    </Link>
                </div>
                <div class="tooltip tooltip-bottom" data-tip="Orders">
                    <Link to="/order" class="btn btn-ghost btn-circle">
                        <Package attr:class="h-5 w-5" />
                    </Link>
                </div>
            </div>
        </div>
    }
}
