//! 书目列表
//!
//! 目录状态（页码、每页数量、排序、搜索词）只保存在地址栏查询串里，
//! 这里从路由的查询信号派生，修改时用 `replace_query` 写回，不产生新的历史记录。

use bookstore_shared::BookListing;
use bookstore_shared::catalog::{CatalogQuery, PAGE_SIZE_OPTIONS, SortKey, page_window};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::debug;

use crate::api::use_api;
use crate::components::book_card::BookCard;
use crate::components::icons::{ChevronLeft, ChevronRight};

/// 当前页两侧各显示的页码数量
const PAGE_SPAN: u64 = 2;

#[component]
pub fn BooksContainer() -> impl IntoView {
    let api = use_api();
    let router = api.router();

    let query = Memo::new(move |_| CatalogQuery::from_query_string(&router.query().get()));
    let listing = RwSignal::new(BookListing::default());
    let (loading, set_loading) = signal(true);
    // 只接受最近一次请求的结果
    let request_seq = StoredValue::new(0u64);

    // 地址栏缺省参数时补全为规范形式
    Effect::new(move |_| {
        let canonical = query.get().to_url_query();
        if router.query().get_untracked() != canonical {
            router.replace_query(&canonical);
        }
    });

    Effect::new(move |_| {
        let q = query.get();
        let seq = request_seq.get_value() + 1;
        request_seq.set_value(seq);
        set_loading.set(true);

        spawn_local(async move {
            let result = api.client().fetch_books(&q).await;
            if request_seq.get_value() != seq {
                debug!(seq, "stale catalog response dropped");
                return;
            }
            listing.set(result);
            set_loading.set(false);
        });
    });

    let update_query = move |next: CatalogQuery| {
        router.replace_query(&next.to_url_query());
    };

    let on_sort = move |ev: leptos::web_sys::Event| {
        if let Some(sort) = SortKey::parse(&event_target_value(&ev)) {
            update_query(query.get_untracked().with_sort(sort));
        }
    };

    let on_limit = move |ev: leptos::web_sys::Event| {
        if let Ok(limit) = event_target_value(&ev).parse::<u32>() {
            update_query(query.get_untracked().with_limit(limit));
        }
    };

    let go_to_page = move |page: u64| {
        let page = u32::try_from(page).unwrap_or(u32::MAX);
        update_query(query.get_untracked().with_page(page));
    };

    let total = move || listing.with(|l| l.total_records);
    let page_count = move || query.with(|q| q.page_count(total()));
    let current_page = move || u64::from(query.with(|q| q.page));

    view! {
        <div class="space-y-8">
            <div class="flex flex-wrap items-center justify-between gap-4">
                <h2 class="text-3xl font-bold">
                    "Books " <span class="text-sm font-normal text-base-content/60">"(" {total} " Items)"</span>
                </h2>
                <div class="flex gap-2">
                    <select class="select select-bordered select-sm w-52" on:change=on_sort>
                        {SortKey::ALL
                            .into_iter()
                            .map(move |key| {
                                view! {
                                    <option value=key.as_str() prop:selected=move || query.with(|q| q.sort == key)>
                                        {key.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                    <select class="select select-bordered select-sm" on:change=on_limit>
                        {PAGE_SIZE_OPTIONS
                            .into_iter()
                            .map(move |size| {
                                view! {
                                    <option value=size.to_string() prop:selected=move || query.with(|q| q.limit == size)>
                                        {size} " / page"
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>
            </div>

            <Show
                when=move || !listing.with(|l| l.books.is_empty())
                fallback=move || view! {
                    <div class="text-center py-16 text-xl text-base-content/60">
                        {move || if loading.get() {
                            view! { <span class="loading loading-spinner loading-lg"></span> }.into_any()
                        } else {
                            "No books found.".into_any()
                        }}
                    </div>
                }
            >
                <div class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-6">
                    <For
                        each=move || listing.get().books
                        key=|book| book.id.clone()
                        children=move |book| view! { <BookCard book=book /> }
                    />
                </div>
            </Show>

            <Show when=move || { page_count() > 1 }>
                <div class="flex justify-center">
                    <div class="join">
                        <button
                            class="join-item btn btn-sm"
                            disabled=move || current_page() <= 1
                            on:click=move |_| go_to_page(current_page().saturating_sub(1))
                        >
                            <ChevronLeft attr:class="h-4 w-4" />
                        </button>
                        {move || {
                            page_window(current_page(), page_count(), PAGE_SPAN)
                                .into_iter()
                                .map(move |slot| match slot {
                                    Some(page) => view! {
                                        <button
                                            class=move || if current_page() == page { "join-item btn btn-sm btn-primary" } else { "join-item btn btn-sm" }
                                            on:click=move |_| go_to_page(page)
                                        >
                                            {page}
                                        </button>
                                    }
                                    .into_any(),
                                    None => view! { <button class="join-item btn btn-sm btn-disabled">"…"</button> }.into_any(),
                                })
                                .collect_view()
                        }}
                        <button
                            class="join-item btn btn-sm"
                            disabled=move || current_page() >= page_count()
                            on:click=move |_| go_to_page(current_page() + 1)
                        >
                            <ChevronRight attr:class="h-4 w-4" />
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
