use bookstore_shared::Book;
use bookstore_shared::model::format_price;
use leptos::prelude::*;

use crate::web::router::use_router;

#[component]
pub fn BookCard(book: Book) -> impl IntoView {
    let router = use_router();
    let target = format!("/book/{}", book.id);
    let out_of_stock = book.is_out_of_stock();

    view! {
        <div
            class="card bg-base-100 shadow-md hover:shadow-xl transition-shadow cursor-pointer relative"
            on:click=move |_| router.navigate(&target)
        >
            <figure class="pt-6 px-10">
                <img src=book.book_image alt=book.book_name.clone() class="h-48 object-contain rounded border" />
            </figure>
            <Show when=move || out_of_stock>
                <div class="badge badge-neutral absolute top-3 right-3 text-xs">"OUT OF STOCK"</div>
            </Show>
            <div class="card-body p-4 gap-1">
                <h3 class="font-bold truncate">{book.book_name}</h3>
                <p class="text-sm text-base-content/60 truncate">"by " {book.author}</p>
                <div class="flex items-center gap-2 mt-1">
                    <span class="badge badge-success text-white rounded">"4.5★"</span>
                    <span class="text-sm text-base-content/60">"(" {book.quantity} ")"</span>
                </div>
                <div class="flex items-center gap-2 mt-1">
                    <span class="font-bold">{format_price(book.discount_price)}</span>
                    <span class="text-sm text-base-content/60 line-through">{format_price(book.price)}</span>
                </div>
            </div>
        </div>
    }
}
