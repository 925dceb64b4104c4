use leptos::prelude::*;

use crate::components::books_container::BooksContainer;
use crate::components::header::Header;

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <Header />
            <div class="flex justify-center p-4 md:p-8">
                <div class="max-w-7xl w-full">
                    <BooksContainer />
                </div>
            </div>
        </div>
    }
}
