//! Loading spinner component

use leptos::*;

#[component]
pub fn Loading(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="loading-container">
            <div class="spinner"></div>
            <p>{message}</p>
        </div>
    }
}
