use leptos::*;
use leptos_router::*;

const MENU: [(&str, &str, &str); 5] = [
    ("/dashboard", "🏠", "Dashboard"),
    ("/clustering", "🕸️", "Clustering"),
    ("/data-petani", "👥", "Data Petani"),
    ("/rekomendasi", "💡", "Rekomendasi"),
    ("/contact", "✉️", "Contact"),
];

#[component]
pub fn Sidebar(#[prop(into)] open: Signal<bool>, on_toggle: Callback<()>) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="sidebar-overlay" on:click=move |_| on_toggle.call(())></div>
        </Show>
        <aside class="sidebar" class:sidebar-open=move || open.get()>
            <div class="sidebar-brand">
                <div class="brand-logo">"☕"</div>
                <h3>"Kopintar"</h3>
                <button class="sidebar-close" on:click=move |_| on_toggle.call(())>"✕"</button>
            </div>
            <nav class="sidebar-nav">
                <ul>
                    {MENU
                        .iter()
                        .map(|(href, icon, label)| view! {
                            <li>
                                <A href=*href class="sidebar-item" active_class="active">
                                    <span class="icon">{*icon}</span>
                                    <span class="label">{*label}</span>
                                </A>
                            </li>
                        })
                        .collect_view()}
                </ul>
            </nav>
        </aside>
    }
}
