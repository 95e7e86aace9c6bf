use leptos::*;

use crate::session::use_session;

#[component]
pub fn Header(
    on_toggle_sidebar: Callback<()>,
    #[prop(into)] dark_mode: Signal<bool>,
    on_toggle_dark: Callback<()>,
    on_logout: Callback<()>,
) -> impl IntoView {
    let session = use_session();
    let (menu_open, set_menu_open) = create_signal(false);

    view! {
        <header class="app-header">
            <div class="header-left">
                <button class="icon-button" on:click=move |_| on_toggle_sidebar.call(())>"☰"</button>
                {move || if session.is_logged_in() {
                    view! {
                        <div class="greeting">
                            <p>"Selamat datang kembali,"</p>
                            <h3>"Admin"</h3>
                        </div>
                    }
                } else {
                    view! {
                        <div class="greeting">
                            <p>"Selamat datang,"</p>
                            <h3>"Pengunjung"</h3>
                        </div>
                    }
                }}
            </div>
            <div class="header-right">
                <button class="icon-button" on:click=move |_| on_toggle_dark.call(())>
                    {move || if dark_mode.get() { "☀️" } else { "🌙" }}
                </button>
                <Show when=move || session.is_logged_in()>
                    <div class="user-menu">
                        <button class="user-trigger" on:click=move |_| set_menu_open.update(|o| *o = !*o)>
                            <span class="avatar">"👤"</span>
                            <span class="user-name">"Admin"</span>
                            <span class="chevron">"▾"</span>
                        </button>
                        <Show when=move || menu_open.get()>
                            <div class="dropdown-content">
                                <div class="dropdown-label">
                                    <p>"Admin"</p>
                                    <small>"Administrator"</small>
                                </div>
                                <hr/>
                                <button class="dropdown-item">"Akun Saya"</button>
                                <button
                                    class="dropdown-item danger"
                                    on:click=move |_| {
                                        set_menu_open.set(false);
                                        on_logout.call(());
                                    }
                                >
                                    "Logout"
                                </button>
                            </div>
                        </Show>
                    </div>
                </Show>
            </div>
        </header>
    }
}
