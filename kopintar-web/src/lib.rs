//! Kopintar dashboard, a Leptos client-side app

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

pub mod api;
pub mod components;
pub mod config;
pub mod download;
pub mod pages;
pub mod session;

use api::ApiClient;
use components::{Header, LoginDialog, Sidebar};
use config::AppConfig;
use pages::*;
use session::{LocalStorageTokenStore, SessionContext};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::load();
    logging::log!("Kopintar API: {}", config.api_base);
    let session = SessionContext::new(LocalStorageTokenStore::new(config.token_key));
    provide_context(ApiClient::new(config));
    provide_context(session);
    provide_context(SelectedPetani::new());

    view! {
        <Stylesheet id="kopintar" href="/style/kopintar.css"/>
        <Title text="Kopintar - Dashboard Petani Kopi"/>
        <Router>
            <Routes>
                <Route path="/" view=Landing/>
                <Route path="" view=Shell>
                    <Route path="/dashboard" view=Home/>
                    <Route path="/clustering" view=Clustering/>
                    <Route path="/data-petani" view=DataPetani/>
                    <Route path="/data-petani/tambah" view=TambahPetani/>
                    <Route path="/data-petani/:id" view=DetailPetani/>
                    <Route path="/data-petani/:id/edit" view=EditPetani/>
                    <Route path="/rekomendasi" view=Rekomendasi/>
                    <Route path="/contact" view=Contact/>
                </Route>
            </Routes>
        </Router>
    }
}

/// Toggle the `dark` class on `<html>`
fn apply_dark_mode(enabled: bool) {
    let root = document().document_element();
    if let Some(root) = root {
        if let Err(e) = root.class_list().toggle_with_force("dark", enabled) {
            logging::error!("Gagal mengganti tema: {:?}", e);
        }
    }
}

/// Sidebar, header and login dialog around the routed page
#[component]
fn Shell() -> impl IntoView {
    let session = session::use_session();
    let navigate = use_navigate();
    let (sidebar_open, set_sidebar_open) = create_signal(false);
    let (dark_mode, set_dark_mode) = create_signal(false);

    create_effect(move |_| apply_dark_mode(dark_mode.get()));

    let toggle_sidebar = Callback::new(move |_| set_sidebar_open.update(|open| *open = !*open));
    let on_logout = Callback::new(move |_| {
        session.logout();
        navigate("/dashboard", Default::default());
    });

    view! {
        <div class="app-shell">
            <Sidebar open=sidebar_open on_toggle=toggle_sidebar/>
            <div class="app-body">
                <Header
                    on_toggle_sidebar=toggle_sidebar
                    dark_mode=dark_mode
                    on_toggle_dark=Callback::new(move |_| set_dark_mode.update(|d| *d = !*d))
                    on_logout=on_logout
                />
                <main class="main-content">
                    <Outlet/>
                </main>
            </div>
            <LoginDialog/>
        </div>
    }
}
