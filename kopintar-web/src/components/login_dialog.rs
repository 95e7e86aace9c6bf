use leptos::*;

use crate::api::{login_error_message, use_api};
use crate::components::Modal;
use crate::session::use_session;

/// Administrator login; a successful login closes the dialog
#[component]
pub fn LoginDialog() -> impl IntoView {
    let session = use_session();
    let api = use_api();

    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<&'static str>);
    let (loading, set_loading) = create_signal(false);

    let close = Callback::new(move |_: ()| {
        set_error.set(None);
        session.close_login();
    });

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let api = api.clone();
        let (user, pass) = (username.get_untracked(), password.get_untracked());
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api.login(&user, &pass).await {
                Ok(token) => {
                    logging::log!("Login berhasil");
                    let _ = set_username.try_set(String::new());
                    let _ = set_password.try_set(String::new());
                    session.login(&token.access_token);
                }
                Err(e) => {
                    logging::error!("Login gagal: {}", e);
                    let _ = set_error.try_set(Some(login_error_message(&e)));
                }
            }
            let _ = set_loading.try_set(false);
        });
    };

    view! {
        <Modal
            open=session.login_open()
            on_close=close
            title="Login Administrator"
            description="Masukkan kredensial untuk melanjutkan"
            class="modal-narrow"
        >
            <form class="login-form" on:submit=submit.clone()>
                <div class="form-group">
                    <label>"Username"</label>
                    <input
                        type="text"
                        required
                        placeholder="Masukkan username"
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                        prop:value=username
                    />
                </div>
                <div class="form-group">
                    <label>"Password"</label>
                    <input
                        type="password"
                        required
                        placeholder="Masukkan password"
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                    />
                </div>
                {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
                <div class="form-actions">
                    <button type="button" class="btn btn-outline" on:click=move |_| close.call(())>
                        "Batal"
                    </button>
                    <button type="submit" class="btn btn-primary" disabled=move || loading.get()>
                        {move || if loading.get() { "Memproses..." } else { "Login" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
