use kopintar_common::edit::{EditPetaniForm, UPDATED_MESSAGE};
use kopintar_common::petani::edit_fields;
use kopintar_common::ApiError;
use leptos::*;
use leptos_router::*;

use crate::api::use_api;
use crate::components::{notify, LoadingError};
use crate::pages::{use_route_id, use_selected_petani};
use crate::session::use_session;

const LIST_PATH: &str = "/data-petani";

#[component]
pub fn EditPetani() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let selected = use_selected_petani();
    let navigate = use_navigate();
    let id = use_route_id();

    let form = create_rw_signal(None::<EditPetaniForm>);
    let (load_error, set_load_error) = create_signal(None::<ApiError>);
    let (saving, set_saving) = create_signal(false);
    let (reload, set_reload) = create_signal(0u32);
    // Inputs are rendered once per load, not on every keystroke
    let loaded = create_memo(move |_| form.with(Option::is_some));

    let load_api = api.clone();
    create_effect(move |_| {
        reload.track();
        let id = id.get();
        if let Some(record) = selected.take_for(&id) {
            form.set(Some(EditPetaniForm::from_record(record)));
            return;
        }
        let api = load_api.clone();
        set_load_error.set(None);
        spawn_local(async move {
            match api.get_petani(&id).await {
                Ok(record) => {
                    let _ = form.try_set(Some(EditPetaniForm::from_record(record)));
                }
                Err(e) => {
                    logging::error!("❌ Gagal memuat petani {}: {}", id, e);
                    if e.is_session_expired() {
                        session.expire();
                    }
                    let _ = set_load_error.try_set(Some(e));
                }
            }
        });
    });

    let back = {
        let navigate = navigate.clone();
        move || navigate(LIST_PATH, Default::default())
    };

    let on_submit = {
        let back = back.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            if !session.is_logged_in_untracked() {
                notify(&kopintar_common::Error::NotLoggedIn.to_string());
                back();
                return;
            }
            let Some(current) = form.get_untracked() else {
                return;
            };
            let petani_id = match current.record_id() {
                Ok(id) => id,
                Err(e) => {
                    notify(&e.to_string());
                    return;
                }
            };
            let payload = current.to_payload();

            let api = api.clone();
            let back = back.clone();
            set_saving.set(true);
            spawn_local(async move {
                match api.update_petani(&petani_id, &payload).await {
                    Ok(_) => {
                        logging::log!("✅ Petani {} diperbarui", petani_id);
                        notify(UPDATED_MESSAGE);
                        back();
                    }
                    Err(e) => {
                        logging::error!("❌ Gagal update data petani: {}", e);
                        notify(&e.user_message());
                        if e.is_session_expired() {
                            session.expire();
                            back();
                        }
                    }
                }
                let _ = set_saving.try_set(false);
            });
        }
    };

    let back_button = back.clone();
    let cancel_button = back.clone();

    view! {
        <div class="form-page">
            <div class="page-header inline">
                <button class="btn btn-ghost" on:click=move |_| back_button()>"← Kembali"</button>
                <h1>"Edit Data Petani"</h1>
            </div>

            <form on:submit=on_submit>
                {move || match (loaded.get(), load_error.get()) {
                    (false, Some(e)) => view! {
                        <LoadingError error=e on_retry=Callback::new(move |_| set_reload.update(|n| *n += 1))/>
                    }
                    .into_view(),
                    (false, None) => view! { <p class="muted">"Memuat data petani..."</p> }.into_view(),
                    (true, _) => view! {
                        <div class="card form-card">
                            <div class="form-grid">
                                {edit_fields()
                                    .iter()
                                    .map(|field| {
                                        let key = *field;
                                        view! {
                                            <div class="form-field">
                                                <label for=key>{key}</label>
                                                <input
                                                    id=key
                                                    type="text"
                                                    placeholder=format!("Masukkan {}", key.to_lowercase())
                                                    on:input=move |ev| form.update(|f| {
                                                        if let Some(f) = f {
                                                            f.set(key, event_target_value(&ev));
                                                        }
                                                    })
                                                    prop:value=move || form.with(|f| {
                                                        f.as_ref().map(|f| f.value(key)).unwrap_or_default()
                                                    })
                                                />
                                            </div>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    }
                    .into_view(),
                }}

                <div class="form-actions sticky">
                    <button type="button" class="btn btn-outline" on:click=move |_| cancel_button()>
                        "✕ Batal"
                    </button>
                    <button
                        type="submit"
                        class="btn btn-primary"
                        disabled=move || saving.get() || !loaded.get()
                    >
                        {move || if saving.get() { "Menyimpan..." } else { "Simpan Perubahan" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
