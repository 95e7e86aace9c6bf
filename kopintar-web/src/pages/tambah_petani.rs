use kopintar_common::form::{
    CreatePetaniForm, FieldKind, FieldSpec, CREATED_MESSAGE, CREATE_SECTIONS, LAINNYA,
};
use kopintar_common::petani::{
    HARGA_JUAL, JENIS_KELAMIN, NO_HP, PANEN_NON_KOPI, TANAMAN_LAINNYA, VARIETAS_KOPI,
};
use leptos::*;
use leptos_router::*;

use crate::api::use_api;
use crate::components::notify;
use crate::session::use_session;

const LIST_PATH: &str = "/data-petani";
const MULTI_VALUE_HINT: &str = "Tips: Pisahkan dengan koma untuk multiple pilihan";

/// Helper text shown under an input
fn field_hint(key: &str) -> Option<&'static str> {
    match key {
        NO_HP => Some("Nomor akan disimpan tanpa awalan 0 atau +62"),
        HARGA_JUAL => Some("Masukkan angka saja tanpa \"Rp\""),
        VARIETAS_KOPI | TANAMAN_LAINNYA | PANEN_NON_KOPI => Some(MULTI_VALUE_HINT),
        _ => None,
    }
}

/// Visible text of a dropdown option
fn option_label(key: &str, option: &'static str) -> &'static str {
    match (key, option) {
        (JENIS_KELAMIN, "L") => "Laki-laki",
        (JENIS_KELAMIN, "P") => "Perempuan",
        _ => option,
    }
}

#[component]
pub fn TambahPetani() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let navigate = use_navigate();

    let form = create_rw_signal(CreatePetaniForm::new());
    let (saving, set_saving) = create_signal(false);

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
            let payload = match form.with_untracked(CreatePetaniForm::to_payload) {
                Ok(payload) => payload,
                Err(e) => {
                    notify(&e.to_string());
                    return;
                }
            };

            let api = api.clone();
            let back = back.clone();
            set_saving.set(true);
            spawn_local(async move {
                match api.create_petani(&payload).await {
                    Ok(_) => {
                        logging::log!("✅ Petani {} ditambahkan", payload.nama());
                        notify(CREATED_MESSAGE);
                        back();
                    }
                    Err(e) if e.is_session_expired() => {
                        notify(&e.user_message());
                        session.expire();
                        back();
                    }
                    Err(e) => {
                        logging::error!("Gagal menyimpan petani: {}", e.describe());
                        notify(&e.user_message());
                    }
                }
                let _ = set_saving.try_set(false);
            });
        }
    };

    view! {
        <div class="form-page">
            <div class="page-header">
                <button class="btn btn-ghost" on:click={
                    let back = back.clone();
                    move |_| back()
                }>
                    "← Kembali ke Data Petani"
                </button>
                <h1>"Tambah Data Petani"</h1>
                <p>"Lengkapi formulir di bawah untuk menambahkan data petani baru"</p>
            </div>

            <form on:submit=on_submit>
                {CREATE_SECTIONS
                    .iter()
                    .map(|(title, fields)| view! {
                        <div class="card form-card">
                            <h3>{*title}</h3>
                            <div class="form-grid">
                                {fields.iter().map(|spec| field_input(spec, form)).collect_view()}
                            </div>
                        </div>
                    })
                    .collect_view()}

                <div class="form-actions">
                    <button
                        type="button"
                        class="btn btn-outline"
                        disabled=move || saving.get()
                        on:click=move |_| form.update(CreatePetaniForm::reset)
                    >
                        "Reset"
                    </button>
                    <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Menyimpan..." } else { "Simpan Data" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

fn field_input(spec: &'static FieldSpec, form: RwSignal<CreatePetaniForm>) -> View {
    let key = spec.key;
    let value = move || form.with(|f| f.value(key));
    let set_value = move |ev: ev::Event| form.update(|f| f.set(key, event_target_value(&ev)));

    let control = match spec.kind {
        FieldKind::Text => view! {
            <input
                type="text"
                id=key
                placeholder=spec.placeholder
                required=spec.required
                on:input=set_value
                prop:value=value
            />
        }
        .into_view(),
        FieldKind::TextArea => view! {
            <textarea id=key rows="3" on:input=set_value prop:value=value></textarea>
        }
        .into_view(),
        FieldKind::Integer | FieldKind::Price => view! {
            <input type="number" id=key min="0" on:input=set_value prop:value=value/>
        }
        .into_view(),
        FieldKind::Date => view! {
            <input type="date" id=key on:input=set_value prop:value=value/>
        }
        .into_view(),
        FieldKind::Choice { options, .. } => view! {
            <select id=key on:change=set_value prop:value=value>
                <option value="">{format!("Pilih {}", spec.label)}</option>
                {options
                    .iter()
                    .map(|option| view! {
                        <option value=*option>{option_label(key, option)}</option>
                    })
                    .collect_view()}
            </select>
            <Show when=move || form.with(|f| f.value(key) == LAINNYA)>
                <input
                    type="text"
                    class="other-input"
                    placeholder=format!("Sebutkan {} lainnya", spec.label.to_lowercase())
                    on:input=move |ev| form.update(|f| f.set_other(key, event_target_value(&ev)))
                    prop:value=move || form.with(|f| f.other(key))
                />
            </Show>
        }
        .into_view(),
    };

    view! {
        <div class="form-field" class:form-field-wide=matches!(spec.kind, FieldKind::TextArea)>
            <label for=key>
                {spec.label}
                {spec.required.then_some(" *")}
            </label>
            {control}
            {field_hint(key).map(|hint| view! { <p class="field-hint">{hint}</p> })}
        </div>
    }
    .into_view()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_options_are_spelled_out() {
        assert_eq!(option_label(JENIS_KELAMIN, "L"), "Laki-laki");
        assert_eq!(option_label(JENIS_KELAMIN, "P"), "Perempuan");
        assert_eq!(option_label("DUSUN", "Sumberurip"), "Sumberurip");
    }

    #[test]
    fn test_field_hints() {
        assert!(field_hint(NO_HP).is_some());
        assert_eq!(field_hint(VARIETAS_KOPI), Some(MULTI_VALUE_HINT));
        assert_eq!(field_hint("NAMA"), None);
    }
}
