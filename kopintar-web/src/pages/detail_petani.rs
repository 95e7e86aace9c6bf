use kopintar_common::dashboard::title_case;
use kopintar_common::petani::DETAIL_SECTIONS;
use kopintar_common::{ApiError, PetaniRecord};
use leptos::*;
use leptos_router::*;

use crate::api::use_api;
use crate::components::{Loading, LoadingError};
use crate::pages::{use_route_id, use_selected_petani};
use crate::session::use_session;

const MISSING: &str = "N/A";

/// Sections of label/value pairs for one record
fn detail_sections(record: &PetaniRecord) -> Vec<(&'static str, Vec<(String, String)>)> {
    DETAIL_SECTIONS
        .iter()
        .map(|(title, keys)| {
            let fields = keys
                .iter()
                .map(|key| (title_case(key), record.display(key, MISSING)))
                .collect();
            (*title, fields)
        })
        .collect()
}

#[component]
pub fn DetailPetani() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let selected = use_selected_petani();
    let id = use_route_id();

    let (record, set_record) = create_signal(None::<PetaniRecord>);
    let (error, set_error) = create_signal(None::<ApiError>);
    let (reload, set_reload) = create_signal(0u32);

    create_effect(move |_| {
        reload.track();
        let id = id.get();
        if let Some(found) = selected.take_for(&id) {
            set_record.set(Some(found));
            return;
        }
        let api = api.clone();
        set_error.set(None);
        spawn_local(async move {
            match api.get_petani(&id).await {
                Ok(found) => {
                    let _ = set_record.try_set(Some(found));
                }
                Err(e) => {
                    logging::error!("Gagal memuat detail petani {}: {}", id, e);
                    if e.is_session_expired() {
                        session.expire();
                    }
                    let _ = set_error.try_set(Some(e));
                }
            }
        });
    });

    let navigate = use_navigate();

    view! {
        <div class="detail-page">
            <div class="page-header inline">
                <button
                    class="btn btn-outline"
                    on:click=move |_| navigate("/data-petani", Default::default())
                >
                    "← Kembali"
                </button>
                <div>
                    <h1>"Detail Data Petani"</h1>
                    <p>"Informasi lengkap petani kopi"</p>
                </div>
            </div>

            {move || match (record.get(), error.get()) {
                (Some(record), _) => view! {
                    <div class="detail-sections">
                        {detail_sections(&record)
                            .into_iter()
                            .map(|(title, fields)| view! {
                                <div class="card detail-card">
                                    <h3>{title}</h3>
                                    <dl>
                                        {fields
                                            .into_iter()
                                            .map(|(label, value)| view! {
                                                <div class="detail-row">
                                                    <dt>{label}</dt>
                                                    <dd>{value}</dd>
                                                </div>
                                            })
                                            .collect_view()}
                                    </dl>
                                </div>
                            })
                            .collect_view()}
                    </div>
                }
                .into_view(),
                (None, Some(e)) => view! {
                    <LoadingError error=e on_retry=Callback::new(move |_| set_reload.update(|n| *n += 1))/>
                }
                .into_view(),
                (None, None) => view! { <Loading message="Memuat data petani..."/> }.into_view(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_show_na() {
        let record = PetaniRecord::from_value(json!({"NAMA": "Gatot", "USIA": 46}));
        let sections = detail_sections(&record);
        assert_eq!(sections.len(), DETAIL_SECTIONS.len());

        let (title, fields) = &sections[0];
        assert_eq!(*title, "Data Pribadi");
        assert_eq!(fields[0], ("Nama".to_string(), "Gatot".to_string()));
        assert_eq!(fields[1], ("Jenis Kelamin".to_string(), MISSING.to_string()));
        assert_eq!(fields[2], ("Usia".to_string(), "46".to_string()));
    }
}
