use kopintar_common::export::{export, ExportFormat};
use kopintar_common::listing::{filter_rows, normalize_rows, ListState, Pagination, PetaniRow};
use kopintar_common::{PendingAction, PetaniRecord};
use leptos::*;
use leptos_router::*;

use crate::api::use_api;
use crate::components::{notify, EmptyState, ErrorAlert, Loading, Modal};
use crate::download::save_file;
use crate::pages::use_selected_petani;
use crate::session::{use_session, PetaniAction};

const DETAIL_FETCH_FAILED: &str = "Gagal mengambil detail petani. Coba lagi nanti.";
const DELETE_FAILED: &str = "Gagal menghapus data petani.";

/// Record queued for the delete confirmation
#[derive(Clone, Debug, PartialEq)]
struct DeleteTarget {
    id: String,
    nama: String,
}

fn delete_prompt(nama: &str) -> String {
    format!(
        "Apakah Anda yakin ingin menghapus data petani {}? Tindakan ini tidak dapat dibatalkan.",
        nama
    )
}

#[component]
pub fn DataPetani() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let selected = use_selected_petani();
    let navigate = use_navigate();
    let page_size = api.config().page_size;

    let (state, set_state) = create_signal(ListState::Idle);
    let (query, set_query) = create_signal(String::new());
    let (page, set_page) = create_signal(1usize);
    let (reload, set_reload) = create_signal(0u32);
    let (export_open, set_export_open) = create_signal(false);
    let (viewing, set_viewing) = create_signal(None::<PetaniRecord>);
    let (delete_target, set_delete_target) = create_signal(None::<DeleteTarget>);
    let (deleting, set_deleting) = create_signal(false);

    // Full list, re-fetched on mount and after every delete
    let list_api = api.clone();
    create_effect(move |_| {
        reload.track();
        let api = list_api.clone();
        set_state.set(ListState::Loading);
        spawn_local(async move {
            let next = match api.list_petani().await {
                Ok(raw) => ListState::Ready(normalize_rows(raw)),
                Err(e) if e.is_session_expired() => {
                    session.expire();
                    ListState::Ready(Vec::new())
                }
                Err(e) => {
                    logging::error!("Gagal memuat data petani: {}", e);
                    ListState::Error(e)
                }
            };
            let _ = set_state.try_set(next);
        });
    });

    let filtered = create_memo(move |_| {
        query.with(|q| {
            state.with(|s| filter_rows(s.rows(), q).into_iter().cloned().collect::<Vec<_>>())
        })
    });

    let pagination = create_memo(move |_| {
        let mut p = Pagination::new(filtered.with(Vec::len), page_size);
        p.page = page.get();
        p.set_total(p.total);
        p
    });

    let page_rows = move || {
        let range = pagination.get().range();
        filtered.with(|rows| rows[range.clone()].to_vec()).into_iter().zip(range)
    };

    let perform = {
        let api = api.clone();
        let navigate = navigate.clone();
        Callback::new(move |action: PetaniAction| match action {
            PendingAction::Add => navigate("/data-petani/tambah", Default::default()),
            PendingAction::Edit(id) => {
                let api = api.clone();
                let navigate = navigate.clone();
                spawn_local(async move {
                    match api.get_petani(&id).await {
                        Ok(record) => {
                            selected.select(record);
                            navigate(&format!("/data-petani/{}/edit", id), Default::default());
                        }
                        Err(e) => {
                            logging::error!("❌ Gagal memuat detail petani: {}", e);
                            if e.is_session_expired() {
                                session.expire();
                            }
                            notify(DETAIL_FETCH_FAILED);
                        }
                    }
                });
            }
            PendingAction::Delete(id) => {
                let nama = state.with_untracked(|s| {
                    s.rows()
                        .iter()
                        .find(|r| r.id == id)
                        .map(|r| r.nama.clone())
                        .unwrap_or_else(|| "-".to_string())
                });
                set_delete_target.set(Some(DeleteTarget { id, nama }));
            }
        })
    };

    let request = move |action: PetaniAction| {
        if let Some(action) = session.guard(action) {
            perform.call(action);
        }
    };

    // Replay the action that was waiting for a login, once
    create_effect(move |was_logged_in: Option<bool>| {
        let logged_in = session.is_logged_in();
        if was_logged_in == Some(false) && logged_in {
            if let Some(action) = session.take_deferred() {
                perform.call(action);
            }
        }
        logged_in
    });

    on_cleanup(move || session.close_login());

    let confirm_delete = {
        let api = api.clone();
        move |_: ev::MouseEvent| {
            let Some(target) = delete_target.get_untracked() else {
                return;
            };
            let api = api.clone();
            set_deleting.set(true);
            spawn_local(async move {
                match api.delete_petani(&target.id).await {
                    Ok(()) => {
                        logging::log!("Petani {} dihapus", target.id);
                        let _ = set_delete_target.try_set(None);
                        let _ = set_reload.try_update(|n| *n += 1);
                    }
                    Err(e) => {
                        logging::error!("Gagal menghapus petani {}: {}", target.id, e);
                        if e.is_session_expired() {
                            session.expire();
                        }
                        notify(DELETE_FAILED);
                    }
                }
                let _ = set_deleting.try_set(false);
            });
        }
    };

    let run_export = move |format: ExportFormat| {
        let rows = filtered.get_untracked();
        let outcome = export(rows.iter().map(|r| &r.full), format)
            .map_err(|e| e.to_string())
            .and_then(|bytes| save_file(&bytes, &format.file_name(), format.mime_type()));
        if let Err(message) = outcome {
            logging::error!("Export {} gagal: {}", format.label(), message);
            notify(&message);
        }
        set_export_open.set(false);
    };

    let open_detail_page = Callback::new(move |record: PetaniRecord| {
        let Some(id) = record.record_id() else {
            notify(&kopintar_common::Error::MissingRecordId.to_string());
            return;
        };
        selected.select(record);
        set_viewing.set(None);
        navigate(&format!("/data-petani/{}", id), Default::default());
    });

    view! {
        <div class="data-petani-page">
            <div class="page-header">
                <div>
                    <h1>"Data Petani"</h1>
                    <p>"Kelola dan pantau data petani kopi"</p>
                </div>
            </div>

            <div class="toolbar">
                <input
                    type="search"
                    class="search-input"
                    placeholder="Cari Nama / Dusun"
                    on:input=move |ev| {
                        set_query.set(event_target_value(&ev));
                        set_page.set(1);
                    }
                    prop:value=query
                />
                <div class="toolbar-actions">
                    <button class="btn btn-outline" on:click=move |_| set_export_open.set(true)>
                        "⬇ Export Data"
                    </button>
                    <button class="btn btn-primary" on:click=move |_| request(PendingAction::Add)>
                        "＋ Tambah Petani"
                    </button>
                </div>
            </div>

            {move || match state.get() {
                ListState::Idle | ListState::Loading => {
                    view! { <Loading message="Memuat data..."/> }.into_view()
                }
                ListState::Error(e) => view! {
                    <ErrorAlert error=e on_retry=Callback::new(move |_| set_reload.update(|n| *n += 1))/>
                }
                .into_view(),
                ListState::Ready(_) if filtered.with(Vec::is_empty) => view! {
                    <EmptyState icon="🧑‍🌾" title="Tidak ada data petani"/>
                }
                .into_view(),
                ListState::Ready(_) => view! {
                    <div class="table-wrapper">
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"NO"</th>
                                    <th>"NAMA"</th>
                                    <th>"DUSUN"</th>
                                    <th>"KELOMPOK TANI"</th>
                                    <th>"USIA"</th>
                                    <th>"NO HP"</th>
                                    <th>"TOTAL LAHAN (M2)"</th>
                                    <th>"HASIL PER TAHUN (kg)"</th>
                                    <th>"HARGA JUAL PER KG"</th>
                                    <th>"Aksi"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {page_rows()
                                    .map(|(row, position)| {
                                        let PetaniRow { id, full, .. } = row.clone();
                                        let edit_id = id.clone();
                                        view! {
                                            <tr>
                                                <td>{position + 1}</td>
                                                <td class="strong">{row.nama}</td>
                                                <td>{row.dusun}</td>
                                                <td>{row.kelompok_tani}</td>
                                                <td>{row.usia}</td>
                                                <td>{row.no_hp}</td>
                                                <td>{row.luas_lahan}</td>
                                                <td>{row.produksi}</td>
                                                <td>{row.harga}</td>
                                                <td class="actions">
                                                    <button
                                                        class="icon-button"
                                                        title="Lihat Detail"
                                                        on:click=move |_| set_viewing.set(Some(full.clone()))
                                                    >
                                                        "👁"
                                                    </button>
                                                    <button
                                                        class="icon-button"
                                                        title="Edit"
                                                        on:click=move |_| request(PendingAction::Edit(edit_id.clone()))
                                                    >
                                                        "✏️"
                                                    </button>
                                                    <button
                                                        class="icon-button danger"
                                                        title="Hapus"
                                                        on:click=move |_| request(PendingAction::Delete(id.clone()))
                                                    >
                                                        "🗑"
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    </div>
                }
                .into_view(),
            }}

            <div class="pagination">
                <button
                    class="btn btn-outline"
                    disabled=move || !pagination.get().has_prev()
                    on:click=move |_| {
                        let mut p = pagination.get_untracked();
                        p.prev();
                        set_page.set(p.page);
                    }
                >
                    "Sebelumnya"
                </button>
                <span>{move || pagination.get().label()}</span>
                <button
                    class="btn btn-outline"
                    disabled=move || !pagination.get().has_next()
                    on:click=move |_| {
                        let mut p = pagination.get_untracked();
                        p.next();
                        set_page.set(p.page);
                    }
                >
                    "Selanjutnya"
                </button>
            </div>

            <Modal
                open=export_open
                on_close=Callback::new(move |_| set_export_open.set(false))
                title="Export Data"
                description="Pilih format file export"
                class="modal-narrow"
            >
                <div class="export-options">
                    {ExportFormat::ALL
                        .into_iter()
                        .map(|format| view! {
                            <button class="btn btn-outline btn-block" on:click=move |_| run_export(format)>
                                {format!("Export as {}", format.label())}
                            </button>
                        })
                        .collect_view()}
                </div>
            </Modal>

            <Modal
                open=Signal::derive(move || viewing.with(Option::is_some))
                on_close=Callback::new(move |_| set_viewing.set(None))
                title="Detail Data Petani"
                description="Informasi lengkap petani kopi"
                class="modal-wide"
            >
                {move || viewing.get().map(|record| {
                    let entries = record.view_entries();
                    view! {
                        <dl class="detail-grid">
                            {entries
                                .into_iter()
                                .map(|(key, value)| view! {
                                    <div class="detail-item">
                                        <dt>{key}</dt>
                                        <dd>{value}</dd>
                                    </div>
                                })
                                .collect_view()}
                        </dl>
                        <div class="form-actions">
                            <button
                                class="btn btn-outline"
                                on:click=move |_| open_detail_page.call(record.clone())
                            >
                                "Buka Halaman Detail"
                            </button>
                        </div>
                    }
                })}
            </Modal>

            <Modal
                open=Signal::derive(move || delete_target.with(Option::is_some))
                on_close=Callback::new(move |_| set_delete_target.set(None))
                title="Konfirmasi Hapus Data"
                class="modal-narrow"
            >
                <p>{move || delete_target.get().map(|t| delete_prompt(&t.nama))}</p>
                <div class="form-actions">
                    <button class="btn btn-outline" on:click=move |_| set_delete_target.set(None)>
                        "Batal"
                    </button>
                    <button
                        class="btn btn-danger"
                        disabled=move || deleting.get()
                        on:click=confirm_delete.clone()
                    >
                        {move || if deleting.get() { "Menghapus..." } else { "Hapus" }}
                    </button>
                </div>
            </Modal>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_prompt_names_record() {
        assert_eq!(
            delete_prompt("Budi"),
            "Apakah Anda yakin ingin menghapus data petani Budi? Tindakan ini tidak dapat dibatalkan."
        );
    }
}
