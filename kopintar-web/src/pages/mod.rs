//! Page components, one per route

mod clustering;
mod contact;
mod data_petani;
mod detail_petani;
mod edit_petani;
mod home;
mod landing;
mod rekomendasi;
mod tambah_petani;

pub use clustering::Clustering;
pub use contact::Contact;
pub use data_petani::DataPetani;
pub use detail_petani::DetailPetani;
pub use edit_petani::EditPetani;
pub use home::Home;
pub use landing::Landing;
pub use rekomendasi::Rekomendasi;
pub use tambah_petani::TambahPetani;

use kopintar_common::PetaniRecord;
use leptos::*;

/// Record handed from the list to the edit or detail page
#[derive(Clone, Copy)]
pub struct SelectedPetani(RwSignal<Option<PetaniRecord>>);

impl SelectedPetani {
    pub fn new() -> Self {
        Self(create_rw_signal(None))
    }

    pub fn select(&self, record: PetaniRecord) {
        self.0.set(Some(record));
    }

    /// The handed-over record, if it belongs to `id`
    pub fn take_for(&self, id: &str) -> Option<PetaniRecord> {
        self.0
            .try_update(|slot| match slot.take() {
                Some(record) if record.record_id().as_deref() == Some(id) => Some(record),
                _ => None,
            })
            .flatten()
    }
}

pub fn use_selected_petani() -> SelectedPetani {
    expect_context::<SelectedPetani>()
}

/// `:id` route parameter, empty when absent
pub fn use_route_id() -> Memo<String> {
    let params = leptos_router::use_params_map();
    create_memo(move |_| params.with(|p| p.get("id").cloned().unwrap_or_default()))
}
