//! Petani Flow Tests
//! End-to-end behavior across form, listing, edit, export and session state

use kopintar_common::edit::EditPetaniForm;
use kopintar_common::export::{export, ExportFormat, EMPTY_EXPORT};
use kopintar_common::form::CreatePetaniForm;
use kopintar_common::listing::{filter_rows, normalize_rows, ListState, Pagination, PAGE_SIZE};
use kopintar_common::petani::*;
use kopintar_common::session::MemoryTokenStore;
use kopintar_common::{
    guard, ApiError, DeferredActions, Guarded, PendingAction, Session, TokenStore,
};
use serde_json::json;

// ============== Create -> List Tests ==============

#[test]
fn test_created_record_lists_with_placeholders() {
    let mut form = CreatePetaniForm::new();
    form.set(NAMA, "Budi");
    form.set(USIA, "40");
    let payload = form.to_payload().unwrap();

    // Backend echoes the record with an assigned number
    let mut stored = payload.into_value();
    stored[NO] = json!(17);

    let rows = normalize_rows(vec![stored]);
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.id, "17");
    assert_eq!(row.nama, "Budi");
    assert_eq!(row.usia, "40");
    assert_eq!(row.luas_lahan, "-");
    assert_eq!(row.produksi, "-");
    assert_eq!(row.harga, "-");
    assert_eq!(row.dusun, "-");
}

#[test]
fn test_search_and_paginate_large_list() {
    let raw = (1..=25)
        .map(|i| {
            let dusun = if i % 2 == 0 { "Sumberurip" } else { "Jawai Talu" };
            json!({"NO": i, "NAMA": format!("Petani {}", i), "DUSUN": dusun})
        })
        .collect();
    let rows = normalize_rows(raw);

    let filtered = filter_rows(&rows, "sumberurip");
    assert_eq!(filtered.len(), 12);

    let mut pages = Pagination::new(filtered.len(), PAGE_SIZE);
    pages.next();
    let page: Vec<_> = filtered[pages.range()].iter().map(|r| r.id.as_str()).collect();
    assert_eq!(page, vec!["22", "24"]);
    assert_eq!(pages.label(), "Halaman 2 dari 2");
}

// ============== Edit Tests ==============

#[test]
fn test_edit_round_trip_through_backend_keys() {
    let record = PetaniRecord::from_value(json!({
        "NO": 5,
        "NAMA": "Siti",
        "USIA": 38,
        "TOTAL LAHAN (M2)": 1200,
        "HARGA JUAL PER KG": "Rp 72.000"
    }));
    let mut form = EditPetaniForm::from_record(record);
    assert_eq!(form.record_id().unwrap(), "5");

    form.set(USIA, "39");
    form.set(TOTAL_LAHAN, "1500.5");
    let payload = form.to_payload();
    assert_eq!(payload["usia"], json!(39));
    assert_eq!(payload["total_lahan_m2"], json!(1500.5));
    assert_eq!(payload["harga_jual_per_kg"], json!("Rp 72.000"));
}

#[test]
fn test_rejected_edit_shows_backend_validation_payload() {
    let form = EditPetaniForm::from_record(PetaniRecord::from_value(json!({"NO": 7, "USIA": 50})));
    assert_eq!(form.record_id().unwrap(), "7");

    let body = json!({
        "detail": [{"loc": ["body", "usia"], "msg": "value is not a valid integer"}]
    });
    let err = ApiError::from_status(422, "Unprocessable Entity", Some(body));
    let msg = err.user_message();
    assert!(msg.starts_with("Gagal menyimpan data. Periksa format input Anda:\n"));
    assert!(msg.contains("value is not a valid integer"));
    assert!(msg.contains("usia"));
}

// ============== Export Tests ==============

#[test]
fn test_export_filtered_subset() {
    let rows = normalize_rows(vec![
        json!({"NO": 1, "NAMA": "Budi", "DUSUN": "Sumberurip"}),
        json!({"NO": 2, "NAMA": "Siti", "DUSUN": "Jawai Talu"}),
    ]);
    let filtered = filter_rows(&rows, "siti");
    let bytes = export(filtered.iter().map(|r| &r.full), ExportFormat::Csv).unwrap();
    let csv = String::from_utf8(bytes).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.lines().nth(1).unwrap().starts_with("2,Siti,"));

    let none = filter_rows(&rows, "zzz");
    let err = export(none.iter().map(|r| &r.full), ExportFormat::Json).unwrap_err();
    assert_eq!(err.to_string(), EMPTY_EXPORT);
}

// ============== Session Tests ==============

#[test]
fn test_unauthorized_response_ends_session() {
    let store = MemoryTokenStore::default();
    store.set("stale-token");
    let mut session = Session::restore(store.clone());
    assert!(session.is_logged_in());

    let err = ApiError::from_status(401, "Unauthorized", Some(json!({"detail": "Invalid token"})));
    let state = ListState::Error(err.clone());
    assert!(state.rows().is_empty());

    if err.is_session_expired() {
        assert!(session.expire());
    }
    assert!(!session.is_logged_in());
    assert_eq!(store.get(), None);
    assert!(!Session::restore(store).is_logged_in());
}

#[test]
fn test_deferred_delete_replays_after_login() {
    let store = MemoryTokenStore::default();
    let mut session = Session::restore(store);
    let mut deferred = DeferredActions::new();

    let first = guard(session.is_logged_in(), &mut deferred, PendingAction::Delete("9"));
    assert_eq!(first, Guarded::NeedsLogin);

    session.login("fresh-token");
    assert_eq!(deferred.take_on_login(), Some(PendingAction::Delete("9")));
    assert_eq!(deferred.take_on_login(), None);

    let second = guard(session.is_logged_in(), &mut deferred, PendingAction::Add);
    assert_eq!(second, Guarded::Proceed(PendingAction::Add));
}
