//! Farmer ("petani") record model
//!
//! A record is a flat JSON object keyed by the uppercase Indonesian field
//! names used on the wire. Keys keep their encounter order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const NO: &str = "NO";
pub const NAMA: &str = "NAMA";
pub const JENIS_KELAMIN: &str = "JENIS KELAMIN";
pub const USIA: &str = "USIA";
pub const NO_HP: &str = "NO HP";
pub const KECAMATAN: &str = "KECAMATAN";
pub const DESA: &str = "DESA";
pub const DUSUN: &str = "DUSUN";
pub const RT: &str = "RT";
pub const RW: &str = "RW";
pub const SURVEYOR: &str = "SURVEYOR";
pub const TGL_PENDATAAN: &str = "TGL PENDATAAN";
pub const PEMERIKSA: &str = "PEMERIKSA";
pub const TGL_PERIKSA: &str = "TGL PERIKSA";
pub const KELOMPOK_TANI: &str = "KELOMPOK TANI";
pub const LAMA_BERTANI: &str = "LAMA BERTANI";
pub const TOTAL_LAHAN: &str = "TOTAL LAHAN (M2)";
pub const JUMLAH_LAHAN: &str = "JUMLAH LAHAN";
pub const STATUS_KEPEMILIKAN: &str = "STATUS KEPEMILIKAN";
pub const JENIS_KOPI: &str = "JENIS KOPI";
pub const VARIETAS_KOPI: &str = "VARIETAS KOPI";
pub const VARIETAS_UNGGUL: &str = "VARIETAS UNGGUL";
pub const POPULASI_KOPI: &str = "POPULASI KOPI";
pub const TANAMAN_LAINNYA: &str = "TANAMAN LAINNYA";
pub const METODE_BUDIDAYA: &str = "METODE BUDIDAYA";
pub const PUPUK: &str = "PUPUK";
pub const SISTEM_IRIGASI: &str = "SISTEM IRIGASI";
pub const HASIL_PER_TAHUN: &str = "HASIL PER TAHUN (kg)";
pub const PANEN_NON_KOPI: &str = "PANEN NON KOPI";
pub const METODE_PANEN: &str = "METODE PANEN";
pub const METODE_PENGOLAHAN: &str = "METODE PENGOLAHAN";
pub const ALAT_PENGOLAHAN: &str = "ALAT PENGOLAHAN";
pub const LAMA_FERMENTASI: &str = "LAMA FERMENTASI";
pub const PROSES_PENGERINGAN: &str = "PROSES PENGERINGAN";
pub const BENTUK_PENYIMPANAN: &str = "BENTUK PENYIMPANAN";
pub const KADAR_AIR: &str = "KADAR AIR";
pub const SISTEM_PENYIMPANAN: &str = "SISTEM PENYIMPANAN";
pub const METODE_PENJUALAN: &str = "METODE PENJUALAN";
pub const HARGA_JUAL: &str = "HARGA JUAL PER KG";
pub const KEMITRAAN: &str = "KEMITRAAN";
pub const MASALAH: &str = "MASALAH";
pub const PELATIHAN: &str = "PELATIHAN YANG DIPERLUKAN";
pub const CATATAN: &str = "CATATAN";

/// Export column order. Other tooling reads these files, so the order is fixed.
pub const COLUMN_ORDER: [&str; 43] = [
    NO,
    KECAMATAN,
    DESA,
    DUSUN,
    RT,
    RW,
    SURVEYOR,
    TGL_PENDATAAN,
    PEMERIKSA,
    TGL_PERIKSA,
    NAMA,
    JENIS_KELAMIN,
    USIA,
    NO_HP,
    KELOMPOK_TANI,
    LAMA_BERTANI,
    TOTAL_LAHAN,
    JUMLAH_LAHAN,
    STATUS_KEPEMILIKAN,
    JENIS_KOPI,
    VARIETAS_KOPI,
    VARIETAS_UNGGUL,
    POPULASI_KOPI,
    TANAMAN_LAINNYA,
    METODE_BUDIDAYA,
    PUPUK,
    SISTEM_IRIGASI,
    HASIL_PER_TAHUN,
    PANEN_NON_KOPI,
    METODE_PANEN,
    METODE_PENGOLAHAN,
    ALAT_PENGOLAHAN,
    LAMA_FERMENTASI,
    PROSES_PENGERINGAN,
    BENTUK_PENYIMPANAN,
    KADAR_AIR,
    SISTEM_PENYIMPANAN,
    METODE_PENJUALAN,
    HARGA_JUAL,
    KEMITRAAN,
    MASALAH,
    PELATIHAN,
    CATATAN,
];

/// Fields editable on the edit form (everything but the sequence number)
pub fn edit_fields() -> &'static [&'static str] {
    &COLUMN_ORDER[1..]
}

/// Preferred order in the view modal: identity and location first
pub const DETAIL_ORDER: [&str; 10] = [
    NO,
    NAMA,
    JENIS_KELAMIN,
    USIA,
    NO_HP,
    KECAMATAN,
    DESA,
    DUSUN,
    RT,
    RW,
];

/// Grouping used by the detail page
pub const DETAIL_SECTIONS: &[(&str, &[&str])] = &[
    ("Data Pribadi", &[NAMA, JENIS_KELAMIN, USIA]),
    ("Lokasi", &[KECAMATAN, DESA, DUSUN, RT, RW]),
    (
        "Kontak & Administrasi",
        &[NO_HP, SURVEYOR, TGL_PENDATAAN, PEMERIKSA, TGL_PERIKSA],
    ),
    ("Kelompok Tani", &[KELOMPOK_TANI, LAMA_BERTANI, KEMITRAAN]),
    (
        "Informasi Lahan",
        &[TOTAL_LAHAN, JUMLAH_LAHAN, STATUS_KEPEMILIKAN],
    ),
    (
        "Tanaman Kopi",
        &[JENIS_KOPI, VARIETAS_KOPI, VARIETAS_UNGGUL, POPULASI_KOPI, TANAMAN_LAINNYA],
    ),
    ("Metode Budidaya", &[METODE_BUDIDAYA, PUPUK, SISTEM_IRIGASI]),
    (
        "Produksi & Panen",
        &[HASIL_PER_TAHUN, PANEN_NON_KOPI, METODE_PANEN],
    ),
    (
        "Pasca Panen & Penyimpanan",
        &[
            METODE_PENGOLAHAN,
            ALAT_PENGOLAHAN,
            LAMA_FERMENTASI,
            PROSES_PENGERINGAN,
            BENTUK_PENYIMPANAN,
            KADAR_AIR,
            SISTEM_PENYIMPANAN,
        ],
    ),
    ("Pemasaran", &[METODE_PENJUALAN, HARGA_JUAL]),
    ("Masalah & Kebutuhan", &[MASALAH, PELATIHAN, CATATAN]),
];

/// Backend model field name for a wire key: `TOTAL LAHAN (M2)` -> `total_lahan_m2`
pub fn backend_key(key: &str) -> String {
    key.trim()
        .to_lowercase()
        .replace(['(', ')'], "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Render a JSON value for display. `None` means "no value".
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// One farmer record
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetaniRecord(Map<String, Value>);

impl PetaniRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value; non-objects become an empty record
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Field lookup by wire key, falling back to the backend field name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0
            .get(key)
            .or_else(|| self.0.get(&backend_key(key)))
            .filter(|v| !v.is_null())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(value_text)
    }

    /// Display text, `missing` for absent values
    pub fn display(&self, key: &str, missing: &str) -> String {
        self.text(key).unwrap_or_else(|| missing.to_string())
    }

    /// `NO` first, then the synthetic `id`
    pub fn record_id(&self) -> Option<String> {
        [NO, "id"]
            .iter()
            .filter_map(|k| self.0.get(*k))
            .find_map(value_text)
            .map(|s| s.trim().to_string())
    }

    pub fn nama(&self) -> String {
        self.display(NAMA, "-")
    }

    /// Every field, `preferred` keys first, then the remaining keys in
    /// encounter order. Absent preferred keys are included with `missing`.
    pub fn ordered_entries(&self, preferred: &[&str], missing: &str) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = preferred
            .iter()
            .map(|k| (k.to_string(), self.display(k, missing)))
            .collect();
        for (key, value) in &self.0 {
            if preferred.contains(&key.as_str()) {
                continue;
            }
            out.push((key.clone(), value_text(value).unwrap_or_else(|| missing.to_string())));
        }
        out
    }

    /// Modal layout: identity/location, then export order, then extras
    pub fn view_entries(&self) -> Vec<(String, String)> {
        let mut preferred: Vec<&str> = DETAIL_ORDER.to_vec();
        preferred.extend(COLUMN_ORDER.iter().filter(|k| !DETAIL_ORDER.contains(k)));
        self.ordered_entries(&preferred, "-")
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for PetaniRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> PetaniRecord {
        PetaniRecord::from_value(value)
    }

    #[test]
    fn test_column_order_shape() {
        assert_eq!(COLUMN_ORDER[0], "NO");
        assert_eq!(COLUMN_ORDER[42], "CATATAN");
        assert_eq!(edit_fields().len(), 42);
        let mut unique = COLUMN_ORDER.to_vec();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 43);
    }

    #[test]
    fn test_backend_key() {
        assert_eq!(backend_key("TOTAL LAHAN (M2)"), "total_lahan_m2");
        assert_eq!(backend_key("HASIL PER TAHUN (kg)"), "hasil_per_tahun_kg");
        assert_eq!(backend_key("NO HP"), "no_hp");
        assert_eq!(backend_key("PELATIHAN YANG DIPERLUKAN"), "pelatihan_yang_diperlukan");
    }

    #[test]
    fn test_value_text_numbers() {
        assert_eq!(value_text(&json!(40)), Some("40".to_string()));
        assert_eq!(value_text(&json!(40.0)), Some("40".to_string()));
        assert_eq!(value_text(&json!(2.5)), Some("2.5".to_string()));
        assert_eq!(value_text(&json!(null)), None);
        assert_eq!(value_text(&json!("  ")), None);
    }

    #[test]
    fn test_record_id_prefers_no() {
        assert_eq!(record(json!({"NO": 7, "id": 3})).record_id(), Some("7".to_string()));
        assert_eq!(record(json!({"id": "12"})).record_id(), Some("12".to_string()));
        assert_eq!(record(json!({"NAMA": "Budi"})).record_id(), None);
    }

    #[test]
    fn test_get_falls_back_to_backend_key() {
        let r = record(json!({"total_lahan_m2": 2500, "NAMA": "Siti"}));
        assert_eq!(r.display(TOTAL_LAHAN, "-"), "2500");
        assert_eq!(r.display(USIA, "N/A"), "N/A");
    }

    #[test]
    fn test_view_entries_order() {
        let r = record(json!({
            "CATATAN": "rajin",
            "EXTRA": "x",
            "NAMA": "Budi",
            "NO": 1,
            "DUSUN": null
        }));
        let entries = r.view_entries();
        assert_eq!(entries[0], ("NO".to_string(), "1".to_string()));
        assert_eq!(entries[1], ("NAMA".to_string(), "Budi".to_string()));
        assert_eq!(entries[7], ("DUSUN".to_string(), "-".to_string()));
        assert_eq!(entries.len(), 44);
        assert_eq!(entries.last(), Some(&("EXTRA".to_string(), "x".to_string())));
    }
}
