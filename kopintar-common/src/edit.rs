//! Edit form ("Edit Petani"): one text input per field

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::form::{parse_float, parse_int};
use crate::petani::{
    backend_key, edit_fields, value_text, PetaniRecord, HARGA_JUAL, HASIL_PER_TAHUN, JUMLAH_LAHAN,
    TOTAL_LAHAN, USIA,
};
use crate::{Error, Result};

const INTEGER_FIELDS: [&str; 2] = [USIA, JUMLAH_LAHAN];
const DECIMAL_FIELDS: [&str; 3] = [TOTAL_LAHAN, HASIL_PER_TAHUN, HARGA_JUAL];

/// `total_lahan_(m2)` -> `TOTAL LAHAN (M2)`, `hasil per tahun (KG)` -> `HASIL PER TAHUN (kg)`
pub fn normalize_key(key: &str) -> String {
    key.to_uppercase()
        .replace('_', " ")
        .replace("(KG)", "(kg)")
        .trim()
        .to_string()
}

/// Normalized key, snapped onto a known field when only punctuation differs
pub fn canonical_key(key: &str) -> String {
    let normalized = normalize_key(key);
    let wanted = backend_key(&normalized);
    edit_fields()
        .iter()
        .find(|field| backend_key(field) == wanted)
        .map(|field| field.to_string())
        .unwrap_or(normalized)
}

fn input_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => value.to_string(),
        other => value_text(other).unwrap_or_default(),
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditPetaniForm {
    original: PetaniRecord,
    values: BTreeMap<String, String>,
}

impl EditPetaniForm {
    pub fn from_record(record: PetaniRecord) -> Self {
        let values = record
            .as_map()
            .iter()
            .map(|(k, v)| (canonical_key(k), input_text(v)))
            .collect();
        Self {
            original: record,
            values,
        }
    }

    pub fn value(&self, key: &str) -> String {
        self.values.get(key).cloned().unwrap_or_default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Target of the PUT: `NO` of the loaded record, else `id`
    pub fn record_id(&self) -> Result<String> {
        self.original.record_id().ok_or(Error::MissingRecordId)
    }

    fn field_value(&self, key: &str) -> Value {
        let text = self.value(key);
        let text = text.trim();
        if text.is_empty() {
            return Value::Null;
        }
        if INTEGER_FIELDS.contains(&key) {
            return parse_int(text).map(Value::from).unwrap_or(Value::Null);
        }
        if DECIMAL_FIELDS.contains(&key) {
            // A stored "Rp 72.000" does not parse; send it back untouched.
            return parse_float(text)
                .map(Value::from)
                .unwrap_or_else(|| Value::from(text));
        }
        Value::from(text)
    }

    /// PUT body keyed by backend field names
    pub fn to_payload(&self) -> Map<String, Value> {
        edit_fields()
            .iter()
            .map(|field| (backend_key(field), self.field_value(field)))
            .collect()
    }
}

pub const UPDATED_MESSAGE: &str = "✅ Data petani berhasil diperbarui!";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(value: Value) -> EditPetaniForm {
        EditPetaniForm::from_record(PetaniRecord::from_value(value))
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("no_hp"), "NO HP");
        assert_eq!(normalize_key("HASIL PER TAHUN (KG)"), "HASIL PER TAHUN (kg)");
        assert_eq!(normalize_key(" nama "), "NAMA");
    }

    #[test]
    fn test_canonical_key_matches_backend_names() {
        assert_eq!(canonical_key("total_lahan_m2"), "TOTAL LAHAN (M2)");
        assert_eq!(canonical_key("hasil_per_tahun_kg"), "HASIL PER TAHUN (kg)");
        assert_eq!(canonical_key("unknown_field"), "UNKNOWN FIELD");
    }

    #[test]
    fn test_from_record_stringifies_values() {
        let f = form(json!({
            "NO": 4,
            "nama": "Budi",
            "USIA": 40,
            "CATATAN": null,
            "MASALAH": {"hama": true}
        }));
        assert_eq!(f.value("NAMA"), "Budi");
        assert_eq!(f.value("USIA"), "40");
        assert_eq!(f.value("CATATAN"), "");
        assert_eq!(f.value("MASALAH"), r#"{"hama":true}"#);
        assert_eq!(f.record_id().unwrap(), "4");
    }

    #[test]
    fn test_payload_coerces_numeric_fields() {
        let mut f = form(json!({"id": 9, "NAMA": "Siti"}));
        f.set("USIA", "41");
        f.set("TOTAL LAHAN (M2)", "2500.5");
        f.set("HARGA JUAL PER KG", "Rp 72.000");
        f.set("JUMLAH LAHAN", "");
        let payload = f.to_payload();
        assert_eq!(payload.len(), 42);
        assert_eq!(payload["nama"], json!("Siti"));
        assert_eq!(payload["usia"], json!(41));
        assert_eq!(payload["total_lahan_m2"], json!(2500.5));
        assert_eq!(payload["harga_jual_per_kg"], json!("Rp 72.000"));
        assert_eq!(payload["jumlah_lahan"], Value::Null);
        assert_eq!(payload["dusun"], Value::Null);
    }

    #[test]
    fn test_missing_id_fails_before_submit() {
        let f = form(json!({"NAMA": "Tanpa Nomor"}));
        assert!(matches!(f.record_id(), Err(Error::MissingRecordId)));
    }
}
