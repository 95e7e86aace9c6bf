//! Create form ("Tambah Petani") model and payload builder

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

use crate::locale::format_thousands;
use crate::petani::*;
use crate::{Error, Result};

/// Dropdown sentinel that unlocks a free-text companion input
pub const LAINNYA: &str = "Lainnya";

/// Resolve a dropdown + free-text pair into the stored value.
///
/// `Lainnya` with text yields the text; otherwise the dropdown value; blank yields `None`.
pub fn resolve_choice(value: &str, other: &str) -> Option<String> {
    let other = other.trim();
    if value == LAINNYA && !other.is_empty() {
        Some(other.to_string())
    } else if !value.is_empty() {
        Some(value.to_string())
    } else {
        None
    }
}

/// Dropdown with an "other" escape hatch
#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceField {
    pub options: &'static [&'static str],
    pub value: String,
    pub other: String,
}

impl ChoiceField {
    pub fn new(options: &'static [&'static str]) -> Self {
        Self {
            options,
            value: String::new(),
            other: String::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>, other: impl Into<String>) -> Self {
        self.value = value.into();
        self.other = other.into();
        self
    }

    pub fn wants_other(&self) -> bool {
        self.value == LAINNYA
    }

    pub fn resolve(&self) -> Option<String> {
        resolve_choice(&self.value, &self.other)
    }
}

/// Leading integer of `text`, like a lenient `parseInt`: `"40 th"` -> 40
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Leading decimal of `text`, like a lenient `parseFloat`: `"2.5 ha"` -> 2.5, `"1e3"` -> 1000
pub fn parse_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = match bytes.first() {
        Some(b'+' | b'-') => 1,
        _ => 0,
    };
    let int_end = digits_from(end);
    let mut seen_digit = int_end > end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        seen_digit |= frac_end > end + 1;
        end = frac_end;
    }
    if !seen_digit {
        return None;
    }
    // Exponent only counts when at least one digit follows it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    text[..end].trim_end_matches('.').parse::<f64>().ok()
}

/// `dd/MM/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Value of an `<input type="date">` (`yyyy-mm-dd`)
pub fn parse_date_input(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

/// Price as stored by the backend: `"72000"` -> `"Rp 72.000"`
pub fn format_price(text: &str) -> Option<String> {
    parse_int(text).map(|n| format!("Rp {}", format_thousands(n)))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldKind {
    Text,
    TextArea,
    Integer,
    Date,
    Price,
    Choice {
        options: &'static [&'static str],
        integer: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: &'static str,
    pub required: bool,
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind,
        placeholder: "",
        required: false,
    }
}

const fn choice(
    key: &'static str,
    label: &'static str,
    options: &'static [&'static str],
) -> FieldSpec {
    field(key, label, FieldKind::Choice { options, integer: false })
}

pub const OPT_JENIS_KELAMIN: &[&str] = &["L", "P"];
pub const OPT_DUSUN: &[&str] = &[
    "Sumberurip",
    "Sumbermanggis",
    "Jawai Talu",
    "Sumberagung",
    LAINNYA,
];
pub const OPT_RT: &[&str] = &["1", "2", "4", "5", "6", LAINNYA];
pub const OPT_RW: &[&str] = &["1", "2", "3", "4", LAINNYA];
pub const OPT_KELOMPOK_TANI: &[&str] = &[
    "SBT 1", "SBT 2", "SBT 3", "SBT 4", "SBT 5", "SBT 6", "SBT 7", LAINNYA,
];
pub const OPT_STATUS_KEPEMILIKAN: &[&str] = &["Milik Sendiri", "Sewa", "Milik Keluarga", LAINNYA];
pub const OPT_JENIS_KOPI: &[&str] = &["Arabika", "Robusta", "Sersah", LAINNYA];
pub const OPT_VARIETAS_UNGGUL: &[&str] = &["Unggul", "Tugusari", "BP 38", "Tidak ada", LAINNYA];
pub const OPT_METODE_BUDIDAYA: &[&str] = &["Kombinasi", "Tradisional", LAINNYA];
pub const OPT_PUPUK: &[&str] = &["Kombinasi", "Organik", "Kimia", LAINNYA];
pub const OPT_SISTEM_IRIGASI: &[&str] = &["Tadah hujan", "Kombinasi", "Pompa air", LAINNYA];
pub const OPT_METODE_PANEN: &[&str] = &["Petik Selektif", "Petik Merah", LAINNYA];
pub const OPT_METODE_PENGOLAHAN: &[&str] = &["Honey", "Natural", LAINNYA];
pub const OPT_ALAT_PENGOLAHAN: &[&str] = &["Pulper", "Fermentasi", "Tidak Punya", LAINNYA];
pub const OPT_LAMA_FERMENTASI: &[&str] = &[
    "5 hari", "10 hari", "14 hari", "20 hari", "Tanpa Fermentasi", LAINNYA,
];
pub const OPT_PROSES_PENGERINGAN: &[&str] = &["Lantai", "Widek", "Terpal", LAINNYA];
pub const OPT_BENTUK_PENYIMPANAN: &[&str] = &[
    "Sesek",
    "Green Bean",
    "Gelondong",
    "Tidak Tahu",
    LAINNYA,
];
pub const OPT_KADAR_AIR: &[&str] = &["Tidak Tahu", LAINNYA];
pub const OPT_SISTEM_PENYIMPANAN: &[&str] = &["Karung", "Plastik (iner)", LAINNYA];
pub const OPT_METODE_PENJUALAN: &[&str] = &["Tengkulak", "Langsung", LAINNYA];
pub const OPT_KEMITRAAN: &[&str] = &["Tengkulak", "User", "Koperasi", "Tidak Tahu", LAINNYA];

/// Form layout: section title and its fields
pub const CREATE_SECTIONS: &[(&str, &[FieldSpec])] = &[
    (
        "Informasi Dasar",
        &[
            FieldSpec {
                placeholder: "Contoh: Gatot",
                required: true,
                ..field(NAMA, "Nama", FieldKind::Text)
            },
            choice(JENIS_KELAMIN, "Jenis Kelamin", OPT_JENIS_KELAMIN),
            field(USIA, "Usia", FieldKind::Integer),
            field(NO_HP, "No HP", FieldKind::Text),
        ],
    ),
    (
        "Informasi Lokasi",
        &[
            FieldSpec {
                placeholder: "Contoh: Doko",
                ..field(KECAMATAN, "Kecamatan", FieldKind::Text)
            },
            FieldSpec {
                placeholder: "Contoh: Sumberurip",
                ..field(DESA, "Desa", FieldKind::Text)
            },
            choice(DUSUN, "Dusun", OPT_DUSUN),
            field(RT, "RT", FieldKind::Choice { options: OPT_RT, integer: true }),
            field(RW, "RW", FieldKind::Choice { options: OPT_RW, integer: true }),
        ],
    ),
    (
        "Informasi Surveyor",
        &[
            field(SURVEYOR, "Surveyor", FieldKind::Text),
            field(TGL_PENDATAAN, "Tanggal Pendataan", FieldKind::Date),
            field(PEMERIKSA, "Pemeriksa", FieldKind::Text),
            field(TGL_PERIKSA, "Tanggal Periksa", FieldKind::Date),
        ],
    ),
    (
        "Informasi Pertanian",
        &[
            choice(KELOMPOK_TANI, "Kelompok Tani", OPT_KELOMPOK_TANI),
            field(LAMA_BERTANI, "Lama Bertani (tahun)", FieldKind::Integer),
            field(TOTAL_LAHAN, "Total Lahan (M2)", FieldKind::Integer),
            field(JUMLAH_LAHAN, "Jumlah Lahan", FieldKind::Integer),
            choice(STATUS_KEPEMILIKAN, "Status Kepemilikan", OPT_STATUS_KEPEMILIKAN),
            choice(JENIS_KOPI, "Jenis Kopi", OPT_JENIS_KOPI),
            field(VARIETAS_KOPI, "Varietas Kopi", FieldKind::Text),
            choice(VARIETAS_UNGGUL, "Varietas Unggul", OPT_VARIETAS_UNGGUL),
            field(POPULASI_KOPI, "Populasi Kopi", FieldKind::Integer),
            field(TANAMAN_LAINNYA, "Tanaman Lainnya", FieldKind::Text),
            choice(METODE_BUDIDAYA, "Metode Budidaya", OPT_METODE_BUDIDAYA),
            choice(PUPUK, "Pupuk", OPT_PUPUK),
            choice(SISTEM_IRIGASI, "Sistem Irigasi", OPT_SISTEM_IRIGASI),
        ],
    ),
    (
        "Informasi Panen & Pengolahan",
        &[
            field(HASIL_PER_TAHUN, "Hasil Per Tahun (kg)", FieldKind::Integer),
            field(PANEN_NON_KOPI, "Panen Non Kopi", FieldKind::Text),
            choice(METODE_PANEN, "Metode Panen", OPT_METODE_PANEN),
            choice(METODE_PENGOLAHAN, "Metode Pengolahan", OPT_METODE_PENGOLAHAN),
            choice(ALAT_PENGOLAHAN, "Alat Pengolahan", OPT_ALAT_PENGOLAHAN),
            choice(LAMA_FERMENTASI, "Lama Fermentasi", OPT_LAMA_FERMENTASI),
            choice(PROSES_PENGERINGAN, "Proses Pengeringan", OPT_PROSES_PENGERINGAN),
            choice(BENTUK_PENYIMPANAN, "Bentuk Penyimpanan", OPT_BENTUK_PENYIMPANAN),
            choice(KADAR_AIR, "Kadar Air", OPT_KADAR_AIR),
            choice(SISTEM_PENYIMPANAN, "Sistem Penyimpanan", OPT_SISTEM_PENYIMPANAN),
        ],
    ),
    (
        "Informasi Penjualan",
        &[
            choice(METODE_PENJUALAN, "Metode Penjualan", OPT_METODE_PENJUALAN),
            field(HARGA_JUAL, "Harga Jual Per KG (Rp)", FieldKind::Price),
            choice(KEMITRAAN, "Kemitraan", OPT_KEMITRAAN),
        ],
    ),
    (
        "Informasi Tambahan",
        &[
            field(MASALAH, "Masalah (Opsional)", FieldKind::TextArea),
            field(PELATIHAN, "Pelatihan Yang Diperlukan (Opsional)", FieldKind::TextArea),
            field(CATATAN, "Catatan (Opsional)", FieldKind::TextArea),
        ],
    ),
];

pub fn create_fields() -> impl Iterator<Item = &'static FieldSpec> {
    CREATE_SECTIONS.iter().flat_map(|(_, fields)| fields.iter())
}

/// Raw input state of the create form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreatePetaniForm {
    inputs: BTreeMap<&'static str, String>,
    others: BTreeMap<&'static str, String>,
}

impl CreatePetaniForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, key: &str) -> String {
        self.inputs.get(key).cloned().unwrap_or_default()
    }

    pub fn other(&self, key: &str) -> String {
        self.others.get(key).cloned().unwrap_or_default()
    }

    pub fn set(&mut self, key: &'static str, value: impl Into<String>) {
        self.inputs.insert(key, value.into());
    }

    pub fn set_other(&mut self, key: &'static str, value: impl Into<String>) {
        self.others.insert(key, value.into());
    }

    pub fn reset(&mut self) {
        self.inputs.clear();
        self.others.clear();
    }

    pub fn choice(&self, spec: &FieldSpec) -> Option<ChoiceField> {
        match spec.kind {
            FieldKind::Choice { options, .. } => Some(
                ChoiceField::new(options).with_value(self.value(spec.key), self.other(spec.key)),
            ),
            _ => None,
        }
    }

    /// Required fields filled and every `Lainnya` pick has its text
    pub fn validate(&self) -> Result<()> {
        for spec in create_fields() {
            if spec.required && self.value(spec.key).trim().is_empty() {
                return Err(Error::Form(format!("{} wajib diisi.", spec.label)));
            }
            if let Some(choice) = self.choice(spec) {
                if choice.wants_other() && choice.other.trim().is_empty() {
                    return Err(Error::Form(format!(
                        "{}: isi keterangan untuk pilihan Lainnya.",
                        spec.label
                    )));
                }
            }
        }
        Ok(())
    }

    fn field_value(&self, spec: &FieldSpec) -> Value {
        let raw = self.value(spec.key);
        let text = raw.trim();
        let value = match spec.kind {
            FieldKind::Text | FieldKind::TextArea => {
                (!text.is_empty()).then(|| Value::from(text))
            }
            FieldKind::Integer => parse_int(text).map(Value::from),
            FieldKind::Date => parse_date_input(text).map(|d| Value::from(format_date(d))),
            FieldKind::Price => format_price(text).map(Value::from),
            FieldKind::Choice { options, integer } => {
                let resolved = ChoiceField::new(options)
                    .with_value(raw.clone(), self.other(spec.key))
                    .resolve();
                if integer {
                    resolved.as_deref().and_then(parse_int).map(Value::from)
                } else {
                    resolved.map(Value::from)
                }
            }
        };
        value.unwrap_or(Value::Null)
    }

    /// POST body for `/petani/`; every field present, absent ones as `null`
    pub fn to_payload(&self) -> Result<PetaniRecord> {
        self.validate()?;
        let mut record = PetaniRecord::new();
        for spec in create_fields() {
            record.insert(spec.key, self.field_value(spec));
        }
        Ok(record)
    }
}

/// Success notice after a create
pub const CREATED_MESSAGE: &str = "✅ Data petani berhasil ditambahkan!";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_choice_rules() {
        assert_eq!(resolve_choice(LAINNYA, "Kopi Luwak"), Some("Kopi Luwak".to_string()));
        assert_eq!(resolve_choice(LAINNYA, ""), Some(LAINNYA.to_string()));
        assert_eq!(resolve_choice("Arabika", "ignored"), Some("Arabika".to_string()));
        assert_eq!(resolve_choice("", "ignored"), None);
        assert_eq!(resolve_choice("", ""), None);
    }

    #[test]
    fn test_parse_int_is_lenient() {
        assert_eq!(parse_int("40"), Some(40));
        assert_eq!(parse_int(" 12 tahun"), Some(12));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("2.9"), Some(2));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn test_parse_float_is_lenient() {
        assert_eq!(parse_float("2.5"), Some(2.5));
        assert_eq!(parse_float("1500 m2"), Some(1500.0));
        assert_eq!(parse_float("7."), Some(7.0));
        assert_eq!(parse_float("1e3"), Some(1000.0));
        assert_eq!(parse_float("2.5E-1 kg"), Some(0.25));
        assert_eq!(parse_float("3e"), Some(3.0));
        assert_eq!(parse_float(".5"), Some(0.5));
        assert_eq!(parse_float("Rp 72.000"), None);
        assert_eq!(parse_float(""), None);
    }

    #[test]
    fn test_date_and_price_formatting() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "05/03/2024");
        assert_eq!(parse_date_input("2024-03-05"), Some(date));
        assert_eq!(format_price("72000"), Some("Rp 72.000".to_string()));
        assert_eq!(format_price(""), None);
    }

    #[test]
    fn test_create_sections_cover_every_field_once() {
        let keys: Vec<&str> = create_fields().map(|f| f.key).collect();
        assert_eq!(keys.len(), 42);
        for key in edit_fields() {
            assert!(keys.contains(key), "missing {}", key);
        }
    }

    #[test]
    fn test_payload_minimal_form() {
        let mut form = CreatePetaniForm::new();
        form.set(NAMA, "Budi");
        form.set(USIA, "40");
        let payload = form.to_payload().unwrap();
        let map = payload.as_map();
        assert_eq!(map.len(), 42);
        assert_eq!(map[NAMA], json!("Budi"));
        assert_eq!(map[USIA], json!(40));
        assert_eq!(map[TOTAL_LAHAN], Value::Null);
        assert_eq!(map[HARGA_JUAL], Value::Null);
        assert_eq!(map[RT], Value::Null);
    }

    #[test]
    fn test_payload_resolves_choices_and_coerces() {
        let mut form = CreatePetaniForm::new();
        form.set(NAMA, "Siti");
        form.set(DUSUN, LAINNYA);
        form.set_other(DUSUN, "Krajan");
        form.set(RT, LAINNYA);
        form.set_other(RT, "9");
        form.set(RW, "3");
        form.set(JENIS_KOPI, "Robusta");
        form.set(HARGA_JUAL, "72000");
        form.set(TGL_PENDATAAN, "2024-01-31");
        let map = form.to_payload().unwrap().into_value();
        assert_eq!(map[DUSUN], json!("Krajan"));
        assert_eq!(map[RT], json!(9));
        assert_eq!(map[RW], json!(3));
        assert_eq!(map[JENIS_KOPI], json!("Robusta"));
        assert_eq!(map[HARGA_JUAL], json!("Rp 72.000"));
        assert_eq!(map[TGL_PENDATAAN], json!("31/01/2024"));
        assert!(!map.to_string().contains(LAINNYA));
    }

    #[test]
    fn test_validate_rejects_missing_name_and_bare_lainnya() {
        let form = CreatePetaniForm::new();
        assert!(matches!(form.validate(), Err(Error::Form(_))));

        let mut form = CreatePetaniForm::new();
        form.set(NAMA, "Budi");
        form.set(PUPUK, LAINNYA);
        let err = form.to_payload().unwrap_err();
        assert_eq!(err.to_string(), "Pupuk: isi keterangan untuk pilihan Lainnya.");
    }

    #[test]
    fn test_reset_clears_inputs() {
        let mut form = CreatePetaniForm::new();
        form.set(NAMA, "Budi");
        form.set_other(DUSUN, "Krajan");
        form.reset();
        assert_eq!(form, CreatePetaniForm::new());
    }
}
