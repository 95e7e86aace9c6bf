//! Recommendation assistant: response formatting, free-text detail parsing,
//! chat transcript and the problem-report form.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::petani::value_text;

pub const NOT_FOUND: &str = "❌ Tidak ada rekomendasi yang ditemukan.";
pub const GREETING: &str = "Halo! Saya asisten AI yang siap membantu masalah di perkebunan kopi ☕🌱\n\nCeritakan masalah yang Anda hadapi, dan saya akan memberikan rekomendasi solusi yang praktis!";
pub const APOLOGY: &str =
    "⚠️ Maaf, terjadi kesalahan saat memproses permintaan Anda. Silakan coba lagi.";
pub const RECOMMENDATION_FAILED: &str = "Gagal mengambil rekomendasi dari server.";
pub const REPORT_FAILED: &str = "Gagal menyimpan laporan ke server.";

/// "1. Siapkan alat 2. Jemur" inside a description
static STEP_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\.\s+").unwrap());

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationRequest {
    pub masalah: String,
    pub detail_petani: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationResponse {
    #[serde(default)]
    pub recommendation: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct LaporanRequest {
    pub masalah: String,
    pub nama_petani: String,
    pub detail_petani: Map<String, Value>,
}

fn item_text(item: &Value) -> String {
    value_text(item).unwrap_or_default()
}

fn field<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn numbered<F>(items: &[Value], render: F) -> String
where
    F: Fn(usize, &Value) -> String,
{
    items
        .iter()
        .enumerate()
        .map(|(i, item)| render(i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn non_empty_array<'a>(rec: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    rec.get(key).and_then(Value::as_array).filter(|a| !a.is_empty())
}

/// Render a recommendation (object or JSON string) as readable sections
pub fn format_recommendation(recommendation: &Value) -> String {
    let parsed;
    let rec = match recommendation {
        Value::Null => return NOT_FOUND.to_string(),
        Value::String(s) if s.is_empty() => return NOT_FOUND.to_string(),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(v) => {
                parsed = v;
                &parsed
            }
            Err(_) => return s.clone(),
        },
        other => other,
    };

    let mut sections = Vec::new();

    if let Some(masalah) = rec.get("masalah_utama").and_then(value_text) {
        sections.push(format!("Masalah Utama\n{}", masalah));
    }

    if let Some(items) = non_empty_array(rec, "prioritas_penanganan") {
        let body = numbered(items, |n, item| format!("{}. {}", n, item_text(item)));
        sections.push(format!("Prioritas Penanganan:\n{}", body));
    }

    if let Some(items) = non_empty_array(rec, "rekomendasi_pelatihan") {
        let body = numbered(items, |n, item| match field(item, "topik") {
            Some(topik) => format!(
                "{}. {}\n   {}",
                n,
                topik,
                field(item, "deskripsi").unwrap_or("")
            ),
            None => format!("{}. {}", n, item_text(item)),
        });
        sections.push(format!("Rekomendasi Pelatihan:\n{}", body));
    }

    if let Some(items) = non_empty_array(rec, "solusi_praktis") {
        let body = numbered(items, |n, item| match field(item, "nama_solusi") {
            Some(nama) => {
                let desc = field(item, "deskripsi").unwrap_or("");
                let steps = STEP_REGEX.replace_all(desc, "\n   • ");
                let steps = steps.trim();
                if steps.is_empty() {
                    format!("{}. {}", n, nama)
                } else {
                    format!("{}. {}\n   {}", n, nama, steps)
                }
            }
            None => format!("{}. {}", n, item_text(item)),
        });
        sections.push(format!("Solusi Praktis:\n{}", body));
    }

    if sections.is_empty() {
        NOT_FOUND.to_string()
    } else {
        sections.join("\n\n")
    }
}

/// `key: value` per line into a map; lines without a key or colon are skipped
pub fn parse_detail(text: &str) -> Map<String, Value> {
    text.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.to_string(), Value::from(v)))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Ai,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub message: String,
}

/// Append-only chat history, seeded with the greeting
#[derive(Clone, Debug, PartialEq)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: ChatRole::Ai,
                message: GREETING.to_string(),
            }],
        }
    }
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push_user(&mut self, message: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            message: message.into(),
        });
    }

    pub fn push_ai(&mut self, message: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: ChatRole::Ai,
            message: message.into(),
        });
    }

    pub fn push_failure(&mut self) {
        self.push_ai(APOLOGY);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportStatus {
    #[default]
    Idle,
    Success,
    Error,
}

/// Delay before a report status falls back to idle
pub const STATUS_RESET_MS: u32 = 3000;

/// Problem report input; name and problem are required
pub fn build_report(nama_petani: &str, masalah: &str, detail: &str) -> Option<LaporanRequest> {
    let (nama, masalah) = (nama_petani.trim(), masalah.trim());
    if nama.is_empty() || masalah.is_empty() {
        return None;
    }
    Some(LaporanRequest {
        masalah: masalah.to_string(),
        nama_petani: nama.to_string(),
        detail_petani: parse_detail(detail),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_missing_input() {
        assert_eq!(format_recommendation(&Value::Null), NOT_FOUND);
        assert_eq!(format_recommendation(&json!("")), NOT_FOUND);
        assert_eq!(format_recommendation(&json!({})), NOT_FOUND);
    }

    #[test]
    fn test_format_returns_unparseable_string() {
        assert_eq!(format_recommendation(&json!("not json")), "not json");
    }

    #[test]
    fn test_format_single_section() {
        let out = format_recommendation(&json!({"masalah_utama": "X"}));
        assert_eq!(out, "Masalah Utama\nX");
        assert!(!out.contains("Prioritas"));
        assert!(!out.contains("Solusi"));
    }

    #[test]
    fn test_format_from_json_string() {
        let raw = r#"{"masalah_utama":"Hama","prioritas_penanganan":["Sanitasi","Pangkas"]}"#;
        assert_eq!(
            format_recommendation(&json!(raw)),
            "Masalah Utama\nHama\n\nPrioritas Penanganan:\n1. Sanitasi\n2. Pangkas"
        );
    }

    #[test]
    fn test_format_training_and_solutions() {
        let rec = json!({
            "rekomendasi_pelatihan": [
                {"topik": "Pengendalian PBKo", "deskripsi": "Pelatihan hama"},
                "Pasca panen"
            ],
            "solusi_praktis": [
                {"nama_solusi": "Rampasan", "deskripsi": "1. Petik semua buah 2. Rendam air panas"},
                {"nama_solusi": "Perangkap"}
            ],
            "prioritas_penanganan": []
        });
        let out = format_recommendation(&rec);
        assert_eq!(
            out,
            "Rekomendasi Pelatihan:\n1. Pengendalian PBKo\n   Pelatihan hama\n2. Pasca panen\n\n\
             Solusi Praktis:\n1. Rampasan\n   • Petik semua buah \n   • Rendam air panas\n2. Perangkap"
        );
    }

    #[test]
    fn test_parse_detail_lines() {
        let map = parse_detail("Lokasi: Doko\nlahan : 2 ha\n: kosong\ntanpa titik dua\nJam: 08:00");
        assert_eq!(map.len(), 3);
        assert_eq!(map["Lokasi"], json!("Doko"));
        assert_eq!(map["lahan"], json!("2 ha"));
        assert_eq!(map["Jam"], json!("08:00"));
        assert!(parse_detail("   ").is_empty());
    }

    #[test]
    fn test_transcript_is_seeded_and_appends() {
        let mut chat = ChatTranscript::new();
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].role, ChatRole::Ai);
        chat.push_user("daun menguning");
        chat.push_failure();
        assert_eq!(chat.messages().len(), 3);
        assert_eq!(chat.messages()[2].message, APOLOGY);
    }

    #[test]
    fn test_build_report_requires_name_and_problem() {
        assert!(build_report("", "hama", "").is_none());
        assert!(build_report("Budi", "  ", "").is_none());
        let report = build_report(" Budi ", "hama", "Dusun: Sumberurip").unwrap();
        assert_eq!(report.nama_petani, "Budi");
        assert_eq!(report.detail_petani["Dusun"], json!("Sumberurip"));
    }
}
