//! Dashboard aggregates and chart shaping

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::locale::format_number;

pub const PIE_COLORS: [&str; 8] = [
    "#2d5f3f", "#b45309", "#6b9d78", "#a78a5e", "#d97706", "#c9a96e", "#3d6b4a", "#9d8860",
];

/// Names that mean "no value" in the survey data
const PLACEHOLDER_NAMES: [&str; 6] = ["", "0", "-", "null", "tidak ada", "none"];

const MONTHS: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
    "Oktober", "November", "Desember",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSummary {
    pub total_petani: f64,
    pub total_lahan_ha: f64,
    pub kapasitas_produksi_kg_tahun: f64,
    pub rata_rata_harga_rp: f64,
    pub rata_rata_lama_bertani_tahun: f64,
    pub rata_rata_usia_tahun: f64,
    pub total_populasi_kopi: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl DashboardSummary {
    pub fn stat_cards(&self) -> Vec<StatCard> {
        let harga = if self.rata_rata_harga_rp > 0.0 {
            format!("Rp {}", format_number(self.rata_rata_harga_rp))
        } else {
            "Rp 0".to_string()
        };
        vec![
            StatCard {
                label: "Total Petani",
                value: format_number(self.total_petani),
                unit: "Orang",
            },
            StatCard {
                label: "Total Lahan",
                value: format_number(self.total_lahan_ha),
                unit: "Ha",
            },
            StatCard {
                label: "Kapasitas Produksi",
                value: format_number(self.kapasitas_produksi_kg_tahun),
                unit: "kg/tahun",
            },
            StatCard {
                label: "Rata-Rata Harga",
                value: harga,
                unit: "/kg",
            },
            StatCard {
                label: "Total Populasi Kopi",
                value: format_number(self.total_populasi_kopi),
                unit: "Pohon",
            },
        ]
    }
}

/// `{kategori, jumlah}` rows of the distribusi endpoints
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CategoryCount {
    pub kategori: Option<String>,
    pub jumlah: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VarietyCount {
    pub varietas: Option<String>,
    pub jumlah: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GroupYield {
    pub kelompok: Option<String>,
    pub total_hasil: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GroupArea {
    pub kelompok: Option<String>,
    pub total_lahan_ha: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GroupPopulation {
    pub kelompok: Option<String>,
    pub total_populasi: f64,
}

/// One bar or pie slice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartDatum {
    pub name: String,
    pub value: f64,
    pub fill: String,
}

impl ChartDatum {
    pub fn new(name: Option<String>, value: f64) -> Self {
        Self {
            name: name.unwrap_or_default(),
            value,
            fill: String::new(),
        }
    }
}

impl From<CategoryCount> for ChartDatum {
    fn from(row: CategoryCount) -> Self {
        Self::new(row.kategori, row.jumlah)
    }
}

impl From<VarietyCount> for ChartDatum {
    fn from(row: VarietyCount) -> Self {
        Self::new(row.varietas, row.jumlah)
    }
}

impl From<GroupYield> for ChartDatum {
    fn from(row: GroupYield) -> Self {
        Self::new(row.kelompok, row.total_hasil)
    }
}

impl From<GroupArea> for ChartDatum {
    fn from(row: GroupArea) -> Self {
        Self::new(row.kelompok, row.total_lahan_ha)
    }
}

impl From<GroupPopulation> for ChartDatum {
    fn from(row: GroupPopulation) -> Self {
        Self::new(row.kelompok, row.total_populasi)
    }
}

/// Drop non-positive values and placeholder names
pub fn filter_valid(data: Vec<ChartDatum>) -> Vec<ChartDatum> {
    data.into_iter()
        .filter(|d| d.value > 0.0)
        .filter(|d| {
            let name = d.name.trim().to_lowercase();
            !PLACEHOLDER_NAMES.contains(&name.as_str())
        })
        .collect()
}

/// `PETIK MERAH` -> `Petik Merah`
pub fn title_case(text: &str) -> String {
    text.to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Wire rows to chart data: mapped, filtered, title-cased
pub fn chart_data<T: Into<ChartDatum>>(rows: Vec<T>) -> Vec<ChartDatum> {
    filter_valid(rows.into_iter().map(Into::into).collect())
        .into_iter()
        .map(|d| ChartDatum {
            name: title_case(&d.name),
            ..d
        })
        .collect()
}

/// Bar fills darken with the value: `rgba(26, 77, 46, 0.5..=1)`
pub fn bar_colors(data: &[ChartDatum]) -> Vec<String> {
    let max = data.iter().map(|d| d.value).fold(f64::MIN, f64::max);
    let min = data.iter().map(|d| d.value).fold(f64::MAX, f64::min);
    let range = max - min;
    data.iter()
        .map(|d| {
            let normalized = if range == 0.0 { 1.0 } else { (d.value - min) / range };
            format!("rgba(26, 77, 46, {})", 0.5 + normalized * 0.5)
        })
        .collect()
}

pub fn with_bar_colors(mut data: Vec<ChartDatum>) -> Vec<ChartDatum> {
    let colors = bar_colors(&data);
    for (d, fill) in data.iter_mut().zip(colors) {
        d.fill = fill;
    }
    data
}

pub fn with_pie_colors(mut data: Vec<ChartDatum>) -> Vec<ChartDatum> {
    for (i, d) in data.iter_mut().enumerate() {
        d.fill = PIE_COLORS[i % PIE_COLORS.len()].to_string();
    }
    data
}

/// Pie slice geometry in degrees, clockwise from 12 o'clock
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub datum: ChartDatum,
    pub percent: f64,
    pub start_deg: f64,
    pub end_deg: f64,
}

pub fn pie_slices(data: &[ChartDatum]) -> Vec<PieSlice> {
    let total: f64 = data.iter().map(|d| d.value).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut angle = 0.0;
    data.iter()
        .map(|d| {
            let share = d.value / total;
            let slice = PieSlice {
                datum: d.clone(),
                percent: share * 100.0,
                start_deg: angle,
                end_deg: angle + share * 360.0,
            };
            angle = slice.end_deg;
            slice
        })
        .collect()
}

/// `18 Oktober 2026`
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn datum(name: &str, value: f64) -> ChartDatum {
        ChartDatum::new(Some(name.to_string()), value)
    }

    #[test]
    fn test_filter_valid_drops_placeholders() {
        let data = vec![
            datum("Arabika", 10.0),
            datum(" Tidak Ada ", 4.0),
            datum("-", 3.0),
            datum("NULL", 3.0),
            datum("Robusta", 0.0),
            datum("", 5.0),
            datum("Sersah", 2.0),
        ];
        let names: Vec<String> = filter_valid(data).into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Arabika", "Sersah"]);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("PETIK MERAH"), "Petik Merah");
        assert_eq!(title_case("tadah  hujan"), "Tadah  Hujan");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_chart_data_from_wire_rows() {
        let rows: Vec<CategoryCount> = serde_json::from_value(json!([
            {"kategori": "ROBUSTA", "jumlah": 80},
            {"kategori": null, "jumlah": 5},
            {"kategori": "arabika", "jumlah": 12}
        ]))
        .unwrap();
        let data = chart_data(rows);
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].name, "Robusta");
        assert_eq!(data[1].value, 12.0);
    }

    #[test]
    fn test_bar_colors_gradient() {
        let data = vec![datum("a", 10.0), datum("b", 20.0), datum("c", 30.0)];
        assert_eq!(
            bar_colors(&data),
            vec![
                "rgba(26, 77, 46, 0.5)",
                "rgba(26, 77, 46, 0.75)",
                "rgba(26, 77, 46, 1)"
            ]
        );
        let flat = vec![datum("a", 5.0), datum("b", 5.0)];
        assert_eq!(bar_colors(&flat), vec!["rgba(26, 77, 46, 1)"; 2]);
        assert!(bar_colors(&[]).is_empty());
    }

    #[test]
    fn test_pie_slices_cover_circle() {
        let data = with_pie_colors(vec![datum("a", 1.0), datum("b", 3.0)]);
        let slices = pie_slices(&data);
        assert_eq!(slices[0].percent, 25.0);
        assert_eq!(slices[0].end_deg, 90.0);
        assert_eq!(slices[1].end_deg, 360.0);
        assert_eq!(slices[1].datum.fill, PIE_COLORS[1]);
        assert!(pie_slices(&[]).is_empty());
    }

    #[test]
    fn test_stat_cards() {
        let summary: DashboardSummary = serde_json::from_value(json!({
            "total_petani": 152,
            "total_lahan_ha": 48.25,
            "rata_rata_harga_rp": 0
        }))
        .unwrap();
        let cards = summary.stat_cards();
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].value, "152");
        assert_eq!(cards[1].value, "48,25");
        assert_eq!(cards[3].value, "Rp 0");
        assert_eq!(cards[4].unit, "Pohon");
    }

    #[test]
    fn test_format_long_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(format_long_date(date), "18 Oktober 2026");
    }
}
