//! Cluster result sets produced by the analysis service

use serde::{Deserialize, Serialize};

use crate::dashboard::ChartDatum;
use crate::locale::format_number;

pub const COLORS_GREEN: [&str; 4] = ["#2d5f3f", "#4a7c59", "#5a8c69", "#7aa084"];
pub const COLORS_BROWN: [&str; 4] = ["#8b6f47", "#a78a5e", "#b88746", "#d4a373"];

pub const PRODUK_FETCH_FAILED: &str = "Gagal mengambil data produk budidaya";
pub const PASAR_FETCH_FAILED: &str = "Gagal mengambil data profil pasar";

/// Averages and dominant categories of one cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Karakteristik {
    pub avg_produktivitas_kg: Option<f64>,
    pub avg_luas_lahan_m2: Option<f64>,
    pub avg_lama_bertani_tahun: Option<f64>,
    pub avg_populasi_kopi: Option<f64>,
    pub metode_budidaya: Option<String>,
    pub pupuk: Option<String>,
    pub metode_panen: Option<String>,
    pub sistem_irigasi: Option<String>,
    pub avg_harga_jual: Option<f64>,
    pub lama_fermentasi: Option<String>,
    pub proses_pengeringan: Option<String>,
    pub metode_penjualan: Option<String>,
    pub bentuk_penyimpanan: Option<String>,
    pub sistem_penyimpanan: Option<String>,
    pub metode_pengolahan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cluster {
    pub cluster_id: i64,
    pub label: String,
    pub kategori: String,
    pub petani_count: u32,
    pub petani_names: Vec<String>,
    pub persentase: f64,
    pub karakteristik: Karakteristik,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterParams {
    #[serde(default)]
    pub n_clusters: Option<u32>,
    #[serde(default)]
    pub linkage: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringData {
    pub clustering_type: String,
    pub model: String,
    pub total_petani: u32,
    pub clusters: Vec<Cluster>,
    pub params: Option<ClusterParams>,
}

/// Text for an optional category, `N/A` when missing
pub fn or_na(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "N/A".to_string(),
    }
}

/// id-ID formatted number, `0` when missing
pub fn number_or_zero(value: Option<f64>) -> String {
    format_number(value.unwrap_or(0.0))
}

/// Member count per cluster, bars named `C{id}`
pub fn distribution(clusters: &[Cluster], palette: &[&str]) -> Vec<ChartDatum> {
    clusters
        .iter()
        .enumerate()
        .map(|(i, c)| ChartDatum {
            name: format!("C{}", c.cluster_id),
            value: f64::from(c.petani_count),
            fill: palette[i % palette.len()].to_string(),
        })
        .collect()
}

const PRODUK_INSIGHTS: &[(&str, &str)] = &[
    (
        "Expert",
        "Kelompok petani yang sudah expert dan produktivitas sangat tinggi menunjukkan kinerja luar biasa dengan hasil rata-rata sekitar {produksi} kg per tahun. Mayoritas menggunakan metode budidaya {budidaya}, dengan pengalaman bertani puluhan tahun dan manajemen lahan yang efisien. Kelompok ini berpotensi menjadi mentor bagi petani lain, terutama dalam penerapan teknik pemetikan selektif dan penggunaan pupuk kimia secara tepat untuk menjaga konsistensi kualitas kopi.",
    ),
    (
        "Efisien",
        "Kelompok petani efisien memiliki produktivitas yang solid ({produksi} kg/tahun) meskipun dengan luas lahan relatif kecil. Penggunaan metode budidaya {budidaya} menunjukkan orientasi pada efisiensi dan keberlanjutan. Kelompok ini dapat ditingkatkan melalui akses terhadap pasar premium, pelatihan diversifikasi produk olahan kopi, dan peningkatan sistem irigasi agar hasil tetap stabil sepanjang tahun.",
    ),
    (
        "Berkembang",
        "Kelompok petani sudah berkembang dan produktivitas stabil mencerminkan petani yang sudah mulai adaptif terhadap praktik modern dengan hasil sekitar {produksi} kg/tahun. Metode budidaya {budidaya} masih umum digunakan, tetapi konsistensi hasil menunjukkan potensi besar. Intervensi berupa pelatihan teknik budidaya organik, manajemen pupuk berimbang, serta dukungan peralatan panen dapat meningkatkan efisiensi dan pendapatan mereka.",
    ),
    (
        "Pemula",
        "Kelompok petani yang masih pemula dan produktivitas rendah masih menghadapi tantangan dalam peningkatan hasil panen (rata-rata {produksi} kg/tahun). Umumnya menggunakan metode budidaya {budidaya} dan bergantung pada kondisi alam seperti tadah hujan. Mereka membutuhkan pendampingan intensif dalam pengelolaan lahan, penggunaan pupuk yang tepat, serta pelatihan dasar teknik panen agar produktivitas dan kualitas kopi dapat meningkat.",
    ),
];

const PRODUK_FALLBACK: &str = "Kelompok petani ini memiliki karakteristik unik dengan hasil rata-rata {produksi} kg per tahun menggunakan metode {budidaya}. Perlu analisis lanjutan untuk menentukan strategi peningkatan hasil yang sesuai dengan kondisi lahan dan sumber daya yang tersedia.";

const PASAR_INSIGHTS: &[(&str, &str)] = &[
    (
        "Petani Berpengalaman",
        "Kelompok petani berpengalaman yang sudah mampu menjangkau pasar premium dengan rata-rata harga jual Rp {harga}/kg. Umumnya menggunakan metode penjualan {penjualan} dengan pengolahan {pengolahan} yang terstandarisasi dan berfokus pada kualitas tinggi. Cluster ini menunjukkan kemandirian dan profesionalisme tinggi dalam pengelolaan hasil panen. Rekomendasi: pertahankan konsistensi mutu, perluas sertifikasi (organik/fair trade), dan tingkatkan branding untuk memperluas akses ke pasar ekspor.",
    ),
    (
        "Petani Modern",
        "Kelompok petani modern dengan harga jual semi-premium sekitar Rp {harga}/kg. Mereka menerapkan metode penjualan {penjualan} dan pengolahan {pengolahan} yang cukup efisien. Cluster ini memiliki potensi besar untuk naik ke pasar premium jika kualitas pasca-panen dan pengemasan terus ditingkatkan. Rekomendasi: lakukan pelatihan pengolahan modern, gunakan teknologi tepat guna, dan bangun kemitraan dengan pembeli premium.",
    ),
    (
        "Petani Produktif",
        "Kelompok petani konvensional yang masih berfokus pada pasar lokal dengan rata-rata harga jual Rp {harga}/kg. Umumnya menggunakan metode penjualan {penjualan} dan pengolahan {pengolahan} yang sederhana dan tradisional. Cluster ini memiliki potensi besar untuk berkembang melalui pendampingan intensif. Rekomendasi: tingkatkan pelatihan manajemen kualitas, akses pembiayaan mikro, serta bentuk koperasi untuk memperluas jaringan pasar dan meningkatkan daya saing.",
    ),
];

const PASAR_FALLBACK: &str = "Cluster ini belum terklasifikasi secara spesifik. Diperlukan analisis lebih lanjut untuk menentukan karakteristik petani dan segmentasi pasarnya.";

fn lookup<'a>(table: &[(&str, &'a str)], label: &str, fallback: &'a str) -> &'a str {
    table
        .iter()
        .find(|(needle, _)| label.contains(needle))
        .map(|(_, template)| *template)
        .unwrap_or(fallback)
}

/// Rounded to a whole number like `toFixed(0)`
fn whole(value: f64) -> String {
    format!("{:.0}", value)
}

pub fn product_insight(label: &str, avg_produksi: f64, metode_budidaya: &str) -> String {
    lookup(PRODUK_INSIGHTS, label, PRODUK_FALLBACK)
        .replace("{produksi}", &whole(avg_produksi))
        .replace("{budidaya}", metode_budidaya)
}

pub fn market_insight(
    label: &str,
    avg_harga: f64,
    metode_penjualan: &str,
    metode_pengolahan: &str,
) -> String {
    lookup(PASAR_INSIGHTS, label, PASAR_FALLBACK)
        .replace("{harga}", &whole(avg_harga))
        .replace("{penjualan}", metode_penjualan)
        .replace("{pengolahan}", metode_pengolahan)
}

impl Cluster {
    pub fn product_insight(&self) -> String {
        let k = &self.karakteristik;
        product_insight(
            &self.label,
            k.avg_produktivitas_kg.unwrap_or(0.0),
            &or_na(&k.metode_budidaya),
        )
    }

    pub fn market_insight(&self) -> String {
        let k = &self.karakteristik;
        market_insight(
            &self.label,
            k.avg_harga_jual.unwrap_or(0.0),
            &or_na(&k.metode_penjualan),
            &or_na(&k.metode_pengolahan),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_partial_payload() {
        let data: ClusteringData = serde_json::from_value(json!({
            "clustering_type": "produk_budidaya",
            "model": "Agglomerative",
            "total_petani": 120,
            "clusters": [
                {"cluster_id": 0, "label": "Petani Expert", "petani_count": 30,
                 "persentase": 25.0, "karakteristik": {"avg_produktivitas_kg": 1520.4}}
            ],
            "params": {"n_clusters": 4, "linkage": "ward"}
        }))
        .unwrap();
        assert_eq!(data.clusters.len(), 1);
        assert!(data.clusters[0].petani_names.is_empty());
        assert_eq!(data.clusters[0].karakteristik.pupuk, None);
        assert_eq!(data.params.unwrap().n_clusters, Some(4));
    }

    #[test]
    fn test_distribution_cycles_palette() {
        let clusters: Vec<Cluster> = (0..5)
            .map(|i| Cluster {
                cluster_id: i,
                petani_count: 10 + i as u32,
                ..Default::default()
            })
            .collect();
        let bars = distribution(&clusters, &COLORS_BROWN);
        assert_eq!(bars[0].name, "C0");
        assert_eq!(bars[4].fill, COLORS_BROWN[0]);
        assert_eq!(bars[3].value, 13.0);
    }

    #[test]
    fn test_product_insight_lookup() {
        let text = product_insight("Petani Expert & Produktif", 1520.6, "Kombinasi");
        assert!(text.starts_with("Kelompok petani yang sudah expert"));
        assert!(text.contains("sekitar 1521 kg per tahun"));
        assert!(text.contains("metode budidaya Kombinasi"));

        let text = product_insight("Pemula", 300.0, "Tradisional");
        assert!(text.contains("masih pemula"));

        let text = product_insight("Lainnya", 0.0, "N/A");
        assert!(text.contains("karakteristik unik"));
    }

    #[test]
    fn test_market_insight_lookup() {
        let text = market_insight("Petani Modern", 45000.0, "Langsung", "Natural");
        assert!(text.contains("semi-premium sekitar Rp 45000/kg"));
        assert!(text.contains("penjualan Langsung dan pengolahan Natural"));

        let cluster = Cluster {
            label: "Tidak dikenal".to_string(),
            ..Default::default()
        };
        assert_eq!(cluster.market_insight(), PASAR_FALLBACK);
    }

    #[test]
    fn test_or_na() {
        assert_eq!(or_na(&None), "N/A");
        assert_eq!(or_na(&Some(String::new())), "N/A");
        assert_eq!(or_na(&Some("Organik".to_string())), "Organik");
        assert_eq!(number_or_zero(Some(2500.0)), "2.500");
        assert_eq!(number_or_zero(None), "0");
    }
}
