use kopintar_common::cluster::{
    distribution, number_or_zero, or_na, Cluster, ClusteringData, COLORS_BROWN, COLORS_GREEN,
    PASAR_FETCH_FAILED, PRODUK_FETCH_FAILED,
};
use kopintar_common::dashboard::ChartDatum;
use kopintar_common::ApiError;
use leptos::*;

use crate::api::use_api;
use crate::components::{BarChart, ErrorAlert, Loading};

/// Which segmentation a section shows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Segmentation {
    Produk,
    Pasar,
}

/// `C3` with 12 members -> `Cluster 3: 12 Petani`
pub fn cluster_tooltip(datum: &ChartDatum) -> String {
    format!(
        "Cluster {}: {} Petani",
        datum.name.trim_start_matches('C'),
        datum.value
    )
}

fn model_name(data: &Option<ClusteringData>) -> String {
    data.as_ref()
        .map(|d| d.model.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "N/A".to_string())
}

#[component]
pub fn Clustering() -> impl IntoView {
    let api = use_api();
    let (produk, set_produk) = create_signal(None::<ClusteringData>);
    let (pasar, set_pasar) = create_signal(None::<ClusteringData>);
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<ApiError>);
    let (reload, set_reload) = create_signal(0u32);

    create_effect(move |_| {
        reload.track();
        let api = api.clone();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let (produk_res, pasar_res) =
                futures::join!(api.cluster_produk_budidaya(), api.cluster_profil_pasar());
            match produk_res {
                Ok(data) => {
                    let _ = set_produk.try_set(Some(data));
                }
                Err(e) => {
                    logging::error!("Error fetching clustering data: {}", e);
                    let _ = set_error.try_set(Some(ApiError {
                        message: PRODUK_FETCH_FAILED.to_string(),
                        ..e
                    }));
                }
            }
            match pasar_res {
                Ok(data) => {
                    let _ = set_pasar.try_set(Some(data));
                }
                Err(e) => {
                    logging::error!("Error fetching clustering data: {}", e);
                    if error.try_get_untracked().flatten().is_none() {
                        let _ = set_error.try_set(Some(ApiError {
                            message: PASAR_FETCH_FAILED.to_string(),
                            ..e
                        }));
                    }
                }
            }
            let _ = set_loading.try_set(false);
        });
    });

    let summary = move || {
        let (p, m) = (produk.get(), pasar.get());
        let total_clusters = p.as_ref().map_or(0, |d| d.clusters.len())
            + m.as_ref().map_or(0, |d| d.clusters.len());
        let total_petani = p.as_ref().map_or(0, |d| d.total_petani);
        [
            ("Total Clusters", total_clusters.to_string()),
            ("Total Petani", total_petani.to_string()),
            ("Model Produk", model_name(&p)),
            ("Model Pasar", model_name(&m)),
        ]
        .into_iter()
        .map(|(label, value)| view! {
            <div class="stat-card">
                <p class="stat-label">{label}</p>
                <p class="stat-value">{value}</p>
            </div>
        })
        .collect_view()
    };

    view! {
        <div class="clustering-page">
            <div class="page-header">
                <h1>"Analisis Clustering Petani Kopi"</h1>
                <p>"Hasil clustering menggunakan Machine Learning untuk segmentasi petani"</p>
            </div>

            {move || if loading.get() {
                view! { <Loading message="Memuat data clustering..."/> }.into_view()
            } else if let Some(e) = error.get() {
                let message = e.message.clone();
                view! {
                    <ErrorAlert
                        error=e
                        message=message
                        on_retry=Callback::new(move |_| set_reload.update(|n| *n += 1))
                    />
                }
                .into_view()
            } else {
                view! {
                    <div class="stat-grid">{summary}</div>
                    {produk.get().map(|data| view! {
                        <ClusterSection
                            data=data
                            kind=Segmentation::Produk
                            fallback_title="Clustering Produktivitas dan Praktik Budaya"
                            subtitle="Analisis berdasarkan hasil panen, lahan, dan metode budidaya"
                        />
                    })}
                    {pasar.get().map(|data| view! {
                        <ClusterSection
                            data=data
                            kind=Segmentation::Pasar
                            fallback_title="Clustering Profil Petani dan Pemasaran"
                            subtitle="Analisis berdasarkan profil petani dan strategi pemasaran"
                        />
                    })}
                }
                .into_view()
            }}
        </div>
    }
}

#[component]
fn ClusterSection(
    data: ClusteringData,
    kind: Segmentation,
    fallback_title: &'static str,
    subtitle: &'static str,
) -> impl IntoView {
    let title = match kind {
        Segmentation::Produk if !data.clustering_type.is_empty() => data.clustering_type.clone(),
        _ => fallback_title.to_string(),
    };
    let palette: &[&str] = match kind {
        Segmentation::Produk => &COLORS_GREEN,
        Segmentation::Pasar => &COLORS_BROWN,
    };
    let chart = distribution(&data.clusters, palette);

    view! {
        <section class={format!("cluster-section cluster-{:?}", kind).to_lowercase()}>
            <div class="section-header">
                <h2>{title}</h2>
                <p>{subtitle}</p>
            </div>

            <div class="cluster-overview">
                <BarChart
                    title="Distribusi Cluster"
                    data=chart
                    x_label="Cluster"
                    y_label="Jumlah Petani"
                    tooltip=cluster_tooltip
                />
                <div class="card table-card">
                    <h4>"Karakteristik Cluster"</h4>
                    {match kind {
                        Segmentation::Produk => produk_table(&data.clusters),
                        Segmentation::Pasar => pasar_table(&data.clusters),
                    }}
                </div>
            </div>

            <h3>"Daftar Petani dan Insight per Cluster"</h3>
            <div class="cluster-cards">
                {data
                    .clusters
                    .iter()
                    .map(|c| cluster_card(c, kind))
                    .collect_view()}
            </div>
        </section>
    }
}

fn produk_table(clusters: &[Cluster]) -> View {
    view! {
        <table class="data-table compact">
            <thead>
                <tr>
                    <th>"Cluster"</th>
                    <th>"Label"</th>
                    <th>"Petani"</th>
                    <th>"Hasil/Tahun"</th>
                    <th>"Luas Lahan"</th>
                    <th>"Budidaya"</th>
                    <th>"Pupuk"</th>
                    <th>"Panen"</th>
                    <th>"Bertani"</th>
                    <th>"Populasi"</th>
                    <th>"Irigasi"</th>
                </tr>
            </thead>
            <tbody>
                {clusters
                    .iter()
                    .map(|c| {
                        let k = &c.karakteristik;
                        view! {
                            <tr>
                                <td>{format!("C{}", c.cluster_id)}</td>
                                <td>{c.label.clone()}</td>
                                <td>{c.petani_count}</td>
                                <td>{format!("{} kg", number_or_zero(k.avg_produktivitas_kg))}</td>
                                <td>{format!("{} m²", number_or_zero(k.avg_luas_lahan_m2))}</td>
                                <td>{or_na(&k.metode_budidaya)}</td>
                                <td>{or_na(&k.pupuk)}</td>
                                <td>{or_na(&k.metode_panen)}</td>
                                <td>{format!("{} th", number_or_zero(k.avg_lama_bertani_tahun))}</td>
                                <td>{number_or_zero(k.avg_populasi_kopi)}</td>
                                <td>{or_na(&k.sistem_irigasi)}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_view()
}

fn pasar_table(clusters: &[Cluster]) -> View {
    view! {
        <table class="data-table compact">
            <thead>
                <tr>
                    <th>"Cluster"</th>
                    <th>"Label"</th>
                    <th>"Petani"</th>
                    <th>"Harga Jual"</th>
                    <th>"Penjualan"</th>
                    <th>"Pengolahan"</th>
                    <th>"Fermentasi"</th>
                    <th>"Pengeringan"</th>
                    <th>"Penyimpanan"</th>
                    <th>"Sistem"</th>
                </tr>
            </thead>
            <tbody>
                {clusters
                    .iter()
                    .map(|c| {
                        let k = &c.karakteristik;
                        view! {
                            <tr>
                                <td>{format!("C{}", c.cluster_id)}</td>
                                <td>{c.label.clone()}</td>
                                <td>{c.petani_count}</td>
                                <td>{format!("Rp {}", number_or_zero(k.avg_harga_jual))}</td>
                                <td>{or_na(&k.metode_penjualan)}</td>
                                <td>{or_na(&k.metode_pengolahan)}</td>
                                <td>{or_na(&k.lama_fermentasi)}</td>
                                <td>{or_na(&k.proses_pengeringan)}</td>
                                <td>{or_na(&k.bentuk_penyimpanan)}</td>
                                <td>{or_na(&k.sistem_penyimpanan)}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_view()
}

fn cluster_card(cluster: &Cluster, kind: Segmentation) -> View {
    let insight = match kind {
        Segmentation::Produk => cluster.product_insight(),
        Segmentation::Pasar => cluster.market_insight(),
    };
    let names = if cluster.petani_names.is_empty() {
        view! { <p class="muted">"Data tidak tersedia"</p> }.into_view()
    } else {
        view! {
            <ul class="petani-names">
                {cluster
                    .petani_names
                    .iter()
                    .map(|name| view! { <li>{name.clone()}</li> })
                    .collect_view()}
            </ul>
        }
        .into_view()
    };

    view! {
        <div class="card cluster-card">
            <div class="cluster-card-header">
                <span class="badge">{format!("Cluster {}", cluster.cluster_id)}</span>
                <h4>{cluster.label.clone()}</h4>
                <span class="muted">{format!("{} Petani", cluster.petani_count)}</span>
            </div>
            <div class="cluster-card-body">
                <div>
                    <h5>"Daftar Petani:"</h5>
                    {names}
                </div>
                <div>
                    <h5>"Interpretasi & Insight:"</h5>
                    <p>{insight}</p>
                </div>
            </div>
        </div>
    }
    .into_view()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_tooltip() {
        let datum = ChartDatum {
            name: "C3".to_string(),
            value: 12.0,
            fill: String::new(),
        };
        assert_eq!(cluster_tooltip(&datum), "Cluster 3: 12 Petani");
    }

    #[test]
    fn test_model_name_falls_back() {
        assert_eq!(model_name(&None), "N/A");
        let data = ClusteringData {
            model: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(model_name(&Some(data)), "N/A");
        let data = ClusteringData {
            model: "Agglomerative".to_string(),
            ..Default::default()
        };
        assert_eq!(model_name(&Some(data)), "Agglomerative");
    }
}
