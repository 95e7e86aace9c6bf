use kopintar_common::dashboard::{
    format_long_date, with_bar_colors, with_pie_colors, ChartDatum, DashboardSummary,
};
use kopintar_common::ApiError;
use leptos::*;

use crate::api::{use_api, Distribution};
use crate::components::{BarChart, ErrorAlert, Loading, PieChart};

#[derive(Debug, Clone, Default)]
struct HomeData {
    summary: Option<DashboardSummary>,
    jenis_kopi: Vec<ChartDatum>,
    metode_penjualan: Vec<ChartDatum>,
    metode_panen: Vec<ChartDatum>,
    metode_pengolahan: Vec<ChartDatum>,
    proses_pengeringan: Vec<ChartDatum>,
    varietas: Vec<ChartDatum>,
    kelompok_hasil: Vec<ChartDatum>,
    kelompok_lahan: Vec<ChartDatum>,
    kelompok_populasi: Vec<ChartDatum>,
}

#[component]
pub fn Home() -> impl IntoView {
    let api = use_api();
    let (data, set_data) = create_signal(HomeData::default());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<ApiError>);
    let (reload, set_reload) = create_signal(0u32);

    create_effect(move |_| {
        reload.track();
        let api = api.clone();
        set_loading.set(true);
        spawn_local(async move {
            let (
                summary,
                jenis_kopi,
                metode_panen,
                metode_pengolahan,
                metode_penjualan,
                proses_pengeringan,
                varietas,
                kelompok_hasil,
                kelompok_lahan,
                kelompok_populasi,
            ) = futures::join!(
                api.dashboard_summary(),
                api.distribution_or_default(Distribution::JenisKopi),
                api.distribution_or_default(Distribution::MetodePanen),
                api.distribution_or_default(Distribution::MetodePengolahan),
                api.distribution_or_default(Distribution::MetodePenjualan),
                api.distribution_or_default(Distribution::ProsesPengeringan),
                api.distribution_or_default(Distribution::VarietasKopi),
                api.distribution_or_default(Distribution::KelompokHasil),
                api.distribution_or_default(Distribution::KelompokLahan),
                api.distribution_or_default(Distribution::KelompokPopulasi),
            );

            let summary = match summary {
                Ok(summary) => {
                    let _ = set_error.try_set(None);
                    Some(summary)
                }
                Err(e) => {
                    logging::error!("Gagal memuat data dashboard: {}", e);
                    let _ = set_error.try_set(Some(e));
                    None
                }
            };

            let _ = set_data.try_set(HomeData {
                summary,
                jenis_kopi: with_pie_colors(jenis_kopi),
                metode_penjualan: with_pie_colors(metode_penjualan),
                metode_panen: with_pie_colors(metode_panen),
                metode_pengolahan: with_pie_colors(metode_pengolahan),
                proses_pengeringan: with_pie_colors(proses_pengeringan),
                varietas: with_bar_colors(varietas),
                kelompok_hasil: with_bar_colors(kelompok_hasil),
                kelompok_lahan: with_bar_colors(kelompok_lahan),
                kelompok_populasi: with_bar_colors(kelompok_populasi),
            });
            let _ = set_loading.try_set(false);
        });
    });

    let today = format_long_date(chrono::Local::now().date_naive());

    let stat_cards = move || {
        data.with(|d| d.summary.as_ref().map(DashboardSummary::stat_cards))
            .map(|cards| {
                cards
                    .into_iter()
                    .map(|card| view! {
                        <div class="stat-card">
                            <p class="stat-label">{card.label}</p>
                            <p class="stat-value">{card.value}</p>
                            <p class="stat-unit">{card.unit}</p>
                        </div>
                    })
                    .collect_view()
            })
    };

    view! {
        <div class="home-page">
            <div class="hero-banner">
                <div>
                    <h1>"Dashboard Monitoring Produksi Kopi"</h1>
                    <p>"Kecamatan Doko, Kabupaten Blitar"</p>
                </div>
                <div class="update-badge">
                    <p>"Update Terakhir"</p>
                    <strong>{today}</strong>
                </div>
            </div>

            {move || if loading.get() {
                view! { <Loading message="Memuat data dashboard..."/> }.into_view()
            } else {
                let d = data.get();
                view! {
                    {move || error.get().map(|e| view! {
                        <ErrorAlert
                            error=e
                            on_retry=Callback::new(move |_| set_reload.update(|n| *n += 1))
                            on_dismiss=Callback::new(move |_| set_error.set(None))
                        />
                    })}

                    <section>
                        <h2 class="section-title">"Ringkasan Statistik"</h2>
                        <div class="stat-grid">{stat_cards}</div>
                    </section>

                    <section>
                        <h2 class="section-title">"Distribusi Data Petani"</h2>
                        <div class="chart-grid chart-grid-4">
                            <PieChart title="Jenis Kopi" data=d.jenis_kopi/>
                            <PieChart title="Metode Penjualan" data=d.metode_penjualan/>
                            <PieChart title="Metode Panen" data=d.metode_panen/>
                            <PieChart title="Metode Pengolahan" data=d.metode_pengolahan/>
                        </div>
                    </section>

                    <section>
                        <h2 class="section-title">"Analisis Produksi"</h2>
                        <div class="chart-grid chart-grid-2">
                            <BarChart title="Distribusi Varietas Kopi" data=d.varietas/>
                            <BarChart title="Hasil Produksi per Kelompok Tani" data=d.kelompok_hasil/>
                        </div>
                    </section>

                    <section>
                        <h2 class="section-title">"Analisis Kelompok Tani"</h2>
                        <div class="chart-grid chart-grid-3">
                            <PieChart title="Proses Pengeringan" data=d.proses_pengeringan/>
                            <BarChart title="Luas Lahan per Kelompok Tani (Ha)" data=d.kelompok_lahan/>
                            <BarChart title="Populasi Kopi per Kelompok Tani" data=d.kelompok_populasi/>
                        </div>
                    </section>
                }
                .into_view()
            }}

            <footer class="home-footer">
                <div>
                    <h3>"Data Real-Time dari Database"</h3>
                    <p>"Sistem monitoring terintegrasi dengan database produksi"</p>
                </div>
                <div class="powered-by">
                    <p>"Powered by"</p>
                    <strong>"Smart Dashboard Kopi"</strong>
                </div>
            </footer>
        </div>
    }
}
