use leptos::*;
use leptos_router::*;

const FEATURES: [(&str, &str, &str); 4] = [
    (
        "📊",
        "Analytics Real-time",
        "Monitoring produksi kopi secara real-time dengan visualisasi data yang interaktif",
    ),
    (
        "👥",
        "Manajemen Petani",
        "Kelola data petani kopi dengan sistem yang terorganisir dan mudah diakses",
    ),
    (
        "📈",
        "Clustering Analysis",
        "Analisis produktivitas petani dengan algoritma clustering berbasis AI",
    ),
    (
        "✨",
        "AI Recommendation",
        "Dapatkan rekomendasi solusi permasalahan dari asisten AI yang cerdas",
    ),
];

#[component]
pub fn Landing() -> impl IntoView {
    let navigate = use_navigate();
    let enter = move |_: ev::MouseEvent| navigate("/dashboard", Default::default());

    view! {
        <div class="landing">
            <nav class="landing-nav">
                <div class="landing-brand">
                    <span class="brand-logo">"☕"</span>
                    <h3>"Kopintar"</h3>
                </div>
                <button class="btn btn-primary" on:click=enter.clone()>"Masuk Dashboard"</button>
            </nav>

            <section class="landing-hero">
                <div class="hero-text">
                    <h1>"Kopintar"</h1>
                    <h2>
                        "Dashboard Analitik dan Monitoring Produksi Kopi Berbasis AI di Kecamatan Doko, Kabupaten Blitar, Jawa Timur"
                    </h2>
                    <p>
                        "Platform monitoring dan analisis produktivitas petani kopi yang menggunakan teknologi AI untuk memberikan insight dan rekomendasi yang akurat, membantu meningkatkan kesejahteraan petani kopi di Indonesia."
                    </p>
                    <button class="btn btn-primary btn-lg" on:click=enter>"Masuk Dashboard →"</button>
                </div>
                <img
                    class="hero-image"
                    src="https://images.unsplash.com/photo-1447933601403-0c6688de566e?w=800&q=80"
                    alt="Petani Kopi Indonesia"
                />
            </section>

            <section class="landing-features">
                <h2>"Fitur Unggulan"</h2>
                <p>
                    "Sistem lengkap untuk monitoring dan meningkatkan produktivitas petani kopi dengan teknologi terkini"
                </p>
                <div class="feature-grid">
                    {FEATURES
                        .iter()
                        .map(|(icon, title, description)| view! {
                            <div class="feature-card">
                                <div class="feature-icon">{*icon}</div>
                                <h3>{*title}</h3>
                                <p>{*description}</p>
                            </div>
                        })
                        .collect_view()}
                </div>
            </section>

            <footer class="landing-footer">
                <p>"©Kopintar - Dashboard Monitoring Kopi Berbasis AI"</p>
            </footer>
        </div>
    }
}
