use leptos::*;

pub const EMAIL: &str = "kopintar.doko@gmail.com";
const WHATSAPP_NUMBER: &str = "6285183385395";
const WHATSAPP_GREETING: &str = "Halo, saya ingin bertanya tentang Kopintar";
const INSTAGRAM_URL: &str = "https://instagram.com/sdtpens";
const MAP_URL: &str = "https://maps.google.com/maps?q=Politeknik+Elektronika+Negeri+Surabaya&t=&z=15&ie=UTF8&iwloc=&output=embed";

pub fn gmail_compose_url(to: &str) -> String {
    format!("https://mail.google.com/mail/?view=cm&fs=1&to={}", to)
}

pub fn whatsapp_url(number: &str, message: &str) -> String {
    format!("https://wa.me/{}?text={}", number, urlencoding::encode(message))
}

fn open_in_new_tab(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.open_with_url_and_target(url, "_blank") {
            logging::error!("Gagal membuka {}: {:?}", url, e);
        }
    }
}

#[component]
pub fn Contact() -> impl IntoView {
    let info = [
        ("📧", "Email", EMAIL, Some(gmail_compose_url(EMAIL))),
        (
            "📍",
            "Alamat",
            "Jl. Raya ITS, Keputih, Sukolilo, Surabaya, Jawa Timur 60111",
            None,
        ),
        ("🕒", "Jam Operasional", "Senin - Jumat, 08:00 - 16:00 WIB", None),
    ];

    view! {
        <div class="contact-page">
            <div class="page-header">
                <h1>"Hubungi Kami"</h1>
                <p>"Ada pertanyaan atau butuh bantuan? Tim kami siap membantu Anda"</p>
            </div>

            <div class="contact-grid">
                <div class="card">
                    <h3>"Informasi Kontak"</h3>
                    <p class="muted">"Hubungi kami melalui berbagai channel yang tersedia."</p>
                    <ul class="contact-info">
                        {info
                            .into_iter()
                            .map(|(icon, label, value, link)| view! {
                                <li>
                                    <span class="icon">{icon}</span>
                                    <div>
                                        <p class="label">{label}</p>
                                        {match link {
                                            Some(href) => view! {
                                                <a href=href target="_blank" rel="noopener noreferrer">{value}</a>
                                            }.into_view(),
                                            None => view! { <p>{value}</p> }.into_view(),
                                        }}
                                    </div>
                                </li>
                            })
                            .collect_view()}
                    </ul>
                </div>

                <div class="card card-whatsapp">
                    <h3>"Chat via WhatsApp"</h3>
                    <p class="muted">"Respon cepat & otomatis"</p>
                    <p>
                        "Dapatkan bantuan langsung melalui bot WhatsApp kami. Sistem otomatis kami siap menjawab pertanyaan Anda 24/7."
                    </p>
                    <button
                        class="btn btn-whatsapp"
                        on:click=|_| open_in_new_tab(&whatsapp_url(WHATSAPP_NUMBER, WHATSAPP_GREETING))
                    >
                        "Mulai Chat WhatsApp"
                    </button>
                </div>

                <div class="card card-instagram">
                    <h3>"Follow Instagram"</h3>
                    <p class="muted">"@sdtpens"</p>
                    <p>
                        "Ikuti Instagram kami untuk informasi terkini seputar teknologi, kegiatan mahasiswa, dan event di Politeknik Elektronika Negeri Surabaya."
                    </p>
                    <button class="btn btn-instagram" on:click=|_| open_in_new_tab(INSTAGRAM_URL)>
                        "Kunjungi Instagram"
                    </button>
                </div>
            </div>

            <div class="card">
                <h3>"Lokasi Kami"</h3>
                <iframe
                    class="map-frame"
                    src=MAP_URL
                    loading="lazy"
                    allowfullscreen=true
                    referrerpolicy="no-referrer-when-downgrade"
                ></iframe>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whatsapp_url_encodes_message() {
        assert_eq!(
            whatsapp_url(WHATSAPP_NUMBER, WHATSAPP_GREETING),
            "https://wa.me/6285183385395?text=Halo%2C%20saya%20ingin%20bertanya%20tentang%20Kopintar"
        );
    }

    #[test]
    fn test_gmail_compose_url() {
        assert_eq!(
            gmail_compose_url(EMAIL),
            "https://mail.google.com/mail/?view=cm&fs=1&to=kopintar.doko@gmail.com"
        );
    }
}
