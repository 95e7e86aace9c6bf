use gloo_timers::future::TimeoutFuture;
use kopintar_common::recommendation::{
    build_report, format_recommendation, parse_detail, ChatRole, ChatTranscript,
    RecommendationRequest, ReportStatus, STATUS_RESET_MS,
};
use kopintar_common::wordcloud::{word_style, CloudKind, WordWeight};
use leptos::*;

use crate::api::use_api;

const DETAIL_PLACEHOLDER: &str =
    "Format: key: value\nContoh:\nLokasi: Sumbersari\nLuas Lahan: 2 hektar\nVarietas: Arabika";

fn report_button_label(status: ReportStatus) -> &'static str {
    match status {
        ReportStatus::Success => "✔ Berhasil Disimpan!",
        ReportStatus::Error => "⚠ Gagal Menyimpan",
        ReportStatus::Idle => "➤ Kirim Laporan",
    }
}

/// Show `status`, then fall back to idle
fn flash_status(set_status: WriteSignal<ReportStatus>, status: ReportStatus) {
    set_status.set(status);
    spawn_local(async move {
        TimeoutFuture::new(STATUS_RESET_MS).await;
        let _ = set_status.try_set(ReportStatus::Idle);
    });
}

#[component]
pub fn Rekomendasi() -> impl IntoView {
    let api = use_api();

    let (nama_petani, set_nama_petani) = create_signal(String::new());
    let (masalah, set_masalah) = create_signal(String::new());
    let (detail, set_detail) = create_signal(String::new());
    let (status, set_status) = create_signal(ReportStatus::Idle);

    let (chat_input, set_chat_input) = create_signal(String::new());
    let transcript = create_rw_signal(ChatTranscript::new());
    let (thinking, set_thinking) = create_signal(false);

    let (words_masalah, set_words_masalah) = create_signal(Vec::<WordWeight>::new());
    let (words_pelatihan, set_words_pelatihan) = create_signal(Vec::<WordWeight>::new());

    let cloud_api = api.clone();
    create_effect(move |_| {
        let api = cloud_api.clone();
        spawn_local(async move {
            let (masalah, pelatihan) =
                futures::join!(api.wordcloud_masalah(), api.wordcloud_pelatihan());
            let _ = set_words_masalah.try_set(masalah);
            let _ = set_words_pelatihan.try_set(pelatihan);
        });
    });

    let submit_report = {
        let api = api.clone();
        move |_| {
            let Some(request) = build_report(
                &nama_petani.get_untracked(),
                &masalah.get_untracked(),
                &detail.get_untracked(),
            ) else {
                flash_status(set_status, ReportStatus::Error);
                return;
            };
            let api = api.clone();
            spawn_local(async move {
                match api.laporan_masalah(&request).await {
                    Ok(_) => {
                        logging::log!("Laporan dari {} tersimpan", request.nama_petani);
                        flash_status(set_status, ReportStatus::Success);
                        let _ = set_nama_petani.try_set(String::new());
                        let _ = set_masalah.try_set(String::new());
                        let _ = set_detail.try_set(String::new());
                        let words = api.wordcloud_masalah().await;
                        let _ = set_words_masalah.try_set(words);
                    }
                    Err(e) => {
                        logging::error!("{}", e);
                        flash_status(set_status, ReportStatus::Error);
                    }
                }
            });
        }
    };

    let send_chat = move || {
        let question = chat_input.get_untracked();
        if question.trim().is_empty() || thinking.get_untracked() {
            return;
        }
        transcript.update(|t| t.push_user(question.clone()));
        set_chat_input.set(String::new());
        set_thinking.set(true);

        let request = RecommendationRequest {
            masalah: question,
            detail_petani: parse_detail(&detail.get_untracked()),
        };
        let api = api.clone();
        spawn_local(async move {
            match api.recommendation(&request).await {
                Ok(response) => {
                    let reply = format_recommendation(&response.recommendation);
                    let _ = transcript.try_update(|t| t.push_ai(reply));
                }
                Err(e) => {
                    logging::error!("{}", e);
                    let _ = transcript.try_update(ChatTranscript::push_failure);
                }
            }
            let _ = set_thinking.try_set(false);
        });
    };
    let send_on_enter = send_chat.clone();

    view! {
        <div class="rekomendasi-page">
            <div class="page-header">
                <h1>"Rekomendasi Permasalahan Petani"</h1>
                <p>
                    "Laporkan permasalahan, dapatkan rekomendasi AI, dan lihat tren masalah terkini petani kopi."
                </p>
            </div>

            <div class="card report-card">
                <h3>"Laporkan Masalah Baru"</h3>
                <div class="form-field">
                    <label>"Nama Petani"</label>
                    <input
                        type="text"
                        placeholder="Contoh: Pak Budi"
                        on:input=move |ev| set_nama_petani.set(event_target_value(&ev))
                        prop:value=nama_petani
                    />
                </div>
                <div class="form-field">
                    <label>"Masalah"</label>
                    <input
                        type="text"
                        placeholder="Contoh: Tanaman kopi saya terserang hama penggerek buah..."
                        on:input=move |ev| set_masalah.set(event_target_value(&ev))
                        prop:value=masalah
                    />
                </div>
                <div class="form-field">
                    <label>"Detail Tambahan (Opsional)"</label>
                    <textarea
                        rows="4"
                        placeholder=DETAIL_PLACEHOLDER
                        on:input=move |ev| set_detail.set(event_target_value(&ev))
                        prop:value=detail
                    ></textarea>
                </div>
                <button
                    class="btn btn-primary btn-block"
                    class:btn-error=move || status.get() == ReportStatus::Error
                    disabled=move || status.get() == ReportStatus::Success
                    on:click=submit_report
                >
                    {move || report_button_label(status.get())}
                </button>
            </div>

            <div class="card chat-card">
                <div class="chat-header">
                    <span class="chat-avatar">"🤖"</span>
                    <div>
                        <h2>"Tanya Asisten AI"</h2>
                        <p>"Dapatkan rekomendasi dan solusi berbasis AI untuk masalah perkebunan kopi"</p>
                    </div>
                </div>

                <div class="chat-box">
                    <For
                        each=move || transcript.with(|t| t.messages().iter().cloned().enumerate().collect::<Vec<_>>())
                        key=|(index, _)| *index
                        children=|(_, msg)| {
                            let is_user = msg.role == ChatRole::User;
                            view! {
                                <div class="chat-row" class:chat-row-user=is_user>
                                    {(!is_user).then(|| view! { <span class="chat-avatar">"🤖"</span> })}
                                    <p class="chat-bubble" class:chat-bubble-user=is_user>{msg.message}</p>
                                    {is_user.then(|| view! { <span class="chat-avatar">"👤"</span> })}
                                </div>
                            }
                        }
                    />
                    <Show when=move || thinking.get()>
                        <div class="chat-row">
                            <span class="chat-avatar">"🤖"</span>
                            <div class="chat-bubble typing">
                                <span class="dot"></span>
                                <span class="dot"></span>
                                <span class="dot"></span>
                            </div>
                        </div>
                    </Show>
                </div>

                <div class="chat-input">
                    <input
                        type="text"
                        placeholder="Ketik pertanyaan Anda di sini..."
                        disabled=move || thinking.get()
                        on:input=move |ev| set_chat_input.set(event_target_value(&ev))
                        on:keydown=move |ev: ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                send_on_enter();
                            }
                        }
                        prop:value=chat_input
                    />
                    <button
                        class="btn btn-primary"
                        disabled=move || thinking.get() || chat_input.with(|c| c.trim().is_empty())
                        on:click=move |_| send_chat()
                    >
                        "➤"
                    </button>
                </div>
            </div>

            <div class="cloud-grid">
                <WordCloud title="Wordcloud Masalah Petani" kind=CloudKind::Masalah words=words_masalah/>
                <WordCloud
                    title="Wordcloud Pelatihan yang Dibutuhkan"
                    kind=CloudKind::Pelatihan
                    words=words_pelatihan
                />
            </div>
        </div>
    }
}

#[component]
fn WordCloud(
    title: &'static str,
    kind: CloudKind,
    #[prop(into)] words: Signal<Vec<WordWeight>>,
) -> impl IntoView {
    view! {
        <div class="card cloud-card">
            <h3>"✨ " {title}</h3>
            {move || words.with(|words| {
                if words.is_empty() {
                    view! { <p class="muted">"Memuat data..."</p> }.into_view()
                } else {
                    view! {
                        <div class="word-cloud">
                            {words
                                .iter()
                                .enumerate()
                                .map(|(i, word)| view! {
                                    <span
                                        class="word"
                                        style=word_style(kind, i, word.value)
                                        title=format!("{}: {}", word.text, word.value)
                                    >
                                        {word.text.clone()}
                                    </span>
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_view()
                }
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_button_follows_status() {
        assert_eq!(report_button_label(ReportStatus::Idle), "➤ Kirim Laporan");
        assert_eq!(report_button_label(ReportStatus::Success), "✔ Berhasil Disimpan!");
        assert_eq!(report_button_label(ReportStatus::Error), "⚠ Gagal Menyimpan");
    }
}
