//! Error and status display components

use kopintar_common::ApiError;
use leptos::*;

/// Error display component
#[component]
pub fn ErrorAlert(
    /// Error to display
    error: ApiError,
    /// Overrides the message derived from the error
    #[prop(optional, into)]
    message: Option<String>,
    /// Callback for retry button
    #[prop(optional)]
    on_retry: Option<Callback<()>>,
    /// Callback for dismiss button
    #[prop(optional)]
    on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    let severity = error.severity();
    let icon = error.icon();
    let message = message.unwrap_or_else(|| error.describe());
    let details = error.detail.as_ref().map(|d| d.to_string());

    view! {
        <div class={format!("alert {}", severity.class())}>
            <div class="alert-icon">{icon}</div>
            <div class="alert-content">
                <div class="alert-message">{message}</div>
                {details.map(|details| view! {
                    <details class="alert-details">
                        <summary>"Detail teknis"</summary>
                        <code>{details}</code>
                    </details>
                })}
            </div>
            <div class="alert-actions">
                {on_retry.map(|on_retry| view! {
                    <button
                        class="btn-secondary btn-sm"
                        on:click=move |_| on_retry.call(())
                    >
                        "Coba Lagi"
                    </button>
                })}
                {on_dismiss.map(|on_dismiss| view! {
                    <button
                        class="btn-ghost btn-sm"
                        on:click=move |_| on_dismiss.call(())
                    >
                        "✕"
                    </button>
                })}
            </div>
        </div>
    }
}

/// Loading error state with an optional retry
#[component]
pub fn LoadingError(
    error: ApiError,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    let icon = error.icon();
    let message = error.describe();

    view! {
        <div class="loading-error">
            <div class="loading-error-icon">{icon}</div>
            <h3>"Gagal Memuat Data"</h3>
            <p>{message}</p>
            {on_retry.map(|on_retry| view! {
                <button class="btn-primary" on:click=move |_| on_retry.call(())>
                    "Coba Lagi"
                </button>
            })}
        </div>
    }
}

/// Empty state component (when no data available)
#[component]
pub fn EmptyState(
    #[prop(default = "📦")] icon: &'static str,
    #[prop(into)] title: String,
    #[prop(optional, into)] description: Option<String>,
) -> impl IntoView {
    view! {
        <div class="empty-state">
            <div class="empty-state-icon">{icon}</div>
            <h3>{title}</h3>
            {description.map(|d| view! { <p>{d}</p> })}
        </div>
    }
}

/// Blocking browser alert, used for form outcomes
pub fn notify(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
