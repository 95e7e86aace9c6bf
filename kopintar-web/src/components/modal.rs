use leptos::*;

/// Overlay dialog; clicking the backdrop closes it
#[component]
pub fn Modal(
    #[prop(into)] open: Signal<bool>,
    on_close: Callback<()>,
    #[prop(into)] title: String,
    #[prop(optional, into)] description: Option<String>,
    /// Extra class for sizing, e.g. `modal-wide`
    #[prop(default = "")]
    class: &'static str,
    children: ChildrenFn,
) -> impl IntoView {
    let title = store_value(title);
    let description = store_value(description);

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" on:click=move |_| on_close.call(())>
                <div
                    class=format!("modal {}", class)
                    on:click=|ev| ev.stop_propagation()
                >
                    <div class="modal-header">
                        <h2>{title.get_value()}</h2>
                        {description.get_value().map(|d| view! { <p class="modal-description">{d}</p> })}
                        <button class="modal-close" on:click=move |_| on_close.call(())>"✕"</button>
                    </div>
                    <div class="modal-body">{children()}</div>
                </div>
            </div>
        </Show>
    }
}
