/// API key settings panel

use crate::api::ApiClient;
use crate::check_data::ApiKey;
use crate::dashboard::Toast;
use crate::error::CheckError;
use patternfly_yew::prelude::{Button, ButtonVariant};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Trimmed key, or an error for blank input
pub fn normalize_key(input: &str) -> Result<String, CheckError> {
    let key = input.trim();
    if key.is_empty() {
        Err(CheckError::MissingKey)
    } else {
        Ok(key.to_string())
    }
}

#[derive(Properties, PartialEq)]
pub struct ApiKeysPanelProps {
    pub api: ApiClient,
    pub on_toast: Callback<Toast>,
}

#[function_component(ApiKeysPanel)]
pub fn api_keys_panel(props: &ApiKeysPanelProps) -> Html {
    let expanded = use_state(|| false);
    let keys = use_state(Vec::<ApiKey>::new);
    let new_key = use_state(String::new);

    let reload = {
        let api = props.api.clone();
        let keys = keys.clone();
        let on_toast = props.on_toast.clone();
        Callback::from(move |_: ()| {
            let api = api.clone();
            let keys = keys.clone();
            let on_toast = on_toast.clone();
            spawn_local(async move {
                match api.list_keys().await {
                    Ok(list) => keys.set(list),
                    Err(e) => {
                        log::warn!("Failed to load API keys: {}", e);
                        on_toast.emit(Toast::from(CheckError::from(e)));
                    }
                }
            });
        })
    };

    // Load keys the first time the panel opens
    {
        let reload = reload.clone();
        use_effect_with(*expanded, move |open| {
            if *open {
                reload.emit(());
            }
            || ()
        });
    }

    let toggle = {
        let expanded = expanded.clone();
        Callback::from(move |_| expanded.set(!*expanded))
    };

    let on_input = {
        let new_key = new_key.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                new_key.set(input.value());
            }
        })
    };

    let on_add = {
        let api = props.api.clone();
        let new_key = new_key.clone();
        let on_toast = props.on_toast.clone();
        let reload = reload.clone();
        Callback::from(move |_| {
            let key = match normalize_key(&new_key) {
                Ok(key) => key,
                Err(e) => {
                    on_toast.emit(e.into());
                    return;
                }
            };
            let api = api.clone();
            let new_key = new_key.clone();
            let on_toast = on_toast.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api.add_key(&key).await {
                    Ok(()) => {
                        new_key.set(String::new());
                        on_toast.emit(Toast::success("API key added successfully"));
                        reload.emit(());
                    }
                    Err(e) => on_toast.emit(Toast::from(CheckError::from(e))),
                }
            });
        })
    };

    let on_delete = {
        let api = props.api.clone();
        let on_toast = props.on_toast.clone();
        let reload = reload.clone();
        Callback::from(move |key: String| {
            let api = api.clone();
            let on_toast = on_toast.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api.delete_key(&key).await {
                    Ok(()) => {
                        on_toast.emit(Toast::success("API key deleted successfully"));
                        reload.emit(());
                    }
                    Err(e) => on_toast.emit(Toast::from(CheckError::from(e))),
                }
            });
        })
    };

    html! {
        <section class="settings-section card">
            <div class="card-header">
                <h2 class="card-title">{"API Keys"}</h2>
                <Button onclick={toggle} variant={ButtonVariant::Secondary}>
                    {if *expanded { "▲ Hide" } else { "▼ Manage" }}
                </Button>
            </div>

            if *expanded {
                <div class="settings-body">
                    <div class="key-input-row">
                        <input
                            type="text"
                            placeholder="Paste a ScrapingDog API key"
                            value={(*new_key).clone()}
                            oninput={on_input}
                            class="key-input"
                        />
                        <Button onclick={on_add}>{"Add"}</Button>
                    </div>

                    if keys.is_empty() {
                        <div class="empty-state">{"No API keys configured"}</div>
                    } else {
                        <ul class="key-list">
                            {for keys.iter().map(|k| {
                                let key = k.key.clone();
                                html! {
                                    <li key={k.key.clone()} class="key-item">
                                        <code class="key-masked">{&k.masked}</code>
                                        <Button
                                            onclick={on_delete.reform(move |_| key.clone())}
                                            variant={ButtonVariant::Danger}
                                        >
                                            {"🗑️"}
                                        </Button>
                                    </li>
                                }
                            })}
                        </ul>
                    }
                </div>
            }
        </section>
    }
}
