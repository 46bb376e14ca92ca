use shared::constants::REGISTER_BUTTON_LABEL;
use shared::game_api::StartGameResponse;
use shared::shared_wheel_game::Player;
use shared::validation::{RegistrationErrors, RegistrationRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, InputEvent, SubmitEvent};
use yew::prelude::*;

use crate::api::GameClient;
use crate::styles;

/// A validated player, plus the server session when one was opened.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub player: Player,
    pub start: Option<StartGameResponse>,
}

#[derive(Properties, PartialEq)]
pub struct RegistrationFormProps {
    #[prop_or_default]
    pub stored_player: Option<Player>,
    pub remote: bool,
    pub on_registered: Callback<Registration>,
}

#[function_component(RegistrationForm)]
pub fn registration_form(props: &RegistrationFormProps) -> Html {
    let name = use_state(|| props.stored_player.as_ref().map(|p| p.name.clone()).unwrap_or_default());
    let phone = use_state(|| props.stored_player.as_ref().map(|p| p.phone.clone()).unwrap_or_default());
    let field_errors = use_state(RegistrationErrors::default);
    let submit_error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_name_input = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            name.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_phone_input = {
        let phone = phone.clone();
        Callback::from(move |e: InputEvent| {
            phone.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let onsubmit = {
        let name = name.clone();
        let phone = phone.clone();
        let field_errors = field_errors.clone();
        let submit_error = submit_error.clone();
        let loading = loading.clone();
        let remote = props.remote;
        let on_registered = props.on_registered.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if *loading {
                return;
            }

            let request = match RegistrationRequest::checked(&name, &phone) {
                Ok(request) => request,
                Err(errors) => {
                    field_errors.set(errors);
                    return;
                }
            };
            field_errors.set(RegistrationErrors::default());
            submit_error.set(None);

            if !remote {
                on_registered.emit(Registration {
                    player: request.into_player(),
                    start: None,
                });
                return;
            }

            loading.set(true);
            let loading = loading.clone();
            let submit_error = submit_error.clone();
            let on_registered = on_registered.clone();

            spawn_local(async move {
                match GameClient::from_env().start_game(&request).await {
                    Ok(start) => on_registered.emit(Registration {
                        player: request.into_player(),
                        start: Some(start),
                    }),
                    Err(e) => {
                        log::error!("Failed to start game session: {}", e);
                        submit_error.set(Some(e.user_message()));
                    }
                }
                loading.set(false);
            });
        })
    };

    let input_class = |error: &Option<String>| if error.is_some() { styles::INPUT_ERROR } else { styles::INPUT };

    html! {
        <div class={styles::CARD}>
            <h3 class={styles::TEXT_H3}>{"Đăng ký để quay"}</h3>
            <form class={styles::FORM} {onsubmit} novalidate=true>
                <div>
                    <label for="player-name" class={styles::TEXT_LABEL}>{"Họ và tên"}</label>
                    <input
                        id="player-name"
                        type="text"
                        class={input_class(&field_errors.name)}
                        placeholder="Nguyễn Văn An"
                        value={(*name).clone()}
                        oninput={on_name_input}
                        disabled={*loading}
                    />
                    if let Some(error) = &field_errors.name {
                        <p class={styles::TEXT_ERROR}>{error.clone()}</p>
                    }
                </div>
                <div>
                    <label for="player-phone" class={styles::TEXT_LABEL}>{"Số điện thoại"}</label>
                    <input
                        id="player-phone"
                        type="tel"
                        inputmode="numeric"
                        class={input_class(&field_errors.phone)}
                        placeholder="0912345678"
                        value={(*phone).clone()}
                        oninput={on_phone_input}
                        disabled={*loading}
                    />
                    if let Some(error) = &field_errors.phone {
                        <p class={styles::TEXT_ERROR}>{error.clone()}</p>
                    }
                </div>
                if let Some(error) = &*submit_error {
                    <div class={styles::CARD_ERROR}>{error.clone()}</div>
                }
                <button type="submit" class={styles::AUTH_BUTTON} disabled={*loading}>
                    if *loading {
                        <span class="inline-flex items-center gap-2">
                            <svg class={styles::LOADING_SPINNER} viewBox="0 0 24 24" fill="none">
                                <circle cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4" opacity="0.25" />
                                <path d="M4 12a8 8 0 018-8" stroke="currentColor" stroke-width="4" />
                            </svg>
                            {"Đang xử lý..."}
                        </span>
                    } else {
                        {REGISTER_BUTTON_LABEL}
                    }
                </button>
            </form>
        </div>
    }
}
