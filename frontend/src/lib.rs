pub mod api;
pub mod components;
pub mod config;
pub mod hooks;
pub mod storage;
pub mod styles;

use std::rc::Rc;

use rand::thread_rng;
use shared::constants::{NO_PLAYS_LABEL, SPINNING_LABEL, SPIN_BUTTON_LABEL};
use shared::error::WheelError;
use shared::game_api::SpinRequest;
use shared::settle_gate::SettleSource;
use shared::shared_wheel_game::{GameConfig, Prize};
use shared::spin_machine::{SpinOutcome, SpinTicket};
use shared::wheel_session::{PlayMode, SettleStep, WheelSession};
use wasm_bindgen_futures::spawn_local;
use web_sys::window;
use yew::prelude::*;

use crate::api::GameClient;
use crate::components::{LuckyWheel, PrizeNotification, Registration, RegistrationForm, SpinTarget};
use crate::config::play_mode;
use crate::hooks::{use_game_config, ConfigState};
use crate::storage::BrowserStore;

const CUSTOM_CSS: &str = r#"
@keyframes pulse-subtle {
    0% {
        transform: scale(1);
        box-shadow: 0 0 0 0 rgba(255, 215, 0, 0.4);
    }
    70% {
        transform: scale(1.02);
        box-shadow: 0 0 0 10px rgba(255, 215, 0, 0);
    }
    100% {
        transform: scale(1);
        box-shadow: 0 0 0 0 rgba(255, 215, 0, 0);
    }
}

.animate-pulse-subtle:not(:disabled) {
    animation: pulse-subtle 2s infinite;
}
"#;

fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

#[hook]
fn use_injected_css(css: &'static str) {
    use_effect_with(css, move |css| {
        let style = window().and_then(|w| w.document()).and_then(|document| {
            let head = document.head()?;
            let style = document.create_element("style").ok()?;
            style.set_text_content(Some(*css));
            head.append_child(&style).ok()?;
            Some(style)
        });

        move || {
            if let Some(style) = style {
                style.remove();
            }
        }
    });
}

#[derive(Debug, Clone, PartialEq)]
struct Reveal {
    prize: Prize,
    message: Option<String>,
}

enum SpinStart {
    Local(SpinTarget),
    Remote(SpinTicket, SpinRequest),
}

#[function_component(App)]
pub fn app() -> Html {
    use_injected_css(CUSTOM_CSS);

    let config_state = use_game_config();
    let session = use_mut_ref(|| None::<WheelSession<BrowserStore>>);
    let force_update = use_force_update();
    let error = use_state(|| None::<String>);
    let spin_target = use_state(|| None::<SpinTarget>);
    let reveal = use_state(|| None::<Reveal>);

    // Build the session once the prize list is known
    {
        let session = session.clone();
        let force_update = force_update.clone();
        let error = error.clone();

        use_effect_with(config_state.clone(), move |state| {
            if let ConfigState::Ready(config) = state {
                match WheelSession::new(GameConfig::clone(config), BrowserStore::new(), play_mode()) {
                    Ok(built) => {
                        log::info!(
                            "Wheel ready: {} prizes, {} plays left, {:?} mode",
                            built.config().segment_count(),
                            built.remaining_plays(),
                            built.mode()
                        );
                        *session.borrow_mut() = Some(built);
                        force_update.force_update();
                    }
                    Err(e) => {
                        log::error!("Invalid wheel config: {}", e);
                        error.set(Some(e.user_message()));
                    }
                }
            }
            || ()
        });
    }

    let on_registered = {
        let session = session.clone();
        let force_update = force_update.clone();
        let error = error.clone();

        Callback::from(move |registration: Registration| {
            let result = match session.borrow_mut().as_mut() {
                Some(s) => match registration.start {
                    Some(start) => {
                        s.attach_remote_session(registration.player, start);
                        Ok(())
                    }
                    None => s
                        .register(&registration.player.name, &registration.player.phone)
                        .map(|_| ()),
                },
                None => return,
            };

            match result {
                Ok(()) => error.set(None),
                Err(e) => error.set(Some(e.user_message())),
            }
            force_update.force_update();
        })
    };

    let on_spin = {
        let session = session.clone();
        let force_update = force_update.clone();
        let error = error.clone();
        let spin_target = spin_target.clone();
        let reveal = reveal.clone();

        Callback::from(move |_: MouseEvent| {
            reveal.set(None);
            error.set(None);

            let started = match session.borrow_mut().as_mut() {
                Some(s) if s.mode() == PlayMode::Local => s
                    .spin_local(&mut thread_rng(), now_ms())
                    .map(|(ticket, outcome)| SpinStart::Local(SpinTarget { ticket, angle: outcome.angle })),
                Some(s) => s
                    .begin_remote_spin()
                    .map(|(ticket, request)| SpinStart::Remote(ticket, request)),
                None => return,
            };

            match started {
                Ok(SpinStart::Local(target)) => spin_target.set(Some(target)),
                Ok(SpinStart::Remote(ticket, request)) => {
                    let session = session.clone();
                    let force_update = force_update.clone();
                    let error = error.clone();
                    let spin_target = spin_target.clone();

                    spawn_local(async move {
                        let response = GameClient::from_env().spin(&request).await;
                        let applied = match session.borrow_mut().as_mut() {
                            Some(s) => match response {
                                Ok(response) => s.apply_server_spin(ticket, response, &mut thread_rng()),
                                Err(e) => {
                                    s.abort(ticket);
                                    Err(e)
                                }
                            },
                            None => return,
                        };

                        match applied {
                            Ok(Some(outcome)) => spin_target.set(Some(SpinTarget {
                                ticket,
                                angle: outcome.angle,
                            })),
                            Ok(None) => {}
                            Err(e) => {
                                log::error!("Spin {} failed: {}", ticket.id(), e);
                                error.set(Some(e.user_message()));
                            }
                        }
                        force_update.force_update();
                    });
                }
                Err(e) => {
                    log::info!("Spin not started: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
            force_update.force_update();
        })
    };

    let on_settle = {
        let session = session.clone();
        let force_update = force_update.clone();
        let error = error.clone();
        let reveal = reveal.clone();

        Callback::from(move |(ticket, source): (SpinTicket, SettleSource)| {
            let step = match session.borrow_mut().as_mut() {
                Some(s) => s.settle(ticket, source, now_ms()),
                None => return,
            };

            match step {
                SettleStep::Settled(outcome) => reveal.set(Some(Reveal {
                    prize: outcome.prize,
                    message: None,
                })),
                SettleStep::Confirm(request) => {
                    let session = session.clone();
                    let force_update = force_update.clone();
                    let error = error.clone();
                    let reveal = reveal.clone();

                    spawn_local(async move {
                        let confirmed = GameClient::from_env().confirm(&request).await;
                        let settled: Result<Option<(SpinOutcome, Option<String>)>, WheelError> =
                            match session.borrow_mut().as_mut() {
                                Some(s) => match confirmed {
                                    Ok(message) => Ok(s.confirm_settled(ticket, now_ms()).map(|o| (o, message))),
                                    Err(e) => {
                                        s.abort(ticket);
                                        Err(e)
                                    }
                                },
                                None => return,
                            };

                        match settled {
                            Ok(Some((outcome, message))) => reveal.set(Some(Reveal {
                                prize: outcome.prize,
                                message,
                            })),
                            Ok(None) => {}
                            Err(e) => {
                                log::error!("Confirming spin {} failed: {}", ticket.id(), e);
                                error.set(Some(e.user_message()));
                            }
                        }
                        force_update.force_update();
                    });
                }
                SettleStep::Ignored => {}
            }
            force_update.force_update();
        })
    };

    let on_close = {
        let reveal = reveal.clone();
        Callback::from(move |_: ()| reveal.set(None))
    };

    let (title, description) = match &config_state {
        ConfigState::Ready(config) => (config.title.clone(), config.description.clone()),
        _ => (GameConfig::default().title, String::new()),
    };

    let body = match &config_state {
        ConfigState::Loading => html! {
            <div class="flex justify-center py-16">
                <svg class={styles::LOADING_SPINNER} viewBox="0 0 24 24" fill="none">
                    <circle cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4" opacity="0.25" />
                    <path d="M4 12a8 8 0 018-8" stroke="currentColor" stroke-width="4" />
                </svg>
            </div>
        },
        ConfigState::Failed(message) => html! {
            <div class={styles::CARD_ERROR}>{message.clone()}</div>
        },
        ConfigState::Ready(_) => {
            let guard = session.borrow();
            let rendered = match guard.as_ref() {
                None => html! {},
                Some(s) => match s.player() {
                    None => html! {
                        <RegistrationForm
                            stored_player={s.stored_player()}
                            remote={s.mode().is_remote()}
                            on_registered={on_registered.clone()}
                        />
                    },
                    Some(player) => {
                        let remaining = s.remaining_plays();
                        let spinning = s.is_spinning();
                        let label = if spinning {
                            SPINNING_LABEL
                        } else if remaining == 0 {
                            NO_PLAYS_LABEL
                        } else {
                            SPIN_BUTTON_LABEL
                        };

                        html! {
                            <>
                                <p class={styles::TEXT_GREETING}>
                                    {format!("Xin chào {}! Bạn còn {} lượt quay.", player.name, remaining)}
                                </p>
                                <LuckyWheel
                                    prizes={Rc::new(s.config().prizes.clone())}
                                    spin={*spin_target}
                                    on_settle={on_settle.clone()}
                                    on_spin={on_spin.clone()}
                                    disabled={spinning || remaining == 0}
                                />
                                <button
                                    class={styles::SPIN_BUTTON}
                                    onclick={on_spin.clone()}
                                    disabled={spinning || remaining == 0}
                                >
                                    {label}
                                </button>
                            </>
                        }
                    }
                },
            };
            rendered
        }
    };

    html! {
        <div class={styles::CONTAINER}>
            <div class={styles::CONTAINER_SM}>
                <h1 class={styles::TEXT_H1}>{title}</h1>
                if !description.is_empty() {
                    <p class={styles::TEXT_BODY}>{description.clone()}</p>
                }
                <div class="mt-8 space-y-6">
                    if let Some(message) = &*error {
                        <div class={styles::CARD_ERROR}>{message.clone()}</div>
                    }
                    {body}
                </div>
            </div>
            if let Some(reveal) = &*reveal {
                <PrizeNotification
                    prize={Some(reveal.prize.clone())}
                    message={reveal.message.clone()}
                    on_close={on_close}
                />
            }
        </div>
    }
}
