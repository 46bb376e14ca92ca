use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use shared::constants::SPIN_BUTTON_LABEL;
use shared::settle_gate::{settle_gate, SettleSource};
use shared::shared_wheel_game::{
    Prize, ROTATION_RESET_DELAY_MS, SETTLE_FALLBACK_MS, SPIN_DURATION_MS, SPIN_EASING,
};
use shared::spin_machine::SpinTicket;
use shared::wheel_angle::segment_angle;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::styles;

const DEFAULT_LABEL_COLOR: &str = "#1F2937";

/// The rotation the wheel must end on for one spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinTarget {
    pub ticket: SpinTicket,
    pub angle: f64,
}

#[derive(Properties, PartialEq)]
pub struct LuckyWheelProps {
    pub prizes: Rc<Vec<Prize>>,
    #[prop_or_default]
    pub spin: Option<SpinTarget>,
    pub on_settle: Callback<(SpinTicket, SettleSource)>,
    /// Clicking the hub starts a spin, like the button below the wheel.
    #[prop_or_default]
    pub on_spin: Callback<MouseEvent>,
    #[prop_or_default]
    pub disabled: bool,
}

fn wheel_background(prizes: &[Prize]) -> String {
    let segment = segment_angle(prizes.len());
    let stops = prizes
        .iter()
        .enumerate()
        .map(|(i, prize)| {
            format!(
                "{} {}deg {}deg",
                prize.background_color,
                i as f64 * segment,
                (i + 1) as f64 * segment
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("background: conic-gradient({});", stops)
}

#[function_component(LuckyWheel)]
pub fn lucky_wheel(props: &LuckyWheelProps) -> Html {
    let disc_ref = use_node_ref();
    let rotation = use_state(|| 0.0_f64);
    let animating = use_state(|| false);

    // Each new target restarts the wheel from 0 and races the transition
    // against the fallback timer. Dropping the guards cancels the spin's
    // timers and listener, which also closes the gate.
    {
        let disc_ref = disc_ref.clone();
        let rotation = rotation.clone();
        let animating = animating.clone();
        let on_settle = props.on_settle.clone();

        use_effect_with(props.spin, move |spin| {
            let guards = spin.map(|target| {
                animating.set(false);
                rotation.set(0.0);

                let (trigger, receiver) = settle_gate();

                let apply = Timeout::new(ROTATION_RESET_DELAY_MS, move || {
                    animating.set(true);
                    rotation.set(target.angle);
                });

                let fallback = {
                    let trigger = trigger.clone();
                    Timeout::new(SETTLE_FALLBACK_MS, move || {
                        if trigger.fire(SettleSource::Fallback) {
                            log::warn!("Spin {} settled by fallback timer", target.ticket.id());
                        }
                    })
                };

                let listener = disc_ref.cast::<HtmlElement>().map(|disc| {
                    let trigger = trigger.clone();
                    EventListener::new(&disc, "transitionend", move |_| {
                        trigger.fire(SettleSource::Animation);
                    })
                });
                if listener.is_none() {
                    log::warn!("Wheel element missing, spin {} relies on the fallback timer", target.ticket.id());
                }

                spawn_local(async move {
                    if let Some(source) = receiver.wait().await {
                        on_settle.emit((target.ticket, source));
                    }
                });

                (apply, fallback, listener, trigger)
            });

            move || drop(guards)
        });
    }

    let prizes = &props.prizes;
    let segment = segment_angle(prizes.len());
    let transition = if *animating {
        format!("transform {}ms {}", SPIN_DURATION_MS, SPIN_EASING)
    } else {
        "none".to_string()
    };
    let disc_style = format!(
        "{} transform: rotate({}deg); transition: {};",
        wheel_background(prizes),
        *rotation,
        transition
    );

    html! {
        <div class={styles::WHEEL_WRAPPER}>
            <div class={styles::WHEEL_POINTER}></div>
            <div ref={disc_ref} class={styles::WHEEL_DISC} style={disc_style}>
                { for prizes.iter().enumerate().map(|(i, prize)| {
                    let middle = i as f64 * segment + segment / 2.0;
                    let label_style = format!(
                        "color: {}; transform: rotate({}deg) translateY(-7.5rem);",
                        prize.text_color.as_deref().unwrap_or(DEFAULT_LABEL_COLOR),
                        middle
                    );
                    html! {
                        <div key={prize.id.to_string()} class={styles::WHEEL_LABEL} style={label_style}>
                            {prize.name.clone()}
                        </div>
                    }
                }) }
            </div>
            <button
                class={styles::WHEEL_HUB}
                onclick={props.on_spin.clone()}
                disabled={props.disabled}
                aria-label={SPIN_BUTTON_LABEL}
            >
                {"SPIN"}
            </button>
        </div>
    }
}
