use shared::constants::{CLOSE_LABEL, LOSE_MESSAGE, LOSE_TITLE, WIN_CONTACT_MESSAGE, WIN_TITLE};
use shared::shared_wheel_game::Prize;
use yew::prelude::*;

use crate::components::ConfettiCanvas;
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct PrizeNotificationProps {
    pub prize: Option<Prize>,
    #[prop_or_default]
    pub message: Option<String>,
    pub on_close: Callback<()>,
}

#[function_component(PrizeNotification)]
pub fn prize_notification(props: &PrizeNotificationProps) -> Html {
    let confetti_done = use_state(|| false);

    // A new prize gets a fresh celebration
    {
        let confetti_done = confetti_done.clone();
        use_effect_with(props.prize.clone(), move |_| {
            confetti_done.set(false);
            || ()
        });
    }

    let Some(prize) = &props.prize else {
        return html! {};
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_card_click = Callback::from(|e: MouseEvent| e.stop_propagation());
    let on_confetti_finished = {
        let confetti_done = confetti_done.clone();
        Callback::from(move |_: ()| confetti_done.set(true))
    };

    let winning = prize.is_winning();

    html! {
        <div class={styles::MODAL_BACKDROP} onclick={on_close.clone()}>
            if winning && !*confetti_done {
                <ConfettiCanvas on_finished={on_confetti_finished} />
            }
            <div class={styles::MODAL_CARD} role="dialog" aria-modal="true" onclick={on_card_click}>
                if winning {
                    <h3 class={styles::TEXT_H3}>{WIN_TITLE}</h3>
                    <p class="mt-2 text-gray-600 dark:text-gray-300">{"Bạn đã trúng"}</p>
                    <p class={styles::MODAL_PRIZE}>{prize.name.clone()}</p>
                    <p class="mt-4 text-sm text-gray-500 dark:text-gray-400">{WIN_CONTACT_MESSAGE}</p>
                } else {
                    <h3 class={styles::TEXT_H3}>{LOSE_TITLE}</h3>
                    <p class="mt-2 text-gray-600 dark:text-gray-300">{LOSE_MESSAGE}</p>
                }
                if let Some(message) = &props.message {
                    <p class="mt-4 text-sm text-gray-500 dark:text-gray-400">{message.clone()}</p>
                }
                <button class={classes!(styles::AUTH_BUTTON, "mt-6")} onclick={on_close}>
                    {CLOSE_LABEL}
                </button>
            </div>
        </div>
    }
}
