use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use shared::confetti::{ConfettiBurst, CONFETTI_DURATION_MS};
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct ConfettiCanvasProps {
    #[prop_or_default]
    pub on_finished: Callback<()>,
}

struct ConfettiAnimation {
    burst: ConfettiBurst,
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    frame: Option<AnimationFrame>,
}

impl ConfettiAnimation {
    /// Draws one frame. Returns false once every particle has left the canvas.
    fn draw_frame(&mut self) -> bool {
        self.context.clear_rect(0.0, 0.0, self.width, self.height);
        self.burst.step(self.width, self.height);

        for p in self.burst.particles() {
            self.context.save();
            let _ = self.context.translate(p.x, p.y);
            let _ = self.context.rotate(p.rotation);
            self.context.set_fill_style_str(p.color);
            self.context.fill_rect(-p.size / 2.0, -p.size / 4.0, p.size, p.size / 2.0);
            self.context.restore();
        }
        !self.burst.is_finished()
    }

    fn stop(&mut self) {
        self.frame = None;
        self.burst.clear();
        self.context.clear_rect(0.0, 0.0, self.width, self.height);
    }
}

fn schedule(animation: &Rc<RefCell<ConfettiAnimation>>, on_finished: Callback<()>) {
    let weak = Rc::downgrade(animation);
    let frame = request_animation_frame(move |_| {
        let Some(animation) = weak.upgrade() else {
            return;
        };
        let running = animation.borrow_mut().draw_frame();
        if running {
            schedule(&animation, on_finished);
        } else {
            animation.borrow_mut().stop();
            on_finished.emit(());
        }
    });
    animation.borrow_mut().frame = Some(frame);
}

/// One running celebration. Dropping it cancels the pending frame and the
/// deadline and wipes the canvas.
struct ConfettiRun {
    animation: Rc<RefCell<ConfettiAnimation>>,
    _deadline: Timeout,
}

impl Drop for ConfettiRun {
    fn drop(&mut self) {
        self.animation.borrow_mut().stop();
    }
}

fn start(canvas: &HtmlCanvasElement, on_finished: Callback<()>) -> Option<ConfettiRun> {
    let window = window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);

    let context = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())?;

    let burst = ConfettiBurst::new(&mut rand::thread_rng(), width / 2.0, height / 3.0);
    let animation = Rc::new(RefCell::new(ConfettiAnimation {
        burst,
        context,
        width,
        height,
        frame: None,
    }));
    schedule(&animation, on_finished.clone());

    let weak: Weak<RefCell<ConfettiAnimation>> = Rc::downgrade(&animation);
    let deadline = Timeout::new(CONFETTI_DURATION_MS, move || {
        if let Some(animation) = weak.upgrade() {
            animation.borrow_mut().stop();
            on_finished.emit(());
        }
    });

    Some(ConfettiRun {
        animation,
        _deadline: deadline,
    })
}

#[function_component(ConfettiCanvas)]
pub fn confetti_canvas(props: &ConfettiCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        let on_finished = props.on_finished.clone();

        use_effect_with((), move |_| {
            let run = canvas_ref
                .cast::<HtmlCanvasElement>()
                .and_then(|canvas| start(&canvas, on_finished));
            if run.is_none() {
                log::warn!("Confetti skipped, no 2d canvas available");
            }
            move || drop(run)
        });
    }

    html! {
        <canvas ref={canvas_ref} class={styles::CONFETTI_CANVAS}></canvas>
    }
}
