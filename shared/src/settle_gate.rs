use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;

/// What ended the spin animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleSource {
    /// The wheel's transition finished.
    Animation,
    /// The fallback timer fired first (the transition event was dropped).
    Fallback,
}

/// Producer half. Clone it once per signal that may end the spin; only the
/// first `fire` is delivered.
#[derive(Debug, Clone)]
pub struct SettleTrigger {
    slot: Rc<RefCell<Option<oneshot::Sender<SettleSource>>>>,
}

impl SettleTrigger {
    /// Returns true when this call was the one delivered to the receiver.
    pub fn fire(&self, source: SettleSource) -> bool {
        let Some(sender) = self.slot.borrow_mut().take() else {
            log::debug!("Settle signal {:?} ignored, gate already fired", source);
            return false;
        };
        sender.send(source).is_ok()
    }

    pub fn has_fired(&self) -> bool {
        self.slot.borrow().is_none()
    }
}

/// Consumer half. Resolves once, with the first source that fired, or with
/// `None` if every trigger was dropped without firing.
#[derive(Debug)]
pub struct SettleReceiver {
    receiver: oneshot::Receiver<SettleSource>,
}

impl SettleReceiver {
    pub async fn wait(self) -> Option<SettleSource> {
        self.receiver.await.ok()
    }

    pub fn try_take(&mut self) -> Option<SettleSource> {
        self.receiver.try_recv().ok().flatten()
    }
}

pub fn settle_gate() -> (SettleTrigger, SettleReceiver) {
    let (sender, receiver) = oneshot::channel();
    (
        SettleTrigger {
            slot: Rc::new(RefCell::new(Some(sender))),
        },
        SettleReceiver { receiver },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;

    #[test]
    fn test_first_signal_wins() {
        let (trigger, receiver) = settle_gate();
        let animation = trigger.clone();
        let fallback = trigger;

        assert!(animation.fire(SettleSource::Animation));
        assert!(!fallback.fire(SettleSource::Fallback));
        assert!(fallback.has_fired());
        assert_eq!(block_on(receiver.wait()), Some(SettleSource::Animation));
    }

    #[test]
    fn test_fallback_can_win() {
        let (trigger, mut receiver) = settle_gate();
        assert_eq!(receiver.try_take(), None);
        assert!(trigger.clone().fire(SettleSource::Fallback));
        assert!(!trigger.fire(SettleSource::Animation));
        assert_eq!(receiver.try_take(), Some(SettleSource::Fallback));
    }

    #[test]
    fn test_settlement_runs_exactly_once() {
        let settled = Rc::new(Cell::new(0));
        let (trigger, receiver) = settle_gate();

        let consumer = {
            let settled = settled.clone();
            async move {
                if receiver.wait().await.is_some() {
                    settled.set(settled.get() + 1);
                }
            }
        };

        trigger.clone().fire(SettleSource::Animation);
        trigger.fire(SettleSource::Fallback);
        block_on(consumer);
        assert_eq!(settled.get(), 1);
    }

    #[test]
    fn test_dropping_all_triggers_cancels() {
        let (trigger, receiver) = settle_gate();
        let other = trigger.clone();
        drop(trigger);
        drop(other);
        assert_eq!(block_on(receiver.wait()), None);
    }
}
