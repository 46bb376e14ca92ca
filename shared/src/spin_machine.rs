use crate::constants::{ALREADY_SPINNING_ERROR, NOT_REGISTERED_ERROR, NO_PLAYS_LEFT_ERROR};
use crate::shared_wheel_game::Prize;

/// Identifies one spin attempt. Events carrying an older ticket are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpinTicket(u64);

impl SpinTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    Idle,
    Spinning,
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinRejection {
    AlreadySpinning,
    NoPlaysLeft,
    NotRegistered,
}

impl SpinRejection {
    pub fn message(&self) -> &'static str {
        match self {
            SpinRejection::AlreadySpinning => ALREADY_SPINNING_ERROR,
            SpinRejection::NoPlaysLeft => NO_PLAYS_LEFT_ERROR,
            SpinRejection::NotRegistered => NOT_REGISTERED_ERROR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeSource {
    LocalDraw,
    Server,
}

/// The authoritative result of one spin. `angle` is derived from `index`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinOutcome {
    pub prize: Prize,
    pub index: usize,
    pub angle: f64,
    pub source: OutcomeSource,
}

#[derive(Debug)]
struct ActiveSpin {
    ticket: SpinTicket,
    outcome: Option<SpinOutcome>,
    charged: bool,
    settling: bool,
    plays_before: u32,
}

/// Idle -> Spinning -> Settled, re-entrant from Settled.
///
/// The machine only tracks state and the remaining-plays counter; the
/// session applies the persistence side effects around it.
#[derive(Debug)]
pub struct SpinMachine {
    phase: SpinPhase,
    remaining_plays: u32,
    next_ticket: u64,
    active: Option<ActiveSpin>,
    last_outcome: Option<SpinOutcome>,
}

impl SpinMachine {
    pub fn new(remaining_plays: u32) -> Self {
        Self {
            phase: SpinPhase::Idle,
            remaining_plays,
            next_ticket: 1,
            active: None,
            last_outcome: None,
        }
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }

    pub fn remaining_plays(&self) -> u32 {
        self.remaining_plays
    }

    /// Replaces the counter, e.g. with the value a new server session reports.
    pub fn set_remaining_plays(&mut self, remaining: u32) {
        if self.is_spinning() {
            log::debug!("Not overriding remaining plays while a spin is in flight");
            return;
        }
        self.remaining_plays = remaining;
    }

    pub fn active_ticket(&self) -> Option<SpinTicket> {
        self.active.as_ref().map(|spin| spin.ticket)
    }

    /// Outcome of the spin in flight, or of the last settled spin.
    pub fn outcome(&self) -> Option<&SpinOutcome> {
        match &self.active {
            Some(spin) => spin.outcome.as_ref(),
            None => self.last_outcome.as_ref(),
        }
    }

    pub fn last_outcome(&self) -> Option<&SpinOutcome> {
        self.last_outcome.as_ref()
    }

    /// Wheel rotation to render. A new spin starts from a zero baseline.
    pub fn rotation(&self) -> f64 {
        self.outcome().map(|outcome| outcome.angle).unwrap_or(0.0)
    }

    pub fn request_spin(&mut self, registered: bool) -> Result<SpinTicket, SpinRejection> {
        if self.is_spinning() {
            return Err(SpinRejection::AlreadySpinning);
        }
        if !registered {
            return Err(SpinRejection::NotRegistered);
        }
        if self.remaining_plays == 0 {
            return Err(SpinRejection::NoPlaysLeft);
        }

        let ticket = SpinTicket(self.next_ticket);
        self.next_ticket += 1;
        self.active = Some(ActiveSpin {
            ticket,
            outcome: None,
            charged: false,
            settling: false,
            plays_before: self.remaining_plays,
        });
        self.phase = SpinPhase::Spinning;
        log::info!("Spin {} started", ticket.id());
        Ok(ticket)
    }

    fn active_mut(&mut self, ticket: SpinTicket) -> Option<&mut ActiveSpin> {
        match self.active.as_mut() {
            Some(spin) if spin.ticket == ticket => Some(spin),
            _ => {
                log::debug!("Ignoring event for stale spin {}", ticket.id());
                None
            }
        }
    }

    /// Records the outcome of the active spin. With `charge` the play is
    /// counted immediately instead of at settlement.
    pub fn commit_outcome(&mut self, ticket: SpinTicket, outcome: SpinOutcome, charge: bool) -> bool {
        let Some(spin) = self.active_mut(ticket) else {
            return false;
        };
        if spin.outcome.is_some() {
            log::debug!("Spin {} already has an outcome", ticket.id());
            return false;
        }
        spin.outcome = Some(outcome);
        if charge {
            self.charge(ticket);
        }
        true
    }

    /// Counts the play once. Returns true when this call did the decrement.
    pub fn charge(&mut self, ticket: SpinTicket) -> bool {
        let Some(spin) = self.active_mut(ticket) else {
            return false;
        };
        if spin.charged {
            return false;
        }
        spin.charged = true;
        self.remaining_plays = self.remaining_plays.saturating_sub(1);
        true
    }

    /// One-shot entry into settlement. Only the first call for a spin with an
    /// outcome gets it back; later calls (the losing timer) get `None`.
    pub fn begin_settle(&mut self, ticket: SpinTicket) -> Option<&SpinOutcome> {
        let spin = self.active_mut(ticket)?;
        if spin.settling || spin.outcome.is_none() {
            return None;
        }
        spin.settling = true;
        spin.outcome.as_ref()
    }

    pub fn finish_settle(&mut self, ticket: SpinTicket) -> Option<SpinOutcome> {
        if !self.active_mut(ticket).map_or(false, |spin| spin.settling) {
            return None;
        }
        self.charge(ticket);

        let spin = self.active.take()?;
        self.phase = SpinPhase::Settled;
        self.last_outcome = spin.outcome.clone();
        log::info!("Spin {} settled", ticket.id());
        spin.outcome
    }

    /// Abandons the active spin: back to Idle with the counter as it was.
    pub fn abort(&mut self, ticket: SpinTicket) -> bool {
        let Some(plays_before) = self.active_mut(ticket).map(|spin| spin.plays_before) else {
            return false;
        };
        self.active = None;
        self.remaining_plays = plays_before;
        self.phase = SpinPhase::Idle;
        log::info!("Spin {} aborted", ticket.id());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(index: usize) -> SpinOutcome {
        SpinOutcome {
            prize: Prize::new(index as i64 + 1, "Voucher", 1.0, "#fff"),
            index,
            angle: 1000.0 + index as f64,
            source: OutcomeSource::LocalDraw,
        }
    }

    #[test]
    fn test_full_cycle() {
        let mut machine = SpinMachine::new(2);
        assert_eq!(machine.phase(), SpinPhase::Idle);

        let ticket = machine.request_spin(true).unwrap();
        assert_eq!(machine.phase(), SpinPhase::Spinning);
        assert_eq!(machine.rotation(), 0.0);

        assert!(machine.commit_outcome(ticket, outcome(3), true));
        assert_eq!(machine.remaining_plays(), 1);
        assert_eq!(machine.rotation(), 1003.0);

        assert_eq!(machine.begin_settle(ticket).map(|o| o.index), Some(3));
        let settled = machine.finish_settle(ticket).unwrap();
        assert_eq!(settled.index, 3);
        assert_eq!(machine.phase(), SpinPhase::Settled);
        assert_eq!(machine.remaining_plays(), 1);
    }

    #[test]
    fn test_rejections_have_no_side_effects() {
        let mut machine = SpinMachine::new(0);
        assert_eq!(machine.request_spin(true), Err(SpinRejection::NoPlaysLeft));
        assert_eq!(machine.phase(), SpinPhase::Idle);
        assert_eq!(machine.active_ticket(), None);

        let mut machine = SpinMachine::new(3);
        assert_eq!(machine.request_spin(false), Err(SpinRejection::NotRegistered));
        let ticket = machine.request_spin(true).unwrap();
        assert_eq!(machine.request_spin(true), Err(SpinRejection::AlreadySpinning));
        assert_eq!(machine.active_ticket(), Some(ticket));
        assert_eq!(machine.remaining_plays(), 3);
    }

    #[test]
    fn test_settlement_is_one_shot() {
        let mut machine = SpinMachine::new(1);
        let ticket = machine.request_spin(true).unwrap();
        machine.commit_outcome(ticket, outcome(0), false);

        assert!(machine.begin_settle(ticket).is_some());
        assert!(machine.begin_settle(ticket).is_none());
        assert!(machine.finish_settle(ticket).is_some());
        assert!(machine.finish_settle(ticket).is_none());
        assert_eq!(machine.remaining_plays(), 0);
    }

    #[test]
    fn test_cannot_settle_before_outcome() {
        let mut machine = SpinMachine::new(1);
        let ticket = machine.request_spin(true).unwrap();
        assert!(machine.begin_settle(ticket).is_none());
        assert!(machine.finish_settle(ticket).is_none());
        assert!(machine.is_spinning());
    }

    #[test]
    fn test_abort_restores_counter() {
        let mut machine = SpinMachine::new(2);
        let ticket = machine.request_spin(true).unwrap();
        machine.commit_outcome(ticket, outcome(1), false);
        machine.begin_settle(ticket);

        assert!(machine.abort(ticket));
        assert_eq!(machine.phase(), SpinPhase::Idle);
        assert_eq!(machine.remaining_plays(), 2);
        assert!(machine.last_outcome().is_none());
        assert!(!machine.abort(ticket));
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut machine = SpinMachine::new(3);
        let first = machine.request_spin(true).unwrap();
        machine.abort(first);

        let second = machine.request_spin(true).unwrap();
        assert!(second > first);
        assert!(!machine.commit_outcome(first, outcome(0), true));
        assert_eq!(machine.remaining_plays(), 3);
        assert!(machine.begin_settle(first).is_none());
        assert_eq!(machine.active_ticket(), Some(second));
    }

    #[test]
    fn test_settled_is_reentrant_with_fresh_baseline() {
        let mut machine = SpinMachine::new(2);
        let first = machine.request_spin(true).unwrap();
        machine.commit_outcome(first, outcome(2), true);
        machine.begin_settle(first);
        machine.finish_settle(first);
        assert_eq!(machine.rotation(), 1002.0);

        let second = machine.request_spin(true).unwrap();
        assert_eq!(machine.rotation(), 0.0);
        machine.commit_outcome(second, outcome(5), true);
        assert!(machine.begin_settle(second).is_some());
        assert_eq!(machine.finish_settle(second).unwrap().index, 5);
        assert_eq!(machine.remaining_plays(), 0);
        assert_eq!(machine.request_spin(true), Err(SpinRejection::NoPlaysLeft));
    }

    #[test]
    fn test_server_remaining_is_not_applied_mid_spin() {
        let mut machine = SpinMachine::new(1);
        machine.set_remaining_plays(4);
        assert_eq!(machine.remaining_plays(), 4);
        let _ticket = machine.request_spin(true).unwrap();
        machine.set_remaining_plays(9);
        assert_eq!(machine.remaining_plays(), 4);
    }
}
