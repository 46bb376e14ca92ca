use chrono::Local;
use rand::Rng;

use crate::error::WheelError;
use crate::game_api::{ConfirmRequest, SpinRequest, SpinResponse, StartGameResponse};
use crate::play_history::{KeyValueStore, PlayHistoryStore};
use crate::prize_selection::select_prize_index;
use crate::settle_gate::SettleSource;
use crate::shared_wheel_game::{GameConfig, Player, SpinResult};
use crate::spin_machine::{OutcomeSource, SpinMachine, SpinOutcome, SpinPhase, SpinRejection, SpinTicket};
use crate::validation::RegistrationRequest;
use crate::wheel_angle::{prize_index_at, random_extra_rotations, target_angle_for_index};

/// Where outcomes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    /// Weighted draw in the browser, history kept in local storage.
    Local,
    /// The game-session API draws; `confirm` adds the confirmation round-trip.
    Remote { confirm: bool },
}

impl PlayMode {
    pub fn is_remote(&self) -> bool {
        matches!(self, PlayMode::Remote { .. })
    }
}

/// What the caller must do after the animation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SettleStep {
    /// Reveal this outcome.
    Settled(SpinOutcome),
    /// Send this confirmation, then call `confirm_settled` or `abort`.
    Confirm(ConfirmRequest),
    /// Duplicate or stale signal.
    Ignored,
}

/// Drives one visitor's page session: registration, spins, settlement.
pub struct WheelSession<S> {
    config: GameConfig,
    history: PlayHistoryStore<S>,
    mode: PlayMode,
    player: Option<Player>,
    machine: SpinMachine,
}

impl<S: KeyValueStore> WheelSession<S> {
    pub fn new(config: GameConfig, store: S, mode: PlayMode) -> Result<Self, WheelError> {
        config.validate()?;
        let history = PlayHistoryStore::new(store);
        let remaining = history.remaining_for(&config, &Local::now());
        Ok(Self {
            config,
            history,
            mode,
            player: None,
            machine: SpinMachine::new(remaining),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn history(&self) -> &PlayHistoryStore<S> {
        &self.history
    }

    pub fn phase(&self) -> SpinPhase {
        self.machine.phase()
    }

    pub fn is_spinning(&self) -> bool {
        self.machine.is_spinning()
    }

    pub fn remaining_plays(&self) -> u32 {
        self.machine.remaining_plays()
    }

    pub fn rotation(&self) -> f64 {
        self.machine.rotation()
    }

    pub fn active_ticket(&self) -> Option<SpinTicket> {
        self.machine.active_ticket()
    }

    pub fn last_outcome(&self) -> Option<&SpinOutcome> {
        self.machine.last_outcome()
    }

    /// Player saved by an earlier visit, for pre-filling the form.
    pub fn stored_player(&self) -> Option<Player> {
        self.history.get_stored_player()
    }

    pub fn register(&mut self, name: &str, phone: &str) -> Result<&Player, WheelError> {
        let player = RegistrationRequest::checked(name, phone)?.into_player();
        log::info!("Player {} registered", player.name);

        if !self.mode.is_remote() && !self.machine.is_spinning() {
            let remaining = self.history.remaining_for(&self.config, &Local::now());
            self.machine.set_remaining_plays(remaining);
        }
        Ok(&*self.player.insert(player))
    }

    /// Adopts a session the server opened for this player.
    pub fn attach_remote_session(&mut self, mut player: Player, start: StartGameResponse) -> &Player {
        log::info!(
            "Session {} opened for {}, {} plays left",
            start.session_id,
            player.name,
            start.remaining_plays
        );
        player.session_id = Some(start.session_id);
        player.remaining_plays = Some(start.remaining_plays);
        self.machine.set_remaining_plays(start.remaining_plays);
        self.player.insert(player)
    }

    /// Draws locally and charges the play at once.
    pub fn spin_local<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now_ms: i64,
    ) -> Result<(SpinTicket, SpinOutcome), WheelError> {
        let ticket = self.machine.request_spin(self.player.is_some())?;

        let index = match select_prize_index(&self.config.prizes, rng) {
            Ok(index) => index,
            Err(e) => {
                self.machine.abort(ticket);
                return Err(e);
            }
        };
        let outcome = SpinOutcome {
            prize: self.config.prizes[index].clone(),
            index,
            angle: target_angle_for_index(self.config.segment_count(), index, random_extra_rotations(rng)),
            source: OutcomeSource::LocalDraw,
        };
        log::info!("Spin {} drew {} at {:.1}°", ticket.id(), outcome.prize.name, outcome.angle);

        self.machine.commit_outcome(ticket, outcome.clone(), false);
        self.charge(ticket, now_ms);
        Ok((ticket, outcome))
    }

    /// Opens a remote spin and returns the request to send.
    pub fn begin_remote_spin(&mut self) -> Result<(SpinTicket, SpinRequest), WheelError> {
        let Some(session_id) = self.player.as_ref().and_then(|p| p.session_id.clone()) else {
            return Err(SpinRejection::NotRegistered.into());
        };
        let ticket = self.machine.request_spin(true)?;
        Ok((ticket, SpinRequest { session_id }))
    }

    /// Reconciles the server's draw with the wheel. The server's prize is
    /// authoritative and the angle is derived from its segment. `Ok(None)`
    /// means the response belongs to an abandoned spin.
    pub fn apply_server_spin<R: Rng + ?Sized>(
        &mut self,
        ticket: SpinTicket,
        response: SpinResponse,
        rng: &mut R,
    ) -> Result<Option<SpinOutcome>, WheelError> {
        if self.machine.active_ticket() != Some(ticket) {
            log::debug!("Dropping server result for stale spin {}", ticket.id());
            return Ok(None);
        }

        let count = self.config.segment_count();
        let (index, prize) = match self.config.prize_index(&response.prize.id) {
            Some(index) => {
                let mut prize = self.config.prizes[index].clone();
                prize.id = response.prize.id.clone();
                (index, prize)
            }
            None if response.index < count => {
                log::warn!(
                    "Server prize {} is not in the wheel config, using segment {}",
                    response.prize.id,
                    response.index
                );
                (response.index, response.prize.to_prize())
            }
            None => {
                self.machine.abort(ticket);
                return Err(WheelError::SpinRequest(format!(
                    "!server prize {} at index {} is not on the wheel",
                    response.prize.id, response.index
                )));
            }
        };

        if response.index != index || prize_index_at(response.angle, count) != Some(index) {
            log::warn!(
                "Server spin disagrees with its prize {} (index {}, angle {}), landing on segment {}",
                response.prize.id,
                response.index,
                response.angle,
                index
            );
        }

        let outcome = SpinOutcome {
            prize,
            index,
            angle: target_angle_for_index(count, index, random_extra_rotations(rng)),
            source: OutcomeSource::Server,
        };
        self.machine.commit_outcome(ticket, outcome.clone(), false);
        Ok(Some(outcome))
    }

    /// Called when the animation ends (whichever signal came first).
    pub fn settle(&mut self, ticket: SpinTicket, source: SettleSource, now_ms: i64) -> SettleStep {
        let Some(outcome) = self.machine.begin_settle(ticket).cloned() else {
            return SettleStep::Ignored;
        };
        log::info!("Spin {} ended by {:?}", ticket.id(), source);

        let session_id = self.player.as_ref().and_then(|p| p.session_id.clone());
        match (self.mode, session_id) {
            (PlayMode::Remote { confirm: true }, Some(session_id)) => SettleStep::Confirm(ConfirmRequest {
                session_id,
                prize_id: outcome.prize.id.clone(),
                prize_name: outcome.prize.name.clone(),
                prize_index: outcome.index,
                angle: outcome.angle,
            }),
            _ => self.finish(ticket, now_ms),
        }
    }

    /// Completes a settlement that waited for the server's confirmation.
    pub fn confirm_settled(&mut self, ticket: SpinTicket, now_ms: i64) -> Option<SpinOutcome> {
        match self.finish(ticket, now_ms) {
            SettleStep::Settled(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Failure path: nothing is charged or persisted for the spin.
    pub fn abort(&mut self, ticket: SpinTicket) -> bool {
        self.machine.abort(ticket)
    }

    fn finish(&mut self, ticket: SpinTicket, now_ms: i64) -> SettleStep {
        self.charge(ticket, now_ms);
        match self.machine.finish_settle(ticket) {
            Some(outcome) => SettleStep::Settled(outcome),
            None => SettleStep::Ignored,
        }
    }

    // A failed history write does not void a prize that was already drawn.
    fn charge(&mut self, ticket: SpinTicket, now_ms: i64) {
        if !self.machine.charge(ticket) {
            return;
        }
        let remaining = self.machine.remaining_plays();
        let prize_id = match self.machine.outcome() {
            Some(outcome) => outcome.prize.id.clone(),
            None => return,
        };
        let Some(player) = self.player.as_mut() else {
            return;
        };
        if player.remaining_plays.is_some() {
            player.remaining_plays = Some(remaining);
        }

        let spin = SpinResult {
            prize_id,
            timestamp: now_ms,
        };
        if let Err(e) = self.history.save_play_history(player, spin) {
            log::error!("Failed to persist spin {}: {}", ticket.id(), e);
        }
    }
}
