//! Wall-clock-aligned cycle scheduler and QSO state machine (§4.10).
//!
//! The scheduler loop is cooperative: every suspension point accepts a
//! cancellation signal and returns cleanly without partial emission, rather
//! than being torn down mid-cycle.

use crate::js8::Speed;
use std::sync::mpsc::{RecvTimeoutError, Receiver};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// The cadence a scheduler runs at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cadence {
    Ft8,
    Js8(Speed),
}

impl Cadence {
    pub fn period_seconds(self) -> f32 {
        match self {
            Cadence::Ft8 => crate::ft8::SLOT_SECONDS,
            Cadence::Js8(speed) => speed.tx_window_seconds(),
        }
    }
}

/// Outcome of waiting for the next cycle boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The boundary was reached; run the cycle.
    Ready,
    /// A cancellation signal arrived first.
    Cancelled,
}

/// Seconds elapsed since `now` most recently crossed a cadence boundary.
pub fn seconds_into_period(now: SystemTime, period_seconds: f32) -> f32 {
    let epoch = now.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO).as_secs_f32();
    epoch.rem_euclid(period_seconds)
}

/// Seconds to sleep so the caller wakes 0.5 s past the next cadence boundary.
pub fn seconds_until_wake(now: SystemTime, period_seconds: f32) -> f32 {
    let into_period = seconds_into_period(now, period_seconds);
    let remaining = period_seconds - into_period;
    if remaining <= 0.5 {
        remaining + period_seconds + 0.5 - period_seconds
    } else {
        remaining + 0.5
    }
}

/// Sleeps until the next cycle boundary (0.5 s past it), or returns early
/// if `cancel` receives anything. Polls in short slices so cancellation is
/// prompt rather than waiting out the whole sleep.
pub fn wait_for_boundary(now: SystemTime, period_seconds: f32, cancel: &Receiver<()>) -> WaitOutcome {
    let mut remaining = Duration::from_secs_f32(seconds_until_wake(now, period_seconds).max(0.0));
    let slice = Duration::from_millis(100);
    while !remaining.is_zero() {
        let step = remaining.min(slice);
        match cancel.recv_timeout(step) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                tracing::info!(period_seconds, "cycle wait cancelled");
                return WaitOutcome::Cancelled;
            }
            Err(RecvTimeoutError::Timeout) => {}
        }
        remaining = remaining.saturating_sub(step);
    }
    tracing::info!(period_seconds, "cycle boundary reached");
    WaitOutcome::Ready
}

/// Whether the current slot matches the user's chosen TX parity (§4.10).
pub fn slot_matches_parity(now: SystemTime, period_seconds: f32, transmit_on_even_slot: bool) -> bool {
    let slot_index = (now.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO).as_secs_f32() / period_seconds)
        .floor() as u64;
    (slot_index % 2 == 0) == transmit_on_even_slot
}

/// The five-state QSO auto-sequencer (§4.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QsoState {
    Cq,
    CallingDx,
    ExchangingReport,
    RogerReport,
    Seventy3,
}

/// The three incoming-message shapes the auto-sequencer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomingKind {
    Cq,
    Response,
    Confirm,
}

impl QsoState {
    /// Advances the state machine on receipt of a message addressed to the
    /// local station. At [`Seventy3`](Self::Seventy3), auto-sequencing is
    /// disarmed (the machine does not advance further on its own).
    pub fn advance(self, incoming: IncomingKind) -> Self {
        match (self, incoming) {
            (QsoState::Cq, IncomingKind::Response) => QsoState::CallingDx,
            (QsoState::CallingDx, IncomingKind::Response) => QsoState::ExchangingReport,
            (QsoState::ExchangingReport, IncomingKind::Confirm) => QsoState::RogerReport,
            (QsoState::RogerReport, IncomingKind::Confirm) => QsoState::Seventy3,
            (state, _) => state,
        }
    }

    /// True once the QSO has reached its terminal state and TX should disarm.
    pub fn is_complete(self) -> bool {
        self == QsoState::Seventy3
    }
}

/// Classifies a decoded FT8 message into the shape the QSO state machine
/// reacts to.
///
/// `ack` and `report` vary independently (a mid-exchange report can carry
/// `ack: true`, and an acknowledgement token can arrive with `ack: false`),
/// so the report token itself, not the `ack` bit, decides Confirm vs Response.
pub fn classify_message(message: &crate::ft8::Message) -> IncomingKind {
    use crate::ft8::Message;
    match message {
        Message::Cq { .. } => IncomingKind::Cq,
        Message::Standard { report, .. } => {
            if matches!(report.as_str(), "RRR" | "73" | "RR73") {
                IncomingKind::Confirm
            } else {
                IncomingKind::Response
            }
        }
        Message::FreeText(_) => IncomingKind::Response,
    }
}
