/// Progress polling state machine
///
/// The poller decides *whether* a tick runs and *which* responses count; it
/// does not own a timer or do any I/O. The browser driver calls
/// `begin_tick` on every timer fire, performs the request, and hands the
/// result back through `deliver`. Tests drive the same calls directly.
///
/// Responses are matched to ticks by sequence number. A response is only
/// accepted if its tick is newer than the last accepted one and belongs to
/// the current run, so a slow response can never roll the display back.

use crate::check_data::ProgressSnapshot;
use crate::error::CheckError;

pub const DEFAULT_POLL_INTERVAL_MS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Polling,
}

/// Sequence number of one issued status query
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stopped poller, previous run, or superseded by a newer response
    Stale,
    /// Transport or parse failure; polling continues
    Failed,
    Snapshot(ProgressSnapshot),
    /// Terminal snapshot; the poller is now idle
    Finished(ProgressSnapshot),
}

#[derive(Debug, Clone)]
pub struct Poller {
    state: PollerState,
    interval_ms: u32,
    next_seq: u64,
    run_floor: u64,
    last_accepted: Option<u64>,
}

impl Poller {
    pub fn new() -> Self {
        Poller {
            state: PollerState::Idle,
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
            next_seq: 0,
            run_floor: 0,
            last_accepted: None,
        }
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    pub fn is_polling(&self) -> bool {
        self.state == PollerState::Polling
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Idle → Polling; returns false (and changes nothing) if already polling
    pub fn start(&mut self, interval_ms: u32) -> bool {
        if self.is_polling() {
            return false;
        }
        self.state = PollerState::Polling;
        self.interval_ms = interval_ms;
        self.run_floor = self.next_seq;
        log::debug!("Polling every {}ms", interval_ms);
        true
    }

    /// Polling → Idle; safe to call repeatedly
    pub fn stop(&mut self) -> bool {
        if !self.is_polling() {
            return false;
        }
        self.state = PollerState::Idle;
        log::debug!("Polling stopped");
        true
    }

    /// Issue the next tick, or None while idle
    pub fn begin_tick(&mut self) -> Option<Ticket> {
        if !self.is_polling() {
            return None;
        }
        let ticket = Ticket(self.next_seq);
        self.next_seq += 1;
        Some(ticket)
    }

    pub fn deliver(
        &mut self,
        ticket: Ticket,
        result: Result<ProgressSnapshot, CheckError>,
    ) -> TickOutcome {
        if !self.is_polling() || ticket.0 < self.run_floor {
            log::debug!("Ignoring response for tick {} outside the current run", ticket.0);
            return TickOutcome::Stale;
        }
        if self.last_accepted.is_some_and(|last| ticket.0 <= last) {
            log::debug!("Ignoring out-of-order response for tick {}", ticket.0);
            return TickOutcome::Stale;
        }

        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("Polling error on tick {}: {}", ticket.0, e);
                return TickOutcome::Failed;
            }
        };

        self.last_accepted = Some(ticket.0);
        if snapshot.is_terminal() {
            self.state = PollerState::Idle;
            TickOutcome::Finished(snapshot)
        } else {
            TickOutcome::Snapshot(snapshot)
        }
    }
}

impl Default for Poller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check_data::DomainRecord;

    fn running(completed: u32, total: u32) -> ProgressSnapshot {
        ProgressSnapshot {
            total,
            completed,
            in_progress: true,
            ..Default::default()
        }
    }

    fn finished() -> ProgressSnapshot {
        ProgressSnapshot {
            total: 10,
            completed: 10,
            indexed: vec![DomainRecord::new("a.com", 3)],
            not_indexed: vec!["b.com".to_string()],
            errors: vec![],
            in_progress: false,
        }
    }

    fn started() -> Poller {
        let mut poller = Poller::new();
        poller.start(DEFAULT_POLL_INTERVAL_MS);
        poller
    }

    #[test]
    fn test_new_poller_is_idle() {
        let mut poller = Poller::new();
        assert_eq!(poller.state(), PollerState::Idle);
        assert_eq!(poller.begin_tick(), None);
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut poller = Poller::new();

        assert!(poller.start(500));
        assert!(!poller.start(100));

        assert!(poller.is_polling());
        assert_eq!(poller.interval_ms(), 500);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut poller = started();

        assert!(poller.stop());
        assert!(!poller.stop());
        assert!(!poller.stop());
        assert_eq!(poller.begin_tick(), None);
    }

    #[test]
    fn test_tickets_increase() {
        let mut poller = started();
        let a = poller.begin_tick().unwrap();
        let b = poller.begin_tick().unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_delivers_snapshot() {
        let mut poller = started();
        let ticket = poller.begin_tick().unwrap();

        let outcome = poller.deliver(ticket, Ok(running(3, 10)));

        assert_eq!(outcome, TickOutcome::Snapshot(running(3, 10)));
        assert!(poller.is_polling());
    }

    #[test]
    fn test_failure_keeps_polling() {
        let mut poller = started();
        let ticket = poller.begin_tick().unwrap();

        let outcome = poller.deliver(ticket, Err(CheckError::PollTransport("offline".into())));

        assert_eq!(outcome, TickOutcome::Failed);
        assert!(poller.is_polling());

        let next = poller.begin_tick().unwrap();
        assert_eq!(
            poller.deliver(next, Ok(running(1, 2))),
            TickOutcome::Snapshot(running(1, 2))
        );
    }

    #[test]
    fn test_terminal_snapshot_stops_once() {
        let mut poller = started();
        let first = poller.begin_tick().unwrap();
        let second = poller.begin_tick().unwrap();

        assert_eq!(poller.deliver(first, Ok(finished())), TickOutcome::Finished(finished()));
        assert_eq!(poller.state(), PollerState::Idle);

        // A second terminal response from an overlapping request is ignored
        assert_eq!(poller.deliver(second, Ok(finished())), TickOutcome::Stale);
        assert_eq!(poller.begin_tick(), None);
    }

    #[test]
    fn test_not_started_job_is_not_terminal() {
        let mut poller = started();
        let ticket = poller.begin_tick().unwrap();
        let idle_backend = ProgressSnapshot::default();

        assert_eq!(
            poller.deliver(ticket, Ok(idle_backend.clone())),
            TickOutcome::Snapshot(idle_backend)
        );
        assert!(poller.is_polling());
    }

    #[test]
    fn test_out_of_order_response_is_discarded() {
        let mut poller = started();
        let a = poller.begin_tick().unwrap();
        let b = poller.begin_tick().unwrap();

        assert_eq!(poller.deliver(b, Ok(running(7, 10))), TickOutcome::Snapshot(running(7, 10)));
        assert_eq!(poller.deliver(a, Ok(running(4, 10))), TickOutcome::Stale);
    }

    #[test]
    fn test_late_response_after_stop_is_ignored() {
        let mut poller = started();
        let ticket = poller.begin_tick().unwrap();

        poller.stop();

        assert_eq!(poller.deliver(ticket, Ok(running(5, 10))), TickOutcome::Stale);
    }

    #[test]
    fn test_response_from_previous_run_is_ignored() {
        let mut poller = started();
        let old = poller.begin_tick().unwrap();
        poller.stop();

        poller.start(DEFAULT_POLL_INTERVAL_MS);

        assert_eq!(poller.deliver(old, Ok(running(5, 10))), TickOutcome::Stale);
        let fresh = poller.begin_tick().unwrap();
        assert_eq!(
            poller.deliver(fresh, Ok(running(1, 3))),
            TickOutcome::Snapshot(running(1, 3))
        );
    }
}
