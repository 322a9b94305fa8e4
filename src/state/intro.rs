// src/state/intro.rs
use std::time::{Duration, Instant};

pub const WELCOME_LINE: &str = "Welcome to SME Vision";
pub const WELCOME_LOCALE: &str = "en-US";

const EXPAND_AT: Duration = Duration::from_millis(1800);
const MAIN_AT: Duration = Duration::from_millis(4200);

/// Which view tree is active. Derived from elapsed time since mount and
/// monotonic: once a phase is reached it never regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiPhase {
    Intro,
    Expanded,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroEvent {
    /// Title expands and the welcome line is narrated, once.
    ExpandTitle,
    /// Intro view is permanently unmounted.
    EnterMain,
}

/// Two one-shot deadlines measured from the activation instant, polled each
/// frame. There are no live timers to leak: tearing the app down before a
/// deadline simply means it never fires.
#[derive(Debug)]
pub struct IntroSequencer {
    started_at: Instant,
    expand_fired: bool,
    main_fired: bool,
}

impl IntroSequencer {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(started_at: Instant) -> Self {
        Self {
            started_at,
            expand_fired: false,
            main_fired: false,
        }
    }

    pub fn phase(&self) -> UiPhase {
        if self.main_fired {
            UiPhase::Main
        } else if self.expand_fired {
            UiPhase::Expanded
        } else {
            UiPhase::Intro
        }
    }

    /// Fires each due deadline at most once. Call repeatedly until `None`:
    /// a frame arriving after both deadlines (a stalled window, say) still
    /// delivers `ExpandTitle` before `EnterMain`.
    pub fn tick(&mut self, now: Instant) -> Option<IntroEvent> {
        let elapsed = now.saturating_duration_since(self.started_at);

        if !self.expand_fired && elapsed >= EXPAND_AT {
            self.expand_fired = true;
            return Some(IntroEvent::ExpandTitle);
        }
        if self.expand_fired && !self.main_fired && elapsed >= MAIN_AT {
            self.main_fired = true;
            return Some(IntroEvent::EnterMain);
        }
        None
    }

    /// Time until the next pending deadline, used to schedule a repaint.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(self.started_at);
        if !self.expand_fired {
            Some(EXPAND_AT.saturating_sub(elapsed))
        } else if !self.main_fired {
            Some(MAIN_AT.saturating_sub(elapsed))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(seq_start: Instant, ms: u64) -> Instant {
        seq_start + Duration::from_millis(ms)
    }

    #[test]
    fn nothing_fires_before_the_first_deadline() {
        let start = Instant::now();
        let mut seq = IntroSequencer::starting_at(start);

        assert_eq!(seq.tick(at(start, 0)), None);
        assert_eq!(seq.tick(at(start, 1799)), None);
        assert_eq!(seq.phase(), UiPhase::Intro);
    }

    #[test]
    fn title_expands_and_welcome_fires_once_at_1800ms() {
        let start = Instant::now();
        let mut seq = IntroSequencer::starting_at(start);

        assert_eq!(seq.tick(at(start, 1800)), Some(IntroEvent::ExpandTitle));
        assert_eq!(seq.phase(), UiPhase::Expanded);

        // Subsequent frames before T2 fire nothing further.
        assert_eq!(seq.tick(at(start, 1800)), None);
        assert_eq!(seq.tick(at(start, 3000)), None);
        assert_eq!(seq.phase(), UiPhase::Expanded);
    }

    #[test]
    fn main_phase_is_reached_at_4200ms_and_never_regresses() {
        let start = Instant::now();
        let mut seq = IntroSequencer::starting_at(start);

        assert_eq!(seq.tick(at(start, 1800)), Some(IntroEvent::ExpandTitle));
        assert_eq!(seq.tick(at(start, 4200)), Some(IntroEvent::EnterMain));
        assert_eq!(seq.phase(), UiPhase::Main);

        assert_eq!(seq.tick(at(start, 10_000)), None);
        assert_eq!(seq.phase(), UiPhase::Main);
    }

    #[test]
    fn stalled_frame_delivers_both_events_in_order() {
        let start = Instant::now();
        let mut seq = IntroSequencer::starting_at(start);

        let late = at(start, 5000);
        assert_eq!(seq.tick(late), Some(IntroEvent::ExpandTitle));
        assert_eq!(seq.tick(late), Some(IntroEvent::EnterMain));
        assert_eq!(seq.tick(late), None);
    }

    #[test]
    fn next_deadline_counts_down_then_clears() {
        let start = Instant::now();
        let mut seq = IntroSequencer::starting_at(start);

        assert_eq!(
            seq.next_deadline(at(start, 800)),
            Some(Duration::from_millis(1000))
        );

        seq.tick(at(start, 1800));
        assert_eq!(
            seq.next_deadline(at(start, 1800)),
            Some(Duration::from_millis(2400))
        );

        seq.tick(at(start, 4200));
        assert_eq!(seq.next_deadline(at(start, 4200)), None);
    }
}
