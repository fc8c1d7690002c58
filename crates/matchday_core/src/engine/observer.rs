//! Live hooks into a running match.
//!
//! Observers only ever see events after the minute that produced them has
//! fully resolved, so a rolled-back minute never leaks partial events.

use crate::models::{MatchEvent, PerSide};

pub trait MatchObserver {
    fn on_event(&mut self, event: &MatchEvent);

    /// Called once per played minute, and for each announcement, after its
    /// events.
    fn on_minute_end(&mut self, _minute: u8, _score: &PerSide<u8>) {}
}

/// Ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl MatchObserver for NoopObserver {
    fn on_event(&mut self, _event: &MatchEvent) {}
}

impl<F> MatchObserver for F
where
    F: FnMut(&MatchEvent),
{
    fn on_event(&mut self, event: &MatchEvent) {
        self(event)
    }
}

/// Keeps the running score line per minute, e.g. for a live ticker.
#[derive(Debug, Clone, Default)]
pub struct ScoreTicker {
    pub lines: Vec<(u8, PerSide<u8>)>,
}

impl MatchObserver for ScoreTicker {
    fn on_event(&mut self, _event: &MatchEvent) {}

    fn on_minute_end(&mut self, minute: u8, score: &PerSide<u8>) {
        if self.lines.last().map(|(_, s)| s) != Some(score) {
            self.lines.push((minute, score.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Announcement, TeamSide};

    #[test]
    fn test_closure_observer() {
        let mut count = 0;
        let mut observer = |_: &MatchEvent| count += 1;
        let event = MatchEvent::announce(0, Announcement::KickOff);
        observer.on_event(&event);
        observer.on_event(&event);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_ticker_records_changes_only() {
        let mut ticker = ScoreTicker::default();
        let mut score = PerSide::new(0, 0);
        ticker.on_minute_end(0, &score);
        ticker.on_minute_end(1, &score);
        *score.get_mut(TeamSide::Away) += 1;
        ticker.on_minute_end(2, &score);
        assert_eq!(ticker.lines, vec![(0, PerSide::new(0, 0)), (2, PerSide::new(0, 1))]);
    }
}
