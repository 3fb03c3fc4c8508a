//! What a session operation asks the outside world to do.
//!
//! Session methods never talk to sockets or timers themselves. They return a
//! [`Transition`] that lists, in publication order, the notices to send and
//! what to do with the pending round timer.

/// Human-readable narration broadcast to every player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narration {
    Declaration(String),
    Bid(String),
    LiarResult(String),
    AuctionResult(String),
    NewRound(String),
    GameOver(String),
}

impl Narration {
    pub fn text(&self) -> &str {
        match self {
            Self::Declaration(text)
            | Self::Bid(text)
            | Self::LiarResult(text)
            | Self::AuctionResult(text)
            | Self::NewRound(text)
            | Self::GameOver(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Snapshot announcing a fresh game, sent once per start
    GameStarted,
    /// Snapshot after a mutation
    StateChanged,
    Narration(Narration),
}

/// Which fixed delay precedes an automatic round advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceDelay {
    /// Bidding ended without any bid
    NoBid,
    /// A card or money changed hands and the reveal is on screen
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerDirective {
    /// Leave any pending advance alone
    #[default]
    Keep,
    /// Replace any pending advance with a new one for `generation`
    Schedule {
        delay: AdvanceDelay,
        generation: u64,
    },
    /// Drop any pending advance
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transition {
    pub notices: Vec<Notice>,
    pub timer: TimerDirective,
}

impl Transition {
    /// Nothing happened: no notices, timer untouched
    pub fn none() -> Self {
        Self::default()
    }

    pub fn notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    pub fn narrate(self, narration: Narration) -> Self {
        self.notice(Notice::Narration(narration))
    }

    pub fn timer(mut self, timer: TimerDirective) -> Self {
        self.timer = timer;
        self
    }

    /// Append another transition. Its timer directive wins unless it is `Keep`.
    pub fn then(mut self, next: Transition) -> Self {
        self.notices.extend(next.notices);
        if next.timer != TimerDirective::Keep {
            self.timer = next.timer;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty() && self.timer == TimerDirective::Keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_then_keeps_notice_order_and_latest_timer() {
        // テスト項目: 連結したトランジションは通知順を保ち、後続のタイマー指示が優先される
        // given (前提条件):
        let first = Transition::none()
            .narrate(Narration::AuctionResult("void".to_string()))
            .timer(TimerDirective::Schedule {
                delay: AdvanceDelay::Result,
                generation: 1,
            });
        let second = Transition::none()
            .notice(Notice::StateChanged)
            .timer(TimerDirective::Cancel);

        // when (操作):
        let combined = first.then(second);

        // then (期待する結果):
        assert_eq!(
            combined.notices,
            vec![
                Notice::Narration(Narration::AuctionResult("void".to_string())),
                Notice::StateChanged,
            ]
        );
        assert_eq!(combined.timer, TimerDirective::Cancel);
    }

    #[test]
    fn test_then_with_keep_preserves_previous_timer() {
        // テスト項目: 後続が Keep の場合は先行のタイマー指示が残る
        // given (前提条件):
        let schedule = TimerDirective::Schedule {
            delay: AdvanceDelay::NoBid,
            generation: 4,
        };
        let first = Transition::none().timer(schedule);

        // when (操作):
        let combined = first.then(Transition::none().notice(Notice::StateChanged));

        // then (期待する結果):
        assert_eq!(combined.timer, schedule);
        assert!(!combined.is_empty());
        assert!(Transition::none().is_empty());
    }
}
