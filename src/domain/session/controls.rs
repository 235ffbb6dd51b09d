//! Start/stop/save availability derived from session state

use std::fmt;

use super::state::SessionState;

/// Which actions are currently available.
///
/// Always computed from the session state, never toggled by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub start: bool,
    pub stop: bool,
    pub save: bool,
}

impl Controls {
    pub const fn for_state(state: SessionState) -> Self {
        match state {
            SessionState::Idle => Self {
                start: true,
                stop: false,
                save: false,
            },
            SessionState::Recording => Self {
                start: false,
                stop: true,
                save: false,
            },
            SessionState::Stopped => Self {
                start: true,
                stop: false,
                save: true,
            },
            SessionState::Saving => Self {
                start: false,
                stop: false,
                save: false,
            },
        }
    }
}

impl From<SessionState> for Controls {
    fn from(state: SessionState) -> Self {
        Self::for_state(state)
    }
}

impl fmt::Display for Controls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |on: bool| if on { "on" } else { "off" };
        write!(
            f,
            "start:{} stop:{} save:{}",
            mark(self.start),
            mark(self.stop),
            mark(self.save)
        )
    }
}
