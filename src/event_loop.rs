//! Notification lifecycle state machine
//!
//! Starts in [`LoopState::Running`] once the balloon is published. The first
//! terminal balloon event asks for teardown and moves to
//! [`LoopState::Terminated`], which is absorbing: from there the loop only
//! waits for the stop signal posted after the window goes away.

use crate::error::EXIT_OK;
use crate::notify::ShellEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopState {
    Running,
    Terminated,
}

/// What the session must do in response to one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Ignore,
    /// Remove the icon and release the window
    Teardown,
    /// Make sure everything is released, then post the stop signal with this status
    RequestStop(i32),
    /// Leave the loop with this exit status
    Exit(i32),
}

#[derive(Debug)]
pub struct EventLoop {
    state: LoopState,
}

impl EventLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Running,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> LoopState {
        self.state
    }

    pub fn on_event(&mut self, event: ShellEvent) -> Reaction {
        match event {
            ShellEvent::BalloonTimeout | ShellEvent::BalloonHidden | ShellEvent::BalloonClicked => {
                if self.state == LoopState::Terminated {
                    return Reaction::Ignore;
                }
                tracing::info!(?event, "Notification finished");
                self.state = LoopState::Terminated;
                Reaction::Teardown
            }
            ShellEvent::WindowDestroyed => {
                self.state = LoopState::Terminated;
                Reaction::RequestStop(EXIT_OK)
            }
            ShellEvent::Stop(code) => Reaction::Exit(code),
            ShellEvent::Other => Reaction::Ignore,
        }
    }
}
