//! In-memory shell that replays a fixed event script and records every call

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use super::{NotifyShell, ShellEvent};
use crate::error::{Error, Result};
use crate::request::NotificationRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    RegisterWindow,
    AddIcon { callback_id: u32, tooltip: String },
    Publish { message: String, title: String },
    RemoveIcon,
    ReleaseWindow,
    RequestStop(i32),
}

/// Which setup step should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Register,
    AddIcon,
    Publish,
}

#[derive(Debug, Default)]
pub struct ScriptedShell {
    calls: Rc<RefCell<Vec<Call>>>,
    script: VecDeque<ShellEvent>,
    /// Events raised by the shell itself; delivered before the script
    posted: VecDeque<ShellEvent>,
    fail_at: Option<FailAt>,
}

impl ScriptedShell {
    pub fn new(script: impl IntoIterator<Item = ShellEvent>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn failing_at(mut self, step: FailAt) -> Self {
        self.fail_at = Some(step);
        self
    }

    /// Shared view of the call log, still readable after the shell is consumed
    pub fn calls(&self) -> Rc<RefCell<Vec<Call>>> {
        Rc::clone(&self.calls)
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn injected() -> io::Error {
        io::Error::other("injected failure")
    }
}

impl NotifyShell for ScriptedShell {
    type Window = ();
    type Icon = ();

    fn register_window(&mut self) -> Result<()> {
        if self.fail_at == Some(FailAt::Register) {
            return Err(Error::PlatformRegistrationFailed(Self::injected()));
        }
        self.record(Call::RegisterWindow);
        Ok(())
    }

    fn add_icon(&mut self, _: &(), callback_id: u32, tooltip: &str) -> Result<()> {
        if self.fail_at == Some(FailAt::AddIcon) {
            return Err(Error::PlatformIconCreateFailed(Self::injected()));
        }
        self.record(Call::AddIcon {
            callback_id,
            tooltip: tooltip.to_string(),
        });
        Ok(())
    }

    fn publish(&mut self, _: &mut (), request: &NotificationRequest) -> Result<()> {
        if self.fail_at == Some(FailAt::Publish) {
            return Err(Error::PlatformPublishFailed(Self::injected()));
        }
        self.record(Call::Publish {
            message: request.message.as_str().to_string(),
            title: request.title.as_str().to_string(),
        });
        Ok(())
    }

    fn remove_icon(&mut self, _: ()) {
        self.record(Call::RemoveIcon);
    }

    fn release_window(&mut self, _: ()) {
        self.record(Call::ReleaseWindow);
        self.posted.push_back(ShellEvent::WindowDestroyed);
    }

    fn next_event(&mut self) -> Result<ShellEvent> {
        self.posted
            .pop_front()
            .or_else(|| self.script.pop_front())
            .ok_or_else(|| Error::EventQueueFailure(io::Error::other("event script exhausted")))
    }

    fn request_stop(&mut self, code: i32) {
        self.record(Call::RequestStop(code));
        self.posted.push_back(ShellEvent::Stop(code));
    }
}
