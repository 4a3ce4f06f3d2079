//! Notification session: owns the event-sink window and the status-area icon
//!
//! Resources are recorded as soon as they are acquired, so a failure at any
//! setup step (or an early return from the event loop) releases exactly what
//! exists, icon before window.

use crate::error::Result;
use crate::event_loop::{EventLoop, Reaction};
use crate::notify::{NotifyShell, NOTIFY_CALLBACK_ID};
use crate::request::{NotificationRequest, TOOLTIP};

pub struct Session<S: NotifyShell> {
    shell: S,
    window: Option<S::Window>,
    icon: Option<S::Icon>,
}

impl<S: NotifyShell> Session<S> {
    /// Register the window, add the icon and publish the balloon
    pub fn open(shell: S, request: &NotificationRequest) -> Result<Self> {
        let mut session = Self {
            shell,
            window: None,
            icon: None,
        };

        tracing::debug!("Registering notification window");
        let window = session.shell.register_window()?;
        let window = session.window.insert(window);

        tracing::debug!("Adding status-area icon");
        let icon = session.shell.add_icon(window, NOTIFY_CALLBACK_ID, TOOLTIP)?;
        let icon = session.icon.insert(icon);

        tracing::debug!(
            body = request.message.as_str(),
            title = request.title.as_str(),
            "Publishing notification"
        );
        session.shell.publish(icon, request)?;

        Ok(session)
    }

    /// Dispatch events until the stop signal arrives; returns its exit status
    pub fn run(mut self) -> Result<i32> {
        let mut event_loop = EventLoop::new();
        loop {
            let event = self.shell.next_event()?;
            match event_loop.on_event(event) {
                Reaction::Ignore => {}
                Reaction::Teardown => self.teardown(),
                Reaction::RequestStop(code) => {
                    self.teardown();
                    self.shell.request_stop(code);
                }
                Reaction::Exit(code) => return Ok(code),
            }
        }
    }

    /// Remove the icon, then release the window. Runs each release at most once.
    pub fn teardown(&mut self) {
        if let Some(icon) = self.icon.take() {
            tracing::debug!("Removing status-area icon");
            self.shell.remove_icon(icon);
        }
        if let Some(window) = self.window.take() {
            tracing::debug!("Releasing notification window");
            self.shell.release_window(window);
        }
    }
}

impl<S: NotifyShell> Drop for Session<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
