//! Freedesktop notification server backend
//!
//! There is no window or tray icon here: the "window" is a token proving the
//! server is reachable, and the "icon" is the notification itself. The
//! server reports expiry and dismissal alike as `__closed`.

use std::collections::VecDeque;
use std::io;

use notify_rust::{Notification, NotificationHandle, Timeout};

use super::{NotifyShell, ShellEvent};
use crate::error::{Error, Result};
use crate::request::NotificationRequest;

const APP_NAME: &str = "bugme";
const ICON_NAME: &str = "dialog-information";
/// Action invoked when the body of the notification is clicked
const DEFAULT_ACTION: &str = "default";
const CLOSED_ACTION: &str = "__closed";

pub struct XdgWindow {
    server: String,
}

pub struct XdgIcon {
    notification: Notification,
}

#[derive(Default)]
pub struct XdgShell {
    /// Shown notification whose outcome has not been collected yet
    pending: Option<NotificationHandle>,
    posted: VecDeque<ShellEvent>,
}

impl XdgShell {
    pub fn new() -> Self {
        Self::default()
    }
}

fn outcome(action: &str) -> ShellEvent {
    match action {
        CLOSED_ACTION => ShellEvent::BalloonHidden,
        _ => ShellEvent::BalloonClicked,
    }
}

impl NotifyShell for XdgShell {
    type Window = XdgWindow;
    type Icon = XdgIcon;

    fn register_window(&mut self) -> Result<XdgWindow> {
        let info = notify_rust::get_server_information()
            .map_err(|e| Error::PlatformRegistrationFailed(io::Error::other(e.to_string())))?;
        tracing::debug!(server = %info.name, version = %info.version, "Connected to notification server");
        Ok(XdgWindow { server: info.name })
    }

    fn add_icon(&mut self, window: &XdgWindow, callback_id: u32, tooltip: &str) -> Result<XdgIcon> {
        tracing::trace!(server = %window.server, callback_id, "Preparing notification");
        let mut notification = Notification::new();
        notification
            .appname(APP_NAME)
            .icon(ICON_NAME)
            .summary(tooltip)
            .action(DEFAULT_ACTION, tooltip)
            .timeout(Timeout::Default);
        Ok(XdgIcon { notification })
    }

    fn publish(&mut self, icon: &mut XdgIcon, request: &NotificationRequest) -> Result<()> {
        icon.notification
            .summary(request.title.as_str())
            .body(request.message.as_str());
        let handle = icon
            .notification
            .show()
            .map_err(|e| Error::PlatformPublishFailed(io::Error::other(e.to_string())))?;
        tracing::debug!(id = handle.id(), "Notification shown");
        self.pending = Some(handle);
        Ok(())
    }

    fn remove_icon(&mut self, _icon: XdgIcon) {
        // Still on screen only if the loop never collected its outcome
        if let Some(handle) = self.pending.take() {
            handle.close();
        }
    }

    fn release_window(&mut self, _window: XdgWindow) {
        self.posted.push_back(ShellEvent::WindowDestroyed);
    }

    fn next_event(&mut self) -> Result<ShellEvent> {
        if let Some(event) = self.posted.pop_front() {
            return Ok(event);
        }
        let Some(handle) = self.pending.take() else {
            return Err(Error::EventQueueFailure(io::Error::other(
                "no notification is waiting for an outcome",
            )));
        };

        let mut event = ShellEvent::BalloonHidden;
        handle.wait_for_action(|action| event = outcome(action));
        Ok(event)
    }

    fn request_stop(&mut self, code: i32) {
        self.posted.push_back(ShellEvent::Stop(code));
    }
}
