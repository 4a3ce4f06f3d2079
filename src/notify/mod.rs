//! Desktop notification-area backends
//!
//! The session only sees the [`NotifyShell`] operations; each platform maps
//! them onto its own facility.

use crate::error::Result;
use crate::request::NotificationRequest;

#[cfg(test)]
pub mod scripted;
#[cfg(windows)]
pub mod win32;
#[cfg(all(unix, not(target_os = "macos")))]
pub mod xdg;

/// Custom event id the platform delivers for icon/balloon interaction (`WM_USER + 24`)
pub const NOTIFY_CALLBACK_ID: u32 = 0x0400 + 24;

/// Events surfaced by a shell's event queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    BalloonTimeout,
    BalloonHidden,
    BalloonClicked,
    /// The event-sink window was released
    WindowDestroyed,
    /// Anything else delivered to the window; default handling already ran
    Other,
    /// The stop signal posted by [`NotifyShell::request_stop`], with its exit status
    Stop(i32),
}

/// The platform notification-area facility
pub trait NotifyShell {
    type Window;
    type Icon;

    /// Register an invisible window that receives notification events
    fn register_window(&mut self) -> Result<Self::Window>;

    /// Attach a status-area icon to `window`, reporting interaction as `callback_id`
    fn add_icon(&mut self, window: &Self::Window, callback_id: u32, tooltip: &str)
        -> Result<Self::Icon>;

    /// Show the request's text as a balloon on `icon`
    fn publish(&mut self, icon: &mut Self::Icon, request: &NotificationRequest) -> Result<()>;

    fn remove_icon(&mut self, icon: Self::Icon);

    fn release_window(&mut self, window: Self::Window);

    /// Block until the next event or the stop signal
    fn next_event(&mut self) -> Result<ShellEvent>;

    /// Post the stop signal carrying `code`
    fn request_stop(&mut self, code: i32);
}

#[cfg(windows)]
pub type PlatformShell = win32::Win32Shell;

#[cfg(all(unix, not(target_os = "macos")))]
pub type PlatformShell = xdg::XdgShell;

#[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
pub type PlatformShell = unsupported::UnsupportedShell;

#[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
mod unsupported {
    use std::io;

    use super::{NotifyShell, ShellEvent};
    use crate::error::{Error, Result};
    use crate::request::NotificationRequest;

    /// Stand-in for targets without a supported notification area
    #[derive(Debug, Default)]
    pub struct UnsupportedShell;

    impl UnsupportedShell {
        pub fn new() -> Self {
            Self
        }
    }

    impl NotifyShell for UnsupportedShell {
        type Window = ();
        type Icon = ();

        fn register_window(&mut self) -> Result<()> {
            Err(Error::PlatformRegistrationFailed(io::Error::new(
                io::ErrorKind::Unsupported,
                "no notification area on this platform",
            )))
        }

        fn add_icon(&mut self, _: &(), _: u32, _: &str) -> Result<()> {
            Ok(())
        }

        fn publish(&mut self, _: &mut (), _: &NotificationRequest) -> Result<()> {
            Ok(())
        }

        fn remove_icon(&mut self, _: ()) {}

        fn release_window(&mut self, _: ()) {}

        fn next_event(&mut self) -> Result<ShellEvent> {
            Err(Error::EventQueueFailure(io::Error::from(io::ErrorKind::Unsupported)))
        }

        fn request_stop(&mut self, _: i32) {}
    }
}
