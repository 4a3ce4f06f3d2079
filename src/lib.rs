//! bugme: show one desktop balloon notification and wait for it to go away

pub mod cli;
pub mod config;
pub mod error;
pub mod event_loop;
pub mod logging;
pub mod notify;
pub mod request;
pub mod session;

pub use error::{Error, Result};
pub use request::NotificationRequest;

use notify::PlatformShell;
use session::Session;

/// Show `request` on the platform notification area and block until it is
/// dismissed, times out or is clicked. Returns the exit status of the stop signal.
pub fn show(request: &NotificationRequest) -> Result<i32> {
    Session::open(PlatformShell::new(), request)?.run()
}
