//! Client-side account signup: local validation, a single outstanding
//! registration request, and the notifications and navigation that follow.

use std::fmt;

pub mod config;
pub mod error;
mod navigation;
pub mod service;
pub mod toast;
pub mod validation;
mod workflow;

pub use config::{load_settings, ClientSettings};
pub use error::{SettingsError, TransportError, ValidationError};
pub use navigation::ScheduledNavigation;
pub use service::{HttpRegistrationService, RegistrationService};
pub use shared::domain::{FormField, RegistrationInput, RegistrationOutcome, SubmissionState};
pub use toast::{Toast, ToastId, ToastPosition, ToastQueue};
pub use workflow::{SignupWorkflow, SubmitOutcome, WorkflowOptions};

pub const FILL_ALL_FIELDS_MESSAGE: &str = "Please fill all the fields.";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address.";
pub const SIGNUP_FAILED_MESSAGE: &str = "Signup Error. Try again";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Success => f.write_str("success"),
            NotificationKind::Error => f.write_str("error"),
        }
    }
}

// Implementations must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);
}

pub trait Navigator: Send + Sync {
    fn navigate_to(&self, path: &str);
}

pub trait LoadingIndicator: Send + Sync {
    fn set_visible(&self, visible: bool);
}

pub struct HiddenLoadingIndicator;

impl LoadingIndicator for HiddenLoadingIndicator {
    fn set_visible(&self, _visible: bool) {}
}
