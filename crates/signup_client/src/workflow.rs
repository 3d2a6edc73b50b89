use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use shared::{
    domain::{FormField, RegistrationInput, RegistrationOutcome, SubmissionState},
    protocol::SignupResponse,
};
use tracing::{debug, error, info};

use crate::{
    config::ClientSettings,
    error::{TransportError, ValidationError},
    navigation::ScheduledNavigation,
    service::RegistrationService,
    validation, HiddenLoadingIndicator, LoadingIndicator, Navigator, NotificationKind, Notifier,
    SIGNUP_FAILED_MESSAGE,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowOptions {
    pub login_path: String,
    pub navigation_delay: Duration,
    pub request_timeout: Option<Duration>,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self::from(&ClientSettings::default())
    }
}

impl From<&ClientSettings> for WorkflowOptions {
    fn from(settings: &ClientSettings) -> Self {
        Self {
            login_path: settings.login_path.clone(),
            navigation_delay: settings.navigation_delay(),
            request_timeout: settings.request_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission was still outstanding; nothing was sent.
    AlreadyInFlight,
    Rejected(ValidationError),
    Settled(RegistrationOutcome),
}

struct WorkflowState {
    input: RegistrationInput,
    submission: SubmissionState,
    pending_navigation: Option<ScheduledNavigation>,
}

pub struct SignupWorkflow {
    service: Arc<dyn RegistrationService>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    loading: Arc<dyn LoadingIndicator>,
    options: WorkflowOptions,
    inner: Mutex<WorkflowState>,
}

impl SignupWorkflow {
    pub fn new(
        service: Arc<dyn RegistrationService>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::new_with_dependencies(
            service,
            notifier,
            navigator,
            Arc::new(HiddenLoadingIndicator),
            WorkflowOptions::default(),
        )
    }

    pub fn new_with_dependencies(
        service: Arc<dyn RegistrationService>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        loading: Arc<dyn LoadingIndicator>,
        options: WorkflowOptions,
    ) -> Self {
        Self {
            service,
            notifier,
            navigator,
            loading,
            options,
            inner: Mutex::new(WorkflowState {
                input: RegistrationInput::default(),
                submission: SubmissionState::Idle,
                pending_navigation: None,
            }),
        }
    }

    pub fn input(&self) -> RegistrationInput {
        self.lock().input.clone()
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().submission
    }

    pub fn is_loading(&self) -> bool {
        self.state() == SubmissionState::InFlight
    }

    pub fn has_pending_navigation(&self) -> bool {
        self.lock()
            .pending_navigation
            .as_ref()
            .is_some_and(ScheduledNavigation::is_pending)
    }

    pub fn update_field(&self, field: FormField, value: impl Into<String>) {
        let mut guard = self.lock();
        guard.input = guard.input.with_field(field, value);
    }

    pub fn validate(&self, input: &RegistrationInput) -> bool {
        validation::validate(input, self.notifier.as_ref())
    }

    /// No-op returning [`SubmitOutcome::AlreadyInFlight`] while a previous
    /// submission is outstanding.
    pub async fn submit(&self) -> SubmitOutcome {
        let (input, _in_flight) = match self.begin_submission() {
            Ok(started) => started,
            Err(outcome) => return outcome,
        };

        info!(
            username = %input.username,
            email = %input.email,
            "submitting signup request"
        );

        let outcome = match self.register(&input).await {
            Ok(response) => {
                info!(username = %input.username, "signup accepted");
                self.notifier
                    .notify(NotificationKind::Success, &response.message);
                self.schedule_login_navigation();
                self.lock().input = RegistrationInput::default();
                RegistrationOutcome::Success {
                    message: response.message,
                }
            }
            Err(err) => {
                error!(
                    username = %input.username,
                    status = ?err.status(),
                    error = %err,
                    "signup failed"
                );
                self.notifier
                    .notify(NotificationKind::Error, SIGNUP_FAILED_MESSAGE);
                RegistrationOutcome::Failure {
                    reason: err.to_string(),
                }
            }
        };

        SubmitOutcome::Settled(outcome)
    }

    pub fn go_to_login(&self) {
        self.cancel_pending_navigation();
        self.navigator.navigate_to(&self.options.login_path);
    }

    pub fn teardown(&self) {
        self.cancel_pending_navigation();
    }

    fn begin_submission(&self) -> Result<(RegistrationInput, InFlightGuard<'_>), SubmitOutcome> {
        let input = {
            let mut guard = self.lock();
            if guard.submission == SubmissionState::InFlight {
                debug!("ignoring submit while a signup request is outstanding");
                return Err(SubmitOutcome::AlreadyInFlight);
            }
            let input = guard.input.clone();
            if let Err(err) = validation::check(&input) {
                drop(guard);
                self.notifier.notify(NotificationKind::Error, &err.to_string());
                return Err(SubmitOutcome::Rejected(err));
            }
            guard.submission = SubmissionState::InFlight;
            input
        };

        self.loading.set_visible(true);
        Ok((input, InFlightGuard { workflow: self }))
    }

    async fn register(&self, input: &RegistrationInput) -> Result<SignupResponse, TransportError> {
        match self.options.request_timeout {
            Some(limit) => tokio::time::timeout(limit, self.service.register(input))
                .await
                .map_err(|_| TransportError::Timeout(limit))?,
            None => self.service.register(input).await,
        }
    }

    fn schedule_login_navigation(&self) {
        let navigation = ScheduledNavigation::spawn(
            Arc::clone(&self.navigator),
            self.options.login_path.clone(),
            self.options.navigation_delay,
        );
        // Replacing an older schedule cancels it.
        self.lock().pending_navigation = Some(navigation);
    }

    fn cancel_pending_navigation(&self) {
        let pending = self.lock().pending_navigation.take();
        if let Some(navigation) = pending {
            navigation.cancel();
        }
    }

    fn lock(&self) -> MutexGuard<'_, WorkflowState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for SignupWorkflow {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Holds the workflow in [`SubmissionState::InFlight`]; dropping it returns
/// the workflow to idle on every exit path, including cancellation.
struct InFlightGuard<'a> {
    workflow: &'a SignupWorkflow,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.workflow.lock().submission = SubmissionState::Idle;
        self.workflow.loading.set_visible(false);
    }
}

#[cfg(test)]
#[path = "tests/workflow_tests.rs"]
mod tests;
