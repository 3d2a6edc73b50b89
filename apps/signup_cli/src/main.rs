use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::Parser;
use shared::domain::{FormField, RegistrationOutcome};
use signup_client::{
    config::load_settings_from, load_settings, ClientSettings, HttpRegistrationService,
    SignupWorkflow, SubmitOutcome, ToastQueue, WorkflowOptions,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::{prompt, render_toasts, TerminalLoadingIndicator, TerminalNavigator};

#[derive(Parser, Debug)]
#[command(about = "Create an account on a signup server")]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
    /// Settings file; defaults to ./signup.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    email: Option<String>,
    /// Prompting for the password echoes it; pass it here or pipe it on stdin.
    #[arg(long)]
    password: Option<String>,
    #[arg(long)]
    login_path: Option<String>,
    #[arg(long)]
    request_timeout_ms: Option<u64>,
    /// Already have an account: go straight to the login page.
    #[arg(long)]
    login: bool,
}

impl Args {
    fn field_value(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Username => self.username.as_deref(),
            FormField::Email => self.email.as_deref(),
            FormField::Password => self.password.as_deref(),
        }
    }

    fn settings(&self) -> ClientSettings {
        let mut settings = match &self.config {
            Some(path) => {
                load_settings_from(Some(path.as_path()), |key| std::env::var(key).ok())
            }
            None => load_settings(),
        };
        if let Some(v) = &self.server_url {
            settings.server_url = v.clone();
        }
        if let Some(v) = &self.login_path {
            settings.login_path = v.clone();
        }
        if let Some(v) = self.request_timeout_ms {
            settings.request_timeout_ms = Some(v).filter(|ms| *ms > 0);
        }
        settings
    }
}

fn field_label(field: FormField) -> &'static str {
    match field {
        FormField::Username => "Username",
        FormField::Email => "Email",
        FormField::Password => "Password (shown as typed; use --password or pipe stdin)",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    let settings = args.settings();

    let toasts = Arc::new(ToastQueue::new(settings.notification_duration()));
    let navigator = Arc::new(TerminalNavigator::default());
    let service = HttpRegistrationService::from_settings(&settings)
        .context("failed to configure signup service")?;
    info!(endpoint = %service.endpoint(), "signup service configured");
    let workflow = SignupWorkflow::new_with_dependencies(
        Arc::new(service),
        toasts.clone(),
        navigator.clone(),
        Arc::new(TerminalLoadingIndicator),
        WorkflowOptions::from(&settings),
    );

    if args.login {
        workflow.go_to_login();
        return Ok(());
    }

    for field in FormField::ALL {
        let value = match args.field_value(field) {
            Some(value) => value.to_string(),
            None => prompt(field_label(field))
                .with_context(|| format!("failed to read {field} from stdin"))?,
        };
        workflow.update_field(field, value);
    }

    let outcome = workflow.submit().await;
    render_toasts(&toasts);

    match outcome {
        SubmitOutcome::Settled(RegistrationOutcome::Success { .. }) => {
            navigator.arrived().await;
            Ok(())
        }
        SubmitOutcome::Settled(RegistrationOutcome::Failure { .. }) => {
            bail!("signup was not accepted")
        }
        SubmitOutcome::Rejected(err) => bail!("signup form is incomplete: {err}"),
        SubmitOutcome::AlreadyInFlight => bail!("a signup request is already in progress"),
    }
}
