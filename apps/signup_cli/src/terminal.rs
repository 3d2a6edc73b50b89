//! Terminal stand-ins for the browser surfaces: toasts, the loading overlay,
//! and the router.

use std::io::{self, BufRead, Write};

use signup_client::{LoadingIndicator, Navigator, Toast, ToastQueue};
use tokio::sync::Notify;
use tracing::info;

pub struct TerminalLoadingIndicator;

impl LoadingIndicator for TerminalLoadingIndicator {
    fn set_visible(&self, visible: bool) {
        if visible {
            eprintln!("Creating your account...");
        }
    }
}

#[derive(Default)]
pub struct TerminalNavigator {
    arrived: Notify,
}

impl TerminalNavigator {
    /// Resolves once a navigation has happened, including one that fired
    /// before the call.
    pub async fn arrived(&self) {
        self.arrived.notified().await;
    }
}

impl Navigator for TerminalNavigator {
    fn navigate_to(&self, path: &str) {
        info!(path, "navigating");
        println!("-> {path}");
        self.arrived.notify_one();
    }
}

pub fn format_toast(toast: &Toast) -> String {
    format!("[{}] {}", toast.kind, toast.message)
}

pub fn render_toasts(toasts: &ToastQueue) {
    for toast in toasts.visible() {
        println!("{}", format_toast(&toast));
    }
}

pub fn prompt(label: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{label}: ")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use signup_client::NotificationKind;

    use super::*;

    #[test]
    fn formats_toasts_with_kind_label() {
        let toasts = ToastQueue::new(Duration::from_secs(5));
        toasts.push(NotificationKind::Error, "Signup Error. Try again");
        toasts.push(NotificationKind::Success, "Account created");

        let lines: Vec<String> = toasts.visible().iter().map(format_toast).collect();
        assert_eq!(
            lines,
            vec!["[error] Signup Error. Try again", "[success] Account created"]
        );
    }

    #[tokio::test]
    async fn navigator_wakes_waiters_even_after_the_fact() {
        let navigator = TerminalNavigator::default();
        navigator.navigate_to("/login");
        tokio::time::timeout(Duration::from_secs(1), navigator.arrived())
            .await
            .expect("arrived");
    }
}
