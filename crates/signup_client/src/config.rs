use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use shared::protocol::{LOGIN_PAGE_PATH, SIGNUP_PATH};
use tracing::warn;

pub const DEFAULT_SETTINGS_FILE: &str = "signup.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub signup_path: String,
    pub login_path: String,
    pub navigation_delay_ms: u64,
    pub notification_duration_ms: u64,
    pub request_timeout_ms: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:3000".into(),
            signup_path: SIGNUP_PATH.into(),
            login_path: LOGIN_PAGE_PATH.into(),
            navigation_delay_ms: 3000,
            notification_duration_ms: 5000,
            request_timeout_ms: None,
        }
    }
}

impl ClientSettings {
    pub fn navigation_delay(&self) -> Duration {
        Duration::from_millis(self.navigation_delay_ms)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_duration_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    signup_path: Option<String>,
    login_path: Option<String>,
    navigation_delay_ms: Option<u64>,
    notification_duration_ms: Option<u64>,
    request_timeout_ms: Option<u64>,
}

/// Defaults, then `signup.toml` in the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    load_settings_from(Some(Path::new(DEFAULT_SETTINGS_FILE)), |key| {
        std::env::var(key).ok()
    })
}

pub fn load_settings_from(
    file: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Some(path) = file {
        if let Some(file_cfg) = read_file_settings(path) {
            apply_file_settings(&mut settings, file_cfg);
        }
    }

    if let Some(v) = env("SIGNUP_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SIGNUP_PATH") {
        settings.signup_path = v;
    }
    if let Some(v) = env("APP__LOGIN_PATH") {
        settings.login_path = v;
    }
    if let Some(v) = parse_env_millis(&env, "APP__NAVIGATION_DELAY_MS") {
        settings.navigation_delay_ms = v;
    }
    if let Some(v) = parse_env_millis(&env, "APP__NOTIFICATION_DURATION_MS") {
        settings.notification_duration_ms = v;
    }
    if let Some(v) = parse_env_millis(&env, "APP__REQUEST_TIMEOUT_MS") {
        settings.request_timeout_ms = Some(v).filter(|ms| *ms > 0);
    }

    settings
}

fn read_file_settings(path: &Path) -> Option<FileSettings> {
    let raw = fs::read_to_string(path).ok()?;
    match toml::from_str::<FileSettings>(&raw) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unreadable settings file");
            None
        }
    }
}

fn apply_file_settings(settings: &mut ClientSettings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.signup_path {
        settings.signup_path = v;
    }
    if let Some(v) = file_cfg.login_path {
        settings.login_path = v;
    }
    if let Some(v) = file_cfg.navigation_delay_ms {
        settings.navigation_delay_ms = v;
    }
    if let Some(v) = file_cfg.notification_duration_ms {
        settings.notification_duration_ms = v;
    }
    if let Some(v) = file_cfg.request_timeout_ms {
        settings.request_timeout_ms = Some(v).filter(|ms| *ms > 0);
    }
}

fn parse_env_millis(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    let raw = env(key)?;
    match raw.trim().parse::<u64>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(key, value = %raw, "ignoring non-numeric duration override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn temp_settings_file(contents: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("signup_settings_test_{suffix}.toml"));
        fs::write(&path, contents).expect("write settings");
        path
    }

    #[test]
    fn defaults_match_signup_page_behavior() {
        let settings = load_settings_from(None, env_from(&[]));
        assert_eq!(settings.signup_path, "/api/users/signup");
        assert_eq!(settings.login_path, "/login");
        assert_eq!(settings.navigation_delay(), Duration::from_millis(3000));
        assert_eq!(settings.notification_duration(), Duration::from_millis(5000));
        assert_eq!(settings.request_timeout(), None);
    }

    #[test]
    fn environment_overrides_file_values() {
        let path = temp_settings_file(
            r#"
server_url = "http://file.example:8080"
login_path = "/sign-in"
request_timeout_ms = 10000
"#,
        );

        let settings = load_settings_from(
            Some(path.as_path()),
            env_from(&[
                ("APP__SERVER_URL", "http://env.example"),
                ("APP__NAVIGATION_DELAY_MS", "1500"),
            ]),
        );

        assert_eq!(settings.server_url, "http://env.example");
        assert_eq!(settings.login_path, "/sign-in");
        assert_eq!(settings.navigation_delay_ms, 1500);
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(10)));

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn zero_timeout_disables_the_limit() {
        let settings = load_settings_from(None, env_from(&[("APP__REQUEST_TIMEOUT_MS", "0")]));
        assert_eq!(settings.request_timeout(), None);
    }

    #[test]
    fn ignores_malformed_overrides() {
        let path = temp_settings_file("server_url = [not toml");
        let settings = load_settings_from(
            Some(path.as_path()),
            env_from(&[("APP__NAVIGATION_DELAY_MS", "soon")]),
        );
        assert_eq!(settings, ClientSettings::default());
        fs::remove_file(path).expect("cleanup");
    }
}
