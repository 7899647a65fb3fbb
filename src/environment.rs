//! Host environment abstraction
//!
//! The client's unrecovered-error side effects (user-facing notifications,
//! navigation to the login page) go through this trait so the request
//! state machine can run headless in tests and in the CLI alike.

use std::sync::Mutex;

/// Surface the client uses to reach its host environment.
///
/// `navigate` and `notify` correspond to a full-page redirect and a toast
/// in the original browser host; non-browser hosts map them however fits.
pub trait Environment: Send + Sync {
    /// Move the user to the given application path
    fn navigate(&self, path: &str);

    /// Show a user-visible notification
    fn notify(&self, message: &str);

    /// The application path the user is currently on
    fn current_path(&self) -> String;
}

/// Environment that logs instead of acting. Default for embedders that
/// handle errors entirely through the returned `Result`s.
#[derive(Debug, Default)]
pub struct NullEnvironment;

impl Environment for NullEnvironment {
    fn navigate(&self, path: &str) {
        tracing::debug!("navigation requested to {path} (null environment, ignored)");
    }

    fn notify(&self, message: &str) {
        tracing::info!("notification: {message}");
    }

    fn current_path(&self) -> String {
        "/".to_string()
    }
}

/// Recording environment for tests: captures every call for assertions.
#[derive(Debug, Default)]
pub struct RecordingEnvironment {
    navigations: Mutex<Vec<String>>,
    notifications: Mutex<Vec<String>>,
    path: Mutex<String>,
}

impl RecordingEnvironment {
    /// Create a recorder reporting the given current path
    pub fn at_path(path: impl Into<String>) -> Self {
        Self {
            navigations: Mutex::new(Vec::new()),
            notifications: Mutex::new(Vec::new()),
            path: Mutex::new(path.into()),
        }
    }

    /// Paths navigated to, in order
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().expect("environment lock").clone()
    }

    /// Messages shown, in order
    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().expect("environment lock").clone()
    }
}

impl Environment for RecordingEnvironment {
    fn navigate(&self, path: &str) {
        let mut navs = self.navigations.lock().expect("environment lock");
        navs.push(path.to_string());
        *self.path.lock().expect("environment lock") = path.to_string();
    }

    fn notify(&self, message: &str) {
        self.notifications
            .lock()
            .expect("environment lock")
            .push(message.to_string());
    }

    fn current_path(&self) -> String {
        self.path.lock().expect("environment lock").clone()
    }
}
