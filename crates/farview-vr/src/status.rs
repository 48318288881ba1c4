use std::sync::{Mutex, OnceLock};

static SESSION_STATUS: OnceLock<Mutex<String>> = OnceLock::new();

fn status_cell() -> &'static Mutex<String> {
    SESSION_STATUS.get_or_init(|| Mutex::new("tracking: idle".to_string()))
}

/// Current human-readable session status, readable from any thread.
pub fn session_status() -> String {
    match status_cell().lock() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn set_session_status(status: impl Into<String>) {
    let mut guard = match status_cell().lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *guard = status.into();
}
