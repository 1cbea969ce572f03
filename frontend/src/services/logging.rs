use gloo::net::http::Request;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use shared::LogEntry;
use wasm_bindgen_futures::spawn_local;

use super::api::{logs_url, API_BASE_URL};

static LOGGER: RemoteLogger = RemoteLogger {
    base_url: API_BASE_URL,
};

/// `log` backend writing to the browser console and relaying records to the server
pub struct RemoteLogger {
    base_url: &'static str,
}

impl RemoteLogger {
    fn endpoint(&self) -> String {
        logs_url(self.base_url)
    }
}

/// Install the remote logger for the whole app
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Last path segment of a module target, e.g. `new_bill`
fn component(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

impl Log for RemoteLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let component = component(record.target()).to_string();
        let message = record.args().to_string();
        match record.level() {
            Level::Error => gloo::console::error!(format!("[{}] {}", component, message)),
            Level::Warn => gloo::console::warn!(format!("[{}] {}", component, message)),
            _ => gloo::console::log!(format!("[{}] {}", component, message)),
        }

        let entry = LogEntry {
            level: record.level().as_str().to_lowercase(),
            message,
            component: Some(component),
        };
        let endpoint = self.endpoint();

        // Send log asynchronously without blocking
        spawn_local(async move {
            if let Ok(request) = Request::post(&endpoint).json(&entry) {
                let _ = request.send().await;
            }
        });
    }

    fn flush(&self) {}
}
