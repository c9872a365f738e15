use log::{debug, info};
use serde_json::{Map, Value};

/// Event carrying a free-form log line in its `message` payload entry.
pub const APPLICATION_LOG: &str = "application.log";

/// Fire-and-forget event sink.
pub trait EventNotifier: Send + Sync {
    fn notify(&self, event: &str, payload: Map<String, Value>);
}

/// Sends events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl EventNotifier for LogNotifier {
    fn notify(&self, event: &str, payload: Map<String, Value>) {
        match (event, payload.get("message").and_then(Value::as_str)) {
            (APPLICATION_LOG, Some(message)) => info!("{}", message),
            _ => debug!("{}: {}", event, Value::Object(payload)),
        }
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl EventNotifier for NullNotifier {
    fn notify(&self, _event: &str, _payload: Map<String, Value>) {}
}

/// Builds the payload of an [`APPLICATION_LOG`] event.
pub fn log_payload(message: impl Into<String>) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("message".to_string(), Value::String(message.into()));
    payload
}
