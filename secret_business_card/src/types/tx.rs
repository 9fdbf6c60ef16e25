use serde::{Deserialize, Serialize};

pub const WASM_EVENT_TYPE: &str = "wasm";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl Attribute {
    pub fn new(key: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_owned(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Event {
    pub fn new(event_type: &str, attributes: Vec<Attribute>) -> Self {
        Self {
            event_type: event_type.to_owned(),
            attributes,
        }
    }
}

/// Events emitted by one message of a transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxLog {
    #[serde(default)]
    pub msg_index: u32,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// A delivered (or broadcast) transaction, in the shape the cosmos tx JSON uses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResponse {
    #[serde(default)]
    pub txhash: String,
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub raw_log: String,
    #[serde(default)]
    pub logs: Vec<TxLog>,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// One attribute of the flattened event log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub msg: u32,
    #[serde(rename = "type")]
    pub event_type: String,
    pub key: String,
    pub value: String,
}

impl TxResponse {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Flattens the transaction's events into an ordered list of entries.
    ///
    /// Per-message logs are used when present (newer nodes leave them empty),
    /// otherwise the top-level events, all attributed to message 0.
    pub fn log_entries(&self) -> Vec<LogEntry> {
        if self.logs.is_empty() {
            return flatten_events(0, &self.events).collect();
        }

        self.logs
            .iter()
            .flat_map(|log| flatten_events(log.msg_index, &log.events))
            .collect()
    }

    /// Swaps the (encrypted) `wasm` events of the first message for decrypted ones.
    pub fn replace_wasm_events(&mut self, decrypted: Vec<Event>) {
        let events = match self.logs.first_mut() {
            Some(log) => &mut log.events,
            None => &mut self.events,
        };
        events.retain(|event| event.event_type != WASM_EVENT_TYPE);
        events.extend(decrypted);
    }
}

fn flatten_events(msg: u32, events: &[Event]) -> impl Iterator<Item = LogEntry> + '_ {
    events.iter().flat_map(move |event| {
        event.attributes.iter().map(move |attribute| LogEntry {
            msg,
            event_type: event.event_type.clone(),
            key: attribute.key.clone(),
            value: attribute.value.clone(),
        })
    })
}
