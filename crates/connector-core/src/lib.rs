//! FeatureDev Connector Core
//!
//! Seams between the connector and the things it talks to: the host
//! transport, the chat UI, and the two collaborators that decorate answers.
//! Also the shared error and event types.

use featuredev_protocol::{
    AuthFollowUpType, ChatItem, ChatItemFollowUp, DiffTreeFileInfo, FeatureAuthState,
    FileNodeAction, HostBound, TabType,
};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur in the connector
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Outbound side: hands a message to the host. Fire-and-forget.
pub trait HostTransport: Send + Sync {
    fn send(&self, message: HostBound);
}

impl<F> HostTransport for F
where
    F: Fn(HostBound) + Send + Sync,
{
    fn send(&self, message: HostBound) {
        self(message)
    }
}

/// UI callbacks driven by host messages.
///
/// Every callback defaults to a no-op, so an owner only overrides the ones
/// it renders.
pub trait ChatUi: Send + Sync {
    fn file_component_update(
        &self,
        _tab_id: &str,
        _file_paths: &[DiffTreeFileInfo],
        _deleted_files: &[DiffTreeFileInfo],
        _message_id: Option<&str>,
        _disable_file_actions: bool,
    ) {
    }

    fn error(&self, _tab_id: &str, _message: &str, _title: &str) {}

    fn warning(&self, _tab_id: &str, _message: &str, _title: &str) {}

    fn async_event_progress(
        &self,
        _tab_id: &str,
        _in_progress: bool,
        _message: &str,
        _cancel_button_visible: bool,
    ) {
    }

    fn update_placeholder(&self, _tab_id: &str, _placeholder: &str) {}

    fn chat_input_enabled(&self, _tab_id: &str, _enabled: bool) {}

    fn authentication_update(
        &self,
        _features: FeatureAuthState,
        _authenticating_tab_ids: &[String],
    ) {
    }

    fn new_tab(&self, _tab_type: TabType) {}
}

/// Receives finished chat items for a tab.
///
/// Used for both "answer received" and "answer updated"; either may be left
/// unset on a connector.
pub trait AnswerSink: Send + Sync {
    fn deliver(&self, tab_id: &str, item: ChatItem);
}

impl<F> AnswerSink for F
where
    F: Fn(&str, ChatItem) + Send + Sync,
{
    fn deliver(&self, tab_id: &str, item: ChatItem) {
        self(tab_id, item)
    }
}

/// Produces the follow-up pills shown when the host needs the user to
/// authenticate. `auth_type` is `None` when the host did not say which flow.
pub trait FollowUpGenerator: Send + Sync {
    fn auth_follow_up(
        &self,
        tab_type: TabType,
        auth_type: Option<&AuthFollowUpType>,
    ) -> ChatItemFollowUp;
}

/// Produces the per-file actions of the changed-file tree
pub trait DiffTreeActions: Send + Sync {
    fn actions(&self, files: &[DiffTreeFileInfo]) -> Vec<FileNodeAction>;
}

/// Value form of every UI callback, for channel-backed and recording UIs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UiEvent {
    FileComponentUpdate {
        tab_id: String,
        file_paths: Vec<DiffTreeFileInfo>,
        deleted_files: Vec<DiffTreeFileInfo>,
        message_id: Option<String>,
        disable_file_actions: bool,
    },
    AnswerReceived {
        tab_id: String,
        item: ChatItem,
    },
    AnswerUpdated {
        tab_id: String,
        item: ChatItem,
    },
    Error {
        tab_id: String,
        message: String,
        title: String,
    },
    Warning {
        tab_id: String,
        message: String,
        title: String,
    },
    AsyncEventProgress {
        tab_id: String,
        in_progress: bool,
        message: String,
        cancel_button_visible: bool,
    },
    PlaceholderUpdated {
        tab_id: String,
        placeholder: String,
    },
    ChatInputEnabled {
        tab_id: String,
        enabled: bool,
    },
    AuthenticationUpdated {
        features: FeatureAuthState,
        authenticating_tab_ids: Vec<String>,
    },
    NewTab {
        tab_type: TabType,
    },
}

impl UiEvent {
    /// Short name, for logs and summaries
    pub fn kind(&self) -> &'static str {
        match self {
            UiEvent::FileComponentUpdate { .. } => "file_component_update",
            UiEvent::AnswerReceived { .. } => "answer_received",
            UiEvent::AnswerUpdated { .. } => "answer_updated",
            UiEvent::Error { .. } => "error",
            UiEvent::Warning { .. } => "warning",
            UiEvent::AsyncEventProgress { .. } => "async_event_progress",
            UiEvent::PlaceholderUpdated { .. } => "placeholder_updated",
            UiEvent::ChatInputEnabled { .. } => "chat_input_enabled",
            UiEvent::AuthenticationUpdated { .. } => "authentication_updated",
            UiEvent::NewTab { .. } => "new_tab",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use featuredev_protocol::{ChatItemType, UiCommand};
    use std::sync::Mutex;

    #[test]
    fn closures_act_as_transport() {
        let sent = Mutex::new(Vec::new());
        let transport = |message: HostBound| sent.lock().unwrap().push(message);

        transport.send(HostBound::new(UiCommand::StopResponse {
            tab_id: "tab-1".to_string(),
        }));

        let sent = sent.into_inner().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].command.name(), "stop-response");
    }

    #[test]
    fn closures_act_as_answer_sink() {
        let delivered = Mutex::new(Vec::new());
        let sink = |tab_id: &str, item: ChatItem| {
            delivered.lock().unwrap().push((tab_id.to_string(), item))
        };

        sink.deliver(
            "tab-2",
            ChatItem {
                item_type: ChatItemType::Answer,
                body: Some("hello".to_string()),
                ..Default::default()
            },
        );

        let delivered = delivered.into_inner().unwrap();
        assert_eq!(delivered[0].0, "tab-2");
        assert_eq!(delivered[0].1.body.as_deref(), Some("hello"));
    }

    #[test]
    fn ui_event_serializes_with_event_tag() {
        let event = UiEvent::ChatInputEnabled {
            tab_id: "tab-3".to_string(),
            enabled: true,
        };
        let value = serde_json::to_value(&event).expect("serialize ui event");
        assert_eq!(value["event"], event.kind());
        assert_eq!(value["tab_id"], "tab-3");
        assert_eq!(value["enabled"], true);
    }

    #[test]
    fn chat_ui_callbacks_default_to_no_ops() {
        struct ErrorsOnly(Mutex<Vec<String>>);

        impl ChatUi for ErrorsOnly {
            fn error(&self, _tab_id: &str, message: &str, _title: &str) {
                self.0.lock().unwrap().push(message.to_string());
            }
        }

        let ui = ErrorsOnly(Mutex::new(Vec::new()));
        ui.chat_input_enabled("tab-1", false);
        ui.new_tab(TabType::FeatureDev);
        ui.error("tab-1", "boom", "Oops");

        assert_eq!(ui.0.into_inner().unwrap(), vec!["boom"]);
    }
}
