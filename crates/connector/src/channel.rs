//! Channel-backed transport and UI.
//!
//! Both sides are synchronous and must never block, so sends use
//! `try_send` and drop the message with a warning when the channel is full
//! or closed.

use featuredev_connector_core::{AnswerSink, ChatUi, HostTransport, UiEvent};
use featuredev_protocol::{ChatItem, DiffTreeFileInfo, FeatureAuthState, HostBound, TabType};
use tokio::sync::mpsc;
use tracing::warn;

/// Create a transport and the receiver the host side drains
pub fn host_channel(capacity: usize) -> (ChannelTransport, mpsc::Receiver<HostBound>) {
    let (tx, rx) = mpsc::channel(capacity);
    (ChannelTransport { tx }, rx)
}

/// Create a UI and the receiver of the events it emits
pub fn ui_channel(capacity: usize) -> (ChannelUi, mpsc::Receiver<UiEvent>) {
    let (tx, rx) = mpsc::channel(capacity);
    (ChannelUi { tx }, rx)
}

#[derive(Clone)]
pub struct ChannelTransport {
    tx: mpsc::Sender<HostBound>,
}

impl HostTransport for ChannelTransport {
    fn send(&self, message: HostBound) {
        let command = message.command.name();
        if self.tx.try_send(message).is_err() {
            warn!(
                component = "channel_transport",
                event = "transport.send.dropped",
                command = command,
                "Host channel full or closed, message dropped"
            );
        }
    }
}

/// Forwards every UI callback as a [`UiEvent`]
#[derive(Clone)]
pub struct ChannelUi {
    tx: mpsc::Sender<UiEvent>,
}

impl ChannelUi {
    fn emit(&self, event: UiEvent) {
        let kind = event.kind();
        if self.tx.try_send(event).is_err() {
            warn!(
                component = "channel_ui",
                event = "ui.emit.dropped",
                ui_event = kind,
                "UI channel full or closed, event dropped"
            );
        }
    }

    /// Sink that emits [`UiEvent::AnswerReceived`]
    pub fn answers_received(&self) -> ChannelAnswers {
        ChannelAnswers {
            ui: self.clone(),
            updated: false,
        }
    }

    /// Sink that emits [`UiEvent::AnswerUpdated`]
    pub fn answers_updated(&self) -> ChannelAnswers {
        ChannelAnswers {
            ui: self.clone(),
            updated: true,
        }
    }
}

impl ChatUi for ChannelUi {
    fn file_component_update(
        &self,
        tab_id: &str,
        file_paths: &[DiffTreeFileInfo],
        deleted_files: &[DiffTreeFileInfo],
        message_id: Option<&str>,
        disable_file_actions: bool,
    ) {
        self.emit(UiEvent::FileComponentUpdate {
            tab_id: tab_id.to_string(),
            file_paths: file_paths.to_vec(),
            deleted_files: deleted_files.to_vec(),
            message_id: message_id.map(str::to_string),
            disable_file_actions,
        });
    }

    fn error(&self, tab_id: &str, message: &str, title: &str) {
        self.emit(UiEvent::Error {
            tab_id: tab_id.to_string(),
            message: message.to_string(),
            title: title.to_string(),
        });
    }

    fn warning(&self, tab_id: &str, message: &str, title: &str) {
        self.emit(UiEvent::Warning {
            tab_id: tab_id.to_string(),
            message: message.to_string(),
            title: title.to_string(),
        });
    }

    fn async_event_progress(
        &self,
        tab_id: &str,
        in_progress: bool,
        message: &str,
        cancel_button_visible: bool,
    ) {
        self.emit(UiEvent::AsyncEventProgress {
            tab_id: tab_id.to_string(),
            in_progress,
            message: message.to_string(),
            cancel_button_visible,
        });
    }

    fn update_placeholder(&self, tab_id: &str, placeholder: &str) {
        self.emit(UiEvent::PlaceholderUpdated {
            tab_id: tab_id.to_string(),
            placeholder: placeholder.to_string(),
        });
    }

    fn chat_input_enabled(&self, tab_id: &str, enabled: bool) {
        self.emit(UiEvent::ChatInputEnabled {
            tab_id: tab_id.to_string(),
            enabled,
        });
    }

    fn authentication_update(&self, features: FeatureAuthState, authenticating_tab_ids: &[String]) {
        self.emit(UiEvent::AuthenticationUpdated {
            features,
            authenticating_tab_ids: authenticating_tab_ids.to_vec(),
        });
    }

    fn new_tab(&self, tab_type: TabType) {
        self.emit(UiEvent::NewTab { tab_type });
    }
}

#[derive(Clone)]
pub struct ChannelAnswers {
    ui: ChannelUi,
    updated: bool,
}

impl AnswerSink for ChannelAnswers {
    fn deliver(&self, tab_id: &str, item: ChatItem) {
        let tab_id = tab_id.to_string();
        let event = if self.updated {
            UiEvent::AnswerUpdated { tab_id, item }
        } else {
            UiEvent::AnswerReceived { tab_id, item }
        };
        self.ui.emit(event);
    }
}
