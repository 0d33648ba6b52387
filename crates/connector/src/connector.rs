//! The featuredev connector.
//!
//! Stateless adapter between the chat UI and the IDE host. Outbound methods
//! turn one user gesture into one [`UiCommand`]; [`Connector::handle_message`]
//! turns one [`HostMessage`] into (at most) one kind of UI callback.

use std::sync::Arc;

use featuredev_connector_core::{
    AnswerSink, ChatUi, ConnectorError, DiffTreeActions, FollowUpGenerator, HostTransport,
};
use featuredev_protocol::host::{AuthNeededException, ChatMessage, CodeResultMessage};
use featuredev_protocol::{
    ChatItemAction, ChatItemFeedback, CodeReference, HostBound, HostMessage, InsertionTargetType,
    TabType, UiCommand, Vote,
};
use tracing::{debug, trace};

use crate::answer;
use crate::diff_tree::StandardDiffTreeActions;
use crate::follow_up::StandardFollowUps;

/// Routes user actions to the host and host events to the UI (cheap to Clone).
#[derive(Clone)]
pub struct Connector {
    transport: Arc<dyn HostTransport>,
    ui: Arc<dyn ChatUi>,
    on_answer_received: Option<Arc<dyn AnswerSink>>,
    on_answer_updated: Option<Arc<dyn AnswerSink>>,
    follow_ups: Arc<dyn FollowUpGenerator>,
    diff_tree: Arc<dyn DiffTreeActions>,
}

/// Builder for [`Connector`]. The transport and UI are required; answer
/// sinks are optional and the collaborators default to the standard ones.
pub struct ConnectorBuilder {
    transport: Arc<dyn HostTransport>,
    ui: Arc<dyn ChatUi>,
    on_answer_received: Option<Arc<dyn AnswerSink>>,
    on_answer_updated: Option<Arc<dyn AnswerSink>>,
    follow_ups: Arc<dyn FollowUpGenerator>,
    diff_tree: Arc<dyn DiffTreeActions>,
}

impl ConnectorBuilder {
    pub fn on_answer_received(mut self, sink: impl AnswerSink + 'static) -> Self {
        self.on_answer_received = Some(Arc::new(sink));
        self
    }

    pub fn on_answer_updated(mut self, sink: impl AnswerSink + 'static) -> Self {
        self.on_answer_updated = Some(Arc::new(sink));
        self
    }

    pub fn follow_up_generator(mut self, generator: impl FollowUpGenerator + 'static) -> Self {
        self.follow_ups = Arc::new(generator);
        self
    }

    pub fn diff_tree_actions(mut self, actions: impl DiffTreeActions + 'static) -> Self {
        self.diff_tree = Arc::new(actions);
        self
    }

    pub fn build(self) -> Connector {
        Connector {
            transport: self.transport,
            ui: self.ui,
            on_answer_received: self.on_answer_received,
            on_answer_updated: self.on_answer_updated,
            follow_ups: self.follow_ups,
            diff_tree: self.diff_tree,
        }
    }
}

impl Connector {
    pub fn builder(
        transport: impl HostTransport + 'static,
        ui: impl ChatUi + 'static,
    ) -> ConnectorBuilder {
        ConnectorBuilder {
            transport: Arc::new(transport),
            ui: Arc::new(ui),
            on_answer_received: None,
            on_answer_updated: None,
            follow_ups: Arc::new(StandardFollowUps),
            diff_tree: Arc::new(StandardDiffTreeActions),
        }
    }

    pub fn tab_type(&self) -> TabType {
        TabType::FeatureDev
    }

    fn send(&self, command: UiCommand) {
        debug!(
            component = "featuredev_connector",
            event = "connector.outbound",
            command = command.name(),
            tab_id = %command.tab_id(),
            "Sending message to host"
        );
        self.transport.send(HostBound::new(command));
    }

    // -- Outbound: one method per user gesture --

    pub fn insert_code_at_cursor_position(
        &self,
        tab_id: &str,
        message_id: &str,
        code: &str,
        insertion_target_type: Option<InsertionTargetType>,
        code_reference: Option<Vec<CodeReference>>,
    ) {
        self.send(UiCommand::InsertCodeAtCursorPosition {
            tab_id: tab_id.to_string(),
            message_id: message_id.to_string(),
            code: code.to_string(),
            insertion_target_type,
            code_reference,
        });
    }

    pub fn copy_to_clipboard(
        &self,
        tab_id: &str,
        message_id: &str,
        code: &str,
        insertion_target_type: Option<InsertionTargetType>,
        code_reference: Option<Vec<CodeReference>>,
    ) {
        self.send(UiCommand::CodeWasCopiedToClipboard {
            tab_id: tab_id.to_string(),
            message_id: message_id.to_string(),
            code: code.to_string(),
            insertion_target_type,
            code_reference,
        });
    }

    pub fn open_diff(&self, tab_id: &str, file_path: &str, deleted: bool, message_id: Option<&str>) {
        self.send(UiCommand::OpenDiff {
            tab_id: tab_id.to_string(),
            file_path: file_path.to_string(),
            deleted,
            message_id: message_id.map(str::to_string),
        });
    }

    pub fn follow_up_clicked(
        &self,
        tab_id: &str,
        message_id: Option<&str>,
        follow_up: ChatItemAction,
    ) {
        self.send(UiCommand::FollowUpWasClicked {
            tab_id: tab_id.to_string(),
            message_id: message_id.map(str::to_string),
            follow_up,
        });
    }

    /// Submit a prompt. Fire-and-forget: the answer arrives later through
    /// [`Connector::handle_message`].
    pub fn send_chat_prompt(&self, tab_id: &str, prompt: &str) {
        self.send(UiCommand::ChatPrompt {
            tab_id: tab_id.to_string(),
            chat_message: prompt.to_string(),
        });
    }

    pub fn file_clicked(
        &self,
        tab_id: &str,
        file_path: &str,
        deleted: bool,
        message_id: Option<&str>,
        action_name: Option<&str>,
    ) {
        self.send(UiCommand::FileClick {
            tab_id: tab_id.to_string(),
            file_path: file_path.to_string(),
            deleted,
            message_id: message_id.map(str::to_string),
            action_name: action_name.map(str::to_string),
        });
    }

    pub fn stop_response(&self, tab_id: &str) {
        self.send(UiCommand::StopResponse {
            tab_id: tab_id.to_string(),
        });
    }

    pub fn tab_opened(&self, tab_id: &str) {
        self.send(UiCommand::NewTabWasCreated {
            tab_id: tab_id.to_string(),
        });
    }

    pub fn tab_removed(&self, tab_id: &str) {
        self.send(UiCommand::TabWasRemoved {
            tab_id: tab_id.to_string(),
        });
    }

    pub fn send_feedback(&self, tab_id: &str, feedback: ChatItemFeedback) {
        self.send(UiCommand::ChatItemFeedback {
            tab_id: tab_id.to_string(),
            message_id: feedback.message_id,
            selected_option: feedback.selected_option,
            comment: feedback.comment,
        });
    }

    pub fn vote(&self, tab_id: &str, message_id: &str, vote: Vote) {
        self.send(UiCommand::ChatItemVoted {
            tab_id: tab_id.to_string(),
            message_id: message_id.to_string(),
            vote,
        });
    }

    pub fn response_body_link_click(&self, tab_id: &str, message_id: &str, link: &str) {
        self.send(UiCommand::ResponseBodyLinkClick {
            tab_id: tab_id.to_string(),
            message_id: message_id.to_string(),
            link: link.to_string(),
        });
    }

    // -- Inbound --

    /// Parse a raw host message and dispatch it.
    ///
    /// A known tag with a malformed payload is an error and reaches no
    /// callback. Unknown tags are not errors.
    pub async fn handle_raw(&self, raw: &str) -> Result<(), ConnectorError> {
        let message: HostMessage = serde_json::from_str(raw)?;
        self.handle_message(message).await;
        Ok(())
    }

    /// Dispatch one host message to the UI
    pub async fn handle_message(&self, message: HostMessage) {
        trace!(
            component = "featuredev_connector",
            event = "connector.inbound",
            kind = message.kind(),
            tab_id = ?message.tab_id(),
            "Dispatching host message"
        );

        match message {
            HostMessage::FileComponentUpdate(update) => {
                self.ui.file_component_update(
                    &update.tab_id,
                    &update.file_paths,
                    &update.deleted_files,
                    update.message_id.as_deref(),
                    update.disable_file_actions,
                );
            }
            HostMessage::UpdateChatAnswer(message) => {
                let item = answer::chat_item(&message);
                if let Some(sink) = &self.on_answer_updated {
                    sink.deliver(&message.tab_id, item);
                }
            }
            HostMessage::ErrorMessage(notice) => {
                self.ui.error(&notice.tab_id, &notice.message, &notice.title);
            }
            HostMessage::InvalidTokenNotification(notice) => {
                self.ui
                    .warning(&notice.tab_id, &notice.message, &notice.title);
            }
            HostMessage::ChatMessage(message) => {
                if let Some(sink) = &self.on_answer_received {
                    self.process_chat_message(sink.as_ref(), message);
                }
            }
            HostMessage::CodeResultMessage(message) => {
                if let Some(sink) = &self.on_answer_received {
                    self.process_code_result(sink.as_ref(), message);
                }
            }
            HostMessage::AsyncEventProgress(progress) => {
                self.ui.async_event_progress(
                    &progress.tab_id,
                    progress.in_progress,
                    progress.message.as_deref().unwrap_or_default(),
                    true,
                );
            }
            HostMessage::UpdatePlaceholder(update) => {
                self.ui
                    .update_placeholder(&update.tab_id, &update.new_placeholder);
            }
            HostMessage::ChatInputEnabled(update) => {
                self.ui.chat_input_enabled(&update.tab_id, update.enabled);
            }
            HostMessage::AuthenticationUpdate(update) => {
                self.ui
                    .authentication_update(update.features, &update.authenticating_tab_ids);
            }
            HostMessage::AuthNeededException(exception) => {
                self.process_auth_needed(exception);
            }
            HostMessage::OpenNewTab(_) => {
                self.ui.new_tab(self.tab_type());
            }
            HostMessage::Unknown => {
                debug!(
                    component = "featuredev_connector",
                    event = "connector.inbound.unknown",
                    "Ignoring host message with unrecognized type"
                );
            }
        }
    }

    fn process_chat_message(&self, sink: &dyn AnswerSink, message: ChatMessage) {
        let item = answer::chat_item(&message);
        sink.deliver(&message.tab_id, item);
    }

    fn process_code_result(&self, sink: &dyn AnswerSink, message: CodeResultMessage) {
        let message_id = message.ids.resolve().map(str::to_string);
        self.send(UiCommand::StoreCodeResultMessageId {
            tab_id: message.tab_id.clone(),
            message_id,
        });

        let files: Vec<_> = message
            .file_paths
            .iter()
            .chain(message.deleted_files.iter())
            .cloned()
            .collect();
        let actions = self.diff_tree.actions(&files);
        let file_list = answer::file_list(&message, actions);
        let item = answer::code_result_item(&message, file_list);
        sink.deliver(&message.tab_id, item);
    }

    fn process_auth_needed(&self, exception: AuthNeededException) {
        let Some(sink) = &self.on_answer_received else {
            return;
        };
        let follow_up = self
            .follow_ups
            .auth_follow_up(self.tab_type(), exception.auth_type.as_ref());
        let (explanation, prompt) = answer::auth_needed_items(&exception, follow_up);
        sink.deliver(&exception.tab_id, explanation);
        sink.deliver(&exception.tab_id, prompt);
    }
}
