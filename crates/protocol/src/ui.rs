//! UI → Host messages

use serde::{Deserialize, Serialize};

use crate::types::*;

/// A command wrapped with the feature channel it belongs to.
///
/// Serializes flat: `{"tabType":"featuredev","command":"...", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostBound {
    pub tab_type: TabType,
    #[serde(flatten)]
    pub command: UiCommand,
}

impl HostBound {
    pub fn new(command: UiCommand) -> Self {
        Self {
            tab_type: TabType::FeatureDev,
            command,
        }
    }
}

/// Commands sent from the chat UI to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum UiCommand {
    // Code actions
    #[serde(rename = "insert_code_at_cursor_position", rename_all = "camelCase")]
    InsertCodeAtCursorPosition {
        #[serde(rename = "tabID")]
        tab_id: String,
        message_id: String,
        code: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        insertion_target_type: Option<InsertionTargetType>,
        #[serde(skip_serializing_if = "Option::is_none")]
        code_reference: Option<Vec<CodeReference>>,
    },
    #[serde(rename = "code_was_copied_to_clipboard", rename_all = "camelCase")]
    CodeWasCopiedToClipboard {
        #[serde(rename = "tabID")]
        tab_id: String,
        message_id: String,
        code: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        insertion_target_type: Option<InsertionTargetType>,
        #[serde(skip_serializing_if = "Option::is_none")]
        code_reference: Option<Vec<CodeReference>>,
    },

    // File tree
    #[serde(rename = "open-diff", rename_all = "camelCase")]
    OpenDiff {
        #[serde(rename = "tabID")]
        tab_id: String,
        file_path: String,
        deleted: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
    },
    #[serde(rename = "file-click", rename_all = "camelCase")]
    FileClick {
        #[serde(rename = "tabID")]
        tab_id: String,
        file_path: String,
        deleted: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        action_name: Option<String>,
    },

    // Conversation
    #[serde(rename = "follow-up-was-clicked", rename_all = "camelCase")]
    FollowUpWasClicked {
        #[serde(rename = "tabID")]
        tab_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
        follow_up: ChatItemAction,
    },
    #[serde(rename = "chat-prompt", rename_all = "camelCase")]
    ChatPrompt {
        #[serde(rename = "tabID")]
        tab_id: String,
        chat_message: String,
    },
    #[serde(rename = "stop-response")]
    StopResponse {
        #[serde(rename = "tabID")]
        tab_id: String,
    },
    #[serde(rename = "response-body-link-click", rename_all = "camelCase")]
    ResponseBodyLinkClick {
        #[serde(rename = "tabID")]
        tab_id: String,
        message_id: String,
        link: String,
    },

    // Tabs
    #[serde(rename = "new-tab-was-created")]
    NewTabWasCreated {
        #[serde(rename = "tabID")]
        tab_id: String,
    },
    #[serde(rename = "tab-was-removed")]
    TabWasRemoved {
        #[serde(rename = "tabID")]
        tab_id: String,
    },

    // Feedback
    #[serde(rename = "chat-item-feedback", rename_all = "camelCase")]
    ChatItemFeedback {
        #[serde(rename = "tabID")]
        tab_id: String,
        message_id: String,
        selected_option: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        comment: Option<String>,
    },
    #[serde(rename = "chat-item-voted", rename_all = "camelCase")]
    ChatItemVoted {
        #[serde(rename = "tabID")]
        tab_id: String,
        message_id: String,
        vote: Vote,
    },

    // Bookkeeping
    #[serde(rename = "store-code-result-message-id", rename_all = "camelCase")]
    StoreCodeResultMessageId {
        #[serde(rename = "tabID")]
        tab_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
    },
}

impl UiCommand {
    /// Wire tag, for logging
    pub fn name(&self) -> &'static str {
        match self {
            UiCommand::InsertCodeAtCursorPosition { .. } => "insert_code_at_cursor_position",
            UiCommand::CodeWasCopiedToClipboard { .. } => "code_was_copied_to_clipboard",
            UiCommand::OpenDiff { .. } => "open-diff",
            UiCommand::FileClick { .. } => "file-click",
            UiCommand::FollowUpWasClicked { .. } => "follow-up-was-clicked",
            UiCommand::ChatPrompt { .. } => "chat-prompt",
            UiCommand::StopResponse { .. } => "stop-response",
            UiCommand::ResponseBodyLinkClick { .. } => "response-body-link-click",
            UiCommand::NewTabWasCreated { .. } => "new-tab-was-created",
            UiCommand::TabWasRemoved { .. } => "tab-was-removed",
            UiCommand::ChatItemFeedback { .. } => "chat-item-feedback",
            UiCommand::ChatItemVoted { .. } => "chat-item-voted",
            UiCommand::StoreCodeResultMessageId { .. } => "store-code-result-message-id",
        }
    }

    pub fn tab_id(&self) -> &str {
        match self {
            UiCommand::InsertCodeAtCursorPosition { tab_id, .. }
            | UiCommand::CodeWasCopiedToClipboard { tab_id, .. }
            | UiCommand::OpenDiff { tab_id, .. }
            | UiCommand::FileClick { tab_id, .. }
            | UiCommand::FollowUpWasClicked { tab_id, .. }
            | UiCommand::ChatPrompt { tab_id, .. }
            | UiCommand::StopResponse { tab_id }
            | UiCommand::ResponseBodyLinkClick { tab_id, .. }
            | UiCommand::NewTabWasCreated { tab_id }
            | UiCommand::TabWasRemoved { tab_id }
            | UiCommand::ChatItemFeedback { tab_id, .. }
            | UiCommand::ChatItemVoted { tab_id, .. }
            | UiCommand::StoreCodeResultMessageId { tab_id, .. } => tab_id,
        }
    }
}
