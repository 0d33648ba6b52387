//! Host → UI messages

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::*;

/// Messages pushed by the IDE host to the chat UI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostMessage {
    // File tree
    FileComponentUpdate(FileComponentUpdate),

    // Answers
    UpdateChatAnswer(ChatMessage),
    ChatMessage(ChatMessage),
    CodeResultMessage(CodeResultMessage),

    // Notifications
    ErrorMessage(Notice),
    InvalidTokenNotification(Notice),
    AsyncEventProgress(AsyncEventProgress),
    UpdatePlaceholder(UpdatePlaceholder),
    ChatInputEnabled(ChatInputEnabled),

    // Auth
    AuthenticationUpdate(AuthenticationUpdate),
    AuthNeededException(AuthNeededException),

    // Tabs
    OpenNewTab(OpenNewTab),

    /// Any tag this feature does not handle
    #[serde(other)]
    Unknown,
}

impl HostMessage {
    /// Wire tag, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            HostMessage::FileComponentUpdate(_) => "file-component-update",
            HostMessage::UpdateChatAnswer(_) => "update-chat-answer",
            HostMessage::ChatMessage(_) => "chat-message",
            HostMessage::CodeResultMessage(_) => "code-result-message",
            HostMessage::ErrorMessage(_) => "error-message",
            HostMessage::InvalidTokenNotification(_) => "invalid-token-notification",
            HostMessage::AsyncEventProgress(_) => "async-event-progress",
            HostMessage::UpdatePlaceholder(_) => "update-placeholder",
            HostMessage::ChatInputEnabled(_) => "chat-input-enabled",
            HostMessage::AuthenticationUpdate(_) => "authentication-update",
            HostMessage::AuthNeededException(_) => "auth-needed-exception",
            HostMessage::OpenNewTab(_) => "open-new-tab",
            HostMessage::Unknown => "unknown",
        }
    }

    /// Tab the message is addressed to, when it has one
    pub fn tab_id(&self) -> Option<&str> {
        match self {
            HostMessage::FileComponentUpdate(m) => Some(&m.tab_id),
            HostMessage::UpdateChatAnswer(m) | HostMessage::ChatMessage(m) => Some(&m.tab_id),
            HostMessage::CodeResultMessage(m) => Some(&m.tab_id),
            HostMessage::ErrorMessage(m) | HostMessage::InvalidTokenNotification(m) => {
                Some(&m.tab_id)
            }
            HostMessage::AsyncEventProgress(m) => Some(&m.tab_id),
            HostMessage::UpdatePlaceholder(m) => Some(&m.tab_id),
            HostMessage::ChatInputEnabled(m) => Some(&m.tab_id),
            HostMessage::AuthNeededException(m) => Some(&m.tab_id),
            HostMessage::OpenNewTab(m) => m.tab_id.as_deref(),
            HostMessage::AuthenticationUpdate(_) | HostMessage::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileComponentUpdate {
    #[serde(rename = "tabID")]
    pub tab_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_paths: Vec<DiffTreeFileInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deleted_files: Vec<DiffTreeFileInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disable_file_actions: bool,
}

/// A chat answer, new or updated
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(rename = "tabID")]
    pub tab_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message_type: ChatItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub ids: MessageIds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_be_voted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap_to_top: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub information_card: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient_sequence",
        skip_serializing_if = "Option::is_none"
    )]
    pub follow_ups: Option<Vec<ChatItemAction>>,
}

/// Generated code ready for review
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeResultMessage {
    #[serde(rename = "tabID")]
    pub tab_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub ids: MessageIds,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_paths: Vec<DiffTreeFileInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deleted_files: Vec<DiffTreeFileInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_be_voted: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_sequence",
        skip_serializing_if = "Option::is_none"
    )]
    pub references: Option<Vec<CodeReference>>,
}

/// Error or warning text for a tab
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    #[serde(rename = "tabID")]
    pub tab_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsyncEventProgress {
    #[serde(rename = "tabID")]
    pub tab_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub in_progress: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlaceholder {
    #[serde(rename = "tabID")]
    pub tab_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub new_placeholder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatInputEnabled {
    #[serde(rename = "tabID")]
    pub tab_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
}

/// Broadcast to every tab; carries no tab id of its own
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationUpdate {
    #[serde(flatten)]
    pub features: FeatureAuthState,
    #[serde(
        rename = "authenticatingTabIDs",
        default,
        deserialize_with = "null_as_default"
    )]
    pub authenticating_tab_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthNeededException {
    #[serde(rename = "tabID")]
    pub tab_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// `None` when the host left it out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<AuthFollowUpType>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenNewTab {
    #[serde(rename = "tabID", default, skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_chat_message() {
        let json = r#"{
          "type":"chat-message",
          "tabID":"tab-1",
          "messageType":"answer",
          "message":"Here is the plan",
          "triggerID":"trigger-1",
          "canBeVoted":true,
          "followUps":[{"pillText":"Generate code","type":"generate-code"}]
        }"#;

        let parsed: HostMessage = serde_json::from_str(json).expect("parse chat-message");
        match parsed {
            HostMessage::ChatMessage(msg) => {
                assert_eq!(msg.tab_id, "tab-1");
                assert_eq!(msg.message_type, ChatItemType::Answer);
                assert_eq!(msg.message.as_deref(), Some("Here is the plan"));
                assert_eq!(msg.ids.resolve(), Some("trigger-1"));
                assert_eq!(msg.can_be_voted, Some(true));
                let follow_ups = msg.follow_ups.expect("follow ups");
                assert_eq!(follow_ups.len(), 1);
                assert_eq!(follow_ups[0].pill_text, "Generate code");
                assert_eq!(follow_ups[0].action_type.as_deref(), Some("generate-code"));
            }
            other => panic!("unexpected message variant: {:?}", other),
        }
    }

    #[test]
    fn non_sequence_follow_ups_are_treated_as_absent() {
        for follow_ups in ["null", "{}", "\"later\"", "3"] {
            let json = format!(
                r#"{{"type":"chat-message","tabID":"tab-1","followUps":{}}}"#,
                follow_ups
            );
            let parsed: HostMessage = serde_json::from_str(&json).expect("parse chat-message");
            match parsed {
                HostMessage::ChatMessage(msg) => assert!(msg.follow_ups.is_none()),
                other => panic!("unexpected message variant: {:?}", other),
            }
        }
    }

    #[test]
    fn chat_message_without_type_defaults_to_answer() {
        let json = r#"{"type":"update-chat-answer","tabID":"tab-2","messageId":"m-1"}"#;
        let parsed: HostMessage = serde_json::from_str(json).expect("parse update-chat-answer");
        match parsed {
            HostMessage::UpdateChatAnswer(msg) => {
                assert_eq!(msg.message_type, ChatItemType::Answer);
                assert_eq!(msg.ids.message_id.as_deref(), Some("m-1"));
            }
            other => panic!("unexpected message variant: {:?}", other),
        }
    }

    #[test]
    fn deserializes_code_result_with_files() {
        let json = r#"{
          "type":"code-result-message",
          "tabID":"tab-3",
          "message":"Changes ready",
          "codeGenerationId":"gen-9",
          "filePaths":[
            {"zipFilePath":"src/a.rs","relativePath":"a.rs","rejected":false,"changeApplied":false},
            {"zipFilePath":"src/b.rs","relativePath":"b.rs","rejected":true,"changeApplied":false}
          ],
          "deletedFiles":[{"zipFilePath":"src/old.rs","relativePath":"old.rs"}],
          "references":[{"licenseName":"MIT","repository":"acme/lib"}]
        }"#;

        let parsed: HostMessage = serde_json::from_str(json).expect("parse code-result-message");
        match parsed {
            HostMessage::CodeResultMessage(msg) => {
                assert_eq!(msg.tab_id, "tab-3");
                assert_eq!(msg.ids.resolve(), Some("gen-9"));
                assert_eq!(msg.file_paths.len(), 2);
                assert!(msg.file_paths[1].rejected);
                assert_eq!(msg.deleted_files[0].zip_file_path, "src/old.rs");
                let references = msg.references.expect("references");
                assert_eq!(references[0].license_name.as_deref(), Some("MIT"));
            }
            other => panic!("unexpected message variant: {:?}", other),
        }
    }

    #[test]
    fn deserializes_authentication_update() {
        let json = r#"{
          "type":"authentication-update",
          "featureDevEnabled":true,
          "codeTestEnabled":true,
          "authenticatingTabIDs":["tab-1","tab-4"]
        }"#;

        let parsed: HostMessage = serde_json::from_str(json).expect("parse authentication-update");
        match parsed {
            HostMessage::AuthenticationUpdate(update) => {
                assert!(update.features.feature_dev_enabled);
                assert!(!update.features.code_transform_enabled);
                assert!(!update.features.doc_enabled);
                assert!(!update.features.code_scan_enabled);
                assert!(update.features.code_test_enabled);
                assert_eq!(update.authenticating_tab_ids, vec!["tab-1", "tab-4"]);
            }
            other => panic!("unexpected message variant: {:?}", other),
        }
    }

    #[test]
    fn deserializes_auth_needed_exception() {
        let json = r#"{
          "type":"auth-needed-exception",
          "tabID":"tab-5",
          "message":"Your connection expired",
          "authType":"re-auth"
        }"#;

        let parsed: HostMessage = serde_json::from_str(json).expect("parse auth-needed-exception");
        match parsed {
            HostMessage::AuthNeededException(exception) => {
                assert_eq!(exception.tab_id, "tab-5");
                assert_eq!(exception.auth_type, Some(AuthFollowUpType::ReAuth));
            }
            other => panic!("unexpected message variant: {:?}", other),
        }
    }

    #[test]
    fn unknown_tags_parse_to_unknown() {
        let json = r#"{"type":"show-telemetry-banner","tabID":"tab-1","extra":1}"#;
        let parsed: HostMessage = serde_json::from_str(json).expect("parse unknown tag");
        assert!(matches!(parsed, HostMessage::Unknown));
        assert_eq!(parsed.tab_id(), None);
    }

    #[test]
    fn known_tag_without_tab_id_is_rejected() {
        let json = r#"{"type":"error-message","title":"Oops","message":"boom"}"#;
        assert!(serde_json::from_str::<HostMessage>(json).is_err());
    }

    #[test]
    fn open_new_tab_needs_no_tab_id() {
        let parsed: HostMessage =
            serde_json::from_str(r#"{"type":"open-new-tab"}"#).expect("parse open-new-tab");
        assert_eq!(parsed.kind(), "open-new-tab");
        assert_eq!(parsed.tab_id(), None);
    }

    #[test]
    fn chat_message_keeps_unrecognized_message_type() {
        let json = r#"{"type":"chat-message","tabID":"t","messageType":"ai-prompt","message":"hi"}"#;
        let parsed: HostMessage = serde_json::from_str(json).expect("parse chat-message");
        match parsed {
            HostMessage::ChatMessage(msg) => {
                assert_eq!(msg.message_type, ChatItemType::Other("ai-prompt".to_string()));
            }
            other => panic!("unexpected message variant: {:?}", other),
        }
    }

    #[test]
    fn null_message_type_defaults_to_answer() {
        let json = r#"{"type":"update-chat-answer","tabID":"t","messageType":null}"#;
        let parsed: HostMessage = serde_json::from_str(json).expect("parse update-chat-answer");
        match parsed {
            HostMessage::UpdateChatAnswer(msg) => {
                assert_eq!(msg.message_type, ChatItemType::Answer);
            }
            other => panic!("unexpected message variant: {:?}", other),
        }
    }

    #[test]
    fn auth_needed_exception_tolerates_missing_or_unknown_auth_type() {
        let missing = r#"{"type":"auth-needed-exception","tabID":"t","message":"Sign in"}"#;
        match serde_json::from_str::<HostMessage>(missing).expect("parse without authType") {
            HostMessage::AuthNeededException(exception) => assert_eq!(exception.auth_type, None),
            other => panic!("unexpected message variant: {:?}", other),
        }

        let unknown = r#"{"type":"auth-needed-exception","tabID":"t","authType":"sso-expired","message":null}"#;
        match serde_json::from_str::<HostMessage>(unknown).expect("parse unknown authType") {
            HostMessage::AuthNeededException(exception) => {
                assert_eq!(
                    exception.auth_type,
                    Some(AuthFollowUpType::Other("sso-expired".to_string()))
                );
                assert_eq!(exception.message, "");
            }
            other => panic!("unexpected message variant: {:?}", other),
        }
    }

    #[test]
    fn null_notice_and_progress_fields_read_as_defaults() {
        let json = r#"{"type":"error-message","tabID":"t","title":null,"message":"boom"}"#;
        match serde_json::from_str::<HostMessage>(json).expect("parse error-message") {
            HostMessage::ErrorMessage(notice) => {
                assert_eq!(notice.title, "");
                assert_eq!(notice.message, "boom");
            }
            other => panic!("unexpected message variant: {:?}", other),
        }

        let json = r#"{"type":"async-event-progress","tabID":"t","inProgress":null,"message":null}"#;
        match serde_json::from_str::<HostMessage>(json).expect("parse async-event-progress") {
            HostMessage::AsyncEventProgress(progress) => {
                assert!(!progress.in_progress);
                assert!(progress.message.is_none());
            }
            other => panic!("unexpected message variant: {:?}", other),
        }

        let json = r#"{"type":"authentication-update","authenticatingTabIDs":null}"#;
        match serde_json::from_str::<HostMessage>(json).expect("parse authentication-update") {
            HostMessage::AuthenticationUpdate(update) => {
                assert!(update.authenticating_tab_ids.is_empty());
            }
            other => panic!("unexpected message variant: {:?}", other),
        }
    }
}
