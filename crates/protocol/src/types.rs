//! Core types shared across the protocol

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Root folder title shown above the changed-file tree
pub const FILE_LIST_ROOT_TITLE: &str = "Changes";

/// Prompt shown above follow-up pills on regular answers
pub const FOLLOW_UP_PROMPT: &str = "Please follow up with one of these";

/// Feature channel discriminator carried by every outbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TabType {
    #[default]
    #[serde(rename = "featuredev")]
    FeatureDev,
}

impl TabType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TabType::FeatureDev => "featuredev",
        }
    }
}

/// Kind of chat item rendered by the UI.
///
/// Hosts may send types this crate has no variant for; those are carried
/// through unchanged as [`ChatItemType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChatItemType {
    #[default]
    Answer,
    AnswerStream,
    AnswerPart,
    Prompt,
    SystemPrompt,
    CodeResult,
    Other(String),
}

impl ChatItemType {
    pub fn as_str(&self) -> &str {
        match self {
            ChatItemType::Answer => "answer",
            ChatItemType::AnswerStream => "answer-stream",
            ChatItemType::AnswerPart => "answer-part",
            ChatItemType::Prompt => "prompt",
            ChatItemType::SystemPrompt => "system-prompt",
            ChatItemType::CodeResult => "code-result",
            ChatItemType::Other(other) => other,
        }
    }
}

impl From<String> for ChatItemType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "answer" => ChatItemType::Answer,
            "answer-stream" => ChatItemType::AnswerStream,
            "answer-part" => ChatItemType::AnswerPart,
            "prompt" => ChatItemType::Prompt,
            "system-prompt" => ChatItemType::SystemPrompt,
            "code-result" => ChatItemType::CodeResult,
            _ => ChatItemType::Other(value),
        }
    }
}

impl Serialize for ChatItemType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChatItemType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// Auth problem reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFollowUpType {
    FullAuth,
    ReAuth,
    MissingScopes,
    UseSupportedAuth,
    Other(String),
}

impl AuthFollowUpType {
    pub fn as_str(&self) -> &str {
        match self {
            AuthFollowUpType::FullAuth => "full-auth",
            AuthFollowUpType::ReAuth => "re-auth",
            AuthFollowUpType::MissingScopes => "missing_scopes",
            AuthFollowUpType::UseSupportedAuth => "use-supported-auth",
            AuthFollowUpType::Other(other) => other,
        }
    }
}

impl From<String> for AuthFollowUpType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "full-auth" => AuthFollowUpType::FullAuth,
            "re-auth" => AuthFollowUpType::ReAuth,
            "missing_scopes" => AuthFollowUpType::MissingScopes,
            "use-supported-auth" => AuthFollowUpType::UseSupportedAuth,
            _ => AuthFollowUpType::Other(value),
        }
    }
}

impl Serialize for AuthFollowUpType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AuthFollowUpType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// Visual status of a follow-up pill or file action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Info,
    Success,
    Warning,
    Error,
}

/// A clickable follow-up option
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatItemAction {
    pub pill_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

/// Follow-up block attached to a chat item
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChatItemFollowUp {
    pub text: String,
    pub options: Vec<ChatItemAction>,
}

impl ChatItemFollowUp {
    /// Follow-up block for an answer of `item_type`.
    ///
    /// The prompt text is empty for system prompts and when there is nothing
    /// to pick from.
    pub fn for_answer(item_type: &ChatItemType, options: Vec<ChatItemAction>) -> Self {
        let text = if *item_type == ChatItemType::SystemPrompt || options.is_empty() {
            String::new()
        } else {
            FOLLOW_UP_PROMPT.to_string()
        };
        Self { text, options }
    }
}

/// A changed or deleted file produced by a code generation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffTreeFileInfo {
    pub zip_file_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relative_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rejected: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub change_applied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_name: Option<String>,
}

/// Action offered on a file node of the changed-file tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileActionName {
    AcceptChange,
    RejectChange,
    RevertRejection,
}

/// A clickable action bound to one file in the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNodeAction {
    pub file_path: String,
    pub name: FileActionName,
    pub description: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActionStatus>,
}

/// Changed-file summary attached to code results
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileList {
    pub root_folder_title: String,
    pub file_paths: Vec<String>,
    pub deleted_files: Vec<String>,
    pub actions: Vec<FileNodeAction>,
}

/// Licensed-code attribution shown under a generated answer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub information: Option<String>,
}

/// UI representation of one chat turn
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatItem {
    #[serde(rename = "type")]
    pub item_type: ChatItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_be_voted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap_to_top: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub information_card: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<ChatItemFollowUp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_list: Option<FileList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_reference: Option<Vec<CodeReference>>,
    /// Never populated by this feature; kept so the shape matches the UI's item type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_content: Option<Value>,
}

/// Identifier fields the host may use to name a message.
///
/// Hosts are inconsistent about which of these they fill in, so lookups go
/// through [`MessageIds::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageIds {
    #[serde(rename = "messageId", default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(rename = "messageID", default, skip_serializing_if = "Option::is_none")]
    pub message_id_upper: Option<String>,
    #[serde(rename = "triggerID", default, skip_serializing_if = "Option::is_none")]
    pub trigger_id: Option<String>,
    #[serde(rename = "conversationID", default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(rename = "codeGenerationId", default, skip_serializing_if = "Option::is_none")]
    pub code_generation_id: Option<String>,
}

impl MessageIds {
    /// First identifier present, in precedence order.
    pub fn resolve(&self) -> Option<&str> {
        self.message_id
            .as_deref()
            .or(self.message_id_upper.as_deref())
            .or(self.trigger_id.as_deref())
            .or(self.conversation_id.as_deref())
            .or(self.code_generation_id.as_deref())
    }
}

/// Per-feature enablement flags pushed on authentication changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureAuthState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub feature_dev_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code_transform_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub doc_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code_scan_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code_test_enabled: bool,
}

/// Thumbs up / down on an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Upvote,
    Downvote,
}

/// Where inserted code should land in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsertionTargetType {
    Selection,
    Block,
    Line,
}

/// Free-form feedback on an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatItemFeedback {
    pub message_id: String,
    pub selected_option: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Read an optional field, treating an explicit `null` like a missing one.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Accept a sequence from a loosely typed field.
///
/// Anything other than an array (missing, `null`, an object, a string)
/// deserializes to `None` instead of failing the whole message. An array
/// whose entries do not match `T` is still an error.
pub fn lenient_sequence<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(items @ Value::Array(_)) => serde_json::from_value(items)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
