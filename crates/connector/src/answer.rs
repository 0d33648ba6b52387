//! Host payloads → UI chat items

use featuredev_protocol::host::{AuthNeededException, ChatMessage, CodeResultMessage};
use featuredev_protocol::{
    ChatItem, ChatItemFollowUp, ChatItemType, FileList, FileNodeAction, FILE_LIST_ROOT_TITLE,
};

/// Build the chat item for a new or updated answer.
///
/// `followUp` is only set when the host sent a follow-up list; an empty list
/// still yields a block (with empty text).
pub fn chat_item(message: &ChatMessage) -> ChatItem {
    let follow_up = message
        .follow_ups
        .clone()
        .map(|options| ChatItemFollowUp::for_answer(&message.message_type, options));
    ChatItem {
        item_type: message.message_type.clone(),
        body: message.message.clone(),
        message_id: message.ids.resolve().map(str::to_string),
        can_be_voted: message.can_be_voted,
        snap_to_top: message.snap_to_top,
        information_card: message.information_card.clone(),
        follow_up,
        file_list: None,
        code_reference: None,
        related_content: None,
    }
}

/// Changed-file tree for a code result
pub fn file_list(message: &CodeResultMessage, actions: Vec<FileNodeAction>) -> FileList {
    FileList {
        root_folder_title: FILE_LIST_ROOT_TITLE.to_string(),
        file_paths: message
            .file_paths
            .iter()
            .map(|f| f.zip_file_path.clone())
            .collect(),
        deleted_files: message
            .deleted_files
            .iter()
            .map(|f| f.zip_file_path.clone())
            .collect(),
        actions,
    }
}

pub fn code_result_item(message: &CodeResultMessage, file_list: FileList) -> ChatItem {
    ChatItem {
        item_type: ChatItemType::CodeResult,
        body: message.message.clone(),
        message_id: message.ids.resolve().map(str::to_string),
        can_be_voted: message.can_be_voted,
        file_list: Some(file_list),
        code_reference: message.references.clone(),
        ..Default::default()
    }
}

/// The two items shown when the host needs the user to authenticate: the
/// explanation, then a system prompt carrying the auth follow-ups.
pub fn auth_needed_items(
    exception: &AuthNeededException,
    follow_up: ChatItemFollowUp,
) -> (ChatItem, ChatItem) {
    let explanation = ChatItem {
        item_type: ChatItemType::Answer,
        body: Some(exception.message.clone()),
        can_be_voted: Some(false),
        ..Default::default()
    };
    let prompt = ChatItem {
        item_type: ChatItemType::SystemPrompt,
        body: None,
        can_be_voted: Some(false),
        follow_up: Some(follow_up),
        ..Default::default()
    };
    (explanation, prompt)
}
