//! Standard auth follow-ups

use featuredev_connector_core::FollowUpGenerator;
use featuredev_protocol::{
    ActionStatus, AuthFollowUpType, ChatItemAction, ChatItemFollowUp, ChatItemType, TabType,
};

/// One pill per auth problem, tagged with the auth type so the host knows
/// which flow to start when it is clicked. Without an auth type there is no
/// flow to start, so no pill is offered.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFollowUps;

impl FollowUpGenerator for StandardFollowUps {
    fn auth_follow_up(
        &self,
        tab_type: TabType,
        auth_type: Option<&AuthFollowUpType>,
    ) -> ChatItemFollowUp {
        let Some(auth_type) = auth_type else {
            return ChatItemFollowUp::for_answer(&ChatItemType::SystemPrompt, Vec::new());
        };

        let pill_text = match auth_type {
            AuthFollowUpType::FullAuth | AuthFollowUpType::Other(_) => "Authenticate",
            AuthFollowUpType::ReAuth => "Re-authenticate",
            AuthFollowUpType::MissingScopes => "Enable feature",
            AuthFollowUpType::UseSupportedAuth => "Switch connection",
        };
        let description = match auth_type {
            AuthFollowUpType::MissingScopes | AuthFollowUpType::UseSupportedAuth => Some(format!(
                "Your current connection does not support {}",
                tab_type.as_str()
            )),
            AuthFollowUpType::FullAuth | AuthFollowUpType::ReAuth | AuthFollowUpType::Other(_) => {
                None
            }
        };

        let option = ChatItemAction {
            pill_text: pill_text.to_string(),
            action_type: Some(auth_type.as_str().to_string()),
            description,
            status: Some(ActionStatus::Info),
            ..Default::default()
        };
        ChatItemFollowUp::for_answer(&ChatItemType::SystemPrompt, vec![option])
    }
}
