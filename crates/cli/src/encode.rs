//! Build a single host-bound message from the command line.

use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Subcommand;
use featuredev_connector::{ui_channel, Connector};
use featuredev_protocol::{HostBound, Vote};

#[derive(Debug, Clone, Subcommand)]
pub enum EncodeAction {
    /// Submit a chat prompt
    Prompt {
        #[arg(long)]
        tab: String,
        text: String,
    },
    /// Stop the response in progress
    Stop {
        #[arg(long)]
        tab: String,
    },
    /// A tab was opened
    OpenTab {
        #[arg(long)]
        tab: String,
    },
    /// A tab was closed
    CloseTab {
        #[arg(long)]
        tab: String,
    },
    /// Vote on an answer
    Vote {
        #[arg(long)]
        tab: String,
        #[arg(long)]
        message_id: String,
        /// Downvote instead of upvote
        #[arg(long)]
        down: bool,
    },
}

/// Run the action through a connector and return the message it sent
pub fn encode(action: &EncodeAction) -> anyhow::Result<HostBound> {
    let sent: Arc<Mutex<Option<HostBound>>> = Arc::new(Mutex::new(None));
    let slot = sent.clone();
    let transport = move |message: HostBound| {
        if let Ok(mut slot) = slot.lock() {
            *slot = Some(message);
        }
    };
    // Outbound-only: UI events are never produced, the receiver can go.
    let (ui, _ui_rx) = ui_channel(1);
    let connector = Connector::builder(transport, ui).build();

    match action {
        EncodeAction::Prompt { tab, text } => connector.send_chat_prompt(tab, text),
        EncodeAction::Stop { tab } => connector.stop_response(tab),
        EncodeAction::OpenTab { tab } => connector.tab_opened(tab),
        EncodeAction::CloseTab { tab } => connector.tab_removed(tab),
        EncodeAction::Vote {
            tab,
            message_id,
            down,
        } => {
            let vote = if *down { Vote::Downvote } else { Vote::Upvote };
            connector.vote(tab, message_id, vote)
        }
    }

    let message = sent
        .lock()
        .map_err(|_| anyhow::anyhow!("encoded message lock poisoned"))?
        .take();
    message.context("connector produced no message")
}

#[cfg(test)]
mod tests {
    use super::*;
    use featuredev_protocol::UiCommand;

    #[test]
    fn encodes_prompt() {
        let message = encode(&EncodeAction::Prompt {
            tab: "tab-1".to_string(),
            text: "add a README".to_string(),
        })
        .unwrap();

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["tabType"], "featuredev");
        assert_eq!(value["command"], "chat-prompt");
        assert_eq!(value["chatMessage"], "add a README");
    }

    #[test]
    fn encodes_downvote() {
        let message = encode(&EncodeAction::Vote {
            tab: "tab-2".to_string(),
            message_id: "m-1".to_string(),
            down: true,
        })
        .unwrap();

        assert_eq!(
            message.command,
            UiCommand::ChatItemVoted {
                tab_id: "tab-2".to_string(),
                message_id: "m-1".to_string(),
                vote: Vote::Downvote,
            }
        );
    }

    #[test]
    fn encodes_tab_lifecycle() {
        let opened = encode(&EncodeAction::OpenTab {
            tab: "tab-3".to_string(),
        })
        .unwrap();
        let closed = encode(&EncodeAction::CloseTab {
            tab: "tab-3".to_string(),
        })
        .unwrap();

        assert_eq!(opened.command.name(), "new-tab-was-created");
        assert_eq!(closed.command.name(), "tab-was-removed");
    }
}
