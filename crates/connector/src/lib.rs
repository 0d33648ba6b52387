//! FeatureDev Connector
//!
//! Sits between the chat UI and the IDE host. User actions become
//! host-bound commands; host messages become UI callbacks.

pub mod answer;
pub mod channel;
pub mod connector;
pub mod diff_tree;
pub mod follow_up;

pub use channel::{host_channel, ui_channel, ChannelAnswers, ChannelTransport, ChannelUi};
pub use connector::{Connector, ConnectorBuilder};
pub use diff_tree::StandardDiffTreeActions;
pub use featuredev_connector_core::{
    AnswerSink, ChatUi, ConnectorError, DiffTreeActions, FollowUpGenerator, HostTransport, UiEvent,
};
pub use follow_up::StandardFollowUps;
