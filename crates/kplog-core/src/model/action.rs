//! Logical step kinds stamped on detail records

use super::event::EventTag;

pub const ACTION_INBOUND: &str = "[INBOUND]";
pub const ACTION_OUTBOUND: &str = "[OUTBOUND]";
pub const ACTION_CONSUMING: &str = "[CONSUMING]";
pub const ACTION_PRODUCING: &str = "[PRODUCING]";

const NODE_CONSUMER: &str = "consumer";
const NODE_PRODUCER: &str = "producer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Inbound,
    Outbound,
    Consuming,
    Producing,
    Custom,
}

/// The step a detail record describes
///
/// `sub_action` holds the peer node for inbound/outbound steps and the
/// topic for consuming/producing steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerAction {
    kind: ActionKind,
    pub action: String,
    pub action_description: String,
    pub sub_action: String,
}

impl LoggerAction {
    fn build(
        kind: ActionKind,
        action: impl Into<String>,
        sub_action: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            action: action.into(),
            action_description: description.into(),
            sub_action: sub_action.into(),
        }
    }

    /// A call received from `node` (e.g. "client")
    pub fn inbound(node: impl Into<String>, description: impl Into<String>) -> Self {
        Self::build(ActionKind::Inbound, ACTION_INBOUND, node, description)
    }

    /// A response or call sent to `node`
    pub fn outbound(node: impl Into<String>, description: impl Into<String>) -> Self {
        Self::build(ActionKind::Outbound, ACTION_OUTBOUND, node, description)
    }

    /// A message consumed from `topic`
    pub fn consuming(topic: impl Into<String>, description: impl Into<String>) -> Self {
        Self::build(ActionKind::Consuming, ACTION_CONSUMING, topic, description)
    }

    /// A message published to `topic`
    pub fn producing(topic: impl Into<String>, description: impl Into<String>) -> Self {
        Self::build(ActionKind::Producing, ACTION_PRODUCING, topic, description)
    }

    pub fn custom(action: impl Into<String>, description: impl Into<String>) -> Self {
        Self::build(ActionKind::Custom, action, "", description)
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Event tag used when no tag was staged for the emission
    ///
    /// Code, description and result are left for the emitter to fill.
    pub fn default_tag(&self) -> EventTag {
        match self.kind {
            ActionKind::Inbound => {
                EventTag::new(&self.sub_action, self.command_or("inbound"))
            }
            ActionKind::Outbound => {
                EventTag::new(&self.sub_action, self.command_or("outbound"))
            }
            ActionKind::Consuming => EventTag::new(NODE_CONSUMER, &self.sub_action),
            ActionKind::Producing => EventTag::new(NODE_PRODUCER, &self.sub_action),
            ActionKind::Custom => EventTag::new(&self.action, &self.action_description),
        }
    }

    fn command_or(&self, fallback: &str) -> String {
        if self.action_description.is_empty() {
            fallback.to_string()
        } else {
            self.action_description.clone()
        }
    }
}
