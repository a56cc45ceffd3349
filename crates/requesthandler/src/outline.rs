use std::fmt;

/// Request queue of each downstream service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueName {
    Agent,
    Billing,
    Call,
    Campaign,
    Chat,
    Chatbot,
    Conference,
    Contact,
    Conversation,
    Customer,
    Flow,
    Message,
    Number,
    Outdial,
    Queue,
    Registrar,
    Route,
    Storage,
    Tag,
    Talk,
    Transcribe,
    Transfer,
}

impl QueueName {
    /// Service name as used in config (`call-manager`, ...).
    pub fn service(&self) -> &'static str {
        match self {
            QueueName::Agent => "agent-manager",
            QueueName::Billing => "billing-manager",
            QueueName::Call => "call-manager",
            QueueName::Campaign => "campaign-manager",
            QueueName::Chat => "chat-manager",
            QueueName::Chatbot => "chatbot-manager",
            QueueName::Conference => "conference-manager",
            QueueName::Contact => "contact-manager",
            QueueName::Conversation => "conversation-manager",
            QueueName::Customer => "customer-manager",
            QueueName::Flow => "flow-manager",
            QueueName::Message => "message-manager",
            QueueName::Number => "number-manager",
            QueueName::Outdial => "outdial-manager",
            QueueName::Queue => "queue-manager",
            QueueName::Registrar => "registrar-manager",
            QueueName::Route => "route-manager",
            QueueName::Storage => "storage-manager",
            QueueName::Tag => "tag-manager",
            QueueName::Talk => "talk-manager",
            QueueName::Transcribe => "transcribe-manager",
            QueueName::Transfer => "transfer-manager",
        }
    }

    /// Full queue name, `bin-manager.<service>.request`.
    pub fn queue(&self) -> String { format!("bin-manager.{}.request", self.service()) }

    /// Inverse of [`QueueName::queue`].
    pub fn service_of(queue: &str) -> Option<&str> {
        queue.strip_prefix("bin-manager.")?.strip_suffix(".request")
    }
}

impl fmt::Display for QueueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.queue()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_names_round_trip_to_config_keys() {
        for q in [QueueName::Agent, QueueName::Call, QueueName::Transfer] {
            assert_eq!(QueueName::service_of(&q.queue()), Some(q.service()));
            assert!(configs::DOWNSTREAM_SERVICES.contains(&q.service()));
        }
        assert_eq!(QueueName::Flow.to_string(), "bin-manager.flow-manager.request");
    }
}
