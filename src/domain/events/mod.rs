use crate::domain::entities::{EndConfirmationStatus, TicketStatus, UserRole};
use crate::domain::services::CallStage;
use crate::shared::i18n::Language;

/// Console events fanned out to views and listeners
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleEvent {
    MessageSent {
        message_id: String,
        session_id: String,
        sender_id: String,
        kind: &'static str,
        timestamp: String, // ISO 8601
    },
    MessageDeleted {
        message_id: String,
        session_id: String,
        timestamp: String, // ISO 8601
    },
    EndConfirmationTick {
        message_id: String,
        seconds_left: u32,
    },
    EndConfirmationResolved {
        message_id: String,
        session_id: String,
        status: EndConfirmationStatus,
        trigger: &'static str, // "manual", "timeout"
        timestamp: String,     // ISO 8601
    },
    TicketCreated {
        ticket_id: String,
        created_by: String,
        timestamp: String, // ISO 8601
    },
    TicketUpdated {
        ticket_id: String,
        status: TicketStatus,
        updated_by: String,
        timestamp: String, // ISO 8601
    },
    TicketEventAppended {
        ticket_id: String,
        event_id: String,
        sender_id: String,
        timestamp: String, // ISO 8601
    },
    CallStageChanged {
        from: CallStage,
        to: CallStage,
        number: String,
    },
    CallCustomerLinked {
        customer_id: String,
        number: String,
    },
    RoleChanged {
        user_id: String,
        role: UserRole,
    },
    LanguageChanged {
        language: Language,
    },
}
