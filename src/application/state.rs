use crate::domain::entities::{User, UserRole};
use crate::domain::services::TicketView;
use crate::shared::i18n::Language;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveView {
    Chat,
    MyTickets,
    AllTickets,
}

impl ActiveView {
    /// Ticket list backing this view; the chat view has none
    pub fn ticket_view(&self) -> Option<TicketView> {
        match self {
            ActiveView::Chat => None,
            ActiveView::MyTickets => Some(TicketView::MyTickets),
            ActiveView::AllTickets => Some(TicketView::AllTickets),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TicketSelection {
    #[default]
    None,
    /// New-ticket form is open
    New,
    Existing(String),
}

impl TicketSelection {
    pub fn ticket_id(&self) -> Option<&str> {
        match self {
            TicketSelection::Existing(id) => Some(id.as_str()),
            _ => None,
        }
    }
}

/// Console view state: who is working, in which language, on what
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleState {
    pub current_user: User,
    pub language: Language,
    pub active_view: ActiveView,
    pub active_session_id: Option<String>,
    pub selection: TicketSelection,
    pub drawer_open: bool,
    pub standalone_ticket_id: Option<String>,
}

impl ConsoleState {
    pub fn new(current_user: User, language: Language) -> Self {
        Self {
            current_user,
            language,
            active_view: ActiveView::Chat,
            active_session_id: None,
            selection: TicketSelection::None,
            drawer_open: false,
            standalone_ticket_id: None,
        }
    }

    pub fn toggle_role(&mut self) -> UserRole {
        self.current_user.role = self.current_user.role.toggled();
        self.current_user.role
    }

    /// Switching views closes the drawer
    pub fn set_view(&mut self, view: ActiveView) {
        if self.active_view != view {
            self.active_view = view;
            self.drawer_open = false;
        }
    }

    pub fn select_session(&mut self, session_id: impl Into<String>) {
        self.active_session_id = Some(session_id.into());
    }

    /// The side drawer only exists in the all-tickets grid
    pub fn select_ticket(&mut self, ticket_id: impl Into<String>) {
        self.selection = TicketSelection::Existing(ticket_id.into());
        self.drawer_open = self.active_view == ActiveView::AllTickets;
    }

    pub fn start_new_ticket(&mut self) {
        self.selection = TicketSelection::New;
        self.drawer_open = self.active_view == ActiveView::AllTickets;
    }

    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ConsoleState {
        ConsoleState::new(User::new("eng-001", "Alex Chen", UserRole::Admin), Language::Zh)
    }

    #[test]
    fn test_toggle_role_flips_back_and_forth() {
        let mut s = state();
        assert_eq!(s.toggle_role(), UserRole::Engineer);
        assert_eq!(s.toggle_role(), UserRole::Admin);
    }

    #[test]
    fn test_drawer_opens_only_in_all_tickets() {
        let mut s = state();
        s.set_view(ActiveView::MyTickets);
        s.select_ticket("TIC-1024");
        assert!(!s.drawer_open);
        assert_eq!(s.selection.ticket_id(), Some("TIC-1024"));

        s.set_view(ActiveView::AllTickets);
        s.select_ticket("TIC-1025");
        assert!(s.drawer_open);

        s.set_view(ActiveView::Chat);
        assert!(!s.drawer_open);
    }

    #[test]
    fn test_chat_view_has_no_ticket_list() {
        assert_eq!(ActiveView::Chat.ticket_view(), None);
        assert_eq!(ActiveView::MyTickets.ticket_view(), Some(TicketView::MyTickets));
    }
}
