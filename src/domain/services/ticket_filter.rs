//! Ticket view filtering and ordering.
//!
//! Every function here is pure: it takes the canonical collection by
//! reference and returns a new ordered subset.

use crate::domain::entities::{Priority, Ticket, TicketStatus, User};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Which ticket list the operator is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketView {
    MyTickets,
    AllTickets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Only(TicketStatus),
}

impl StatusFilter {
    fn matches(&self, status: TicketStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    fn matches(&self, priority: Priority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(wanted) => *wanted == priority,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssigneeFilter {
    #[default]
    All,
    Unassigned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    Created,
    #[default]
    Updated,
}

/// Ticket grid filter bar state. `Default` is the pass-through criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridFilterCriteria {
    pub search_term: String,
    pub status: StatusFilter,
    pub priority: PriorityFilter,
    pub assignee: AssigneeFilter,
    pub date_field: DateField,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl GridFilterCriteria {
    pub fn is_pass_through(&self) -> bool {
        *self == GridFilterCriteria::default()
    }

    fn matches(&self, ticket: &Ticket, needle: &str) -> bool {
        self.matches_search(ticket, needle)
            && self.status.matches(ticket.status)
            && self.priority.matches(ticket.priority)
            && self.matches_assignee(ticket)
            && self.matches_date_range(ticket)
    }

    fn matches_search(&self, ticket: &Ticket, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        ticket.id.to_lowercase().contains(needle)
            || ticket.subject.to_lowercase().contains(needle)
            || ticket.customer.name.to_lowercase().contains(needle)
    }

    fn matches_assignee(&self, ticket: &Ticket) -> bool {
        match self.assignee {
            AssigneeFilter::All => true,
            AssigneeFilter::Unassigned => ticket.assignee.is_none(),
        }
    }

    fn matches_date_range(&self, ticket: &Ticket) -> bool {
        let at = match self.date_field {
            DateField::Created => ticket.created_at,
            DateField::Updated => ticket.updated_at,
        };
        if let Some(start) = self.start_date {
            if at < start_of_day(start) {
                return false;
            }
        }
        if let Some(end) = self.end_date.and_then(end_of_day) {
            if at > end {
                return false;
            }
        }
        true
    }
}

/// 00:00:00.000 UTC of `date`
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// 23:59:59.999 UTC of `date`, or `None` past the representable range
pub fn end_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_milli_opt(23, 59, 59, 999).map(|dt| dt.and_utc())
}

/// Tickets shown for a view. `MyTickets` keeps tickets where the user is
/// assignee, CC or collaborator, in source order.
pub fn visible_tickets(all: &[Ticket], view: TicketView, current_user: &User) -> Vec<Ticket> {
    match view {
        TicketView::AllTickets => all.to_vec(),
        TicketView::MyTickets => all
            .iter()
            .filter(|t| t.involves(&current_user.id))
            .cloned()
            .collect(),
    }
}

/// All predicates ANDed; order preserved.
pub fn apply_grid_filters(tickets: &[Ticket], criteria: &GridFilterCriteria) -> Vec<Ticket> {
    let needle = criteria.search_term.to_lowercase();
    tickets
        .iter()
        .filter(|t| criteria.matches(t, &needle))
        .cloned()
        .collect()
}

/// Unassigned first, then most recently updated first. Stable for ties.
pub fn sort_tickets(tickets: &[Ticket]) -> Vec<Ticket> {
    let mut sorted = tickets.to_vec();
    sorted.sort_by(|a, b| {
        a.assignee
            .is_some()
            .cmp(&b.assignee.is_some())
            .then_with(|| b.updated_at.cmp(&a.updated_at))
    });
    sorted
}
