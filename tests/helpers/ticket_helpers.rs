#![allow(dead_code)]
use chrono::{DateTime, Duration, TimeZone, Utc};
use devpilot_console::domain::entities::{
    Customer, Priority, Ticket, TicketStatus, User, UserRole,
};

pub fn engineer(id: &str) -> User {
    User::new(id, format!("Engineer {}", id), UserRole::Engineer)
}

/// Fixed reference instant so date-range tests do not depend on the clock
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

/// Unassigned open ticket updated `hours_ago` before `base_time()`
pub fn make_ticket(id: &str, subject: &str, customer: &str, hours_ago: i64) -> Ticket {
    let updated_at = base_time() - Duration::hours(hours_ago);
    Ticket {
        id: id.to_string(),
        subject: subject.to_string(),
        description: String::new(),
        description_rpa_dsl: None,
        status: TicketStatus::Open,
        priority: Priority::Medium,
        customer: Customer::new(format!("cust-{}", id), customer),
        assignee: None,
        cc: Vec::new(),
        collaborators: Vec::new(),
        created_at: updated_at - Duration::days(1),
        updated_at,
        tags: Vec::new(),
        timeline: Vec::new(),
    }
}

pub fn assigned(mut ticket: Ticket, user: &User) -> Ticket {
    ticket.assignee = Some(user.clone());
    ticket
}

pub fn with_status(mut ticket: Ticket, status: TicketStatus) -> Ticket {
    ticket.status = status;
    ticket
}

pub fn with_priority(mut ticket: Ticket, priority: Priority) -> Ticket {
    ticket.priority = priority;
    ticket
}

/// A mixed collection: assigned, cc'd, collaborating and unrelated tickets
pub fn sample_tickets(me: &User, other: &User) -> Vec<Ticket> {
    let mut cc_ticket = assigned(make_ticket("TIC-2", "Payment gateway 502", "Globex", 2), other);
    cc_ticket.cc.push(me.clone());

    let mut collab_ticket = make_ticket("TIC-3", "Dark mode request", "Initech", 30);
    collab_ticket.collaborators.push(me.clone());

    vec![
        assigned(
            with_priority(make_ticket("TIC-1", "DB connection timeout", "Acme", 5), Priority::High),
            me,
        ),
        cc_ticket,
        collab_ticket,
        with_status(
            assigned(make_ticket("TIC-4", "Mobile login misaligned", "Globex", 24), other),
            TicketStatus::Resolved,
        ),
        with_status(make_ticket("TIC-5", "PDF export garbled", "Acme", 72), TicketStatus::Closed),
    ]
}

pub fn ids(tickets: &[Ticket]) -> Vec<&str> {
    tickets.iter().map(|t| t.id.as_str()).collect()
}
