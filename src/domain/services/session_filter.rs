use crate::domain::entities::{Session, SessionStatus};

/// Session list tab plus customer search. Order is preserved.
pub fn filter_sessions(sessions: &[Session], status: SessionStatus, search: &str) -> Vec<Session> {
    let needle = search.trim().to_lowercase();
    sessions
        .iter()
        .filter(|s| s.status == status)
        .filter(|s| {
            needle.is_empty()
                || s.customer.name.to_lowercase().contains(&needle)
                || s.customer.company.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Unread badge total for the active tab
pub fn unread_total(sessions: &[Session], status: SessionStatus) -> u32 {
    sessions
        .iter()
        .filter(|s| s.status == status)
        .map(|s| s.unread_count)
        .sum()
}
