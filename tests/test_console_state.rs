mod helpers;
use helpers::*;

use devpilot_console::application::{ActiveView, TicketSelection};
use devpilot_console::domain::entities::{SessionStatus, TicketDraft, UserRole};
use devpilot_console::domain::events::ConsoleEvent;
use devpilot_console::domain::services::{AudioNotice, AudioStatus};
use devpilot_console::shared::i18n::Language;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::StreamExt;

#[tokio::test]
async fn test_toggle_role_publishes_event() {
    let state = setup_test_state().await;
    let mut events = state.event_bus.subscribe();

    assert_eq!(state.snapshot().await.current_user.role, UserRole::Admin);
    assert_eq!(state.toggle_role().await, UserRole::Engineer);

    let event = tokio::time::timeout(Duration::from_secs(1), events.next())
        .await
        .expect("No event published")
        .expect("Stream closed")
        .expect("Lagged");
    assert_eq!(
        event,
        ConsoleEvent::RoleChanged {
            user_id: "eng-001".to_string(),
            role: UserRole::Engineer,
        }
    );
}

#[tokio::test]
async fn test_switch_language_keeps_role_and_selected_ticket() {
    let state = setup_test_state().await;
    state.toggle_role().await;
    state.set_view(ActiveView::AllTickets).await;
    state.select_ticket("TIC-1027").await;

    let english_subject = state
        .ticket_service
        .list_tickets()
        .await
        .unwrap()
        .into_iter()
        .find(|t| t.id == "TIC-1027")
        .map(|t| t.subject)
        .unwrap();

    state.switch_language(Language::Zh).await.unwrap();

    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.language, Language::Zh);
    assert_eq!(snapshot.current_user.role, UserRole::Engineer);
    assert_eq!(snapshot.selection, TicketSelection::Existing("TIC-1027".to_string()));

    let chinese_subject = state
        .ticket_service
        .list_tickets()
        .await
        .unwrap()
        .into_iter()
        .find(|t| t.id == "TIC-1027")
        .map(|t| t.subject)
        .unwrap();
    assert_ne!(english_subject, chinese_subject);
}

#[tokio::test]
async fn test_switch_language_falls_back_to_first_ticket() {
    let state = setup_test_state().await;
    // Created tickets do not survive the reseed
    state.create_ticket(TicketDraft::default()).await.unwrap();

    state.switch_language(Language::Zh).await.unwrap();

    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.selection, TicketSelection::Existing("TIC-1024".to_string()));
    assert_eq!(state.ticket_service.list_tickets().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_switch_language_keeps_deep_linked_ticket() {
    let state = setup_test_state().await;
    state.open_deep_link("?ticketId=TIC-1026").await.unwrap();

    state.switch_language(Language::Zh).await.unwrap();

    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.standalone_ticket_id.as_deref(), Some("TIC-1026"));
    assert_eq!(snapshot.selection, TicketSelection::None);
}

#[tokio::test]
async fn test_close_drawer_keeps_selection() {
    let state = setup_test_state().await;
    state.set_view(ActiveView::AllTickets).await;
    state.select_ticket("TIC-1025").await;
    assert!(state.snapshot().await.drawer_open);

    state.close_drawer().await;

    let snapshot = state.snapshot().await;
    assert!(!snapshot.drawer_open);
    assert_eq!(snapshot.selection, TicketSelection::Existing("TIC-1025".to_string()));
}

#[tokio::test]
async fn test_session_tabs_and_search() {
    let state = setup_test_state().await;

    let active = state.sessions(SessionStatus::Active, "").await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, "sess-001");

    let none = state
        .sessions(SessionStatus::Active, "no such company")
        .await
        .unwrap();
    assert!(none.is_empty());

    let name = active[0].customer.name.to_uppercase();
    let found = state.sessions(SessionStatus::Active, &name).await.unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn test_select_unknown_session_is_not_found() {
    let state = setup_test_state().await;
    assert!(state.select_session("sess-404").await.is_err());
    assert_eq!(state.snapshot().await.active_session_id, None);
}

#[tokio::test]
async fn test_audio_unlock_runs_once_and_retry_recovers() {
    let probe = Arc::new(FakeAudioProbe::new(false));
    let state = setup_test_state_with_probe(probe.clone()).await;
    let audio = &state.audio_service;

    assert_eq!(
        audio.on_first_interaction().await,
        vec![AudioNotice::Verifying, AudioNotice::Failed, AudioNotice::Guide]
    );
    assert_eq!(audio.status().await, AudioStatus::Failed);
    assert!(audio.on_first_interaction().await.is_empty());

    // Manual retries are unbounded
    assert_eq!(audio.verify().await.last(), Some(&AudioNotice::Guide));
    probe.set_available(true);
    assert_eq!(
        audio.verify().await,
        vec![AudioNotice::Verifying, AudioNotice::Ready]
    );
    assert_eq!(audio.status().await, AudioStatus::Ready);
    assert!(audio.verify().await.is_empty());
}
