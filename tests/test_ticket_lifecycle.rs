mod helpers;
use helpers::*;

use devpilot_console::application::services::TicketLookup;
use devpilot_console::application::{ActiveView, TicketSelection};
use devpilot_console::domain::entities::{
    Attachment, AttachmentKind, EventSender, Priority, TicketDraft, TicketEventType, TicketStatus,
    TicketUpdate,
};
use devpilot_console::domain::errors::DomainError;

#[tokio::test]
async fn test_new_ticket_defaults_and_is_prepended() {
    let state = setup_test_state().await;

    let ticket = state
        .create_ticket(TicketDraft::default())
        .await
        .expect("Failed to create ticket");

    assert_eq!(ticket.subject, "Untitled");
    assert_eq!(ticket.status, TicketStatus::Open);
    assert_eq!(ticket.priority, Priority::Medium);
    assert!(ticket.cc.is_empty() && ticket.collaborators.is_empty() && ticket.tags.is_empty());
    assert_eq!(ticket.customer.id, "cust-001");
    assert!(ticket.id.starts_with("TIC-"));
    assert_eq!(ticket.created_at, ticket.updated_at);

    let all = state.ticket_service.list_tickets().await.unwrap();
    assert_eq!(all.first().map(|t| t.id.as_str()), Some(ticket.id.as_str()));
    assert_eq!(all.len(), 6);

    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.selection, TicketSelection::Existing(ticket.id));
}

#[tokio::test]
async fn test_generated_ids_are_unique() {
    let state = setup_test_state().await;
    for _ in 0..20 {
        state.create_ticket(TicketDraft::default()).await.unwrap();
    }
    let mut ids: Vec<_> = state
        .ticket_service
        .list_tickets()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[tokio::test]
async fn test_update_merges_fields_and_bumps_updated_at() {
    let state = setup_test_state().await;
    let before = match state.ticket_service.find_ticket("TIC-1024").await.unwrap() {
        TicketLookup::Found(t) => t,
        TicketLookup::NotFound(id) => panic!("seed ticket {} missing", id),
    };

    state.select_ticket("TIC-1024").await;
    let updated = state
        .save_active_ticket(TicketUpdate {
            status: Some(TicketStatus::Resolved),
            assignee: Some(None),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(updated.status, TicketStatus::Resolved);
    assert!(updated.assignee.is_none());
    assert_eq!(updated.subject, before.subject);
    assert_eq!(updated.priority, before.priority);
    assert!(updated.updated_at > before.updated_at);
}

#[tokio::test]
async fn test_update_unknown_ticket_is_not_found() {
    let state = setup_test_state().await;
    let user = state.snapshot().await.current_user;
    let result = state
        .ticket_service
        .update_ticket("TIC-0000", TicketUpdate::default(), &user)
        .await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_save_without_selection_is_rejected() {
    let state = setup_test_state().await;
    let result = state.save_active_ticket(TicketUpdate::default()).await;
    assert!(matches!(result, Err(DomainError::ValidationError(_))));
}

#[tokio::test]
async fn test_save_targets_deep_linked_ticket() {
    let state = setup_test_state().await;
    state.open_deep_link("?ticketId=TIC-1025").await.unwrap();
    assert_eq!(state.snapshot().await.selection, TicketSelection::None);

    let saved = state
        .save_active_ticket(TicketUpdate {
            status: Some(TicketStatus::Closed),
            ..Default::default()
        })
        .await
        .expect("Deep-linked ticket should be saved");
    assert_eq!(saved.id, "TIC-1025");
    assert_eq!(saved.status, TicketStatus::Closed);

    // An explicit selection wins over the deep link
    state.select_ticket("TIC-1024").await;
    let saved = state
        .save_active_ticket(TicketUpdate {
            priority: Some(Priority::Low),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(saved.id, "TIC-1024");
}

#[tokio::test]
async fn test_rpa_snippet_must_be_json() {
    let state = setup_test_state().await;
    let bad = TicketDraft {
        description_rpa_dsl: Some("{ not json".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        state.create_ticket(bad).await,
        Err(DomainError::ValidationError(_))
    ));

    let good = TicketDraft {
        description_rpa_dsl: Some(r#"{"steps":[{"action":"click"}]}"#.to_string()),
        ..Default::default()
    };
    assert!(state.create_ticket(good).await.is_ok());
}

#[tokio::test]
async fn test_timeline_append_bumps_updated_at() {
    let state = setup_test_state().await;
    let user = state.snapshot().await.current_user;

    let ticket = state
        .ticket_service
        .append_timeline_event(
            "TIC-1025",
            EventSender::User(user.clone()),
            "Shipped in 4.2",
            TicketEventType::PublicReply,
            vec![],
        )
        .await
        .unwrap();

    let last = ticket.timeline.last().expect("timeline entry");
    assert_eq!(last.content, "Shipped in 4.2");
    assert!(last.is_customer_visible());
    assert_eq!(ticket.updated_at, last.created_at);

    let system = state
        .ticket_service
        .append_timeline_event(
            "TIC-1025",
            EventSender::System,
            "",
            TicketEventType::SystemLog,
            vec![Attachment {
                name: "flow.json".to_string(),
                kind: AttachmentKind::RpaDsl,
                url: None,
                content: Some("{}".to_string()),
            }],
        )
        .await
        .unwrap();
    assert_eq!(system.timeline.len(), ticket.timeline.len() + 1);
    assert_eq!(system.timeline.last().map(|e| e.sender.id()), Some("SYSTEM"));
}

#[tokio::test]
async fn test_empty_timeline_entry_is_rejected() {
    let state = setup_test_state().await;
    let result = state
        .ticket_service
        .append_timeline_event("TIC-1025", EventSender::System, "  ", TicketEventType::InternalNote, vec![])
        .await;
    assert!(matches!(result, Err(DomainError::ValidationError(_))));
}

#[tokio::test]
async fn test_deep_link_found_and_not_found() {
    let state = setup_test_state().await;

    match state.open_deep_link("?ticketId=TIC-1026").await.unwrap() {
        Some(TicketLookup::Found(ticket)) => assert_eq!(ticket.id, "TIC-1026"),
        other => panic!("Unexpected lookup {:?}", other),
    }
    assert_eq!(
        state.snapshot().await.standalone_ticket_id.as_deref(),
        Some("TIC-1026")
    );

    assert_eq!(
        state.open_deep_link("?ticketId=TIC%2D9999").await.unwrap(),
        Some(TicketLookup::NotFound("TIC-9999".to_string()))
    );
    assert_eq!(state.open_deep_link("?view=all").await.unwrap(), None);
}

#[tokio::test]
async fn test_grid_for_active_view() {
    let state = setup_test_state().await;

    state.set_view(ActiveView::Chat).await;
    assert!(state.visible_tickets().await.unwrap().is_empty());

    state.set_view(ActiveView::MyTickets).await;
    let mine = state.visible_tickets().await.unwrap();
    assert_eq!(ids(&mine), vec!["TIC-1024", "TIC-1025", "TIC-1027"]);

    state.set_view(ActiveView::AllTickets).await;
    let grid = state
        .ticket_grid(&Default::default())
        .await
        .unwrap();
    // The only unassigned seed ticket leads
    assert_eq!(grid.first().map(|t| t.id.as_str()), Some("TIC-1026"));
    assert_eq!(grid.len(), 5);
}
