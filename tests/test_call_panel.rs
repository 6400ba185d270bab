mod helpers;
use helpers::*;

use devpilot_console::application::services::CallPanelController;
use devpilot_console::domain::entities::Customer;
use devpilot_console::domain::events::ConsoleEvent;
use devpilot_console::domain::ports::task_spawner::TaskSpawner;
use devpilot_console::domain::ports::time_service::TimeService;
use devpilot_console::domain::services::CallStage;
use devpilot_console::infrastructure::runtime::tokio::{TokioTaskSpawner, TokioTimeService};
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::StreamExt;

fn controller(context: Option<Customer>) -> CallPanelController {
    CallPanelController::open(
        context,
        Arc::new(TokioTimeService::new()) as Arc<dyn TimeService>,
        Arc::new(TokioTaskSpawner::new()) as Arc<dyn TaskSpawner>,
    )
}

fn john() -> Customer {
    Customer::new("cust-002", "John Doe").with_phone("+1 555-0123")
}

#[tokio::test(start_paused = true)]
async fn test_unlinked_call_links_customer_then_closes() {
    let panel = controller(None);

    assert!(panel.set_number("555-0123"));
    assert!(panel.start_call());
    assert_eq!(panel.stage(), CallStage::Calling);

    assert_eq!(panel.end_call(), Some(CallStage::PostCall));

    assert!(panel.link_customer(john()));
    // Confirmation is shown before the panel closes
    assert_eq!(panel.stage(), CallStage::PostCall);
    assert!(!panel.is_closed());

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(panel.stage(), CallStage::Idle);
    assert!(panel.is_closed());
    assert_eq!(
        panel.snapshot().associated_customer().map(|c| c.id.clone()),
        Some("cust-002".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_linked_call_closes_on_hangup() {
    let panel = controller(Some(john()));
    assert_eq!(panel.number(), "+15550123");

    assert_eq!(panel.toggle_call(), CallStage::Calling);
    assert!(panel.snapshot().linked_at_dial());
    assert_eq!(panel.toggle_call(), CallStage::Idle);
    assert!(panel.is_closed());
}

#[tokio::test(start_paused = true)]
async fn test_skip_closes_without_delay() {
    let panel = controller(None);
    panel.set_number("555");
    panel.start_call();
    panel.end_call();

    assert!(panel.skip());
    assert_eq!(panel.stage(), CallStage::Idle);
    assert!(panel.is_closed());
    assert!(panel.snapshot().associated_customer().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_empty_number_and_bad_input_are_ignored() {
    let panel = controller(None);
    assert!(!panel.start_call());
    assert_eq!(panel.stage(), CallStage::Idle);

    assert!(!panel.set_number("call me"));
    assert_eq!(panel.number(), "");
    assert!(panel.press_key('5'));
    assert!(!panel.press_key('x'));
    assert_eq!(panel.number(), "5");
}

#[tokio::test(start_paused = true)]
async fn test_closing_panel_cancels_pending_link_confirmation() {
    let state = setup_test_state().await;
    let mut events = state.event_bus.subscribe();

    let panel = CallPanelController::open(
        None,
        state.time.clone(),
        state.spawner.clone(),
    )
    .with_event_bus(state.event_bus.clone());
    panel.set_number("555-0123");
    panel.start_call();
    panel.end_call();
    panel.link_customer(john());
    drop(panel);

    tokio::time::sleep(Duration::from_secs(1)).await;

    let mut seen = Vec::new();
    while let Ok(Some(Ok(event))) =
        tokio::time::timeout(Duration::from_millis(10), events.next()).await
    {
        seen.push(event);
    }

    assert!(seen
        .iter()
        .any(|e| matches!(e, ConsoleEvent::CallCustomerLinked { customer_id, .. } if customer_id == "cust-002")));
    // No post_call -> idle transition after the panel was torn down
    assert!(!seen.iter().any(|e| matches!(
        e,
        ConsoleEvent::CallStageChanged {
            from: CallStage::PostCall,
            ..
        }
    )));
}

#[tokio::test(start_paused = true)]
async fn test_app_state_prefills_active_session_customer() {
    let state = setup_test_state().await;
    state.select_session("sess-001").await.unwrap();

    let panel = state.open_call_panel().await.unwrap();
    let snapshot = panel.snapshot();
    assert_eq!(
        snapshot.associated_customer().map(|c| c.id.as_str()),
        Some("cust-001")
    );
    assert_eq!(panel.number(), "+15550199");
    assert_eq!(snapshot.link_candidates().len(), 1);
}
