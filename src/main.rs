use devpilot_console::application::services::TicketLookup;
use devpilot_console::application::ActiveView;
use devpilot_console::bootstrap;
use devpilot_console::config::Config;
use devpilot_console::domain::entities::SessionStatus;
use devpilot_console::domain::services::{unread_total, GridFilterCriteria};
use devpilot_console::infrastructure::observability;
use devpilot_console::shared::i18n::{translate, Language};

fn label(language: Language, prefix: &str, value: &str) -> String {
    let key = format!("{}_{}", prefix, value);
    translate(language, &key).to_string()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;
    let lang = config.language;

    // Initialize tracing
    let _guard = observability::init(&config)?;
    tracing::info!("Configuration loaded");

    // Build application state
    let state = bootstrap::build_app_state(&config).await?;

    // Standalone ticket view from a deep link
    if let Some(query) = &config.console_query {
        match state.open_deep_link(query).await? {
            Some(TicketLookup::Found(ticket)) => {
                tracing::info!(
                    "{}: {} [{}] {}",
                    ticket.id,
                    ticket.subject,
                    label(lang, "ticket_status", ticket.status.as_str()),
                    ticket.customer.name
                );
                return Ok(());
            }
            Some(TicketLookup::NotFound(id)) => {
                tracing::warn!("{}: {}", translate(lang, "ticket_not_found"), id);
                return Ok(());
            }
            None => tracing::debug!("Query {:?} carries no ticket id", query),
        }
    }

    for status in SessionStatus::all() {
        let tab = state.sessions(*status, "").await?;
        tracing::info!(
            "{}: {} sessions ({} unread)",
            label(lang, "status", status.as_str()),
            tab.len(),
            unread_total(&tab, *status)
        );
    }

    let unassigned = translate(lang, "unassigned").to_string();
    for view in [ActiveView::MyTickets, ActiveView::AllTickets] {
        state.set_view(view).await;
        let grid = state.ticket_grid(&GridFilterCriteria::default()).await?;
        tracing::info!("{:?}: {} tickets", view, grid.len());
        for ticket in grid {
            let assignee = ticket
                .assignee
                .as_ref()
                .map(|u| u.name.clone())
                .unwrap_or_else(|| unassigned.clone());
            tracing::info!(
                "  {} {} [{} / {}] {}",
                ticket.id,
                ticket.subject,
                label(lang, "ticket_status", ticket.status.as_str()),
                label(lang, "priority", ticket.priority.as_str()),
                assignee
            );
        }
    }

    Ok(())
}
