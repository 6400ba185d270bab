/// Utility modules
pub mod deep_link;
pub mod dial_input;

use rand::Rng;

/// Generate a human-readable ticket number in the `TIC-<0..10000>` space.
///
/// Collisions are possible; callers check against existing tickets.
///
/// # Examples
///
/// ```
/// use devpilot_console::shared::utils::generate_ticket_id;
/// let id = generate_ticket_id();
/// assert!(id.starts_with("TIC-"));
/// ```
pub fn generate_ticket_id() -> String {
    format!("TIC-{}", rand::thread_rng().gen_range(0..10_000))
}
