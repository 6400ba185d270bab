/// Extract the `ticketId` parameter from a URL query string such as
/// `?ticketId=TIC-1024&lang=en`. Returns `None` when absent or empty.
pub fn ticket_id_from_query(query: &str) -> Option<String> {
    let query = query.trim().trim_start_matches('?');
    query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| *key == "ticketId")
        .and_then(|(_, value)| {
            let value = value.replace('+', " ");
            urlencoding::decode(&value).ok().map(|v| v.into_owned())
        })
        .filter(|id| !id.is_empty())
}

/// Query string that opens `ticket_id` in the standalone view
pub fn standalone_ticket_query(ticket_id: &str) -> String {
    format!("?ticketId={}", urlencoding::encode(ticket_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_id_from_query() {
        assert_eq!(
            ticket_id_from_query("?ticketId=TIC-1024"),
            Some("TIC-1024".to_string())
        );
        assert_eq!(
            ticket_id_from_query("lang=en&ticketId=TIC%2D7"),
            Some("TIC-7".to_string())
        );
    }

    #[test]
    fn test_missing_or_empty_ticket_id() {
        assert_eq!(ticket_id_from_query(""), None);
        assert_eq!(ticket_id_from_query("?lang=zh"), None);
        assert_eq!(ticket_id_from_query("?ticketId="), None);
        assert_eq!(ticket_id_from_query("?ticketId"), None);
    }

    #[test]
    fn test_standalone_query_is_parseable() {
        let query = standalone_ticket_query("TIC 9");
        assert_eq!(ticket_id_from_query(&query), Some("TIC 9".to_string()));
    }
}
