use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::Client;
use tracing::error;

/// Shared by every outgoing call of a process. Only connecting is bounded; requests
/// themselves carry no timeout.
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .connect_timeout(Duration::from_secs(5))
        .build()
        .unwrap_or_else(|e| {
            error!(error = %e, "Error while building http client, falling back to defaults");
            Client::new()
        })
});

/// Strips the trailing slash so `join_url(base, "/health")` never yields `//`.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_normalises_slashes() {
        assert_eq!(
            join_url("http://127.0.0.1:5000/", "/health"),
            "http://127.0.0.1:5000/health"
        );
        assert_eq!(
            join_url("http://127.0.0.1:5000", "/health"),
            "http://127.0.0.1:5000/health"
        );
    }
}
