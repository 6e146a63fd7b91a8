//! HTTP session: a blocking client plus the cookie jar it writes into.

use crate::errors::AppResult;
use reqwest::blocking::Client;
use reqwest::cookie::Jar;
use std::sync::Arc;
use std::time::Duration;

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(45);
pub const USER_AGENT: &str = "magnit-vms-cli/1.0";

/// Owned HTTP resource shared by reference between login, token extraction
/// and the API client.
///
/// `reqwest` does not expose a client's cookie store, so the session keeps
/// its own handle on the jar the client was built with.
pub struct Session {
    client: Client,
    cookie_jar: Option<Arc<Jar>>,
}

impl Session {
    /// Build a client with a fresh cookie jar and the default timeout.
    pub fn new() -> AppResult<Self> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(HTTP_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            cookie_jar: Some(jar),
        })
    }

    /// Assemble a session from parts. A `None` jar yields a session whose
    /// token lookups fail with `CookieJarMissing`.
    pub fn from_parts(client: Client, cookie_jar: Option<Arc<Jar>>) -> Self {
        Self { client, cookie_jar }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn cookie_jar(&self) -> Option<&Jar> {
        self.cookie_jar.as_deref()
    }
}
