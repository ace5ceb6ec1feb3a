use log::{debug, info, warn};
use reqwest::blocking::{Client, Response};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::RwLock;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{FlysasClientError, Result};
use crate::query::QuerySpec;
use crate::responses::{HistoryResult, SearchResult};

/// Client id the public web app authenticates with
const WEB_CLIENT_AUTH: &str = "Basic U0FTLVVJOg==";

/// Remote operations the terminal needs from the airline API.
///
/// `Err` always means the request itself failed; application-level problems
/// arrive as `errors` inside an `Ok` response.
pub trait FlightApi: Sync {
    fn login(&self, username: &str, password: &str) -> Result<bool>;
    fn logout(&self);
    fn is_logged_in(&self) -> bool;
    fn search(&self, query: &QuerySpec) -> Result<SearchResult>;
    fn history(&self, page: u32) -> Result<HistoryResult>;
}

/// Authenticated EuroBonus session
#[derive(Debug, Clone)]
struct Session {
    access_token: String,
    customer_session_id: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(rename = "customerSessionId", default)]
    customer_session_id: String,
}

/// Blocking HTTP client for the SAS REST API
pub struct SasRestClient {
    http: Client,
    base_url: String,
    pos: String,
    session: RwLock<Option<Session>>,
}

impl SasRestClient {
    /// Create a new REST client with the given configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        info!("Creating SAS REST client with config: {}", config);

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout()))
            .user_agent(concat!("flysas-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            pos: config.api.pos.clone(),
            session: RwLock::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn current_session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_session(&self, session: Option<Session>) {
        *self
            .session
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = session;
    }
}

impl FlightApi for SasRestClient {
    fn login(&self, username: &str, password: &str) -> Result<bool> {
        debug!("Requesting token for user {}", username);
        let response = self
            .http
            .post(self.url("/authorize/oauth/token"))
            .header(AUTHORIZATION, WEB_CLIENT_AUTH)
            .form(&[
                ("grant_type", "password"),
                ("username", username),
                ("password", password),
            ])
            .send()?;

        if !response.status().is_success() {
            warn!("Login rejected with status {}", response.status());
            self.set_session(None);
            return Ok(false);
        }

        let token: TokenResponse = decode(response)?;
        self.set_session(Some(Session {
            access_token: token.access_token,
            customer_session_id: token.customer_session_id,
        }));
        info!("Logged in as {}", username);
        Ok(true)
    }

    fn logout(&self) {
        self.set_session(None);
        debug!("Session cleared");
    }

    fn is_logged_in(&self) -> bool {
        self.current_session().is_some()
    }

    fn search(&self, query: &QuerySpec) -> Result<SearchResult> {
        debug!("Searching {}", query);

        let mut params = vec![
            ("from", query.from.clone()),
            ("to", query.to.clone()),
            ("outDate", query.out_date.format("%Y%m%d").to_string()),
            ("adt", "1".to_string()),
            ("bookingFlow", "REVENUE".to_string()),
            ("pos", self.pos.clone()),
            ("channel", "web".to_string()),
            ("displayType", "upsell".to_string()),
        ];
        if let Some(in_date) = query.in_date {
            params.push(("inDate", in_date.format("%Y%m%d").to_string()));
        }

        let mut request = self.http.get(self.url("/offers/flightproducts")).query(&params);
        if let Some(session) = self.current_session() {
            request = request.bearer_auth(session.access_token);
        }

        let result: SearchResult = decode(request.send()?.error_for_status()?)?;
        debug!(
            "Search {} returned {} outbound and {} inbound flights",
            query,
            result.outbound_flights.len(),
            result.inbound_flights.len()
        );
        Ok(result)
    }

    fn history(&self, page: u32) -> Result<HistoryResult> {
        let session = self.current_session().ok_or_else(|| {
            FlysasClientError::NotLoggedIn("history requires an active session".to_string())
        })?;

        debug!("Fetching history page {}", page);
        let response = self
            .http
            .get(self.url("/customer/euroBonus/getAccountInfo"))
            .query(&[
                ("pageNumber", page.to_string()),
                ("customerSessionId", session.customer_session_id),
            ])
            .bearer_auth(session.access_token)
            .send()?
            .error_for_status()?;
        decode(response)
    }
}

/// Read the whole body and decode it as JSON
fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text()?;
    debug!("Decoding {} byte response", body.len());
    Ok(serde_json::from_str(&body)?)
}
