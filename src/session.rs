//! The session protocol: fetch a page, pull the hidden token out of it,
//! submit a form with that token, and read the gateway's mind from the
//! free-text HTML it sends back.

use crate::category::gateway_url;
use crate::error::SessionError;
use log::debug;
use std::fmt;
use std::time::Duration;

/// Hidden form field that carries the session token on every page view.
const TOKEN_MARKER: &str = "<input name=\"sessionid\" type=\"hidden\" value=\"";

/// The gateway issues tokens of exactly this length.
const TOKEN_LEN: usize = 16;

/// Semantic result of one gateway action. Never an error: each variant is a
/// successful round trip whose response matched (or failed to match) one of
/// the gateway's known phrasings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    IncorrectCredentials,
    AlreadyLoggedIn,
    SessionExpired,
    NotLoggedIn,
    NotConnected,
    Failed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::Success => "Success",
            Outcome::IncorrectCredentials => "Incorrect credentials",
            Outcome::AlreadyLoggedIn => "Already logged in",
            Outcome::SessionExpired => "Session expired",
            Outcome::NotLoggedIn => "Not logged in",
            Outcome::NotConnected => "Not connected",
            Outcome::Failed => "Failed",
        };
        write!(f, "{}", text)
    }
}

/// Transport seam between the session protocol and the network.
///
/// The real implementation is [`HttpGateway`]; tests substitute canned page
/// and response bodies without touching the network.
pub trait Gateway {
    /// GET the gateway page and return its body as text.
    fn read_page(&self) -> Result<String, SessionError>;

    /// POST a URL-encoded form to the gateway and return the response body.
    fn submit_form(&self, form: &[(&str, &str)]) -> Result<String, SessionError>;
}

/// Blocking HTTPS transport bound to one gateway URL.
pub struct HttpGateway {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpGateway {
    /// Builds a client for the given gateway URL. `skip_tls_verify` disables
    /// certificate validation entirely; only for gateways whose certificate
    /// chain the local store cannot verify, and discouraged even then.
    pub fn new(url: impl Into<String>, skip_tls_verify: bool) -> Result<Self, SessionError> {
        let client = reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(skip_tls_verify)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl Gateway for HttpGateway {
    fn read_page(&self) -> Result<String, SessionError> {
        debug!("GET {}", self.url);
        Ok(self.client.get(&self.url).send()?.text()?)
    }

    fn submit_form(&self, form: &[(&str, &str)]) -> Result<String, SessionError> {
        debug!("POST {} ({} fields)", self.url, form.len());
        Ok(self.client.post(&self.url).form(form).send()?.text()?)
    }
}

/// One authentication session against one gateway host.
///
/// Holds the most recently fetched token. The token is short-lived: the
/// gateway mints a new one per page view and rejects stale ones, so `login`
/// and `logout` re-fetch the page before submitting. Not meant for use from
/// multiple threads; callers serialize operations on one instance.
pub struct ProxySession {
    username: String,
    password: String,
    gateway: Box<dyn Gateway>,
    sessionid: String,
}

impl fmt::Debug for ProxySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxySession")
            .field("username", &self.username)
            .field("sessionid", &self.sessionid)
            .finish_non_exhaustive()
    }
}

impl ProxySession {
    /// Opens a session over an existing transport, fetching the initial
    /// token from the gateway page.
    pub fn open(
        username: impl Into<String>,
        password: impl Into<String>,
        gateway: Box<dyn Gateway>,
    ) -> Result<Self, SessionError> {
        let mut session = Self {
            username: username.into(),
            password: password.into(),
            gateway,
            sessionid: String::new(),
        };
        session.refresh_token()?;
        Ok(session)
    }

    /// Resolves `category` to its gateway host and opens a session there.
    /// Fails with [`SessionError::UnknownCategory`] before any network
    /// activity when the category is not in the table.
    pub fn connect(
        username: impl Into<String>,
        password: impl Into<String>,
        category: &str,
        skip_tls_verify: bool,
    ) -> Result<Self, SessionError> {
        let url = gateway_url(category)?;
        let gateway = HttpGateway::new(url, skip_tls_verify)?;
        Self::open(username, password, Box::new(gateway))
    }

    /// Re-fetches the gateway page and replaces the stored token with the
    /// one embedded in it.
    fn refresh_token(&mut self) -> Result<(), SessionError> {
        let page = self.gateway.read_page()?;
        self.sessionid = extract_token(&page).ok_or(SessionError::MissingToken)?;
        debug!("fetched fresh session token");
        Ok(())
    }

    /// Submits the login form and classifies the gateway's answer.
    pub fn login(&mut self) -> Result<Outcome, SessionError> {
        self.refresh_token()?;
        let response = self.gateway.submit_form(&[
            ("sessionid", &self.sessionid),
            ("action", "Validate"),
            ("userid", &self.username),
            ("pass", &self.password),
        ])?;
        Ok(classify_login(&response, &self.username))
    }

    /// Submits the logout form and classifies the gateway's answer.
    pub fn logout(&mut self) -> Result<Outcome, SessionError> {
        self.refresh_token()?;
        let response = self.gateway.submit_form(&[
            ("sessionid", &self.sessionid),
            ("action", "logout"),
            ("logout", "Log out"),
        ])?;
        Ok(classify_logout(&response))
    }

    /// Asks the gateway to extend the current session. Deliberately reuses
    /// the stored token instead of fetching a fresh one: a fresh token would
    /// belong to a new page view, and the point here is to keep the existing
    /// session alive.
    pub fn refresh(&mut self) -> Result<Outcome, SessionError> {
        let response = self
            .gateway
            .submit_form(&[("sessionid", &self.sessionid), ("action", "Refresh")])?;
        Ok(classify_refresh(&response, &self.username))
    }
}

/// Pulls the session token out of a gateway page body. Takes the sixteen
/// characters after the marker; if the page ends sooner the token comes out
/// shorter, which matches what the gateway has always served.
pub fn extract_token(page: &str) -> Option<String> {
    let start = page.find(TOKEN_MARKER)? + TOKEN_MARKER.len();
    Some(page[start..].chars().take(TOKEN_LEN).collect())
}

/// Classifies a login response. First match wins; the gateway's messages are
/// not guaranteed mutually exclusive, so the order here is part of the
/// protocol.
pub fn classify_login(response: &str, username: &str) -> Outcome {
    // The apostrophe typo is the gateway's, verbatim.
    if response.contains("Either your userid and/or password does'not match.") {
        Outcome::IncorrectCredentials
    } else if response.contains(&format!("You are logged in successfully as {}", username)) {
        Outcome::Success
    } else if response.contains("already logged in") {
        Outcome::AlreadyLoggedIn
    } else if response.contains("Session Expired") {
        Outcome::SessionExpired
    } else {
        Outcome::NotConnected
    }
}

/// Classifies a logout response.
pub fn classify_logout(response: &str) -> Outcome {
    if response.contains("you have logged out from the IIT Delhi Proxy Service") {
        Outcome::Success
    } else if response.contains("Session Expired") {
        Outcome::SessionExpired
    } else {
        Outcome::Failed
    }
}

/// Classifies a keep-alive response. A generic success phrase without the
/// username-specific line means somebody's session is alive, just not ours.
pub fn classify_refresh(response: &str, username: &str) -> Outcome {
    if response.contains("You are logged in successfully") {
        if response.contains(&format!("You are logged in successfully as {}", username)) {
            Outcome::Success
        } else {
            Outcome::NotLoggedIn
        }
    } else if response.contains("Session Expired") {
        Outcome::SessionExpired
    } else {
        Outcome::NotConnected
    }
}
