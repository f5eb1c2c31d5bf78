use thiserror::Error;

/// Errors raised by the session protocol.
///
/// `Outcome` values are not errors: a login attempt that the gateway rejects
/// still completed its round trip and reports a semantic result. These
/// variants cover the cases where the round trip itself could not complete
/// or produced a page we do not recognize.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The caller supplied a category that is not in the static table.
    /// Surfaced before any network activity.
    #[error("unknown proxy category '{0}'")]
    UnknownCategory(String),

    /// Network or TLS failure while talking to the gateway.
    #[error("gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The session token marker was absent from the gateway page. Either the
    /// site layout changed or we were served an unexpected page.
    #[error("no session token found in the gateway page")]
    MissingToken,
}
