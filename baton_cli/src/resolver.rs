//! Resolve a user-supplied token to a container or machine
//!
//! A token made only of digits is an identifier; anything else is a display
//! name. Each resolution performs exactly one remote lookup.

use harmony_client_core::{Container, Error, HarmonyApi, Machine, ResourceKind, Result};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static NUMERIC_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]*$").expect("numeric token pattern is valid"));

/// How a token will be looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Matches `^[0-9]*$`, looked up by id. The empty token falls here too.
    Numeric,
    /// Anything else, looked up by name
    Symbolic,
}

/// Decide whether `token` is an identifier or a name
pub fn classify(token: &str) -> TokenKind {
    if NUMERIC_TOKEN.is_match(token) {
        TokenKind::Numeric
    } else {
        TokenKind::Symbolic
    }
}

/// Find a container by id or name
pub async fn resolve_container<A>(api: &A, token: &str) -> Result<Container>
where
    A: HarmonyApi + ?Sized,
{
    let kind = classify(token);
    debug!("Resolving container '{token}' as {kind:?}");

    let found = match kind {
        TokenKind::Numeric => api.container(token).await?,
        TokenKind::Symbolic => api.container_by_name(token).await?,
    };

    found.ok_or_else(|| Error::not_found(ResourceKind::Container, token))
}

/// Find a machine by id or name
pub async fn resolve_machine<A>(api: &A, token: &str) -> Result<Machine>
where
    A: HarmonyApi + ?Sized,
{
    let kind = classify(token);
    debug!("Resolving machine '{token}' as {kind:?}");

    let found = match kind {
        TokenKind::Numeric => api.machine(token).await?,
        TokenKind::Symbolic => api.machine_by_name(token).await?,
    };

    found.ok_or_else(|| Error::not_found(ResourceKind::Machine, token))
}
