//! # Email Validation Service
//!
//! This module decides whether an email address is plausible enough to store.
//! Validation runs in two stages:
//!
//! 1. A syntax check against [`EMAIL_REGEX`]. Malformed addresses are rejected
//!    without touching the network.
//! 2. A DNS lookup for the domain's MX records, performed through an
//!    [`MxResolver`].
//!
//! ## Implementations
//!
//! - [`DnsMxResolver`] - Production resolver backed by `hickory-resolver`
//! - Tests provide their own [`MxResolver`] to avoid live DNS traffic

use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::{
    TokioAsyncResolver,
    config::{ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
    proto::op::ResponseCode,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::utils::{constant::*, validator::EMAIL_REGEX};

/// Errors that can occur during an MX lookup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MxLookupError {
    /// The domain exists but publishes no MX records
    #[error("no MX records")]
    NoRecords,
    /// The domain does not exist (NXDOMAIN)
    #[error("no such domain")]
    NoSuchDomain,
    /// Any other resolver failure, with the resolver's own description
    #[error("{0}")]
    Other(String),
}

/// Trait for MX record lookups
///
/// Abstracts the DNS client so that validation logic can be exercised
/// without network access.
#[async_trait]
pub trait MxResolver: Send + Sync {
    /// Returns the mail exchangers published for `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`MxLookupError::NoRecords`] when the domain has no MX records,
    /// [`MxLookupError::NoSuchDomain`] when it does not exist, and
    /// [`MxLookupError::Other`] for every other failure.
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<String>, MxLookupError>;
}

/// MX resolver backed by the system DNS configuration
pub struct DnsMxResolver {
    resolver: TokioAsyncResolver,
}

impl DnsMxResolver {
    /// Creates a resolver from the system configuration (`/etc/resolv.conf`
    /// on Unix), falling back to the library defaults if it cannot be read.
    pub fn new() -> Self {
        let resolver = match TokioAsyncResolver::tokio_from_system_conf() {
            Ok(resolver) => {
                info!("Initializing DNS resolver from system configuration");
                resolver
            }
            Err(e) => {
                warn!(error = %e, "Failed to read system DNS configuration, using defaults");
                TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
            }
        };

        Self { resolver }
    }
}

impl Default for DnsMxResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ResolveError> for MxLookupError {
    fn from(e: ResolveError) -> Self {
        match e.kind() {
            // failure rcodes (SERVFAIL, REFUSED, ...) also arrive as NoRecordsFound
            ResolveErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
                ResponseCode::NoError => MxLookupError::NoRecords,
                ResponseCode::NXDomain => MxLookupError::NoSuchDomain,
                _ => MxLookupError::Other(e.to_string()),
            },
            _ => MxLookupError::Other(e.to_string()),
        }
    }
}

#[async_trait]
impl MxResolver for DnsMxResolver {
    #[instrument(skip(self))]
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<String>, MxLookupError> {
        let lookup = self.resolver.mx_lookup(domain).await?;
        let exchanges = non_empty_exchanges(
            lookup
                .iter()
                .map(|mx| mx.exchange().to_string())
                .collect(),
        )?;

        debug!(?exchanges, "Resolved MX records");
        Ok(exchanges)
    }
}

/// An answer without a single exchange counts as "no MX records".
fn non_empty_exchanges(exchanges: Vec<String>) -> Result<Vec<String>, MxLookupError> {
    if exchanges.is_empty() {
        Err(MxLookupError::NoRecords)
    } else {
        Ok(exchanges)
    }
}

/// Outcome of an email check, returned verbatim by the validate-email endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCheck {
    pub valid: bool,
    pub message: String,
}

impl EmailCheck {
    fn valid() -> Self {
        Self {
            valid: true,
            message: MSG_VALID_EMAIL.to_string(),
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Validates email addresses by syntax and MX records.
#[derive(Clone)]
pub struct EmailChecker {
    resolver: Arc<dyn MxResolver>,
}

impl EmailChecker {
    pub fn new(resolver: Arc<dyn MxResolver>) -> Self {
        Self { resolver }
    }

    /// Checks `email`, performing one live MX query when the syntax is valid.
    ///
    /// Never fails: every problem is reported through [`EmailCheck::message`].
    #[instrument(skip(self))]
    pub async fn check(&self, email: &str) -> EmailCheck {
        if !EMAIL_REGEX.is_match(email) {
            debug!("Email rejected by format check");
            return EmailCheck::invalid(MSG_INVALID_FORMAT);
        }

        // the pattern guarantees exactly one '@'
        let Some((_, domain)) = email.split_once('@') else {
            return EmailCheck::invalid(MSG_INVALID_FORMAT);
        };

        match self.resolver.lookup_mx(domain).await {
            Ok(_) => EmailCheck::valid(),
            Err(MxLookupError::NoRecords) => {
                debug!(%domain, "Domain has no MX records");
                EmailCheck::invalid(MSG_NO_MX_RECORDS)
            }
            Err(MxLookupError::NoSuchDomain) => {
                debug!(%domain, "Domain does not exist");
                EmailCheck::invalid(MSG_NO_SUCH_DOMAIN)
            }
            Err(MxLookupError::Other(reason)) => {
                warn!(%domain, %reason, "MX lookup failed");
                EmailCheck::invalid(reason)
            }
        }
    }
}
