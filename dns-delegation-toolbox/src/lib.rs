//! DNS verification utilities for the delegation workflow.
//!
//! Queries the public nameservers of a domain (DNS-over-HTTPS first, then the parent
//! zone's authoritative servers, then public resolvers) and decides whether a delegation
//! has propagated. Stateless and independent of any cloud provider.

mod error;
mod services;
mod types;

pub use error::{ToolboxError, ToolboxResult};
pub use services::{
    DEFAULT_DOH_ENDPOINT, LiveLookup, MatchOutcome, NameserverLookup, PropagationVerifier,
    VerifierOptions, evaluate_match, is_domain_char, normalize_nameserver, normalize_set,
    parent_domain, parse_doh_response, validate_domain,
};
pub use types::{
    DEFAULT_DEBUG_LOG_CAP, DebugLog, LookupSource, MatchPolicy, NsAnswer, ObservedNameservers,
    PropagationReport, Transport,
};
