//! Public types returned by verifier operations.

use std::collections::VecDeque;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How many expected nameservers must be observed before a zone counts as propagated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// A single matching nameserver is enough.
    #[default]
    Any,
    /// More than half of the expected nameservers must be observed.
    Majority,
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::Majority => write!(f, "majority"),
        }
    }
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "majority" => Ok(Self::Majority),
            _ => Err(format!("Unknown match policy: {s} (expected 'any' or 'majority')")),
        }
    }
}

/// Transport used for a classic DNS query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Transport {
    /// DNS over TCP.
    Tcp,
    /// DNS over UDP.
    Udp,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp => write!(f, "TCP"),
            Self::Udp => write!(f, "UDP"),
        }
    }
}

/// Where an NS answer came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LookupSource {
    /// DNS-over-HTTPS, uncached.
    DnsOverHttps,
    /// The parent zone's own nameservers, queried without recursion.
    Authoritative {
        /// Parent zone that was asked.
        parent: String,
    },
    /// A public recursive resolver.
    PublicResolver {
        /// Resolver address.
        server: IpAddr,
    },
}

impl LookupSource {
    /// Whether answers from this source bypass resolver caches.
    #[must_use]
    pub fn is_uncached(&self) -> bool {
        !matches!(self, Self::PublicResolver { .. })
    }
}

impl fmt::Display for LookupSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DnsOverHttps => write!(f, "DNS-over-HTTPS"),
            Self::Authoritative { parent } => write!(f, "authoritative servers of {parent}"),
            Self::PublicResolver { server } => write!(f, "public resolver {server}"),
        }
    }
}

/// NS records returned by a single query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NsAnswer {
    /// Nameserver host names, trailing dot trimmed.
    pub nameservers: Vec<String>,
    /// TTL of the first NS record (0 when unknown).
    pub ttl: u32,
}

/// Nameservers observed for a domain and the source that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedNameservers {
    /// Nameservers, normalized and sorted.
    pub nameservers: Vec<String>,
    /// Cache TTL to expect. Zero for uncached sources.
    pub ttl: Duration,
    /// Source of the answer.
    pub source: LookupSource,
}

/// Outcome of one propagation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationReport {
    /// Domain that was checked.
    pub domain: String,
    /// Whether the observed and expected sets satisfy the match policy.
    pub propagated: bool,
    /// Observed nameservers, normalized and sorted.
    pub observed: Vec<String>,
    /// Observed nameservers that are also expected.
    pub matched: Vec<String>,
    /// Resolver cache TTL of the answer. Zero when the answer came from an uncached path.
    pub ttl: Duration,
    /// Answer source, when any query succeeded.
    pub source: Option<LookupSource>,
    /// Human-readable trace of the check.
    pub log: Vec<String>,
}

/// Default number of lines a [`DebugLog`] keeps.
pub const DEFAULT_DEBUG_LOG_CAP: usize = 500;

/// Bounded, ordered log of propagation trace lines.
///
/// Oldest lines are evicted first once the cap is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugLog {
    lines: VecDeque<String>,
    cap: usize,
}

impl Default for DebugLog {
    fn default() -> Self {
        Self::with_cap(DEFAULT_DEBUG_LOG_CAP)
    }
}

impl DebugLog {
    /// Create an empty log holding at most `cap` lines (at least one).
    #[must_use]
    pub fn with_cap(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            lines: VecDeque::with_capacity(cap.min(DEFAULT_DEBUG_LOG_CAP)),
            cap,
        }
    }

    /// Append a line, evicting the oldest when full.
    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == self.cap {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    /// Maximum number of retained lines.
    #[must_use]
    pub fn cap(&self) -> usize {
        self.cap
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &String> + ExactSizeIterator {
        self.lines.iter()
    }
}

impl<S: Into<String>> Extend<S> for DebugLog {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for line in iter {
            self.push(line);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn match_policy_parse_and_display() {
        assert_eq!("any".parse::<MatchPolicy>().unwrap(), MatchPolicy::Any);
        assert_eq!(
            "Majority".parse::<MatchPolicy>().unwrap(),
            MatchPolicy::Majority
        );
        assert!("all".parse::<MatchPolicy>().is_err());
        assert_eq!(MatchPolicy::Majority.to_string(), "majority");
        assert_eq!(MatchPolicy::default(), MatchPolicy::Any);
    }

    #[test]
    fn match_policy_serde_lowercase() {
        let json = serde_json::to_string(&MatchPolicy::Majority).unwrap();
        assert_eq!(json, "\"majority\"");
        let back: MatchPolicy = serde_json::from_str("\"any\"").unwrap();
        assert_eq!(back, MatchPolicy::Any);
    }

    #[test]
    fn debug_log_never_exceeds_cap() {
        let mut log = DebugLog::with_cap(3);
        for i in 0..10 {
            log.push(format!("line {i}"));
            assert!(log.len() <= 3);
        }
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn debug_log_evicts_oldest_first() {
        let mut log = DebugLog::with_cap(3);
        log.extend(["a", "b", "c", "d", "e"]);
        let lines: Vec<&str> = log.iter().map(String::as_str).collect();
        assert_eq!(lines, vec!["c", "d", "e"]);
    }

    #[test]
    fn debug_log_default_cap() {
        let mut log = DebugLog::default();
        log.extend((0..600).map(|i| i.to_string()));
        assert_eq!(log.len(), DEFAULT_DEBUG_LOG_CAP);
        assert_eq!(log.iter().next().unwrap(), "100");
        assert_eq!(log.iter().last().unwrap(), "599");
    }

    #[test]
    fn debug_log_zero_cap_keeps_one_line() {
        let mut log = DebugLog::with_cap(0);
        log.extend(["x", "y"]);
        assert_eq!(log.cap(), 1);
        assert_eq!(log.iter().next().unwrap(), "y");
    }

    #[test]
    fn lookup_source_caching() {
        assert!(LookupSource::DnsOverHttps.is_uncached());
        assert!(
            LookupSource::Authoritative {
                parent: "example.com".to_string()
            }
            .is_uncached()
        );
        assert!(
            !LookupSource::PublicResolver {
                server: "8.8.8.8".parse().unwrap()
            }
            .is_uncached()
        );
    }
}
