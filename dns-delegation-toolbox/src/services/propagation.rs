//! DNS propagation check module.
//!
//! Answers are taken from the first source that produces any, in this order:
//! DNS-over-HTTPS, the parent zone's authoritative servers, then public resolvers.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use crate::error::{ToolboxError, ToolboxResult};
use crate::types::{LookupSource, MatchPolicy, ObservedNameservers, PropagationReport, Transport};

use super::lookup::{LiveLookup, NameserverLookup};
use super::matching::{evaluate_match, normalize_set};
use super::parent_domain;

/// Default DNS-over-HTTPS JSON endpoint.
pub const DEFAULT_DOH_ENDPOINT: &str = "https://dns.google/resolve";
/// Per-query timeout for classic DNS.
const QUERY_TIMEOUT_SECS: u64 = 3;
/// Timeout for the DoH request.
const DOH_TIMEOUT_SECS: u64 = 10;
/// NS TTLs above this are flagged as long-lived cache entries.
const HIGH_TTL_SECS: u32 = 3600;
/// Resolver used to cross-check DoH answers.
const COMPARISON_RESOLVER: IpAddr = IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8));

const SEPARATOR: &str = "============================================";

/// Verifier configuration.
#[derive(Debug, Clone)]
pub struct VerifierOptions {
    /// DNS-over-HTTPS JSON endpoint.
    pub doh_endpoint: String,
    /// Public recursive resolvers, in preference order.
    pub public_resolvers: Vec<IpAddr>,
    /// Match policy applied to observed vs. expected nameservers.
    pub match_policy: MatchPolicy,
    /// Classic DNS query timeout.
    pub query_timeout: Duration,
    /// DoH request timeout.
    pub doh_timeout: Duration,
}

impl Default for VerifierOptions {
    fn default() -> Self {
        Self {
            doh_endpoint: DEFAULT_DOH_ENDPOINT.to_string(),
            public_resolvers: vec![
                IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
                IpAddr::V4(Ipv4Addr::new(8, 8, 4, 4)),
                IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)),
                IpAddr::V4(Ipv4Addr::new(1, 0, 0, 1)),
            ],
            match_policy: MatchPolicy::default(),
            query_timeout: Duration::from_secs(QUERY_TIMEOUT_SECS),
            doh_timeout: Duration::from_secs(DOH_TIMEOUT_SECS),
        }
    }
}

/// Checks whether public DNS returns a zone's expected nameservers.
#[derive(Clone)]
pub struct PropagationVerifier {
    options: VerifierOptions,
    lookup: Arc<dyn NameserverLookup>,
}

impl PropagationVerifier {
    /// Verifier backed by live network lookups.
    #[must_use]
    pub fn new(options: VerifierOptions) -> Self {
        let bootstrap = options
            .public_resolvers
            .first()
            .copied()
            .unwrap_or(COMPARISON_RESOLVER);
        let lookup = LiveLookup::new(
            options.doh_endpoint.clone(),
            options.doh_timeout,
            bootstrap,
            options.query_timeout,
        );
        Self::with_lookup(options, Arc::new(lookup))
    }

    /// Verifier backed by a custom lookup implementation.
    #[must_use]
    pub fn with_lookup(options: VerifierOptions, lookup: Arc<dyn NameserverLookup>) -> Self {
        Self { options, lookup }
    }

    #[must_use]
    pub fn options(&self) -> &VerifierOptions {
        &self.options
    }

    /// Compare the domain's live NS records with `expected`.
    ///
    /// Never fails: query errors and empty answers are reported as not propagated,
    /// with the reason in the log.
    pub async fn check_propagation(&self, domain: &str, expected: &[String]) -> PropagationReport {
        let domain = domain.trim().trim_end_matches('.').to_ascii_lowercase();
        let expected = normalize_set(expected);
        let mut log = vec![
            SEPARATOR.to_string(),
            format!("Checking DNS propagation for {domain}"),
            format!("Expected nameservers: {}", expected.join(", ")),
            format!("Match policy: {}", self.options.match_policy),
        ];

        let observed = match self.query_nameservers(&domain, &mut log).await {
            Ok(observed) => observed,
            Err(ToolboxError::NoAnswer(_)) => {
                log.push("No nameservers returned".to_string());
                return not_propagated(domain, log);
            }
            Err(e) => {
                log.push(format!("Query failed: {e}"));
                log.push("Will retry on the next check".to_string());
                return not_propagated(domain, log);
            }
        };

        log.push(format!(
            "Observed nameservers ({}): {}",
            observed.source,
            observed.nameservers.join(", ")
        ));

        let outcome = evaluate_match(&observed.nameservers, &expected, self.options.match_policy);
        for ns in &outcome.matched {
            log.push(format!("Match found: {ns} == {ns}"));
        }

        if outcome.matched.is_empty() {
            log.push("No matches found! DNS not propagated yet.".to_string());
            if !observed.ttl.is_zero() {
                log.push(format!(
                    "Resolvers may keep serving the cached answer for up to {}",
                    describe_ttl(observed.ttl)
                ));
            }
        } else if !outcome.propagated {
            log.push(format!(
                "{}/{} expected nameservers observed; policy '{}' not satisfied yet",
                outcome.matched.len(),
                expected.len(),
                self.options.match_policy
            ));
        } else {
            log.push(format!(
                "DNS propagated: {}/{} expected nameservers observed",
                outcome.matched.len(),
                expected.len()
            ));
        }

        PropagationReport {
            domain,
            propagated: outcome.propagated,
            observed: observed.nameservers,
            matched: outcome.matched,
            ttl: observed.ttl,
            source: Some(observed.source),
            log,
        }
    }

    /// Resolve the domain's NS set, appending a trace of every query to `log`.
    pub async fn query_nameservers(
        &self,
        domain: &str,
        log: &mut Vec<String>,
    ) -> ToolboxResult<ObservedNameservers> {
        log.push(format!("Starting DNS query for domain: {domain}"));

        // DoH bypasses local and ISP caches.
        log.push(format!("[PRIMARY] DNS-over-HTTPS via {}", self.options.doh_endpoint));
        match self.lookup.doh(domain).await {
            Ok(ns) if !ns.is_empty() => {
                let ns = normalize_set(&ns);
                log.push(format!("DoH returned {} nameservers:", ns.len()));
                push_numbered(log, &ns);
                self.compare_with_standard(domain, &ns, log).await;
                return Ok(ObservedNameservers {
                    nameservers: ns,
                    ttl: Duration::ZERO,
                    source: LookupSource::DnsOverHttps,
                });
            }
            Ok(_) => log.push("DoH returned no NS records".to_string()),
            Err(e) => log.push(format!("DoH failed: {e}")),
        }

        log.push("[FALLBACK] Standard DNS (results may be cached)".to_string());

        if let Some(parent) = parent_domain(domain) {
            log.push(format!("Asking authoritative servers of parent {parent}"));
            match self.lookup.authoritative(&parent, domain).await {
                Ok(ns) if !ns.is_empty() => {
                    let ns = normalize_set(&ns);
                    log.push(format!("Authoritative answer with {} nameservers", ns.len()));
                    push_numbered(log, &ns);
                    return Ok(ObservedNameservers {
                        nameservers: ns,
                        ttl: Duration::ZERO,
                        source: LookupSource::Authoritative { parent },
                    });
                }
                Ok(_) => log.push("No authoritative answer".to_string()),
                Err(e) => log.push(format!("Authoritative query failed: {e}")),
            }
        }

        self.query_public_resolvers(domain, log).await
    }

    async fn compare_with_standard(&self, domain: &str, doh: &[String], log: &mut Vec<String>) {
        log.push(format!(
            "[COMPARISON] Standard DNS via {COMPARISON_RESOLVER} (may be intercepted)"
        ));
        match self
            .lookup
            .resolver(COMPARISON_RESOLVER, Transport::Udp, domain)
            .await
        {
            Ok(answer) if !answer.nameservers.is_empty() => {
                let standard = normalize_set(&answer.nameservers);
                if standard == doh {
                    log.push("Standard DNS matches DoH (no interception detected)".to_string());
                } else {
                    log.push(
                        "Possible resolver interception: standard DNS differs from DoH"
                            .to_string(),
                    );
                    for (i, ns) in standard.iter().enumerate() {
                        log.push(format!("  {}. {ns} (cached)", i + 1));
                    }
                    log.push("Using DoH results".to_string());
                }
            }
            _ => log.push("Standard DNS comparison failed (not critical)".to_string()),
        }
    }

    async fn query_public_resolvers(
        &self,
        domain: &str,
        log: &mut Vec<String>,
    ) -> ToolboxResult<ObservedNameservers> {
        let queries = self.options.public_resolvers.iter().map(|&server| async move {
            let tcp = self.lookup.resolver(server, Transport::Tcp, domain).await;
            match tcp {
                Ok(answer) => (server, None, Ok(answer)),
                Err(e) => {
                    let udp = self.lookup.resolver(server, Transport::Udp, domain).await;
                    (server, Some(e), udp)
                }
            }
        });
        let results = join_all(queries).await;

        let mut first: Option<(IpAddr, Vec<String>)> = None;
        let mut answered: Vec<Vec<String>> = Vec::new();
        let mut max_ttl = 0u32;
        let mut last_err: Option<ToolboxError> = None;

        for (server, tcp_err, result) in results {
            log.push(format!("--- Querying {server} ---"));
            if let Some(e) = tcp_err {
                log.push(format!("TCP failed ({e}), tried UDP"));
            }
            match result {
                Ok(answer) if !answer.nameservers.is_empty() => {
                    max_ttl = max_ttl.max(answer.ttl);
                    log.push(format!("TTL: {}s", answer.ttl));
                    if answer.ttl > HIGH_TTL_SECS {
                        log.push(format!(
                            "HIGH TTL: {}s (~{}h), this is a cached response",
                            answer.ttl,
                            answer.ttl / 3600
                        ));
                    }
                    let ns = normalize_set(&answer.nameservers);
                    log.push(format!("Found {} NS records:", ns.len()));
                    push_numbered(log, &ns);
                    if first.is_none() {
                        first = Some((server, ns.clone()));
                    }
                    answered.push(ns);
                }
                Ok(_) | Err(ToolboxError::NoAnswer(_)) => log.push("No NS records found".to_string()),
                Err(e) => {
                    log.push(format!("Query failed: {e}"));
                    last_err = Some(e);
                }
            }
        }

        if answered.windows(2).any(|w| w[0] != w[1]) {
            log.push("DNS servers returning DIFFERENT results! Propagation in progress.".to_string());
        } else if !answered.is_empty() {
            log.push("All DNS servers agree on nameservers.".to_string());
        }

        match (first, last_err) {
            (Some((server, nameservers)), _) => Ok(ObservedNameservers {
                nameservers,
                ttl: Duration::from_secs(u64::from(max_ttl)),
                source: LookupSource::PublicResolver { server },
            }),
            (None, Some(e)) => Err(e),
            (None, None) => Err(ToolboxError::NoAnswer(domain.to_string())),
        }
    }
}

fn not_propagated(domain: String, log: Vec<String>) -> PropagationReport {
    PropagationReport {
        domain,
        propagated: false,
        observed: Vec::new(),
        matched: Vec::new(),
        ttl: Duration::ZERO,
        source: None,
        log,
    }
}

fn push_numbered(log: &mut Vec<String>, items: &[String]) {
    for (i, item) in items.iter().enumerate() {
        log.push(format!("  {}. {item}", i + 1));
    }
}

/// `3600s` → `1h 0m`, `90s` → `1m 30s`.
fn describe_ttl(ttl: Duration) -> String {
    let secs = ttl.as_secs();
    if secs >= 3600 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use super::*;
    use crate::types::NsAnswer;

    /// Scripted lookup: answers are swapped between calls to model propagation over time.
    #[derive(Default)]
    struct ScriptedLookup {
        doh: RwLock<Option<ToolboxResult<Vec<String>>>>,
        authoritative: RwLock<Option<ToolboxResult<Vec<String>>>>,
        resolvers: RwLock<HashMap<(IpAddr, Transport), ToolboxResult<NsAnswer>>>,
    }

    impl ScriptedLookup {
        async fn set_doh(&self, result: ToolboxResult<Vec<String>>) {
            *self.doh.write().await = Some(result);
        }

        async fn set_resolver(
            &self,
            server: &str,
            transport: Transport,
            result: ToolboxResult<NsAnswer>,
        ) {
            self.resolvers
                .write()
                .await
                .insert((server.parse().unwrap(), transport), result);
        }
    }

    #[async_trait]
    impl NameserverLookup for ScriptedLookup {
        async fn doh(&self, domain: &str) -> ToolboxResult<Vec<String>> {
            self.doh
                .read()
                .await
                .clone()
                .unwrap_or_else(|| Err(ToolboxError::NetworkError(format!("no DoH for {domain}"))))
        }

        async fn resolver(
            &self,
            server: IpAddr,
            transport: Transport,
            domain: &str,
        ) -> ToolboxResult<NsAnswer> {
            self.resolvers
                .read()
                .await
                .get(&(server, transport))
                .cloned()
                .unwrap_or_else(|| Err(ToolboxError::NoAnswer(domain.to_string())))
        }

        async fn authoritative(&self, _parent: &str, domain: &str) -> ToolboxResult<Vec<String>> {
            self.authoritative
                .read()
                .await
                .clone()
                .unwrap_or_else(|| Err(ToolboxError::NoAnswer(domain.to_string())))
        }
    }

    fn expected() -> Vec<String> {
        vec!["ns1.awsdns.com".to_string(), "ns2.awsdns.com".to_string()]
    }

    fn verifier(lookup: Arc<ScriptedLookup>, policy: MatchPolicy) -> PropagationVerifier {
        let options = VerifierOptions {
            match_policy: policy,
            ..VerifierOptions::default()
        };
        PropagationVerifier::with_lookup(options, lookup)
    }

    fn answer(ns: &[&str], ttl: u32) -> NsAnswer {
        NsAnswer {
            nameservers: ns.iter().map(ToString::to_string).collect(),
            ttl,
        }
    }

    #[tokio::test]
    async fn not_propagated_then_propagated() {
        let lookup = Arc::new(ScriptedLookup::default());
        let v = verifier(lookup.clone(), MatchPolicy::Any);

        lookup.set_doh(Ok(vec!["ns3.other.com".to_string()])).await;
        let first = v.check_propagation("example.com", &expected()).await;
        assert!(!first.propagated);
        assert_eq!(first.observed, vec!["ns3.other.com"]);
        assert!(first.log.iter().any(|l| l.contains("No matches found")));

        lookup.set_doh(Ok(vec!["NS1.AWSDNS.COM.".to_string()])).await;
        let second = v.check_propagation("example.com", &expected()).await;
        assert!(second.propagated);
        assert_eq!(second.matched, vec!["ns1.awsdns.com"]);
        assert_eq!(second.source, Some(LookupSource::DnsOverHttps));
        assert_eq!(second.ttl, Duration::ZERO);
        assert!(
            second
                .log
                .iter()
                .any(|l| l == "Match found: ns1.awsdns.com == ns1.awsdns.com")
        );
    }

    #[tokio::test]
    async fn empty_answer_is_no_answer_not_error() {
        let lookup = Arc::new(ScriptedLookup::default());
        lookup
            .set_doh(Err(ToolboxError::NoAnswer("example.com".to_string())))
            .await;
        let v = verifier(lookup, MatchPolicy::Any);

        let report = v.check_propagation("example.com", &expected()).await;
        assert!(!report.propagated);
        assert!(report.observed.is_empty());
        assert!(report.log.iter().any(|l| l == "No nameservers returned"));
    }

    #[tokio::test]
    async fn query_failure_degrades_to_not_propagated() {
        let lookup = Arc::new(ScriptedLookup::default());
        lookup
            .set_resolver(
                "8.8.8.8",
                Transport::Tcp,
                Err(ToolboxError::NetworkError("refused".to_string())),
            )
            .await;
        lookup
            .set_resolver(
                "8.8.8.8",
                Transport::Udp,
                Err(ToolboxError::NetworkError("timed out".to_string())),
            )
            .await;
        let v = verifier(lookup, MatchPolicy::Any);

        let report = v.check_propagation("example.com", &expected()).await;
        assert!(!report.propagated);
        assert!(report.log.iter().any(|l| l.starts_with("Query failed")));
    }

    #[tokio::test]
    async fn public_resolver_fallback_reports_max_ttl() {
        let lookup = Arc::new(ScriptedLookup::default());
        lookup
            .set_resolver("8.8.8.8", Transport::Tcp, Ok(answer(&["ns1.awsdns.com."], 300)))
            .await;
        lookup
            .set_resolver("1.1.1.1", Transport::Udp, Ok(answer(&["old.example.net"], 86_400)))
            .await;
        let v = verifier(lookup, MatchPolicy::Any);

        let report = v.check_propagation("example.com", &expected()).await;
        assert!(report.propagated);
        assert_eq!(report.observed, vec!["ns1.awsdns.com"]);
        assert_eq!(report.ttl, Duration::from_secs(86_400));
        assert_eq!(
            report.source,
            Some(LookupSource::PublicResolver {
                server: "8.8.8.8".parse().unwrap()
            })
        );
        assert!(report.log.iter().any(|l| l.starts_with("HIGH TTL")));
        assert!(report.log.iter().any(|l| l.contains("DIFFERENT results")));
    }

    #[tokio::test]
    async fn cached_negative_result_mentions_ttl() {
        let lookup = Arc::new(ScriptedLookup::default());
        lookup
            .set_resolver("8.8.4.4", Transport::Tcp, Ok(answer(&["ns3.other.com"], 7200)))
            .await;
        let v = verifier(lookup, MatchPolicy::Any);

        let report = v.check_propagation("example.com", &expected()).await;
        assert!(!report.propagated);
        assert_eq!(report.ttl, Duration::from_secs(7200));
        assert!(report.log.iter().any(|l| l.contains("2h 0m")));
    }

    #[tokio::test]
    async fn authoritative_answer_used_for_subdomains() {
        let lookup = Arc::new(ScriptedLookup::default());
        *lookup.authoritative.write().await = Some(Ok(vec!["ns2.awsdns.com".to_string()]));
        let v = verifier(lookup, MatchPolicy::Any);

        let report = v.check_propagation("dev.example.com", &expected()).await;
        assert!(report.propagated);
        assert_eq!(
            report.source,
            Some(LookupSource::Authoritative {
                parent: "example.com".to_string()
            })
        );
        assert_eq!(report.ttl, Duration::ZERO);
    }

    #[tokio::test]
    async fn interception_is_logged() {
        let lookup = Arc::new(ScriptedLookup::default());
        lookup.set_doh(Ok(vec!["ns1.awsdns.com".to_string()])).await;
        lookup
            .set_resolver("8.8.8.8", Transport::Udp, Ok(answer(&["stale.isp.net"], 600)))
            .await;
        let v = verifier(lookup, MatchPolicy::Any);

        let report = v.check_propagation("example.com", &expected()).await;
        assert!(report.propagated);
        assert!(report.log.iter().any(|l| l.contains("interception")));
    }

    #[tokio::test]
    async fn majority_policy_is_stricter() {
        let lookup = Arc::new(ScriptedLookup::default());
        lookup.set_doh(Ok(vec!["ns1.awsdns.com".to_string()])).await;
        let expected = vec![
            "ns1.awsdns.com".to_string(),
            "ns2.awsdns.com".to_string(),
            "ns3.awsdns.com".to_string(),
        ];

        let any = verifier(lookup.clone(), MatchPolicy::Any);
        assert!(any.check_propagation("example.com", &expected).await.propagated);

        let majority = verifier(lookup, MatchPolicy::Majority);
        let report = majority.check_propagation("example.com", &expected).await;
        assert!(!report.propagated);
        assert_eq!(report.matched, vec!["ns1.awsdns.com"]);
    }

    #[test]
    fn describe_ttl_formats() {
        assert_eq!(describe_ttl(Duration::from_secs(45)), "45s");
        assert_eq!(describe_ttl(Duration::from_secs(90)), "1m 30s");
        assert_eq!(describe_ttl(Duration::from_secs(5400)), "1h 30m");
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn live_check_example_com() {
        let v = PropagationVerifier::new(VerifierOptions::default());
        let report = v
            .check_propagation("example.com", &["a.iana-servers.net".to_string()])
            .await;
        assert!(report.propagated, "{:#?}", report.log);
    }
}
