//! The query primitives the verifier is built on.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;

use crate::error::{ToolboxError, ToolboxResult};
use crate::types::{NsAnswer, Transport};

use super::doh::doh_ns_lookup;
use super::resolver::{build_resolver_for_ns, first_ip, ns_lookup};

/// Raw NS query primitives.
///
/// [`LiveLookup`] goes to the network; tests substitute scripted answers.
#[async_trait]
pub trait NameserverLookup: Send + Sync {
    /// NS records via DNS-over-HTTPS.
    async fn doh(&self, domain: &str) -> ToolboxResult<Vec<String>>;

    /// NS records via a recursive resolver over the given transport.
    async fn resolver(
        &self,
        server: IpAddr,
        transport: Transport,
        domain: &str,
    ) -> ToolboxResult<NsAnswer>;

    /// NS records for `domain` asked directly of `parent`'s nameservers, without recursion.
    async fn authoritative(&self, parent: &str, domain: &str) -> ToolboxResult<Vec<String>>;
}

/// Network-backed [`NameserverLookup`].
pub struct LiveLookup {
    client: reqwest::Client,
    doh_endpoint: String,
    doh_timeout: Duration,
    bootstrap: IpAddr,
    query_timeout: Duration,
}

impl LiveLookup {
    /// `bootstrap` is the recursive resolver used to find the parent zone's nameservers.
    pub fn new(
        doh_endpoint: impl Into<String>,
        doh_timeout: Duration,
        bootstrap: IpAddr,
        query_timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(doh_timeout)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("DoH client setup failed, using defaults: {e}");
                reqwest::Client::new()
            });
        Self {
            client,
            doh_endpoint: doh_endpoint.into(),
            doh_timeout,
            bootstrap,
            query_timeout,
        }
    }

    async fn bounded<T>(
        &self,
        what: &str,
        fut: impl Future<Output = ToolboxResult<T>> + Send,
    ) -> ToolboxResult<T> {
        timeout(self.query_timeout, fut).await.map_err(|_| {
            ToolboxError::NetworkError(format!(
                "{what} timed out after {}s",
                self.query_timeout.as_secs()
            ))
        })?
    }
}

#[async_trait]
impl NameserverLookup for LiveLookup {
    async fn doh(&self, domain: &str) -> ToolboxResult<Vec<String>> {
        doh_ns_lookup(&self.client, &self.doh_endpoint, self.doh_timeout, domain).await
    }

    async fn resolver(
        &self,
        server: IpAddr,
        transport: Transport,
        domain: &str,
    ) -> ToolboxResult<NsAnswer> {
        let resolver = build_resolver_for_ns(server, transport, self.query_timeout, true);
        self.bounded(&format!("{transport} query to {server}"), ns_lookup(&resolver, domain))
            .await
    }

    async fn authoritative(&self, parent: &str, domain: &str) -> ToolboxResult<Vec<String>> {
        let bootstrap =
            build_resolver_for_ns(self.bootstrap, Transport::Udp, self.query_timeout, true);
        let parent_ns = self
            .bounded(&format!("NS query for {parent}"), ns_lookup(&bootstrap, parent))
            .await?;

        let mut last_err = ToolboxError::NoAnswer(domain.to_string());
        for host in &parent_ns.nameservers {
            let ip = match self.bounded(host, first_ip(&bootstrap, host)).await {
                Ok(ip) => ip,
                Err(e) => {
                    last_err = e;
                    continue;
                }
            };
            let direct = build_resolver_for_ns(ip, Transport::Tcp, self.query_timeout, false);
            match self
                .bounded(&format!("NS query to {host}"), ns_lookup(&direct, domain))
                .await
            {
                Ok(answer) => return Ok(answer.nameservers),
                Err(e) => {
                    log::debug!("authoritative query to {host} for {domain} failed: {e}");
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }
}
