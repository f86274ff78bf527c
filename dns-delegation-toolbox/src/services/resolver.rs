//! Shared DNS resolver helpers used across service modules.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use hickory_resolver::{
    TokioResolver,
    config::{NameServerConfig, ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
    proto::xfer::Protocol,
};

use crate::error::{ToolboxError, ToolboxResult};
use crate::types::{NsAnswer, Transport};

/// Build a resolver that talks to exactly one server over one transport.
///
/// Caching is disabled so repeated checks observe fresh answers, and each query gets a
/// single attempt bounded by `timeout`. With `recursion` off the server is asked for
/// what it holds itself.
pub(crate) fn build_resolver_for_ns(
    ns_ip: IpAddr,
    transport: Transport,
    timeout: Duration,
    recursion: bool,
) -> TokioResolver {
    let protocol = match transport {
        Transport::Tcp => Protocol::Tcp,
        Transport::Udp => Protocol::Udp,
    };
    let mut config = ResolverConfig::new();
    config.add_name_server(NameServerConfig::new(SocketAddr::new(ns_ip, 53), protocol));

    let provider = TokioConnectionProvider::default();
    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = 1;
    opts.cache_size = 0;
    opts.recursion_desired = recursion;
    TokioResolver::builder_with_config(config, provider)
        .with_options(opts)
        .build()
}

/// NS lookup returning trimmed host names and the TTL of the first record.
///
/// An empty answer maps to [`ToolboxError::NoAnswer`].
pub(crate) async fn ns_lookup(resolver: &TokioResolver, domain: &str) -> ToolboxResult<NsAnswer> {
    match resolver.ns_lookup(domain).await {
        Ok(response) => {
            let nameservers: Vec<String> = response
                .iter()
                .map(|ns| ns.to_string().trim_end_matches('.').to_string())
                .collect();
            if nameservers.is_empty() {
                return Err(ToolboxError::NoAnswer(domain.to_string()));
            }
            let ttl = response
                .as_lookup()
                .record_iter()
                .next()
                .map_or(0, hickory_resolver::proto::rr::Record::ttl);
            Ok(NsAnswer { nameservers, ttl })
        }
        Err(e) if e.is_no_records_found() => Err(ToolboxError::NoAnswer(domain.to_string())),
        Err(e) => Err(ToolboxError::NetworkError(e.to_string())),
    }
}

/// First address a host name resolves to.
pub(crate) async fn first_ip(resolver: &TokioResolver, host: &str) -> ToolboxResult<IpAddr> {
    resolver
        .lookup_ip(host)
        .await
        .map_err(|e| ToolboxError::NetworkError(format!("Failed to resolve {host}: {e}")))?
        .iter()
        .next()
        .ok_or_else(|| ToolboxError::NoAnswer(host.to_string()))
}
