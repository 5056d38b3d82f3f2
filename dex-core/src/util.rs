use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

pub const NET_TIMEOUT: Duration = Duration::from_secs(10);

pub fn default_ureq_agent_builder(
    timeout: Duration,
    proxy_url: Option<&str>,
) -> ureq::config::ConfigBuilder<ureq::typestate::AgentScope> {
    let mut agent = ureq::Agent::config_builder().timeout_global(Some(timeout));

    if let Some(proxy_url) = proxy_url {
        let proxy = ureq::Proxy::new(proxy_url).ok();
        if proxy.is_none() {
            log::warn!("ignoring invalid proxy URL: {proxy_url}");
        }
        agent = agent.proxy(proxy);
    }

    agent
}

/// Token identifying one mount of a view. Background results carry the token
/// they were started with and are dropped unless it still matches.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct MountId(u64);

impl MountId {
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        MountId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for MountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mount#{}", self.0)
    }
}
