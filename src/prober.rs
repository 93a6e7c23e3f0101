//! Single reachability probe
//!
//! A probe opens a TCP connection of the target's address family and drops it
//! as soon as it is established. The elapsed time is recorded whether the
//! attempt succeeds, is refused, or runs into the timeout.

use crate::{
    models::{ProbeOutcome, Target},
    types::AddressFamily,
};
use async_trait::async_trait;
use std::io;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::net::TcpSocket;

/// Performs one bounded reachability check.
///
/// Implementations never fail: every problem is folded into the returned
/// [`ProbeOutcome`].
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, target: &Target, timeout: Duration) -> ProbeOutcome;
}

/// Connect/close prober over TCP
#[derive(Debug, Clone)]
pub struct TcpProber {
    port: u16,
}

impl TcpProber {
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn connect(&self, target: &Target) -> io::Result<()> {
        let socket = match target.family {
            AddressFamily::Ipv4 => TcpSocket::new_v4()?,
            AddressFamily::Ipv6 => TcpSocket::new_v6()?,
        };
        let stream = socket
            .connect(SocketAddr::new(target.address, self.port))
            .await?;
        drop(stream);
        Ok(())
    }
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new(crate::defaults::DEFAULT_PORT)
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, target: &Target, timeout: Duration) -> ProbeOutcome {
        let started = Instant::now();
        let result = tokio::time::timeout(timeout, self.connect(target)).await;
        let elapsed = started.elapsed();

        match result {
            Ok(Ok(())) => ProbeOutcome::success(elapsed),
            Ok(Err(error)) => ProbeOutcome::failure(elapsed, error_detail(&error)),
            Err(_) => ProbeOutcome::failure(elapsed, timeout_detail(timeout)),
        }
    }
}

/// Human-readable reason for a failed connect.
///
/// When the I/O error wraps another error, the wrapped one carries the useful
/// message; only one layer is removed.
pub fn error_detail(error: &io::Error) -> String {
    match error.get_ref() {
        Some(inner) => inner.to_string(),
        None => error.to_string(),
    }
}

fn timeout_detail(timeout: Duration) -> String {
    format!("i/o timeout after {}s", timeout.as_secs_f64())
}
