// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

/// Simulated round-trip times for operations that stand in for network calls.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Latency {
    pub(crate) list_domains: Duration,
    pub(crate) get_domain: Duration,
    pub(crate) get_project: Duration,
    pub(crate) authenticate: Duration,
}

impl Latency {
    pub(crate) const fn instant() -> Self {
        Self {
            list_domains: Duration::ZERO,
            get_domain: Duration::ZERO,
            get_project: Duration::ZERO,
            authenticate: Duration::ZERO,
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            list_domains: Duration::from_millis(500),
            get_domain: Duration::from_millis(300),
            get_project: Duration::from_millis(300),
            authenticate: Duration::from_millis(1000),
        }
    }
}

pub(crate) async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
