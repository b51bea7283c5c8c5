// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

pub(crate) mod dashboard;
pub(crate) mod domain;
pub(crate) mod project;

use std::future::Future;

use log::debug;
use tokio::select;
use tokio_util::sync::CancellationToken;

pub(crate) use dashboard::Dashboard;
pub(crate) use domain::DomainView;
pub(crate) use project::ProjectView;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ViewState<T> {
    Idle,
    Loading,
    Populated(T),
    Empty,
    NotFound,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> ViewState<T> {
    pub(crate) const fn populated(&self) -> Option<&T> {
        match *self {
            Self::Populated(ref value) => Some(value),
            Self::Idle | Self::Loading | Self::Empty | Self::NotFound => None,
        }
    }
}

/// Whether a finished query was applied to the view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Load {
    Applied,
    Discarded,
}

/// Tells a view that it is gone, so results arriving afterwards are dropped.
#[derive(Clone, Debug)]
pub(crate) struct UnmountHandle(CancellationToken);

impl UnmountHandle {
    pub(crate) fn unmount(&self) {
        self.0.cancel();
    }
}

#[derive(Debug, Default)]
struct Mount {
    token: CancellationToken,
}

impl Mount {
    fn handle(&self) -> UnmountHandle {
        UnmountHandle(self.token.clone())
    }

    /// Runs `query` unless the view is unmounted first.
    async fn settle<F: Future>(&self, query: F) -> Option<F::Output> {
        let output = select! {
            biased;
            () = self.token.cancelled() => None,
            output = query => Some(output),
        };
        if output.is_none() || self.token.is_cancelled() {
            debug!("Discarding query result for unmounted view");
            return None;
        }
        output
    }
}
