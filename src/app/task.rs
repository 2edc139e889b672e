// SPDX-License-Identifier: GPL-3.0-only

//! Deferred work returned by the sequencer
//!
//! The sequencer never awaits anything itself. Each update returns the
//! futures it wants run; the runtime drives them and feeds their output
//! back in as messages.

use futures::future::BoxFuture;
use std::future::Future;

/// A batch of futures that each resolve to a message
#[must_use = "tasks do nothing unless handed to the runtime"]
pub struct Task<T> {
    futures: Vec<BoxFuture<'static, T>>,
}

impl<T: Send + 'static> Task<T> {
    /// No work
    pub fn none() -> Self {
        Self {
            futures: Vec::new(),
        }
    }

    /// Run `future` and map its output to a message
    pub fn perform<A, F, M>(future: F, map: M) -> Self
    where
        F: Future<Output = A> + Send + 'static,
        M: FnOnce(A) -> T + Send + 'static,
    {
        Self {
            futures: vec![Box::pin(async move { map(future.await) })],
        }
    }

    /// Combine several tasks
    pub fn batch(tasks: impl IntoIterator<Item = Self>) -> Self {
        Self {
            futures: tasks.into_iter().flat_map(|t| t.futures).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.futures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.futures.is_empty()
    }

    pub fn into_futures(self) -> Vec<BoxFuture<'static, T>> {
        self.futures
    }
}

impl<T> std::fmt::Debug for Task<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("futures", &self.futures.len())
            .finish()
    }
}
