// SPDX-License-Identifier: MPL-2.0

//! Event loop driving a sequencer
//!
//! Tasks returned by [`Sequencer::update`] are spawned on tokio; each
//! result comes back through one channel and is dispatched into the
//! sequencer on the caller's task, so the sequencer itself is only ever
//! touched from one place.

use crate::app::{Message, Sequencer, Task};
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub struct EventLoop {
    sender: mpsc::UnboundedSender<Message>,
    receiver: mpsc::UnboundedReceiver<Message>,
    /// Spawned futures whose message has not been received yet
    outstanding: usize,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver,
            outstanding: 0,
        }
    }

    /// Run every future of `task` in the background
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(&mut self, task: Task<Message>) {
        for future in task.into_futures() {
            self.outstanding += 1;
            let sender = self.sender.clone();
            tokio::spawn(async move {
                let message = future.await;
                if sender.send(message).is_err() {
                    warn!("Event loop gone, dropping completion");
                }
            });
        }
    }

    /// Apply `message` and spawn whatever it started
    pub fn dispatch(&mut self, sequencer: &mut Sequencer<'_>, message: Message) {
        let task = sequencer.update(message);
        self.spawn(task);
    }

    /// Number of completions still to come
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Wait for the next completion, `None` when nothing is outstanding
    pub async fn next(&mut self) -> Option<Message> {
        if self.outstanding == 0 {
            return None;
        }
        let message = self.receiver.recv().await?;
        self.outstanding -= 1;
        Some(message)
    }

    /// Dispatch completions until no work is left
    ///
    /// Completions can start more work (a successful upload may reopen the
    /// device), which is waited for as well.
    pub async fn settle(&mut self, sequencer: &mut Sequencer<'_>) {
        while let Some(message) = self.next().await {
            debug!(?message, "Completion");
            self.dispatch(sequencer, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_next_is_none_when_idle() {
        let mut events = EventLoop::new();
        assert_eq!(events.outstanding(), 0);
        assert!(events.next().await.is_none());
    }

    #[tokio::test]
    async fn test_spawned_futures_come_back() {
        let mut events = EventLoop::new();
        events.spawn(Task::batch([
            Task::perform(async {}, |_| Message::Submit),
            Task::perform(async {}, |_| Message::Retry),
        ]));
        assert_eq!(events.outstanding(), 2);

        let mut received = 0;
        while events.next().await.is_some() {
            received += 1;
        }
        assert_eq!(received, 2);
        assert_eq!(events.outstanding(), 0);
    }
}
