/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use async_channel::{Receiver, Sender, TryRecvError};
use tracing::warn;

use crate::message::Message;

/// Unbounded FIFO queue of messages owned by one registered actor.
///
/// Any task may push; only the owning actor receives. Once closed, pushes are refused
/// and a blocked receiver returns `None`. Clones share the same queue.
#[derive(Debug, Clone)]
pub(crate) struct Mailbox {
    sender: Sender<Message>,
    receiver: Receiver<Message>,
    high_water_mark: usize,
}

impl Mailbox {
    /// Creates an empty mailbox that logs a warning each time its backlog grows past
    /// `high_water_mark`.
    pub(crate) fn new(high_water_mark: usize) -> Self {
        let (sender, receiver) = async_channel::unbounded();
        Self {
            sender,
            receiver,
            high_water_mark,
        }
    }

    /// Appends `message`. Hands it back if the mailbox is already closed.
    pub(crate) fn push(&self, message: Message) -> Result<(), Message> {
        self.sender.try_send(message).map_err(|e| e.into_inner())?;
        if self.sender.len() == self.high_water_mark.saturating_add(1) {
            warn!(
                backlog = self.sender.len(),
                high_water_mark = self.high_water_mark,
                "mailbox backlog passed its high-water mark"
            );
        }
        Ok(())
    }

    /// Waits for the next message. Returns `None` once the mailbox is closed.
    ///
    /// Cancel-safe: a message is only taken off the channel by a call that returns it.
    pub(crate) async fn recv(&self) -> Option<Message> {
        if self.receiver.is_closed() {
            return None;
        }
        self.receiver.recv().await.ok()
    }

    /// Closes the mailbox and releases a blocked receiver.
    pub(crate) fn close(&self) {
        self.sender.close();
    }

    /// Removes and returns everything still queued.
    pub(crate) fn drain(&self) -> Vec<Message> {
        let mut drained = Vec::with_capacity(self.receiver.len());
        loop {
            match self.receiver.try_recv() {
                Ok(message) => drained.push(message),
                Err(TryRecvError::Empty | TryRecvError::Closed) => return drained,
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.receiver.len()
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.receiver.is_closed()
    }
}
