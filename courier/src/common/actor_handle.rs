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

use std::hash::{Hash, Hasher};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{instrument, trace};

use crate::common::{ActorId, Broker, HaltSignal, Promise};
use crate::message::Outcome;
use crate::traits::{Broadcast, Event, Publisher};

/// A clonable handle for interacting with a running actor.
///
/// The handle identifies the actor, exposes the broker it is registered with, and
/// controls its lifecycle: [`terminate`](ActorHandle::terminate) asks it to stop and
/// [`stop`](ActorHandle::stop) also waits until it has.
///
/// Equality and hashing are based solely on the actor's unique identifier (`id`).
#[derive(Debug, Clone)]
pub struct ActorHandle {
    /// The unique identifier (`Ern`) for the actor this handle refers to.
    pub(crate) id: ActorId,
    /// The broker the actor is registered with.
    pub(crate) broker: Broker,
    /// Set once termination has been requested.
    pub(crate) halt_signal: Arc<HaltSignal>,
    /// Cancelled on termination; releases a blocked wait on the mailbox.
    pub(crate) cancellation_token: CancellationToken,
    /// Tracks the actor's main task.
    pub(crate) tracker: TaskTracker,
    /// How long `stop` waits for the task to finish.
    stop_timeout: Duration,
}

impl PartialEq for ActorHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ActorHandle {}

impl Hash for ActorHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl ActorHandle {
    pub(crate) fn new(
        id: ActorId,
        broker: Broker,
        cancellation_token: CancellationToken,
        stop_timeout: Duration,
    ) -> Self {
        Self {
            id,
            broker,
            halt_signal: Arc::new(HaltSignal::new(false)),
            cancellation_token,
            tracker: TaskTracker::new(),
            stop_timeout,
        }
    }

    /// Returns the actor's unique identifier.
    #[inline]
    pub const fn id(&self) -> &ActorId {
        &self.id
    }

    /// Returns the root name segment of the actor's identifier.
    #[inline]
    pub fn name(&self) -> &str {
        self.id.root.as_str()
    }

    /// Returns the broker the actor is registered with.
    #[inline]
    pub const fn broker(&self) -> &Broker {
        &self.broker
    }

    /// Asks the actor to stop.
    ///
    /// Sets the termination flag and cancels the actor's token, so an actor blocked
    /// waiting for mail wakes up and exits. A handler already running is allowed to
    /// finish. Returns immediately; use [`stop`](Self::stop) to wait.
    pub fn terminate(&self) {
        if !self.halt_signal.swap(true, Ordering::AcqRel) {
            trace!(actor = %self.id, "termination requested");
        }
        self.cancellation_token.cancel();
    }

    /// Returns `true` once termination has been requested.
    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.halt_signal.load(Ordering::Acquire)
    }

    /// Returns `true` once the actor's task has finished, including its `on_terminate`
    /// hook and unregistration.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.tracker.is_closed() && self.tracker.is_empty()
    }

    /// Terminates the actor and waits for its task to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor has not stopped within the configured actor
    /// shutdown timeout.
    #[instrument(skip(self), fields(actor = %self.id))]
    pub async fn stop(&self) -> anyhow::Result<()> {
        self.terminate();
        tokio::time::timeout(self.stop_timeout, self.tracker.wait())
            .await
            .map_err(|_| {
                anyhow!(
                    "actor {} did not stop within {:?}",
                    self.id,
                    self.stop_timeout
                )
            })?;
        trace!("Actor terminated successfully.");
        Ok(())
    }
}

#[async_trait]
impl Publisher for ActorHandle {
    async fn send_event<E: Event>(&self, event: E) -> Option<Arc<Promise<Outcome<E::Reply>>>> {
        self.broker.send_event(event).await
    }

    async fn send_broadcast<B: Broadcast>(&self, broadcast: B) -> usize {
        self.broker.send_broadcast(broadcast).await
    }
}
