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
use std::sync::Arc;

use async_trait::async_trait;

use crate::common::Promise;
use crate::message::Outcome;
use crate::traits::{Broadcast, Event};

/// The send-only side of the broker.
///
/// Implemented by [`Broker`](crate::common::Broker) itself and by
/// [`ActorHandle`](crate::common::ActorHandle), so a worker that only publishes
/// (a clock, an input reader, a test driver) never needs a mailbox of its own.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Hands `event` to the next subscriber of its type in round-robin order.
    ///
    /// Returns `None` when nobody is subscribed to `E`; that is a normal
    /// "nobody interested" outcome, not an error.
    async fn send_event<E: Event>(&self, event: E) -> Option<Arc<Promise<Outcome<E::Reply>>>>;

    /// Delivers `broadcast` to every current subscriber of its type and returns how many
    /// mailboxes received it.
    async fn send_broadcast<B: Broadcast>(&self, broadcast: B) -> usize;
}
