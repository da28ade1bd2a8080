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

use crate::common::Broker;
use crate::message::EventTicket;
use crate::traits::{Broadcast, Event};

/// What an event handler receives: the concrete event plus what it needs to answer it.
///
/// The context is handed over by value, so a handler can move it into the future it
/// returns and call [`EventContext::complete`] after awaiting other work.
#[derive(Debug)]
pub struct EventContext<E: Event> {
    pub(crate) message: E,
    pub(crate) ticket: EventTicket<E>,
    pub(crate) broker: Broker,
}

impl<E: Event> EventContext<E> {
    /// Returns a reference to the event payload.
    pub const fn message(&self) -> &E {
        &self.message
    }

    /// Returns the ticket identifying this event, for completing it elsewhere.
    pub const fn ticket(&self) -> EventTicket<E> {
        self.ticket
    }

    /// Returns the broker the event arrived through.
    pub const fn broker(&self) -> &Broker {
        &self.broker
    }

    /// Resolves the sender's promise with `result`.
    ///
    /// Returns `false` if the event was already resolved, which happens only if the
    /// handling actor unregistered in the meantime.
    pub fn complete(&self, result: E::Reply) -> bool {
        self.broker.complete(&self.ticket, result)
    }
}

/// What a broadcast handler receives.
#[derive(Debug, Clone)]
pub struct BroadcastContext<B: Broadcast> {
    pub(crate) message: B,
    pub(crate) broker: Broker,
}

impl<B: Broadcast> BroadcastContext<B> {
    /// Returns a reference to the broadcast payload.
    pub const fn message(&self) -> &B {
        &self.message
    }

    /// Returns the broker the broadcast arrived through.
    pub const fn broker(&self) -> &Broker {
        &self.broker
    }
}
