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

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use derive_new::new;
use static_assertions::assert_impl_all;

use crate::message::MessageKey;
use crate::traits::{CourierMessage, Event};

/// Broker-assigned identity of one dispatched event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub(crate) u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event#{}", self.0)
    }
}

/// A typed reference to a dispatched event, used to complete it.
///
/// The type parameter ties the ticket to the event's reply type, so
/// [`Broker::complete`](crate::common::Broker::complete) can only be called with a
/// result of the right type.
pub struct EventTicket<E> {
    id: EventId,
    _event: PhantomData<fn() -> E>,
}

impl<E: Event> EventTicket<E> {
    pub(crate) const fn new(id: EventId) -> Self {
        Self {
            id,
            _event: PhantomData,
        }
    }

    /// The id of the event this ticket refers to.
    #[inline]
    pub const fn id(&self) -> EventId {
        self.id
    }
}

impl<E> Clone for EventTicket<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EventTicket<E> {}

impl<E> fmt::Debug for EventTicket<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventTicket").field(&self.id).finish()
    }
}

/// An event as it sits in a mailbox.
#[derive(new, Debug)]
pub struct EventEnvelope {
    pub(crate) id: EventId,
    pub(crate) key: MessageKey,
    pub(crate) payload: Box<dyn CourierMessage>,
}

impl EventEnvelope {
    /// The payload as a trait object.
    ///
    /// The container itself also satisfies [`CourierMessage`], so calling `as_any` on the
    /// box directly would yield the box; go through this accessor instead.
    #[inline]
    pub fn payload(&self) -> &dyn CourierMessage {
        &*self.payload
    }
}

/// A broadcast as it sits in a mailbox. The payload is shared by every recipient.
#[derive(new, Debug, Clone)]
pub struct BroadcastEnvelope {
    pub(crate) key: MessageKey,
    pub(crate) payload: Arc<dyn CourierMessage>,
}

impl BroadcastEnvelope {
    /// The shared payload as a trait object.
    #[inline]
    pub fn payload(&self) -> &dyn CourierMessage {
        &*self.payload
    }
}

/// Everything a mailbox can hold.
#[derive(Debug)]
pub enum Message {
    /// A single-consumer request awaiting one reply.
    Event(EventEnvelope),
    /// A fan-out notification.
    Broadcast(BroadcastEnvelope),
}

impl Message {
    /// The key of the payload's concrete type.
    #[inline]
    pub const fn key(&self) -> MessageKey {
        match self {
            Self::Event(envelope) => envelope.key,
            Self::Broadcast(envelope) => envelope.key,
        }
    }

    /// The broker-assigned id, for events.
    #[inline]
    pub const fn event_id(&self) -> Option<EventId> {
        match self {
            Self::Event(envelope) => Some(envelope.id),
            Self::Broadcast(_) => None,
        }
    }

    /// Returns `true` for [`Message::Event`].
    #[inline]
    pub const fn is_event(&self) -> bool {
        matches!(self, Self::Event(_))
    }

    /// Downcasts the payload to `M`, if that is its concrete type.
    pub fn downcast_ref<M: 'static>(&self) -> Option<&M> {
        match self {
            Self::Event(envelope) => envelope.payload().as_any().downcast_ref::<M>(),
            Self::Broadcast(envelope) => envelope.payload().as_any().downcast_ref::<M>(),
        }
    }
}

assert_impl_all!(Message: Send, Sync);
assert_impl_all!(EventTicket<()>: Send, Sync, Copy);
