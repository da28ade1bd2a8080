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

//! Message types as they travel through the broker.
//!
//! *   [`Message`]: the tagged union a mailbox holds, either an [`EventEnvelope`] or a
//!     [`BroadcastEnvelope`].
//! *   [`MessageKey`]: identity of a message type.
//! *   [`EventId`] / [`EventTicket`]: identity of one dispatched event.
//! *   [`Outcome`]: what an event's promise resolves to.
//! *   [`EventContext`] / [`BroadcastContext`]: what handlers receive.
//! *   [`BrokerError`]: failures of the mailbox primitive.

pub use broker_error::BrokerError;
pub use envelope::{BroadcastEnvelope, EventEnvelope, EventId, EventTicket, Message};
pub use message_context::{BroadcastContext, EventContext};
pub use message_key::MessageKey;
pub use outcome::Outcome;

/// Defines [`BrokerError`].
mod broker_error;
/// Defines [`Message`] and its envelopes.
mod envelope;
/// Defines the handler contexts.
mod message_context;
/// Defines [`MessageKey`].
mod message_key;
/// Defines [`Outcome`].
mod outcome;
