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

//! Type aliases and supporting structures shared across the runtime.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::AtomicBool;

use acton_ern::Ern;

use crate::actor::{ManagedActor, Started};
use crate::message::{Message, MessageKey};

/// Identity of a registered actor.
pub type ActorId = Ern;

/// A pinned, boxed, `Send` future with no output: what handlers and lifecycle hooks
/// return.
pub type FutureBox = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Crate-internal: type-erased message handler.
///
/// The handler receives the running actor and the dequeued message; the typed wrapper
/// built by `on_event`/`on_broadcast` downcasts the payload before calling user code.
/// Returning `Err` hands the message back when the payload did not match.
pub(crate) type ErasedHandler<Model> = dyn for<'a> Fn(&'a mut ManagedActor<Started, Model>, Message) -> Result<FutureBox, Message>
    + Send
    + Sync
    + 'static;

/// Crate-internal: handler table keyed by message type.
///
/// Filled while the actor is `Idle` and read-only once it runs, so a plain `HashMap`
/// owned by the actor's task is enough.
pub(crate) type ReactorMap<Model> = HashMap<MessageKey, ReactorItem<Model>>;

/// Crate-internal: a handler registered for one message type, tagged with the kind of
/// message it accepts.
pub(crate) enum ReactorItem<Model: Default + Send + Debug + 'static> {
    /// Handles an event; expected to complete it.
    Event(Box<ErasedHandler<Model>>),
    /// Handles a broadcast.
    Broadcast(Box<ErasedHandler<Model>>),
}

impl<Model: Default + Send + Debug + 'static> ReactorItem<Model> {
    pub(crate) fn handler(&self) -> &ErasedHandler<Model> {
        match self {
            Self::Event(handler) | Self::Broadcast(handler) => handler.as_ref(),
        }
    }

    pub(crate) const fn is_event(&self) -> bool {
        matches!(self, Self::Event(_))
    }
}

/// Crate-internal: the flag set when an actor has been asked to terminate.
pub(crate) type HaltSignal = AtomicBool;

/// Crate-internal: an asynchronous lifecycle hook.
/// Wrapped in `Option` so actors without hooks allocate nothing.
pub(crate) type AsyncLifecycleHandler<Model> =
    Option<Box<dyn Fn(&ManagedActor<Started, Model>) -> FutureBox + Send + Sync + 'static>>;
