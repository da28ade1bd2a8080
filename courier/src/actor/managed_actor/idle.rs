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

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::marker::PhantomData;
use std::mem;

use tokio::sync::oneshot;
use tracing::{error, instrument, trace};

use crate::actor::{ActorConfig, ManagedActor, Started};
use crate::common::{ActorHandle, ActorRuntime, FutureBox, ReactorItem};
use crate::message::{BroadcastContext, EventContext, EventTicket, Message, MessageKey};
use crate::traits::{Broadcast, Event};

/// Type-state marker for a [`ManagedActor`] that has been configured but not yet started.
///
/// While `Idle`, an actor collects its handlers and lifecycle hooks. Calling
/// [`ManagedActor::start`] moves it to the [`Started`](super::started::Started) state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Idle;

impl<Model: Default + Send + Debug + 'static> ManagedActor<Idle, Model> {
    /// Binds a handler for events of type `E` and subscribes the actor to `E` when it starts.
    ///
    /// The handler receives the running actor and an [`EventContext`] holding the event
    /// and its ticket. It is expected to call [`EventContext::complete`] exactly once,
    /// either before returning or from inside the future it returns. Events are handled
    /// one at a time: the next message is not dequeued until that future finishes.
    ///
    /// Binding a second handler for the same type replaces the first.
    #[instrument(skip(self, handler), level = "debug")]
    pub fn on_event<E: Event>(
        &mut self,
        handler: impl for<'a> Fn(&'a mut ManagedActor<Started, Model>, EventContext<E>) -> FutureBox
            + Send
            + Sync
            + 'static,
    ) -> &mut Self {
        let key = MessageKey::of::<E>();
        trace!(message_type = %key, "binding event handler");
        let erased = move |actor: &mut ManagedActor<Started, Model>,
                           message: Message|
              -> Result<FutureBox, Message> {
            let envelope = match message {
                Message::Event(envelope) => envelope,
                other => return Err(other),
            };
            let Some(event) = envelope.payload().as_any().downcast_ref::<E>().cloned() else {
                return Err(Message::Event(envelope));
            };
            let context = EventContext {
                message: event,
                ticket: EventTicket::new(envelope.id),
                broker: actor.broker.clone(),
            };
            Ok(handler(actor, context))
        };
        self.reactors.insert(key, ReactorItem::Event(Box::new(erased)));
        self
    }

    /// Binds a handler for broadcasts of type `B` and subscribes the actor to `B` when it
    /// starts.
    ///
    /// Binding a second handler for the same type replaces the first.
    #[instrument(skip(self, handler), level = "debug")]
    pub fn on_broadcast<B: Broadcast>(
        &mut self,
        handler: impl for<'a> Fn(&'a mut ManagedActor<Started, Model>, BroadcastContext<B>) -> FutureBox
            + Send
            + Sync
            + 'static,
    ) -> &mut Self {
        let key = MessageKey::of::<B>();
        trace!(message_type = %key, "binding broadcast handler");
        let erased = move |actor: &mut ManagedActor<Started, Model>,
                           message: Message|
              -> Result<FutureBox, Message> {
            let envelope = match message {
                Message::Broadcast(envelope) => envelope,
                other => return Err(other),
            };
            let Some(broadcast) = envelope.payload().as_any().downcast_ref::<B>().cloned() else {
                return Err(Message::Broadcast(envelope));
            };
            let context = BroadcastContext {
                message: broadcast,
                broker: actor.broker.clone(),
            };
            Ok(handler(actor, context))
        };
        self.reactors
            .insert(key, ReactorItem::Broadcast(Box::new(erased)));
        self
    }

    /// Sets the hook run once after the actor has registered and subscribed, before it
    /// handles its first message. [`start`](Self::start) returns only after this hook
    /// has finished.
    pub fn on_initialize<F, Fut>(&mut self, f: F) -> &mut Self
    where
        F: for<'b> Fn(&'b ManagedActor<Started, Model>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_initialize = Some(Box::new(move |actor| Box::pin(f(actor))));
        self
    }

    /// Sets the hook run once when the actor stops, before it unregisters from the broker.
    ///
    /// Runs whether the actor was terminated, lost its mailbox, or had a handler panic.
    pub fn on_terminate<F, Fut>(&mut self, f: F) -> &mut Self
    where
        F: for<'b> Fn(&'b ManagedActor<Started, Model>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_terminate = Some(Box::new(move |actor| Box::pin(f(actor))));
        self
    }

    #[instrument(skip(runtime))]
    pub(crate) fn new(runtime: &ActorRuntime, config: &ActorConfig) -> Self {
        let id = config.id();
        let broker = config.broker().cloned().unwrap_or_else(|| runtime.broker());
        let handle = ActorHandle::new(
            id.clone(),
            broker.clone(),
            runtime.0.cancellation_token.child_token(),
            runtime.config().actor_shutdown_timeout(),
        );
        trace!("NEW ACTOR: {}", id);

        Self {
            handle,
            broker,
            id,
            runtime: runtime.clone(),
            model: Model::default(),
            on_initialize: None,
            on_terminate: None,
            reactors: HashMap::new(),
            _actor_state: PhantomData,
        }
    }

    /// Starts the actor on its own task and returns its handle.
    ///
    /// The task registers the actor with the broker, subscribes it to every message type a
    /// handler was bound for, and runs the `on_initialize` hook. This method waits for
    /// all of that to finish, so once it returns the actor is visible to publishers.
    #[instrument(skip(self))]
    pub async fn start(mut self) -> ActorHandle {
        trace!("Starting actor: {}", self.id());
        trace!("Model state before start: {:?}", self.model);

        let reactors = mem::take(&mut self.reactors);
        let handle = self.handle.clone();
        self.runtime.0.roots.insert(handle.id.clone(), handle.clone());

        let actor: ManagedActor<Started, Model> = self.transition();
        let (initialized, ready) = oneshot::channel();
        handle.tracker.spawn(actor.wake(reactors, initialized));
        handle.tracker.close();

        if ready.await.is_err() {
            error!("Actor {} stopped before finishing initialization", handle.id());
        } else {
            trace!("Actor {} started successfully.", handle.id());
        }
        handle
    }
}
