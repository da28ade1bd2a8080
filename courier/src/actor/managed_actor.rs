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
use std::fmt::Debug;
use std::fmt::Formatter;
use std::marker::PhantomData;

pub use idle::Idle;

use crate::common::{ActorHandle, ActorId, ActorRuntime, AsyncLifecycleHandler, Broker, ReactorMap};

mod idle;
/// Contains the `Started` type-state marker and the actor run-loop.
pub mod started;

/// An actor whose registration, subscriptions and message loop are managed by the runtime.
///
/// `ManagedActor` wraps user-defined state (`Model`) and uses a type-state parameter to
/// separate configuration from execution:
///
/// *   In the [`Idle`] state, handlers are bound to message types with
///     [`on_event`](ManagedActor::on_event) and [`on_broadcast`](ManagedActor::on_broadcast),
///     and lifecycle hooks are set with [`on_initialize`](ManagedActor::on_initialize) and
///     [`on_terminate`](ManagedActor::on_terminate).
/// *   [`start`](ManagedActor::start) moves the actor onto its own task in the
///     [`started::Started`] state. There it registers with the broker, subscribes to every
///     type a handler was bound for, runs `on_initialize`, and then dispatches messages from
///     its mailbox one at a time until it is terminated.
///
/// Handlers receive `&mut ManagedActor<Started, Model>` and may change `model` directly
/// before returning their future.
pub struct ManagedActor<ActorState, Model: Default + Send + Debug + 'static> {
    /// Handle for external interaction with this actor.
    pub(crate) handle: ActorHandle,

    /// The broker this actor registers with.
    pub(crate) broker: Broker,

    /// The actor's unique identifier.
    pub(crate) id: ActorId,

    /// The runtime this actor belongs to.
    pub(crate) runtime: ActorRuntime,

    /// The user-defined state associated with this actor.
    ///
    /// Handlers and lifecycle hooks see the actor, and through it this model.
    pub model: Model,

    /// Hook run once after registration and subscription, before the first message.
    pub(crate) on_initialize: AsyncLifecycleHandler<Model>,
    /// Hook run once when the loop ends, before the actor unregisters.
    pub(crate) on_terminate: AsyncLifecycleHandler<Model>,

    /// Handlers keyed by the message type they accept.
    pub(crate) reactors: ReactorMap<Model>,

    _actor_state: PhantomData<ActorState>,
}

impl<ActorState, Model: Default + Send + Debug + 'static> ManagedActor<ActorState, Model> {
    /// Returns a reference to the actor's unique identifier (`Ern`).
    #[inline]
    pub const fn id(&self) -> &ActorId {
        &self.id
    }

    /// Returns the root name segment of the actor's identifier.
    #[inline]
    pub fn name(&self) -> &str {
        self.id.root.as_str()
    }

    /// Returns a reference to the actor's [`ActorHandle`].
    #[inline]
    pub const fn handle(&self) -> &ActorHandle {
        &self.handle
    }

    /// Returns a reference to the broker this actor is registered with.
    #[inline]
    pub const fn broker(&self) -> &Broker {
        &self.broker
    }

    /// Returns a reference to the [`ActorRuntime`] this actor belongs to.
    #[inline]
    pub const fn runtime(&self) -> &ActorRuntime {
        &self.runtime
    }

    /// Asks the actor to stop: sets its termination flag and cancels its token, which
    /// releases a blocked wait on the mailbox. The message being handled, if any, runs
    /// to completion first.
    #[inline]
    pub fn terminate(&self) {
        self.handle.terminate();
    }

    /// Returns `true` once termination has been requested.
    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.handle.is_terminated()
    }

    /// Moves every field into a different type-state.
    pub(crate) fn transition<NextState>(self) -> ManagedActor<NextState, Model> {
        ManagedActor {
            handle: self.handle,
            broker: self.broker,
            id: self.id,
            runtime: self.runtime,
            model: self.model,
            on_initialize: self.on_initialize,
            on_terminate: self.on_terminate,
            reactors: self.reactors,
            _actor_state: PhantomData,
        }
    }
}

impl<ActorState, Model: Default + Send + Debug + 'static> Debug
    for ManagedActor<ActorState, Model>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedActor")
            .field("id", &self.id)
            .field("model", &self.model)
            .field("handlers", &self.reactors.len())
            .finish_non_exhaustive()
    }
}
