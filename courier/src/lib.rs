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

#![forbid(unsafe_code)]
#![forbid(missing_docs)] // Keep this to enforce coverage

//! # Courier
//!
//! An in-process publish/subscribe runtime built on Tokio. Independent actors register
//! with a central broker, subscribe to typed messages, and exchange them through
//! per-actor mailboxes.
//!
//! ## Key Concepts
//!
//! - **Events** ([`Event`](prelude::Event)): requests handed to exactly one subscriber.
//!   Successive events of a type rotate over its subscribers, and the sender receives a
//!   [`Promise`](prelude::Promise) resolved with an [`Outcome`](prelude::Outcome).
//! - **Broadcasts** ([`Broadcast`](prelude::Broadcast)): notifications copied to every
//!   current subscriber.
//! - **Broker** ([`Broker`](prelude::Broker)): owns mailboxes and the subscription
//!   registry, which sits behind a writer-preferring reader/writer lock.
//! - **Actors** ([`ManagedActor`](prelude::ManagedActor)): type-state (`Idle`, `Started`)
//!   wrappers around user state that register, subscribe, and dispatch their mailbox to
//!   bound handlers until terminated.
//! - **Runtime** ([`ActorRuntime`](prelude::ActorRuntime)): creates actors and shuts
//!   them down; started through [`CourierApp`](prelude::CourierApp).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier::prelude::*;
//!
//! #[courier_event(reply = u32)]
//! struct Double(u32);
//!
//! #[courier_actor]
//! struct Doubler;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = CourierApp::launch_async().await;
//!     let mut doubler = runtime.new_actor_with_name::<Doubler>("doubler")?;
//!     doubler.on_event::<Double>(|_actor, context| {
//!         let doubled = context.message().0 * 2;
//!         Reply::complete(&context, doubled)
//!     });
//!     doubler.start().await;
//!
//!     let promise = runtime.broker().send_event(Double(21)).await.expect("subscribed");
//!     assert_eq!(promise.get().await, Outcome::Completed(42));
//!     runtime.shutdown_all().await
//! }
//! ```

/// Core runtime components: broker, promise, lock, runtime, handles, configuration.
pub(crate) mod common;

/// Actor structures and the run-loop.
pub(crate) mod actor;

/// Message types and envelopes.
pub(crate) mod message;

/// Core traits.
pub(crate) mod traits;

/// Runtime configuration loaded from XDG-compliant locations.
pub mod config {
    pub use crate::common::config::{
        CourierConfig, DefaultsConfig, LimitsConfig, TimeoutConfig, CONFIG,
    };
}

/// A prelude module for conveniently importing the most commonly used items.
///
/// # Re-exports
///
/// ## Macros (from `courier-macro`)
/// *   [`courier_macro::courier_event`]: turns a type into an [`Event`].
/// *   [`courier_macro::courier_broadcast`]: turns a type into a [`Broadcast`].
/// *   [`courier_macro::courier_actor`]: prepares a type to be an actor model.
///
/// ## External Crates
/// *   [`acton_ern::*`](https://docs.rs/acton-ern): resource names used as actor ids.
/// *   [`async_trait::async_trait`](https://docs.rs/async-trait/latest/async_trait/attr.async_trait.html).
///
/// ## Core Types
/// *   [`ManagedActor`], [`Idle`], [`Started`], [`ActorConfig`]: building actors.
/// *   [`CourierApp`], [`ActorRuntime`], [`ActorHandle`]: running them.
/// *   [`Broker`], [`Promise`], [`Outcome`], [`WriterPreferringRwLock`]: the messaging core.
/// *   [`Reply`]: helpers for handler return values.
/// *   [`Message`], [`MessageKey`], [`EventTicket`], [`EventContext`],
///     [`BroadcastContext`], [`BrokerError`]: message plumbing.
/// *   [`CourierMessage`], [`Event`], [`Broadcast`], [`Publisher`]: core traits.
pub mod prelude {
    // Macros from courier-macro
    pub use courier_macro::*;

    // External crate re-exports
    pub use acton_ern::*;
    pub use async_trait::async_trait;

    // Core types
    pub use crate::actor::{ActorConfig, Idle, ManagedActor, Started};
    pub use crate::common::{
        ActorHandle, ActorId, ActorRuntime, Broker, CourierApp, CourierConfig, FutureBox,
        LockState, Promise, ReadGuard, Reply, WriteGuard, WriterPreferringRwLock,
    };
    pub use crate::message::{
        BroadcastContext, BroadcastEnvelope, BrokerError, EventContext, EventEnvelope, EventId,
        EventTicket, Message, MessageKey, Outcome,
    };
    pub use crate::traits::{Broadcast, CourierMessage, Event, Publisher};
}
