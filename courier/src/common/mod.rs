//! Core runtime components of Courier.
//!
//! # Key Re-exported Components:
//!
//! *   [`CourierApp`]: the entry point that starts a runtime.
//! *   [`ActorRuntime`]: a running runtime, used to create top-level actors and shut them
//!     down.
//! *   [`ActorHandle`]: the external interface to a running actor.
//! *   [`Broker`]: registration, subscriptions, and event/broadcast dispatch.
//! *   [`Promise`]: the single-assignment result of a dispatched event.
//! *   [`WriterPreferringRwLock`]: the lock guarding the broker's subscription registry.
//! *   [`Reply`]: helpers for handler return values.
//! *   [`CourierConfig`]: runtime configuration.

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

// --- Public Re-exports ---
pub use actor_handle::ActorHandle;
pub use actor_runtime::ActorRuntime;
pub use broker::Broker;
pub use config::CourierConfig;
pub use courier_app::CourierApp;
pub use promise::Promise;
pub use reply::Reply;
pub use rw_lock::{LockState, ReadGuard, WriteGuard, WriterPreferringRwLock};

// --- Crate-Internal Re-exports ---
pub use types::*;

// --- Submodules ---

/// Defines common type aliases.
mod types;

/// Defines the `ActorHandle` for actor interaction.
mod actor_handle;
/// Defines the `ActorRuntime` for managing the system.
mod actor_runtime;
/// Defines the `Broker` implementation.
mod broker;
/// Defines the `CourierApp` entry point.
mod courier_app;
/// Defines the internal state (`CourierInner`) of the runtime.
mod courier_inner;
/// Defines the per-actor mailbox.
mod mailbox;
/// Defines the `Promise` result cell.
mod promise;
/// Defines the `Reply` handler helpers.
mod reply;
/// Defines the writer-preferring reader/writer lock.
mod rw_lock;
/// Defines the configuration system.
pub mod config;
