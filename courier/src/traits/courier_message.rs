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
use std::any::Any;
use std::fmt::Debug;

use dyn_clone::DynClone;

/// A marker trait for types that can travel through a Courier mailbox.
///
/// This trait combines `Any`, `Send`, `Sync` and `Debug` with [`DynClone`] so that
/// messages can cross task boundaries, be shared between the mailboxes of every
/// broadcast subscriber, and be downcast back to their concrete type by the handler
/// bound for them.
///
/// A blanket implementation is provided; message structs only need to derive
/// `Clone` and `Debug` (the [`courier_event`](crate::prelude::courier_event) and
/// [`courier_broadcast`](crate::prelude::courier_broadcast) attributes do this).
pub trait CourierMessage: DynClone + Any + Send + Sync + Debug {
    /// Returns the message as a dynamic [`Any`] reference for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Converts the boxed message into a boxed [`Any`] so it can be downcast by value.
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
}

dyn_clone::clone_trait_object!(CourierMessage);

impl<T> CourierMessage for T
where
    T: Any + Send + Sync + Debug + DynClone + 'static,
{
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }
}

/// A message that is handed to exactly one subscriber and expects exactly one reply.
///
/// Successive events of the same type rotate over the current subscribers of that type.
/// The sender receives a [`Promise`](crate::common::Promise) that resolves with
/// [`Outcome::Completed`](crate::message::Outcome::Completed) once the handling actor
/// calls `complete`, or with [`Outcome::Unserved`](crate::message::Outcome::Unserved)
/// if that actor unregisters first.
pub trait Event: CourierMessage + Clone {
    /// The type of the result produced by whoever handles this event.
    type Reply: Clone + Send + Sync + Debug + 'static;
}

/// A message delivered to every actor currently subscribed to its type.
///
/// Broadcasts expect no reply. Sending one when nobody is subscribed is a no-op.
pub trait Broadcast: CourierMessage + Clone {}
