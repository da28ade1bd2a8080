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

//! Helpers for building handler return values.
//!
//! ```ignore
//! // Answer straight away.
//! actor.on_event::<Double>(|_actor, context| {
//!     let doubled = context.message().0 * 2;
//!     Reply::complete(&context, doubled)
//! });
//!
//! // Answer after awaiting something else.
//! actor.on_event::<Lookup>(|actor, context| {
//!     let broker = actor.broker().clone();
//!     Reply::pending(async move {
//!         let found = broker.send_event(Fetch(context.message().key)).await;
//!         context.complete(found.is_some());
//!     })
//! });
//! ```

use std::future::Future;

use crate::common::FutureBox;
use crate::message::EventContext;
use crate::traits::Event;

/// A namespace for creating the boxed futures handlers and hooks return.
pub struct Reply;

impl Reply {
    /// An already finished future, for handlers that do all their work synchronously.
    #[inline]
    #[must_use]
    pub fn ready() -> FutureBox {
        Box::pin(async {})
    }

    /// Boxes `future` into a handler return value.
    #[inline]
    pub fn pending<F>(future: F) -> FutureBox
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Box::pin(future)
    }

    /// Completes the event in `context` with `result` and returns a finished future.
    ///
    /// A completion that finds the event no longer pending is ignored, as with
    /// [`EventContext::complete`].
    #[inline]
    pub fn complete<E: Event>(context: &EventContext<E>, result: E::Reply) -> FutureBox {
        context.complete(result);
        Self::ready()
    }
}
