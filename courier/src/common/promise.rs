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
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// A single-resolution result cell that can be awaited, awaited with a bound, or
/// awaited until a cancellation token fires.
///
/// The broker hands one of these (wrapped in an `Arc`) to every sender of an event.
/// The first call to [`Promise::resolve`] stores the value and wakes every waiter;
/// later calls leave the stored value untouched and return `false`.
///
/// Waiting never spins: a waiter registers with the internal [`Notify`] *before*
/// re-checking the slot, so a resolve landing between the check and the wait still
/// wakes it. Dropping a waiting future is always safe.
pub struct Promise<T> {
    slot: Mutex<Option<T>>,
    resolved: Notify,
}

impl<T> Default for Promise<T> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(None),
            resolved: Notify::new(),
        }
    }
}

impl<T> Promise<T> {
    /// Creates an unresolved promise.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` and wakes all waiters, unless the promise is already resolved.
    ///
    /// Returns `true` if this call resolved the promise. First resolve wins.
    pub fn resolve(&self, value: T) -> bool {
        {
            let mut slot = self.slot.lock();
            if slot.is_some() {
                trace!("promise already resolved, ignoring later value");
                return false;
            }
            *slot = Some(value);
        }
        self.resolved.notify_waiters();
        true
    }

    /// Returns `true` once the promise has been resolved.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.slot.lock().is_some()
    }
}

impl<T: Clone> Promise<T> {
    /// Returns the value if the promise is resolved, without waiting.
    #[inline]
    pub fn try_get(&self) -> Option<T> {
        self.slot.lock().clone()
    }

    /// Waits until the promise is resolved and returns its value.
    pub async fn get(&self) -> T {
        loop {
            let notified = self.resolved.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(value) = self.try_get() {
                return value;
            }
            notified.await;
        }
    }

    /// Waits at most `timeout` for the value.
    ///
    /// Returns `None` if the promise is still unresolved when the deadline passes.
    /// Wake-ups that find the promise unresolved go back to waiting against the same
    /// deadline, so the bound is never stretched. A `timeout` too large to express as a
    /// deadline waits without a bound.
    pub async fn get_timeout(&self, timeout: Duration) -> Option<T> {
        if let Some(value) = self.try_get() {
            return Some(value);
        }
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return Some(self.get().await);
        };
        loop {
            let notified = self.resolved.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(value) = self.try_get() {
                return Some(value);
            }
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                // One last look: a resolve may have raced the deadline.
                return self.try_get();
            }
        }
    }

    /// Waits for the value, giving up as soon as `token` is cancelled.
    ///
    /// Returns `None` on cancellation; the promise itself is left untouched.
    pub async fn get_or_cancel(&self, token: &CancellationToken) -> Option<T> {
        tokio::select! {
            biased;
            value = self.get() => Some(value),
            () = token.cancelled() => None,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Promise<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("value", &*self.slot.lock())
            .finish()
    }
}
