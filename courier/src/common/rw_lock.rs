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
use std::ops::{Deref, DerefMut};

use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::Notify;

/// Snapshot of a [`WriterPreferringRwLock`]'s admission counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LockState {
    /// Readers currently holding the lock.
    pub active_readers: usize,
    /// Readers waiting for admission.
    pub waiting_readers: usize,
    /// Writers currently holding the lock (zero or one).
    pub active_writers: usize,
    /// Writers waiting for admission.
    pub waiting_writers: usize,
}

impl LockState {
    const fn allow_reader(&self) -> bool {
        self.waiting_writers == 0 && self.active_writers == 0
    }

    const fn allow_writer(&self) -> bool {
        self.active_readers == 0 && self.active_writers == 0
    }
}

/// An async reader/writer lock that favours writers.
///
/// Any number of readers may hold the lock together; a writer holds it alone. While a
/// writer is waiting or active, new readers are not admitted, so a steady stream of
/// readers can never starve a writer.
///
/// Admission is decided by counters kept under one small mutex. Every state change
/// wakes all waiters through a single [`Notify`], and each waiter re-checks its own
/// admission predicate before proceeding. A waiter that is dropped before being
/// admitted withdraws itself and wakes the others, so cancellation never leaves the
/// counters skewed.
///
/// The protected value lives in a `parking_lot::RwLock` that admission guarantees is
/// never contended; guards must not be held across an `.await`.
pub struct WriterPreferringRwLock<T> {
    state: Mutex<LockState>,
    changed: Notify,
    value: RwLock<T>,
}

impl<T: Default> Default for WriterPreferringRwLock<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> WriterPreferringRwLock<T> {
    /// Creates a new lock protecting `value`.
    pub fn new(value: T) -> Self {
        Self {
            state: Mutex::new(LockState::default()),
            changed: Notify::new(),
            value: RwLock::new(value),
        }
    }

    /// Returns a snapshot of the admission counters.
    pub fn state(&self) -> LockState {
        *self.state.lock()
    }

    /// Acquires shared access, waiting while any writer is active or waiting.
    pub async fn read(&self) -> ReadGuard<'_, T> {
        self.admit(Role::Reader).await;
        ReadGuard {
            lock: self,
            value: Some(self.value.read()),
        }
    }

    /// Acquires exclusive access, waiting until no reader or writer is active.
    pub async fn write(&self) -> WriteGuard<'_, T> {
        self.admit(Role::Writer).await;
        WriteGuard {
            lock: self,
            value: Some(self.value.write()),
        }
    }

    async fn admit(&self, role: Role) {
        let mut ticket = WaitTicket::enqueue(self, role);
        loop {
            let changed = self.changed.notified();
            tokio::pin!(changed);
            changed.as_mut().enable();

            if ticket.try_admit() {
                return;
            }
            changed.await;
        }
    }

    fn release(&self, role: Role) {
        {
            let mut state = self.state.lock();
            match role {
                Role::Reader => state.active_readers -= 1,
                Role::Writer => state.active_writers -= 1,
            }
        }
        self.changed.notify_waiters();
    }
}

impl<T> fmt::Debug for WriterPreferringRwLock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterPreferringRwLock")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    Reader,
    Writer,
}

/// Tracks one pending acquisition. Counts as "waiting" from creation until admitted;
/// if dropped before admission the waiting count is withdrawn.
struct WaitTicket<'a, T> {
    lock: &'a WriterPreferringRwLock<T>,
    role: Role,
    admitted: bool,
}

impl<'a, T> WaitTicket<'a, T> {
    fn enqueue(lock: &'a WriterPreferringRwLock<T>, role: Role) -> Self {
        {
            let mut state = lock.state.lock();
            match role {
                Role::Reader => state.waiting_readers += 1,
                Role::Writer => state.waiting_writers += 1,
            }
        }
        Self {
            lock,
            role,
            admitted: false,
        }
    }

    fn try_admit(&mut self) -> bool {
        let mut state = self.lock.state.lock();
        match self.role {
            Role::Reader if state.allow_reader() => {
                state.waiting_readers -= 1;
                state.active_readers += 1;
            }
            Role::Writer if state.allow_writer() => {
                state.waiting_writers -= 1;
                state.active_writers += 1;
            }
            _ => return false,
        }
        self.admitted = true;
        true
    }
}

impl<T> Drop for WaitTicket<'_, T> {
    fn drop(&mut self) {
        if self.admitted {
            return;
        }
        {
            let mut state = self.lock.state.lock();
            match self.role {
                Role::Reader => state.waiting_readers -= 1,
                Role::Writer => state.waiting_writers -= 1,
            }
        }
        // A writer giving up may unblock readers held back by writer preference.
        self.lock.changed.notify_waiters();
    }
}

/// Shared access to the value of a [`WriterPreferringRwLock`]. Released on drop.
pub struct ReadGuard<'a, T> {
    lock: &'a WriterPreferringRwLock<T>,
    value: Option<RwLockReadGuard<'a, T>>,
}

impl<T> Deref for ReadGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value
            .as_deref()
            .unwrap_or_else(|| unreachable!("read guard used after release"))
    }
}

impl<T> Drop for ReadGuard<'_, T> {
    fn drop(&mut self) {
        self.value.take();
        self.lock.release(Role::Reader);
    }
}

/// Exclusive access to the value of a [`WriterPreferringRwLock`]. Released on drop.
pub struct WriteGuard<'a, T> {
    lock: &'a WriterPreferringRwLock<T>,
    value: Option<RwLockWriteGuard<'a, T>>,
}

impl<T> Deref for WriteGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value
            .as_deref()
            .unwrap_or_else(|| unreachable!("write guard used after release"))
    }
}

impl<T> DerefMut for WriteGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.value
            .as_deref_mut()
            .unwrap_or_else(|| unreachable!("write guard used after release"))
    }
}

impl<T> Drop for WriteGuard<'_, T> {
    fn drop(&mut self) {
        self.value.take();
        self.lock.release(Role::Writer);
    }
}
