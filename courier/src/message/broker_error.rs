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

use thiserror::Error;

use crate::common::ActorId;

/// Errors surfaced by the broker's mailbox primitive.
///
/// Everything else the broker does treats races (nobody subscribed, holder gone,
/// already completed) as ordinary outcomes rather than errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BrokerError {
    /// The actor has no mailbox: it never registered or has already unregistered.
    #[error("actor {0} is not registered with the broker")]
    NotRegistered(ActorId),
    /// The actor's mailbox was closed while waiting on it.
    #[error("mailbox of actor {0} was closed")]
    MailboxClosed(ActorId),
}
