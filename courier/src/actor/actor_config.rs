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

use acton_ern::Ern;

use crate::common::{ActorId, Broker};

/// Parameters for creating a new actor.
///
/// Carries the actor's identity and, optionally, the broker it should register with.
/// When no broker is given, the runtime that builds the actor supplies its own.
#[derive(Default, Debug, Clone)]
pub struct ActorConfig {
    /// The unique identifier (`Ern`) for the actor.
    id: ActorId,
    /// Optional broker to register with instead of the runtime's.
    pub(crate) broker: Option<Broker>,
}

impl ActorConfig {
    /// Creates a configuration for an actor with the given identity.
    ///
    /// # Arguments
    ///
    /// * `id` - The identifier (`Ern`) the actor registers under.
    /// * `broker` - An optional [`Broker`]; `None` means "use the runtime's broker".
    #[must_use]
    pub const fn new(id: Ern, broker: Option<Broker>) -> Self {
        Self { id, broker }
    }

    /// Creates a configuration with a root identifier built from `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a valid `Ern` root.
    pub fn new_with_name(name: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self::new(Ern::with_root(name.into())?, None))
    }

    /// Returns a clone of the actor's identifier.
    #[inline]
    pub(crate) fn id(&self) -> ActorId {
        self.id.clone()
    }

    /// Returns the broker override, if any.
    #[inline]
    pub(crate) const fn broker(&self) -> Option<&Broker> {
        self.broker.as_ref()
    }
}
