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

/// What an event's promise resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<R> {
    /// The handling actor called `complete` with this result.
    Completed(R),
    /// The event was never answered: the actor it was handed to unregistered first,
    /// or no handler could accept it.
    Unserved,
}

impl<R> Outcome<R> {
    /// Returns `true` if the event was completed with a result.
    #[inline]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Returns `true` if the event went unanswered.
    #[inline]
    pub const fn is_unserved(&self) -> bool {
        matches!(self, Self::Unserved)
    }

    /// Converts into an `Option`, mapping [`Outcome::Unserved`] to `None`.
    #[inline]
    pub fn into_option(self) -> Option<R> {
        match self {
            Self::Completed(result) => Some(result),
            Self::Unserved => None,
        }
    }
}

impl<R> From<Outcome<R>> for Option<R> {
    fn from(outcome: Outcome<R>) -> Self {
        outcome.into_option()
    }
}
