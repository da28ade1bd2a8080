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

//! Core traits of the Courier runtime.
//!
//! *   [`CourierMessage`]: marker trait for anything that can sit in a mailbox.
//! *   [`Event`]: a request expecting a single reply from a single subscriber.
//! *   [`Broadcast`]: a notification fanned out to every subscriber.
//! *   [`Publisher`]: the send-only surface shared by the broker and actor handles.

pub use courier_message::{Broadcast, CourierMessage, Event};
pub use publisher::Publisher;

/// Defines the message marker traits.
mod courier_message;
/// Defines the [`Publisher`] trait.
mod publisher;
