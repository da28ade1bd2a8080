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
#![allow(unused)]

use courier::prelude::*;

/// Asks the handler to echo a number back.
#[courier_event(reply = u32)]
pub struct Ping(pub u32);

/// Asks the handling actor for its name.
#[courier_event(reply = String)]
pub struct WhoAreYou;

#[courier_event(reply = u64)]
pub struct Square(pub u64);

/// Answered by asking whoever handles [`Square`] first.
#[courier_event(reply = u64)]
pub struct SquarePlusOne(pub u64);

/// Handled by an actor that never completes it.
#[courier_event]
pub struct Ignored;

/// Makes the handling actor panic.
#[courier_event]
pub struct Explode;

#[courier_broadcast]
pub struct Tick {
    pub round: u64,
}

#[courier_broadcast]
pub struct Shutdown;
