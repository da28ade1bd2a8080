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

use std::sync::Arc;

use dashmap::DashMap;
use tokio_util::sync::CancellationToken;

use crate::common::{ActorHandle, ActorId, Broker, CourierConfig};

/// Internal state of a Courier runtime.
///
/// Holds the runtime's broker, its top-level actors, the root cancellation token every
/// actor's token descends from, and the configuration it was launched with. Cloning
/// shares all of it.
#[derive(Debug, Clone)]
pub struct CourierInner {
    /// The broker every actor of this runtime registers with by default.
    pub(crate) broker: Broker,

    /// Top-level actors that have been started and not yet stopped, keyed by id.
    pub(crate) roots: Arc<DashMap<ActorId, ActorHandle>>,

    /// Parent of every actor's cancellation token.
    pub(crate) cancellation_token: CancellationToken,

    /// Runtime configuration.
    pub(crate) config: Arc<CourierConfig>,
}

impl CourierInner {
    pub(crate) fn new(config: CourierConfig) -> Self {
        Self {
            broker: Broker::with_limits(config.limits.clone()),
            roots: Arc::new(DashMap::new()),
            cancellation_token: CancellationToken::new(),
            config: Arc::new(config),
        }
    }
}

impl Default for CourierInner {
    fn default() -> Self {
        Self::new(CourierConfig::default())
    }
}
