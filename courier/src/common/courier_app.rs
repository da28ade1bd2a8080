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

use tracing::{error, trace};

use crate::common::courier_inner::CourierInner;
use crate::common::{ActorRuntime, CourierConfig};

/// Entry point for starting a Courier runtime.
///
/// - [`CourierApp::launch_async()`]: preferred inside an async context
/// - [`CourierApp::launch()`]: for synchronous contexts (panics inside a Tokio runtime)
/// - [`CourierApp::launch_with_config()`]: with an explicit configuration instead of the
///   one found in the XDG configuration directory
#[derive(Default, Debug, Clone)]
pub struct CourierApp;

impl CourierApp {
    /// Starts a runtime with the configuration loaded from XDG-compliant locations.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use courier::prelude::*;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let runtime = CourierApp::launch_async().await;
    ///     // Build and start actors...
    ///     runtime.shutdown_all().await.unwrap();
    /// }
    /// ```
    pub async fn launch_async() -> ActorRuntime {
        trace!("Starting Courier runtime initialization (async)");
        // Reading the configuration file is blocking I/O.
        let config = tokio::task::spawn_blocking(CourierConfig::load)
            .await
            .unwrap_or_else(|e| {
                error!("Configuration loading task failed: {}", e);
                CourierConfig::default()
            });
        Self::launch_with_config(config)
    }

    /// Starts a runtime with an explicit configuration.
    #[must_use]
    pub fn launch_with_config(config: CourierConfig) -> ActorRuntime {
        trace!("Configuration: {:?}", config);
        ActorRuntime(CourierInner::new(config))
    }

    /// Starts a runtime from synchronous code.
    ///
    /// # Panics
    ///
    /// Panics if called from within an existing Tokio runtime. Use
    /// [`launch_async()`](Self::launch_async) instead when in an async context.
    #[must_use]
    pub fn launch() -> ActorRuntime {
        assert!(
            tokio::runtime::Handle::try_current().is_err(),
            "CourierApp::launch() was called from within a Tokio runtime. \
             Use CourierApp::launch_async().await instead when in an async context."
        );
        trace!("Starting Courier runtime initialization (sync)");
        Self::launch_with_config(CourierConfig::load())
    }
}
