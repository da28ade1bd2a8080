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

use std::fmt::Debug;

use acton_ern::Ern;
use anyhow::anyhow;
use futures::future::join_all;
use tracing::{error, instrument, trace};

use crate::actor::{ActorConfig, Idle, ManagedActor};
use crate::common::courier_inner::CourierInner;
use crate::common::{ActorHandle, Broker, CourierConfig};

/// An initialized Courier runtime.
///
/// Obtained from [`CourierApp::launch_async`](crate::common::CourierApp::launch_async) or
/// one of its siblings. It owns one [`Broker`], the root cancellation token, and the
/// handles of every top-level actor it has started, and it provides the methods for
/// creating actors and shutting them all down.
///
/// It is cloneable; clones share the same broker and actors.
#[derive(Debug, Clone, Default)]
pub struct ActorRuntime(pub(crate) CourierInner);

impl ActorRuntime {
    /// Creates a new top-level actor builder with a root identifier derived from `name`.
    ///
    /// The actor registers with this runtime's broker once started. The returned actor
    /// is ready for handlers to be bound before calling `.start()` on it.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a valid `Ern` root.
    pub fn new_actor_with_name<Model>(
        &self,
        name: impl Into<String>,
    ) -> anyhow::Result<ManagedActor<Idle, Model>>
    where
        Model: Default + Send + Debug + 'static,
    {
        let config = ActorConfig::new(Ern::with_root(name.into())?, None);
        Ok(self.new_actor_with_config(config))
    }

    /// Creates a new top-level actor builder named after the configured default actor
    /// name.
    ///
    /// Falls back to a default identifier if the configured name is not a valid `Ern`
    /// root.
    pub fn new_actor<Model>(&self) -> ManagedActor<Idle, Model>
    where
        Model: Default + Send + Debug + 'static,
    {
        let name = &self.0.config.defaults.actor_name;
        let id = Ern::with_root(name.as_str()).unwrap_or_else(|e| {
            error!("Invalid default actor name {:?}: {}", name, e);
            Ern::default()
        });
        self.new_actor_with_config(ActorConfig::new(id, None))
    }

    /// Creates a new top-level actor builder from an explicit [`ActorConfig`].
    ///
    /// If the configuration names no broker, the actor uses this runtime's.
    pub fn new_actor_with_config<Model>(&self, mut config: ActorConfig) -> ManagedActor<Idle, Model>
    where
        Model: Default + Send + Debug + 'static,
    {
        if config.broker.is_none() {
            config.broker = Some(self.0.broker.clone());
        }
        let new_actor = ManagedActor::new(self, &config);
        trace!(
            "Created new actor builder with config, id: {}",
            new_actor.id()
        );
        new_actor
    }

    /// Returns the number of top-level actors currently running.
    #[inline]
    #[must_use]
    pub fn actor_count(&self) -> usize {
        self.0.roots.len()
    }

    /// Returns a clone of the runtime's broker.
    #[inline]
    #[must_use]
    pub fn broker(&self) -> Broker {
        self.0.broker.clone()
    }

    /// Returns the configuration this runtime was launched with.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CourierConfig {
        &self.0.config
    }

    /// Stops every top-level actor and cancels the root token.
    ///
    /// All actors are terminated at once and awaited concurrently, each within the
    /// actor shutdown timeout and all together within the system shutdown timeout.
    /// The root token is cancelled afterwards regardless, which stops any actor that
    /// did not respond.
    ///
    /// # Errors
    ///
    /// Returns an error naming the actors that failed to stop in time.
    #[instrument(skip(self))]
    pub async fn shutdown_all(&self) -> anyhow::Result<()> {
        let handles: Vec<ActorHandle> = self
            .0
            .roots
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        trace!("Shutting down {} top-level actors", handles.len());

        let system_timeout = self.0.config.system_shutdown_timeout();
        let stops = join_all(handles.iter().map(|handle| async move {
            handle.stop().await.map_err(|e| (handle.id().to_string(), e))
        }));
        let outcome = tokio::time::timeout(system_timeout, stops).await;
        self.0.cancellation_token.cancel();

        let results = outcome.map_err(|_| {
            error!("System shutdown timed out after {:?}", system_timeout);
            anyhow!("system shutdown timed out after {:?}", system_timeout)
        })?;

        let failed: Vec<String> = results
            .into_iter()
            .filter_map(Result::err)
            .map(|(id, e)| {
                error!("{}", e);
                id
            })
            .collect();
        if failed.is_empty() {
            trace!("All actors stopped.");
            Ok(())
        } else {
            Err(anyhow!(
                "{} actor(s) did not stop in time: [{}]",
                failed.len(),
                failed.join(", ")
            ))
        }
    }
}
