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

use std::any::Any;
use std::fmt::Debug;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::sync::oneshot;
use tracing::{debug, error, instrument, trace, warn};

use crate::actor::ManagedActor;
use crate::common::ReactorMap;
use crate::message::Message;

/// Type-state marker for a [`ManagedActor`] that is running its message loop.
///
/// Handlers and lifecycle hooks receive the actor in this state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Started;

impl<Model: Default + Send + Debug + 'static> ManagedActor<Started, Model> {
    /// The task body of a started actor.
    ///
    /// Runs the message loop, then always runs `on_terminate` and unregisters, even when
    /// the loop ended in a panic.
    #[instrument(skip(self, reactors, initialized))]
    pub(crate) async fn wake(
        mut self,
        reactors: ReactorMap<Model>,
        initialized: oneshot::Sender<()>,
    ) {
        let outcome = AssertUnwindSafe(self.run(&reactors, initialized))
            .catch_unwind()
            .await;
        if let Err(panic) = outcome {
            error!(
                "Actor {} panicked: {}",
                self.id(),
                panic_message(panic.as_ref())
            );
        }

        self.handle.terminate();
        trace!(
            "Message loop finished for actor: {}. Initiating final termination.",
            self.id()
        );

        if let Some(hook) = self.on_terminate.take() {
            let terminating = hook(&self);
            if let Err(panic) = AssertUnwindSafe(terminating).catch_unwind().await {
                error!(
                    "on_terminate hook of actor {} panicked: {}",
                    self.id(),
                    panic_message(panic.as_ref())
                );
            }
        }

        self.broker.unregister(&self.id).await;
        self.runtime.0.roots.remove(&self.id);
        debug!("Actor {} stopped.", self.id());
    }

    async fn run(&mut self, reactors: &ReactorMap<Model>, initialized: oneshot::Sender<()>) {
        self.broker.register(&self.id);
        for key in reactors.keys() {
            self.broker.subscribe(&self.id, *key).await;
        }

        if let Some(hook) = self.on_initialize.take() {
            let initializing = hook(self);
            initializing.await;
        }
        // The receiver is gone only if `start` itself was dropped; nothing to tell then.
        let _ = initialized.send(());

        let cancel_token = self.handle.cancellation_token.clone();
        while !self.is_terminated() {
            let received = tokio::select! {
                biased;
                () = cancel_token.cancelled() => {
                    trace!("Cancellation triggered for actor: {}", self.id());
                    break;
                }
                received = self.broker.await_message(&self.id) => received,
            };

            let message = match received {
                Ok(message) => message,
                Err(e) => {
                    debug!("Actor {} can no longer receive: {}", self.id(), e);
                    break;
                }
            };
            if self.is_terminated() {
                // Still pending events resolve as unserved once the actor unregisters.
                trace!("Actor {} terminated while waiting, dropping {}", self.id(), message.key());
                break;
            }
            self.dispatch(reactors, message).await;
        }
    }

    async fn dispatch(&mut self, reactors: &ReactorMap<Model>, message: Message) {
        let key = message.key();
        let Some(reactor) = reactors.get(&key) else {
            warn!(message_type = %key, "No handler bound in actor {}", self.id());
            if let Some(event_id) = message.event_id() {
                self.broker.resolve_unserved(event_id);
            }
            return;
        };

        trace!(message_type = %key, event = reactor.is_event(), "dispatching");
        match (reactor.handler())(self, message) {
            Ok(handling) => handling.await,
            Err(unhandled) => {
                error!(
                    message_type = %key,
                    "Handler called with incompatible message (downcast failed)"
                );
                if let Some(event_id) = unhandled.event_id() {
                    self.broker.resolve_unserved(event_id);
                }
            }
        }
    }
}

/// Best-effort text of a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
