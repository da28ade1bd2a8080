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
use std::collections::{HashMap, VecDeque};
use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, error, instrument, trace, warn};

use crate::common::config::{LimitsConfig, CONFIG};
use crate::common::mailbox::Mailbox;
use crate::common::{ActorId, Promise, WriterPreferringRwLock};
use crate::message::{
    BroadcastEnvelope, BrokerError, EventEnvelope, EventId, EventTicket, Message, MessageKey,
    Outcome,
};
use crate::traits::{Broadcast, CourierMessage, Event, Publisher};

/// Subscribers of each message type, in rotation order.
type Registry = HashMap<MessageKey, Mutex<VecDeque<ActorId>>>;

/// The central publish/subscribe hub.
///
/// The broker owns one mailbox per registered actor and a registry of which actors
/// are subscribed to which message types.
///
/// *   **Events** go to exactly one subscriber. Successive events of the same type
///     rotate over the subscribers in the order they subscribed, and the sender gets a
///     [`Promise`] that the handling actor resolves through [`Broker::complete`].
/// *   **Broadcasts** are copied into the mailbox of every current subscriber.
///
/// The registry sits behind a [`WriterPreferringRwLock`]: subscription changes and
/// unregistration take it exclusively, sends share it. Each type's rotation has its own
/// small mutex, so sends of different types only contend on the shared read side.
///
/// Cloning a `Broker` is cheap; all clones share the same state.
#[derive(Clone)]
pub struct Broker {
    inner: Arc<BrokerInner>,
}

#[derive(Default)]
struct BrokerInner {
    mailboxes: DashMap<ActorId, Mailbox>,
    registry: WriterPreferringRwLock<Registry>,
    pending: DashMap<EventId, PendingEvent>,
    next_event_id: AtomicU64,
    limits: LimitsConfig,
}

/// An event that has been handed to an actor and not yet answered.
struct PendingEvent {
    holder: ActorId,
    promise: Arc<dyn PendingResolution>,
}

/// Type-erased access to an event promise, whatever its reply type.
trait PendingResolution: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn resolve_unserved(&self) -> bool;
}

impl<R> PendingResolution for Promise<Outcome<R>>
where
    R: Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn resolve_unserved(&self) -> bool {
        self.resolve(Outcome::Unserved)
    }
}

impl Default for Broker {
    fn default() -> Self {
        Self::new()
    }
}

impl Broker {
    /// Creates an empty broker using the limits of the process-wide [`CONFIG`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(CONFIG.limits.clone())
    }

    /// Creates an empty broker whose mailboxes warn according to `limits`.
    #[must_use]
    pub fn with_limits(limits: LimitsConfig) -> Self {
        Self {
            inner: Arc::new(BrokerInner {
                limits,
                ..BrokerInner::default()
            }),
        }
    }

    /// Creates the mailbox for `id`. Registering an already registered actor is a no-op.
    #[instrument(skip(self))]
    pub fn register(&self, id: &ActorId) {
        let high_water_mark = self.inner.limits.mailbox_high_water_mark;
        self.inner
            .mailboxes
            .entry(id.clone())
            .or_insert_with(|| Mailbox::new(high_water_mark));
        debug!("registered");
    }

    /// Removes `id` from every subscription and discards its mailbox.
    ///
    /// Every event still held by the actor, queued or being handled, resolves to
    /// [`Outcome::Unserved`], so no sender waits forever on an actor that is gone.
    #[instrument(skip(self))]
    pub async fn unregister(&self, id: &ActorId) {
        let (mailbox, held) = {
            let mut registry = self.inner.registry.write().await;
            registry.retain(|key, rotation| {
                let rotation = rotation.get_mut();
                rotation.retain(|subscriber| subscriber != id);
                if rotation.is_empty() {
                    trace!(message_type = %key, "pruned empty rotation");
                }
                !rotation.is_empty()
            });
            let Some((_, mailbox)) = self.inner.mailboxes.remove(id) else {
                debug!("not registered, nothing to do");
                return;
            };
            mailbox.close();
            // Sends insert pending entries under the read lock, so this list is complete.
            let held: Vec<EventId> = self
                .inner
                .pending
                .iter()
                .filter(|entry| &entry.value().holder == id)
                .map(|entry| *entry.key())
                .collect();
            (mailbox, held)
        };

        let discarded = mailbox.drain().len();
        let unserved = held
            .into_iter()
            .filter(|event_id| self.resolve_unserved(*event_id))
            .count();
        debug!(discarded, unserved, "unregistered");
    }

    /// Subscribes `id` to events of type `E`.
    ///
    /// Returns `false` without changing anything if the actor is not registered or is
    /// already subscribed to `E`.
    pub async fn subscribe_event<E: Event>(&self, id: &ActorId) -> bool {
        self.subscribe(id, MessageKey::of::<E>()).await
    }

    /// Subscribes `id` to broadcasts of type `B`.
    ///
    /// Returns `false` without changing anything if the actor is not registered or is
    /// already subscribed to `B`.
    pub async fn subscribe_broadcast<B: Broadcast>(&self, id: &ActorId) -> bool {
        self.subscribe(id, MessageKey::of::<B>()).await
    }

    #[instrument(skip(self), fields(message_type = %key))]
    pub(crate) async fn subscribe(&self, id: &ActorId, key: MessageKey) -> bool {
        let mut registry = self.inner.registry.write().await;
        if !self.inner.mailboxes.contains_key(id) {
            warn!("subscription ignored: actor is not registered");
            return false;
        }
        let rotation = registry.entry(key).or_default().get_mut();
        if rotation.contains(id) {
            debug!("subscription ignored: already subscribed");
            return false;
        }
        rotation.push_back(id.clone());
        trace!(subscribers = rotation.len(), "subscribed");
        true
    }

    /// Delivers `broadcast` to every current subscriber of `B`.
    ///
    /// Returns the number of mailboxes that received it; zero means nobody is
    /// interested, which is not an error. All recipients share one copy of the payload.
    #[instrument(skip(self, broadcast), fields(message_type = std::any::type_name::<B>()))]
    pub async fn send_broadcast<B: Broadcast>(&self, broadcast: B) -> usize {
        let key = MessageKey::of::<B>();
        let payload: Arc<dyn CourierMessage> = Arc::new(broadcast);

        let registry = self.inner.registry.read().await;
        let Some(rotation) = registry.get(&key) else {
            trace!("no subscribers");
            return 0;
        };
        let subscribers: Vec<ActorId> = rotation.lock().iter().cloned().collect();

        let mut delivered = 0;
        for subscriber in &subscribers {
            let Some(mailbox) = self.mailbox(subscriber) else {
                continue;
            };
            let message = Message::Broadcast(BroadcastEnvelope::new(key, payload.clone()));
            if mailbox.push(message).is_ok() {
                delivered += 1;
            }
        }
        trace!(delivered, "broadcast delivered");
        delivered
    }

    /// Hands `event` to the next subscriber of `E` in round-robin order.
    ///
    /// Returns `None` if nobody is subscribed to `E`. Otherwise returns the promise the
    /// handling actor will resolve: [`Outcome::Completed`] when it calls
    /// [`Broker::complete`], or [`Outcome::Unserved`] if it unregisters first.
    #[instrument(skip(self, event), fields(message_type = std::any::type_name::<E>()))]
    pub async fn send_event<E: Event>(&self, event: E) -> Option<Arc<Promise<Outcome<E::Reply>>>> {
        let key = MessageKey::of::<E>();

        let registry = self.inner.registry.read().await;
        let Some(rotation) = registry.get(&key) else {
            trace!("no subscribers");
            return None;
        };
        let mut rotation = rotation.lock();

        while let Some(holder) = rotation.pop_front() {
            // Registry and mailboxes change together under the write lock, so this only
            // misses if the two ever drift apart; drop the stale subscriber if they do.
            let Some(mailbox) = self.mailbox(&holder) else {
                warn!(%holder, "dropping subscriber without a mailbox");
                continue;
            };

            let id = EventId(self.inner.next_event_id.fetch_add(1, Ordering::Relaxed));
            let promise: Arc<Promise<Outcome<E::Reply>>> = Arc::new(Promise::new());
            self.inner.pending.insert(
                id,
                PendingEvent {
                    holder: holder.clone(),
                    promise: promise.clone(),
                },
            );

            let envelope = EventEnvelope::new(id, key, Box::new(event));
            if mailbox.push(Message::Event(envelope)).is_err() {
                warn!(%holder, %id, "mailbox closed during dispatch");
                self.resolve_unserved(id);
            } else {
                trace!(%holder, %id, "event dispatched");
            }
            rotation.push_back(holder);
            return Some(promise);
        }
        trace!("rotation emptied");
        None
    }

    /// Resolves the event identified by `ticket` with `result`.
    ///
    /// Whoever completes first claims the event; returns `false` if it was already
    /// completed or its holder unregistered in the meantime. Callable from any task.
    pub fn complete<E: Event>(&self, ticket: &EventTicket<E>, result: E::Reply) -> bool {
        let Some((id, pending)) = self.inner.pending.remove(&ticket.id()) else {
            trace!(id = %ticket.id(), "complete ignored: event no longer pending");
            return false;
        };
        match pending
            .promise
            .as_any()
            .downcast_ref::<Promise<Outcome<E::Reply>>>()
        {
            Some(promise) => {
                trace!(%id, holder = %pending.holder, "event completed");
                promise.resolve(Outcome::Completed(result))
            }
            None => {
                error!(%id, "reply type does not match the pending event");
                pending.promise.resolve_unserved();
                false
            }
        }
    }

    /// Resolves a pending event as [`Outcome::Unserved`]. Returns `false` if it was no
    /// longer pending.
    pub(crate) fn resolve_unserved(&self, id: EventId) -> bool {
        self.inner
            .pending
            .remove(&id)
            .is_some_and(|(_, pending)| pending.promise.resolve_unserved())
    }

    /// Waits for the next message in `id`'s mailbox.
    ///
    /// Fails with [`BrokerError::NotRegistered`] if `id` has no mailbox and with
    /// [`BrokerError::MailboxClosed`] if the actor is unregistered while waiting.
    /// Dropping the returned future never loses a message.
    pub async fn await_message(&self, id: &ActorId) -> Result<Message, BrokerError> {
        let mailbox = self
            .mailbox(id)
            .ok_or_else(|| BrokerError::NotRegistered(id.clone()))?;
        mailbox
            .recv()
            .await
            .ok_or_else(|| BrokerError::MailboxClosed(id.clone()))
    }

    /// Returns `true` if `id` currently has a mailbox.
    pub fn is_registered(&self, id: &ActorId) -> bool {
        self.inner.mailboxes.contains_key(id)
    }

    /// The current subscribers of message type `M`, in rotation order.
    pub async fn subscribers<M: 'static>(&self) -> Vec<ActorId> {
        let registry = self.inner.registry.read().await;
        registry
            .get(&MessageKey::of::<M>())
            .map(|rotation| rotation.lock().iter().cloned().collect())
            .unwrap_or_default()
    }

    /// The number of current subscribers of message type `M`.
    pub async fn subscriber_count<M: 'static>(&self) -> usize {
        let registry = self.inner.registry.read().await;
        registry
            .get(&MessageKey::of::<M>())
            .map_or(0, |rotation| rotation.lock().len())
    }

    /// The number of events dispatched but not yet completed.
    pub fn pending_events(&self) -> usize {
        self.inner.pending.len()
    }

    /// The number of messages waiting in `id`'s mailbox, or `None` if it is not
    /// registered.
    pub fn mailbox_len(&self, id: &ActorId) -> Option<usize> {
        self.mailbox(id).map(|mailbox| mailbox.len())
    }

    fn mailbox(&self, id: &ActorId) -> Option<Mailbox> {
        self.inner.mailboxes.get(id).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl Publisher for Broker {
    async fn send_event<E: Event>(&self, event: E) -> Option<Arc<Promise<Outcome<E::Reply>>>> {
        Self::send_event(self, event).await
    }

    async fn send_broadcast<B: Broadcast>(&self, broadcast: B) -> usize {
        Self::send_broadcast(self, broadcast).await
    }
}

impl Debug for Broker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Broker")
            .field("registered", &self.inner.mailboxes.len())
            .field("pending_events", &self.inner.pending.len())
            .field("registry", &self.inner.registry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use acton_ern::Ern;

    use super::Broker;
    use crate::common::config::CONFIG;
    use crate::common::ActorId;
    use crate::message::{BrokerError, EventTicket, Message, Outcome};
    use crate::traits::{Broadcast, Event};

    #[derive(Clone, Debug)]
    struct Ping(u32);

    impl Event for Ping {
        type Reply = u32;
    }

    #[derive(Clone, Debug)]
    struct Tick;

    impl Broadcast for Tick {}

    fn actor(name: &str) -> ActorId {
        Ern::with_root(name).unwrap()
    }

    fn registered(broker: &Broker, name: &str) -> ActorId {
        let id = actor(name);
        broker.register(&id);
        id
    }

    fn ticket_of(message: &Message) -> EventTicket<Ping> {
        EventTicket::new(message.event_id().unwrap())
    }

    #[tokio::test]
    async fn test_events_rotate_over_subscribers() {
        let broker = Broker::new();
        let a = registered(&broker, "a");
        let b = registered(&broker, "b");
        assert!(broker.subscribe_event::<Ping>(&a).await);
        assert!(broker.subscribe_event::<Ping>(&b).await);

        for n in 0..3 {
            assert!(broker.send_event(Ping(n)).await.is_some());
        }

        assert_eq!(broker.mailbox_len(&a), Some(2));
        assert_eq!(broker.mailbox_len(&b), Some(1));
        let first = broker.await_message(&a).await.unwrap();
        let second = broker.await_message(&a).await.unwrap();
        let third = broker.await_message(&b).await.unwrap();
        assert_eq!(first.downcast_ref::<Ping>().unwrap().0, 0);
        assert_eq!(second.downcast_ref::<Ping>().unwrap().0, 2);
        assert_eq!(third.downcast_ref::<Ping>().unwrap().0, 1);
        assert_eq!(broker.pending_events(), 3);
    }

    #[tokio::test]
    async fn test_rotation_wraps_after_a_full_cycle() {
        let broker = Broker::new();
        let mut ids = Vec::new();
        for name in ["s1", "s2", "s3"] {
            let id = registered(&broker, name);
            broker.subscribe_event::<Ping>(&id).await;
            ids.push(id);
        }

        for n in 0..4 {
            broker.send_event(Ping(n)).await;
        }

        assert_eq!(broker.mailbox_len(&ids[0]), Some(2));
        assert_eq!(broker.mailbox_len(&ids[1]), Some(1));
        assert_eq!(broker.mailbox_len(&ids[2]), Some(1));
        assert_eq!(
            broker.subscribers::<Ping>().await,
            vec![ids[1].clone(), ids[2].clone(), ids[0].clone()]
        );
    }

    #[tokio::test]
    async fn test_complete_resolves_the_senders_promise() {
        let broker = Broker::new();
        let a = registered(&broker, "a");
        broker.subscribe_event::<Ping>(&a).await;

        let promise = broker.send_event(Ping(20)).await.unwrap();
        let message = broker.await_message(&a).await.unwrap();
        let ticket = ticket_of(&message);

        assert!(broker.complete(&ticket, 21));
        assert!(!broker.complete(&ticket, 99), "second completion must be a no-op");
        assert_eq!(promise.get().await, Outcome::Completed(21));
        assert_eq!(broker.pending_events(), 0);
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_subscriber() {
        let broker = Broker::new();
        let a = registered(&broker, "a");
        let b = registered(&broker, "b");
        let c = registered(&broker, "c");
        broker.subscribe_broadcast::<Tick>(&a).await;
        broker.subscribe_broadcast::<Tick>(&b).await;

        assert_eq!(broker.send_broadcast(Tick).await, 2);

        assert!(broker.await_message(&a).await.unwrap().downcast_ref::<Tick>().is_some());
        assert!(broker.await_message(&b).await.unwrap().downcast_ref::<Tick>().is_some());
        let silent = tokio::time::timeout(Duration::from_millis(20), broker.await_message(&c)).await;
        assert!(silent.is_err(), "non-subscriber received a broadcast");
    }

    #[tokio::test]
    async fn test_nobody_subscribed_is_not_an_error() {
        let broker = Broker::new();
        registered(&broker, "lonely");

        assert!(broker.send_event(Ping(1)).await.is_none());
        assert_eq!(broker.send_broadcast(Tick).await, 0);
        assert_eq!(broker.pending_events(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_and_unregistered_subscriptions_are_ignored() {
        let broker = Broker::new();
        let a = registered(&broker, "a");
        let ghost = actor("ghost");

        assert!(broker.subscribe_event::<Ping>(&a).await);
        assert!(!broker.subscribe_event::<Ping>(&a).await);
        assert!(!broker.subscribe_broadcast::<Tick>(&ghost).await);
        assert_eq!(broker.subscriber_count::<Ping>().await, 1);
        assert_eq!(broker.subscriber_count::<Tick>().await, 0);
    }

    #[tokio::test]
    async fn test_unregister_resolves_held_events_unserved() {
        let broker = Broker::new();
        let a = registered(&broker, "a");
        broker.subscribe_event::<Ping>(&a).await;
        broker.subscribe_broadcast::<Tick>(&a).await;

        let queued = broker.send_event(Ping(1)).await.unwrap();
        let in_hand = broker.send_event(Ping(2)).await.unwrap();
        let message = broker.await_message(&a).await.unwrap();
        let ticket = ticket_of(&message);

        broker.unregister(&a).await;

        assert_eq!(queued.get().await, Outcome::Unserved);
        assert_eq!(in_hand.get().await, Outcome::Unserved);
        assert!(!broker.complete(&ticket, 5));
        assert!(!broker.is_registered(&a));
        assert_eq!(broker.subscriber_count::<Ping>().await, 0);
        assert_eq!(broker.subscriber_count::<Tick>().await, 0);
        assert!(broker.send_event(Ping(3)).await.is_none());
    }

    #[tokio::test]
    async fn test_unregister_leaves_other_subscribers_in_rotation() {
        let broker = Broker::new();
        let a = registered(&broker, "a");
        let b = registered(&broker, "b");
        broker.subscribe_event::<Ping>(&a).await;
        broker.subscribe_event::<Ping>(&b).await;

        broker.unregister(&a).await;
        broker.send_event(Ping(1)).await.unwrap();
        broker.send_event(Ping(2)).await.unwrap();

        assert_eq!(broker.mailbox_len(&b), Some(2));
    }

    #[tokio::test]
    async fn test_await_message_errors() {
        let broker = Broker::new();
        let ghost = actor("ghost");
        assert_eq!(
            broker.await_message(&ghost).await.unwrap_err(),
            BrokerError::NotRegistered(ghost.clone())
        );

        let a = registered(&broker, "a");
        let waiter = {
            let broker = broker.clone();
            let a = a.clone();
            tokio::spawn(async move { broker.await_message(&a).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        broker.unregister(&a).await;

        assert_eq!(waiter.await.unwrap().unwrap_err(), BrokerError::MailboxClosed(a));
    }

    #[test]
    fn test_default_matches_new() {
        assert_eq!(Broker::default().inner.limits, CONFIG.limits);
    }

    #[tokio::test]
    async fn test_reregistration_starts_with_nothing_pending() {
        let broker = Broker::new();
        let a = registered(&broker, "a");
        broker.subscribe_event::<Ping>(&a).await;
        let before = broker.send_event(Ping(1)).await.unwrap();
        broker.unregister(&a).await;
        assert_eq!(before.get().await, Outcome::Unserved);

        broker.register(&a);
        broker.subscribe_event::<Ping>(&a).await;
        let after = broker.send_event(Ping(2)).await.unwrap();
        assert!(!after.is_done());
        assert_eq!(broker.pending_events(), 1);

        let message = broker.await_message(&a).await.unwrap();
        assert!(broker.complete(&ticket_of(&message), 2));
        assert_eq!(after.get().await, Outcome::Completed(2));
    }

    /// Answers every `Ping` in `id`'s mailbox with its own value until unregistered.
    fn spawn_echo(broker: &Broker, id: ActorId) -> tokio::task::JoinHandle<()> {
        let broker = broker.clone();
        tokio::spawn(async move {
            while let Ok(message) = broker.await_message(&id).await {
                let value = message.downcast_ref::<Ping>().map_or(0, |ping| ping.0);
                broker.complete(&ticket_of(&message), value);
            }
        })
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_senders_share_events_evenly() {
        const SENDERS: u32 = 8;
        const PER_SENDER: u32 = 60;
        let broker = Broker::new();
        let ids: Vec<ActorId> = ["e1", "e2", "e3", "e4"]
            .into_iter()
            .map(|name| registered(&broker, name))
            .collect();
        for id in &ids {
            broker.subscribe_event::<Ping>(id).await;
        }

        let senders: Vec<_> = (0..SENDERS)
            .map(|sender| {
                let broker = broker.clone();
                tokio::spawn(async move {
                    let mut promises = Vec::new();
                    for n in 0..PER_SENDER {
                        let value = sender * PER_SENDER + n;
                        let promise = broker.send_event(Ping(value)).await.unwrap();
                        promises.push((value, promise));
                    }
                    promises
                })
            })
            .collect();
        let mut promises = Vec::new();
        for sender in senders {
            promises.extend(sender.await.unwrap());
        }

        // Every event sits in exactly one mailbox, and the rotation split them evenly.
        let total = (SENDERS * PER_SENDER) as usize;
        assert_eq!(broker.pending_events(), total);
        for id in &ids {
            assert_eq!(broker.mailbox_len(id), Some(total / ids.len()));
        }

        let workers: Vec<_> = ids.iter().map(|id| spawn_echo(&broker, id.clone())).collect();
        for (value, promise) in &promises {
            let outcome = promise.get_timeout(Duration::from_secs(5)).await;
            assert_eq!(outcome, Some(Outcome::Completed(*value)));
        }
        assert_eq!(broker.pending_events(), 0);

        for id in &ids {
            broker.unregister(id).await;
        }
        for worker in workers {
            worker.await.unwrap();
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_subscription_churn_leaves_no_event_pending() {
        let broker = Broker::new();
        let anchor = registered(&broker, "anchor");
        broker.subscribe_event::<Ping>(&anchor).await;
        let anchor_worker = spawn_echo(&broker, anchor.clone());

        let churn = {
            let broker = broker.clone();
            tokio::spawn(async move {
                for round in 0..25 {
                    let id = registered(&broker, &format!("churn{round}"));
                    assert!(broker.subscribe_event::<Ping>(&id).await);
                    let worker = spawn_echo(&broker, id.clone());
                    tokio::time::sleep(Duration::from_millis(1)).await;
                    broker.unregister(&id).await;
                    assert!(!broker.is_registered(&id));
                    assert_eq!(broker.mailbox_len(&id), None);
                    worker.await.unwrap();
                }
            })
        };

        let senders: Vec<_> = (0..4u32)
            .map(|sender| {
                let broker = broker.clone();
                tokio::spawn(async move {
                    for n in 0..100 {
                        let value = sender * 100 + n;
                        let promise = broker.send_event(Ping(value)).await.unwrap();
                        match promise.get_timeout(Duration::from_secs(5)).await {
                            Some(Outcome::Completed(answer)) => assert_eq!(answer, value),
                            Some(Outcome::Unserved) => {}
                            None => panic!("event {value} was never resolved"),
                        }
                    }
                })
            })
            .collect();
        for sender in senders {
            sender.await.unwrap();
        }
        churn.await.unwrap();

        assert_eq!(broker.pending_events(), 0);
        assert_eq!(broker.subscribers::<Ping>().await, vec![anchor.clone()]);
        broker.unregister(&anchor).await;
        anchor_worker.await.unwrap();
    }
}
