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
#![allow(dead_code, unused_doc_comments)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use courier::prelude::*;

use crate::setup::actors::{Counter, Worker};
use crate::setup::messages::{Ping, Square, SquarePlusOne, Tick, WhoAreYou};
use crate::setup::{initialize_tracing, wait_until};

mod setup;

/// Tests that an event sent through the broker reaches its handler and that the
/// handler's result resolves the sender's promise.
///
/// **Scenario:**
/// 1. Start a `Worker` that echoes `Ping` values and counts what it completes.
/// 2. Send `Ping(7)` and wait on the promise.
/// 3. Stop the actor; its `on_terminate` hook reports the count.
///
/// **Verification:**
/// - The promise resolves to `Outcome::Completed(7)`.
/// - The actor completed exactly one event and nothing is left pending.
#[tokio::test]
async fn test_event_round_trip() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = CourierApp::launch_async().await;
    let completed = Arc::new(AtomicU64::new(0));

    let mut echo = runtime.new_actor_with_name::<Worker>("echo")?;
    let report = completed.clone();
    echo.on_event::<Ping>(|actor, context| {
        actor.model.completed += 1;
        let value = context.message().0;
        Reply::complete(&context, value)
    })
    .on_terminate(move |actor| {
        report.store(actor.model.completed, Ordering::SeqCst);
        Reply::ready()
    });
    let handle = echo.start().await;

    let promise = runtime
        .broker()
        .send_event(Ping(7))
        .await
        .expect("echo is subscribed to Ping");
    assert_eq!(promise.get().await, Outcome::Completed(7));
    assert_eq!(runtime.broker().pending_events(), 0);

    handle.stop().await?;
    assert_eq!(completed.load(Ordering::SeqCst), 1);
    Ok(())
}

/// Tests that successive events of one type rotate over the actors subscribed to it.
///
/// **Scenario:**
/// 1. Start `alpha`, then `beta`, both answering `WhoAreYou` with their own name.
/// 2. Send three `WhoAreYou` events one after another.
///
/// **Verification:**
/// - The answers come from alpha, beta, then alpha again.
#[tokio::test]
async fn test_events_rotate_over_subscribers() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = CourierApp::launch_async().await;

    let mut handles = Vec::new();
    for name in ["alpha", "beta"] {
        let mut actor = runtime.new_actor_with_name::<Worker>(name)?;
        actor.on_event::<WhoAreYou>(|actor, context| {
            let name = actor.name().to_string();
            Reply::complete(&context, name)
        });
        handles.push(actor.start().await);
    }
    assert_eq!(runtime.broker().subscriber_count::<WhoAreYou>().await, 2);

    let mut answers = Vec::new();
    for _ in 0..3 {
        let promise = runtime
            .broker()
            .send_event(WhoAreYou)
            .await
            .expect("two actors are subscribed");
        answers.push(promise.get().await.into_option().unwrap_or_default());
    }

    assert!(answers[0].starts_with("alpha"), "got {answers:?}");
    assert!(answers[1].starts_with("beta"), "got {answers:?}");
    assert!(answers[2].starts_with("alpha"), "got {answers:?}");

    runtime.shutdown_all().await?;
    Ok(())
}

/// Tests that a handler may publish its own event and wait for the answer before
/// completing the one it was given.
///
/// **Scenario:**
/// 1. Start a `squarer` answering `Square`.
/// 2. Start a `relay` answering `SquarePlusOne` by sending `Square` and adding one.
/// 3. Send `SquarePlusOne(6)` from the test.
///
/// **Verification:**
/// - The promise resolves to 37.
#[tokio::test]
async fn test_handler_awaits_another_actor() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = CourierApp::launch_async().await;

    let mut squarer = runtime.new_actor_with_name::<Worker>("squarer")?;
    squarer.on_event::<Square>(|actor, context| {
        actor.model.completed += 1;
        let n = context.message().0;
        Reply::complete(&context, n * n)
    });
    squarer.start().await;

    let mut relay = runtime.new_actor_with_name::<Worker>("relay")?;
    relay.on_event::<SquarePlusOne>(|actor, context| {
        let broker = actor.broker().clone();
        Reply::pending(async move {
            let n = context.message().0;
            let squared = match broker.send_event(Square(n)).await {
                Some(promise) => promise.get().await.into_option().unwrap_or_default(),
                None => 0,
            };
            context.complete(squared + 1);
        })
    });
    relay.start().await;

    let promise = runtime
        .broker()
        .send_event(SquarePlusOne(6))
        .await
        .expect("relay is subscribed");
    let outcome = promise.get_timeout(Duration::from_secs(5)).await;
    assert_eq!(outcome, Some(Outcome::Completed(37)));

    runtime.shutdown_all().await?;
    Ok(())
}

/// Tests that a broadcast reaches every subscribed actor and nobody else.
///
/// **Scenario:**
/// 1. Start three `Counter` actors subscribed to `Tick` and one worker that is not.
/// 2. Broadcast `Tick { round: 1 }` and `Tick { round: 2 }`.
///
/// **Verification:**
/// - Each broadcast reports three deliveries.
/// - The counters see six ticks between them and each ends on round 2.
#[tokio::test]
async fn test_broadcast_reaches_every_subscriber() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = CourierApp::launch_async().await;
    let ticks = Arc::new(AtomicU64::new(0));
    let rounds = Arc::new(AtomicU64::new(0));

    for name in ["left", "middle", "right"] {
        let mut counter = runtime.new_actor_with_name::<Counter>(name)?;
        let ticks = ticks.clone();
        let rounds = rounds.clone();
        counter.on_broadcast::<Tick>(move |actor, context| {
            actor.model.count += 1;
            actor.model.last_round = context.message().round;
            ticks.fetch_add(1, Ordering::SeqCst);
            if actor.model.last_round == 2 {
                rounds.fetch_add(1, Ordering::SeqCst);
            }
            Reply::ready()
        });
        counter.start().await;
    }

    let mut bystander = runtime.new_actor_with_name::<Worker>("bystander")?;
    bystander.on_event::<Ping>(|_actor, context| {
        let value = context.message().0;
        Reply::complete(&context, value)
    });
    bystander.start().await;

    let broker = runtime.broker();
    assert_eq!(broker.send_broadcast(Tick { round: 1 }).await, 3);
    assert_eq!(broker.send_broadcast(Tick { round: 2 }).await, 3);

    let delivered = wait_until(Duration::from_secs(5), || {
        let ticks = ticks.clone();
        async move { ticks.load(Ordering::SeqCst) == 6 }
    })
    .await;
    assert!(delivered, "saw {} ticks", ticks.load(Ordering::SeqCst));
    assert!(
        wait_until(Duration::from_secs(5), || {
            let rounds = rounds.clone();
            async move { rounds.load(Ordering::SeqCst) == 3 }
        })
        .await
    );

    runtime.shutdown_all().await?;
    Ok(())
}

/// Tests that sending with no subscribers is harmless.
///
/// **Verification:**
/// - `send_event` returns `None` and `send_broadcast` reports zero deliveries.
#[tokio::test]
async fn test_publish_without_subscribers() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = CourierApp::launch_async().await;
    let broker = runtime.broker();

    assert!(broker.send_event(Ping(1)).await.is_none());
    assert_eq!(broker.send_broadcast(Tick { round: 0 }).await, 0);
    assert_eq!(broker.pending_events(), 0);
    Ok(())
}

/// Tests that actor handles publish through the broker like the broker itself.
///
/// **Scenario:**
/// 1. Start an echo actor and a silent actor with no handlers.
/// 2. Send `Ping(3)` through the silent actor's handle using the `Publisher` trait.
///
/// **Verification:**
/// - The echo actor answers with 3.
#[tokio::test]
async fn test_publish_through_handle() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = CourierApp::launch_async().await;

    let mut echo = runtime.new_actor_with_name::<Worker>("echo")?;
    echo.on_event::<Ping>(|_actor, context| {
        let value = context.message().0;
        Reply::complete(&context, value)
    });
    echo.start().await;

    let silent = runtime.new_actor_with_name::<Worker>("silent")?.start().await;
    let promise = Publisher::send_event(&silent, Ping(3))
        .await
        .expect("echo is subscribed");
    assert_eq!(promise.get().await.into_option(), Some(3));

    runtime.shutdown_all().await?;
    Ok(())
}
