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
//! A clock task broadcasts ticks and hands out jobs; two workers share the jobs
//! round-robin and both watch the ticks.
//!
//! Run with: `cargo run --example ticker`

use std::time::Duration;

use courier::prelude::*;
use tracing_subscriber::EnvFilter;

#[courier_actor]
struct Worker {
    jobs_done: u32,
    ticks_seen: u32,
    last_tick: u32,
}

/// Broadcast once per round.
#[courier_broadcast]
struct Tick(u32);

/// A unit of work answered with the name of the worker that did it.
#[courier_event(reply = String)]
struct Job(u32);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .init();

    let runtime = CourierApp::launch_async().await;

    for name in ["north", "south"] {
        let mut worker = runtime.new_actor_with_name::<Worker>(name)?;
        worker
            .on_event::<Job>(|actor, context| {
                actor.model.jobs_done += 1;
                tracing::info!(job = context.message().0, worker = actor.name(), "working");
                let name = actor.name().to_string();
                Reply::complete(&context, name)
            })
            .on_broadcast::<Tick>(|actor, context| {
                actor.model.ticks_seen += 1;
                actor.model.last_tick = context.message().0;
                Reply::ready()
            })
            .on_terminate(|actor| {
                println!(
                    "{} did {} jobs and saw {} ticks, the last one round {}",
                    actor.name(),
                    actor.model.jobs_done,
                    actor.model.ticks_seen,
                    actor.model.last_tick
                );
                Reply::ready()
            });
        worker.start().await;
    }

    // The clock is a plain task: it publishes but never registers.
    let broker = runtime.broker();
    let clock = tokio::spawn(async move {
        for round in 0..5 {
            let watchers = broker.send_broadcast(Tick(round)).await;
            let Some(promise) = broker.send_event(Job(round)).await else {
                break;
            };
            let done_by = promise.get().await.into_option().unwrap_or_default();
            println!("round {round}: {watchers} watchers, job done by {done_by}");
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    });

    clock.await?;
    runtime.shutdown_all().await
}
