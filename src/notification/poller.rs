use std::future::Future;
use std::time::Duration;

use tokio::{
    sync::oneshot,
    task::{JoinHandle, JoinSet},
    time::{self, Instant, MissedTickBehavior},
};

/// Handle to a running poll loop.
///
/// Dropping the handle (or calling [`PollerHandle::stop`]) stops future
/// ticks. Cycles already in flight run to completion.
pub struct PollerHandle {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stops the timer and waits for the cycles still in flight to finish.
    pub async fn stop(self) {
        let PollerHandle { stop, task } = self;
        let _ = stop.send(());
        if let Err(e) = task.await {
            tracing::error!("Poller task failed: {:?}", e);
        }
    }
}

/// Runs `initial` once right away, then `tick` every `period`.
///
/// Each cycle runs on its own task, so a slow cycle never holds back the
/// timer and cycles may overlap.
pub fn spawn<I, IFut, T, TFut>(name: &'static str, period: Duration, initial: I, tick: T) -> PollerHandle
where
    I: FnOnce() -> IFut + Send + 'static,
    IFut: Future<Output = ()> + Send + 'static,
    T: Fn() -> TFut + Send + 'static,
    TFut: Future<Output = ()> + Send + 'static,
{
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        tracing::debug!("Starting {} poller every {:?}", name, period);
        let mut in_flight = JoinSet::new();
        in_flight.spawn(initial());

        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                // Resolves on an explicit stop and when the handle is dropped.
                _ = &mut stop_rx => break,
                _ = interval.tick() => {
                    in_flight.spawn(tick());
                }
                Some(result) = in_flight.join_next(), if !in_flight.is_empty() => {
                    log_cycle_failure(name, result);
                }
            }
        }

        while let Some(result) = in_flight.join_next().await {
            log_cycle_failure(name, result);
        }

        tracing::debug!("Stopped {} poller", name);
    });

    PollerHandle {
        stop: stop_tx,
        task,
    }
}

fn log_cycle_failure(name: &str, result: Result<(), tokio::task::JoinError>) {
    if let Err(e) = result {
        tracing::error!("{} poll cycle failed: {:?}", name, e);
    }
}
