use std::{sync::Arc, time::Duration};

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running,
}

/// Fixed-period ticker that pushes a message into a channel.
///
/// At most one interval task exists: `start` aborts the previous one before
/// spawning, `stop` aborts it. Neither touches work the ticks already started.
pub struct PollTimer<T> {
    period: Duration,
    tx: mpsc::Sender<T>,
    make_tick: Arc<dyn Fn() -> T + Send + Sync>,
    handle: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> PollTimer<T> {
    pub fn new(
        period: Duration,
        tx: mpsc::Sender<T>,
        make_tick: impl Fn() -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            period,
            tx,
            make_tick: Arc::new(make_tick),
            handle: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> TimerState {
        match &self.handle {
            Some(h) if !h.is_finished() => TimerState::Running,
            _ => TimerState::Stopped,
        }
    }

    pub fn start(&mut self) {
        self.stop();

        let tx = self.tx.clone();
        let make_tick = Arc::clone(&self.make_tick);
        let period = self.period;

        self.handle = Some(tokio::spawn(async move {
            // first tick one full period after start
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if tx.send(make_tick()).await.is_err() {
                    break;
                }
            }
        }));

        tracing::debug!("poll timer started (period={:?})", period);
    }

    pub fn stop(&mut self) {
        if let Some(h) = self.handle.take() {
            h.abort();
            tracing::debug!("poll timer stopped");
        }
    }
}

impl<T> Drop for PollTimer<T> {
    fn drop(&mut self) {
        if let Some(h) = self.handle.take() {
            h.abort();
        }
    }
}
