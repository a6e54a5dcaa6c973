// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! Continuous mode: batch, sleep, repeat until shutdown

use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info};

use super::Engine;
use crate::error::Result;

pub struct Scheduler {
    interval: Duration,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Run batches until `shutdown` fires; returns the number of batches
    ///
    /// Shutdown is only observed between batches, so a batch that has
    /// started always runs to its last line.
    pub async fn run(&self, engine: &mut Engine, mut shutdown: broadcast::Receiver<()>) -> Result<u64> {
        info!("Continuous mode, one batch every {:?}", self.interval);
        let mut batches = 0u64;

        loop {
            let summary = engine.generate_sample_data().await?;
            batches += 1;
            debug!("Batch {} wrote {} records", batches, summary.total());

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.recv() => {
                    info!("Shutdown requested after {} batches", batches);
                    break;
                }
            }
        }

        Ok(batches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::tests::{engine_with, FakeReceiver};

    fn total_lines(engine: &Engine) -> usize {
        std::fs::read_dir(engine.writer().dir())
            .unwrap()
            .map(|entry| {
                std::fs::read_to_string(entry.unwrap().path())
                    .unwrap()
                    .lines()
                    .count()
            })
            .sum()
    }

    #[tokio::test]
    async fn test_shutdown_between_batches() {
        let mut engine = engine_with(FakeReceiver::new(0, None)).await;
        let (tx, rx) = broadcast::channel(1);

        let scheduler = Scheduler::new(Duration::from_millis(20));
        let stopper = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(70)).await;
            let _ = tx.send(());
        });

        let batches = scheduler.run(&mut engine, rx).await.unwrap();
        stopper.await.unwrap();

        assert!(batches >= 1);
        assert_eq!(total_lines(&engine), 14 * batches as usize);
        std::fs::remove_dir_all(engine.writer().dir()).unwrap();
    }

    #[tokio::test]
    async fn test_pending_shutdown_still_finishes_first_batch() {
        let mut engine = engine_with(FakeReceiver::new(0, None)).await;
        let (tx, rx) = broadcast::channel(1);
        tx.send(()).unwrap();

        let batches = Scheduler::new(Duration::from_secs(3600)).run(&mut engine, rx).await.unwrap();

        assert_eq!(batches, 1);
        assert_eq!(total_lines(&engine), 14);
        std::fs::remove_dir_all(engine.writer().dir()).unwrap();
    }
}
