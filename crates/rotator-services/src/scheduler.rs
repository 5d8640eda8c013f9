// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Periodic reshuffle task.

Runs on the tokio runtime next to the HTTP server. The first reshuffle fires
one full period after the task starts; the startup shuffle is done by
[`ContentRotationService::load`](crate::ContentRotationService::load).
A failed reshuffle ends the task with an error, which the process treats as
fatal.
*/

use crate::traits::ContentService;
use crate::types::{ServiceError, ServiceResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Reshuffles a content service at a fixed period until cancelled
pub struct ReshuffleScheduler {
    service: Arc<dyn ContentService + Send + Sync>,
    period: Duration,
}

impl ReshuffleScheduler {
    pub fn new(
        service: Arc<dyn ContentService + Send + Sync>,
        period: Duration,
    ) -> ServiceResult<Self> {
        if period.is_zero() {
            return Err(ServiceError::InvalidInput(
                "reshuffle period must be greater than zero".to_string(),
            ));
        }
        Ok(Self { service, period })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run on a new task; the handle resolves when `cancel` fires or a
    /// reshuffle fails.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<ServiceResult<()>> {
        tokio::spawn(async move { self.run(cancel).await })
    }

    pub async fn run(self, cancel: CancellationToken) -> ServiceResult<()> {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            target: "rotator-services",
            "Reshuffle scheduler started (period {:?})",
            self.period
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(target: "rotator-services", "Reshuffle scheduler stopped");
                    return Ok(());
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.service.reshuffle().await {
                        error!(target: "rotator-services", "Scheduled reshuffle failed: {}", e);
                        return Err(e);
                    }
                    info!(target: "rotator-services", "Content reshuffled");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentStats;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};

    const HOUR: Duration = Duration::from_secs(3600);

    #[derive(Default)]
    struct CountingService {
        reshuffles: AtomicU64,
        fail: bool,
    }

    #[async_trait]
    impl ContentService for CountingService {
        async fn next_quote(&self) -> ServiceResult<String> {
            Ok("quote".to_string())
        }

        async fn next_image(&self) -> ServiceResult<crate::types::ImageFile> {
            Err(ServiceError::Internal("unused".to_string()))
        }

        async fn reshuffle(&self) -> ServiceResult<()> {
            if self.fail {
                return Err(ServiceError::RandomSource("entropy exhausted".to_string()));
            }
            self.reshuffles.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn get_content_stats(&self) -> ServiceResult<ContentStats> {
            Ok(ContentStats {
                quote_count: 1,
                image_count: 0,
                image_dir: PathBuf::new(),
                shuffle_count: self.reshuffles.load(Ordering::SeqCst),
            })
        }
    }

    #[test]
    fn test_zero_period_rejected() {
        let service = Arc::new(CountingService::default());
        assert!(matches!(
            ReshuffleScheduler::new(service, Duration::ZERO),
            Err(ServiceError::InvalidInput(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reshuffles_once_per_period() {
        let service = Arc::new(CountingService::default());
        let cancel = CancellationToken::new();
        let handle = ReshuffleScheduler::new(service.clone(), HOUR)
            .unwrap()
            .spawn(cancel.clone());

        tokio::time::sleep(HOUR * 3 + Duration::from_secs(1)).await;
        assert_eq!(service.reshuffles.load(Ordering::SeqCst), 3);

        cancel.cancel();
        assert!(handle.await.unwrap().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_reshuffle_before_first_period() {
        let service = Arc::new(CountingService::default());
        let cancel = CancellationToken::new();
        let handle = ReshuffleScheduler::new(service.clone(), HOUR)
            .unwrap()
            .spawn(cancel.clone());

        tokio::time::sleep(HOUR - Duration::from_secs(1)).await;
        assert_eq!(service.reshuffles.load(Ordering::SeqCst), 0);

        cancel.cancel();
        handle.await.unwrap().unwrap();
        assert_eq!(service.reshuffles.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_reshuffle_ends_task() {
        let service = Arc::new(CountingService {
            fail: true,
            ..Default::default()
        });
        let handle = ReshuffleScheduler::new(service, HOUR)
            .unwrap()
            .spawn(CancellationToken::new());

        let result = handle.await.unwrap();
        assert!(matches!(result, Err(ServiceError::RandomSource(_))));
    }
}
