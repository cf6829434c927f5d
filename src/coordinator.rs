//! Background task coordinator
//!
//! Runs background removal off the interactive control path and delivers
//! exactly one terminal outcome per submission back through an in-process
//! channel. The worker only computes and sends; all session state mutation
//! stays with whichever context consumes the deliveries.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use image::DynamicImage;
use instant::Instant;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::{EditorError, Result};
use crate::transform::BackgroundRemover;

/// Identifier of one background removal submission
pub type JobId = u64;

/// Terminal outcome of one submission: success image or failure diagnostic
#[derive(Debug)]
pub struct RemovalDelivery {
    /// The submission this delivery belongs to
    pub job: JobId,
    /// Success with the new image, or the captured failure
    pub result: Result<DynamicImage>,
    /// Worker-side execution time
    pub elapsed_ms: u64,
}

impl RemovalDelivery {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Coordinates background removal workers for one session
///
/// Submissions are serialized: a second `submit` while one is outstanding is
/// rejected with [`EditorError::WorkerBusy`]. Shells are expected to disable
/// the trigger while the session is busy. Each accepted submission produces
/// exactly one [`RemovalDelivery`] — success and failure are mutually
/// exclusive, and a panicking remover is converted into a failure delivery.
///
/// The consumer of `next_delivery`/`try_delivery` is the control context that
/// owns the session state; the worker never touches that state.
pub struct RemovalCoordinator {
    remover: Arc<dyn BackgroundRemover>,
    tx: mpsc::UnboundedSender<RemovalDelivery>,
    rx: mpsc::UnboundedReceiver<RemovalDelivery>,
    in_flight: Option<JobId>,
    next_job: JobId,
}

impl RemovalCoordinator {
    /// Create a coordinator that runs the given remover on worker contexts
    #[must_use]
    pub fn new(remover: Arc<dyn BackgroundRemover>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            remover,
            tx,
            rx,
            in_flight: None,
            next_job: 1,
        }
    }

    /// Whether a submission is outstanding
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Submit an image for background removal on a worker context
    ///
    /// Returns immediately; the control path stays responsive for the whole
    /// run. Must be called within a tokio runtime.
    ///
    /// # Errors
    /// - `EditorError::WorkerBusy` when a submission is already outstanding
    pub fn submit(&mut self, image: DynamicImage) -> Result<JobId> {
        if self.in_flight.is_some() {
            return Err(EditorError::WorkerBusy);
        }

        let job = self.next_job;
        self.next_job += 1;

        let remover = Arc::clone(&self.remover);
        let tx = self.tx.clone();
        debug!(job, remover = remover.name(), "submitting background removal");

        tokio::task::spawn_blocking(move || {
            let started = Instant::now();
            // A panicking remover must still produce its single delivery.
            let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
                remover.remove_background(&image)
            }))
            .unwrap_or_else(|_| {
                Err(EditorError::transform("background removal worker panicked"))
            });

            let result = result.map_err(|e| match e {
                EditorError::Transform(_) => e,
                other => EditorError::transform(other.to_string()),
            });

            let delivery = RemovalDelivery {
                job,
                result,
                elapsed_ms: started.elapsed().as_millis() as u64,
            };
            if tx.send(delivery).is_err() {
                // Session ended while the worker was running; nowhere to deliver.
                warn!(job, "removal delivery dropped, session gone");
            }
        });

        self.in_flight = Some(job);
        Ok(job)
    }

    /// Await the delivery of the outstanding submission
    ///
    /// Returns `None` immediately when nothing is in flight. Receiving a
    /// delivery clears the busy state; the caller applies the result to the
    /// session on its own turn.
    pub async fn next_delivery(&mut self) -> Option<RemovalDelivery> {
        self.in_flight?;
        let delivery = self.rx.recv().await;
        self.in_flight = None;
        delivery
    }

    /// Take the delivery if one has already arrived, without blocking
    ///
    /// Suited to UI loops that poll once per frame or event turn.
    pub fn try_delivery(&mut self) -> Option<RemovalDelivery> {
        match self.rx.try_recv() {
            Ok(delivery) => {
                self.in_flight = None;
                Some(delivery)
            },
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::test_utils::{
        CircleMaskRemover, FailingRemover, PanickingRemover, SlowRemover,
    };
    use image::{Rgba, RgbaImage};
    use std::time::Duration;

    fn test_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([90, 90, 90, 255]),
        ))
    }

    #[tokio::test]
    async fn test_successful_delivery() {
        let mut coordinator = RemovalCoordinator::new(Arc::new(CircleMaskRemover));
        assert!(!coordinator.is_busy());

        let job = coordinator.submit(test_image(20, 20)).unwrap();
        assert!(coordinator.is_busy());

        let delivery = coordinator.next_delivery().await.unwrap();
        assert_eq!(delivery.job, job);
        assert!(delivery.is_success());
        assert!(!coordinator.is_busy());
    }

    #[tokio::test]
    async fn test_failure_delivery_carries_diagnostic() {
        let mut coordinator = RemovalCoordinator::new(Arc::new(FailingRemover));

        coordinator.submit(test_image(8, 8)).unwrap();
        let delivery = coordinator.next_delivery().await.unwrap();

        assert!(!delivery.is_success());
        let err = delivery.result.unwrap_err();
        assert!(err.to_string().contains(FailingRemover::DIAGNOSTIC));
        assert!(!coordinator.is_busy());
    }

    #[tokio::test]
    async fn test_double_submission_rejected() {
        let mut coordinator = RemovalCoordinator::new(Arc::new(SlowRemover {
            delay: Duration::from_millis(100),
        }));

        let first = coordinator.submit(test_image(8, 8)).unwrap();
        let second = coordinator.submit(test_image(8, 8));
        assert!(matches!(second, Err(EditorError::WorkerBusy)));

        // The outstanding job is undisturbed and still delivers exactly once.
        let delivery = coordinator.next_delivery().await.unwrap();
        assert_eq!(delivery.job, first);
        assert!(delivery.is_success());
        assert!(coordinator.try_delivery().is_none());
    }

    #[tokio::test]
    async fn test_panicking_remover_becomes_failure() {
        let mut coordinator = RemovalCoordinator::new(Arc::new(PanickingRemover));

        coordinator.submit(test_image(4, 4)).unwrap();
        let delivery = coordinator.next_delivery().await.unwrap();

        assert!(!delivery.is_success());
        assert!(matches!(
            delivery.result,
            Err(EditorError::Transform(_))
        ));
        assert!(!coordinator.is_busy());
    }

    #[tokio::test]
    async fn test_next_delivery_idle_returns_none() {
        let mut coordinator = RemovalCoordinator::new(Arc::new(CircleMaskRemover));
        assert!(coordinator.next_delivery().await.is_none());
        assert!(coordinator.try_delivery().is_none());
    }

    #[tokio::test]
    async fn test_try_delivery_eventually_observes_result() {
        let mut coordinator = RemovalCoordinator::new(Arc::new(CircleMaskRemover));
        coordinator.submit(test_image(10, 10)).unwrap();

        // Poll like a UI loop would.
        let mut delivery = None;
        for _ in 0..200 {
            if let Some(d) = coordinator.try_delivery() {
                delivery = Some(d);
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        assert!(delivery.unwrap().is_success());
    }
}
