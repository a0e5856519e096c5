//! Cancellable polling of long-running video jobs.

use mindful_core::MediaPayload;
use mindful_error::{GenerationError, GenerationErrorKind, GenerationStage};
use mindful_interface::{VideoGeneration, VideoJob, VideoJobStatus, VideoRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

const VIDEO_MIME: &str = "video/mp4";

fn media_error(kind: GenerationErrorKind) -> GenerationError {
    GenerationError::new(GenerationStage::Media, kind)
}

/// A submitted video job, ready to be awaited.
///
/// [`wait`](Self::wait) polls on a fixed interval until the job is done,
/// then downloads the clip exactly once. The whole wait is bounded by a
/// wall-clock deadline and stops as soon as the cancellation token fires.
pub struct VideoRenderJob<D: ?Sized> {
    driver: Arc<D>,
    job: VideoJob,
    poll_interval: Duration,
    deadline: Duration,
    cancel: CancellationToken,
}

impl<D> VideoRenderJob<D>
where
    D: VideoGeneration + ?Sized,
{
    /// Submit a job.
    ///
    /// `cancel` governs the job for its whole life, including submission.
    #[instrument(skip_all, fields(mode = %request.mode()))]
    pub async fn submit(
        driver: Arc<D>,
        request: &VideoRequest,
        poll_interval: Duration,
        deadline: Duration,
        cancel: CancellationToken,
    ) -> Result<Self, GenerationError> {
        let job = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(media_error(GenerationErrorKind::Cancelled)),
            result = driver.submit_video(request) => result
                .map_err(|e| GenerationError::service(GenerationStage::Media, e))?,
        };

        info!(operation = %job.name, "Video job submitted");
        Ok(Self {
            driver,
            job,
            poll_interval,
            deadline,
            cancel,
        })
    }

    /// Handle of the submitted job.
    pub fn job(&self) -> &VideoJob {
        &self.job
    }

    /// Token that cancels this job.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    async fn poll_until_done(&self) -> Result<VideoJobStatus, GenerationError> {
        let mut polls = 0u32;
        loop {
            tokio::time::sleep(self.poll_interval).await;
            let status = self
                .driver
                .poll_video(&self.job)
                .await
                .map_err(|e| GenerationError::service(GenerationStage::Media, e))?;
            polls += 1;
            if status.done {
                debug!(polls, "Video job finished");
                return Ok(status);
            }
            debug!(polls, "Video job still running");
        }
    }

    /// Wait for the job to finish and download the clip.
    ///
    /// # Errors
    ///
    /// Fails at the media stage with:
    /// - `Cancelled` when the token fires first
    /// - `Timeout` when the deadline passes before the job is done
    /// - `Service` when polling fails or the job reports an error
    /// - `MissingOutput` when a finished job has no download location
    #[instrument(skip(self), fields(operation = %self.job.name))]
    pub async fn wait(self) -> Result<MediaPayload, GenerationError> {
        let deadline_at = Instant::now() + self.deadline;

        let status = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                info!("Video job cancelled, polling stopped");
                return Err(media_error(GenerationErrorKind::Cancelled));
            }
            _ = tokio::time::sleep_until(deadline_at) => {
                warn!(deadline_secs = self.deadline.as_secs(), "Video job exceeded deadline");
                return Err(media_error(GenerationErrorKind::Timeout {
                    elapsed_secs: self.deadline.as_secs(),
                }));
            }
            status = self.poll_until_done() => status?,
        };

        if let Some(message) = status.error {
            return Err(media_error(GenerationErrorKind::Service(message)));
        }
        let Some(uri) = status.result_uri else {
            return Err(media_error(GenerationErrorKind::MissingOutput(
                "video location".to_string(),
            )));
        };

        let data = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(media_error(GenerationErrorKind::Cancelled)),
            result = self.driver.fetch_video(&uri) => result
                .map_err(|e| GenerationError::service(GenerationStage::Media, e))?,
        };

        if data.is_empty() {
            return Err(media_error(GenerationErrorKind::MissingOutput(
                "video bytes".to_string(),
            )));
        }

        info!(bytes = data.len(), "Video downloaded");
        Ok(MediaPayload::new(VIDEO_MIME, data))
    }
}

impl<D> VideoRenderJob<D>
where
    D: VideoGeneration + ?Sized + 'static,
{
    /// Run [`wait`](Self::wait) on a background task.
    pub fn spawn(self) -> RenderHandle {
        let cancel = self.cancel.clone();
        let task = tokio::spawn(self.wait());
        RenderHandle { cancel, task }
    }
}

/// Handle to a video job running in the background.
#[derive(Debug)]
pub struct RenderHandle {
    cancel: CancellationToken,
    task: JoinHandle<Result<MediaPayload, GenerationError>>,
}

impl RenderHandle {
    /// Stop polling. [`join`](Self::join) then yields `Cancelled`.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the background task has completed.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the background task's outcome.
    pub async fn join(self) -> Result<MediaPayload, GenerationError> {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => Err(media_error(GenerationErrorKind::Cancelled)),
            Err(e) => Err(GenerationError::service(
                GenerationStage::Media,
                format!("render task failed: {}", e),
            )),
        }
    }
}
