//! Continuous-detection capture loop
//!
//! ## Responsibilities
//!
//! - Tick at the requested interval, skipping idle sources
//! - Grab and JPEG-encode the current frame per tick
//! - Hand each upload to its own task so ticks stay time-driven
//!
//! Aborting the returned handle cancels future ticks only; uploads already
//! dispatched run to completion and may still invoke the callback once.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::detection_client::{DetectionClient, ResultCallback};
use crate::video_source::{FrameEncoder, VideoSource};

/// Spawn the capture loop task
pub(crate) fn spawn_capture_loop(
    client: Arc<DetectionClient>,
    source: Arc<dyn VideoSource>,
    callback: ResultCallback,
    encoder: FrameEncoder,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        // First tick lands one full interval after start
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            if source.is_idle() {
                debug!("Video source idle, skipping tick");
                continue;
            }

            let frame = match source.grab_frame().await {
                Ok(frame) => frame,
                Err(e) => {
                    warn!(error = %e, "Frame grab failed");
                    continue;
                }
            };

            let jpeg = match encoder.encode(&frame) {
                Ok(jpeg) => jpeg,
                Err(e) => {
                    warn!(error = %e, "Frame encode failed");
                    continue;
                }
            };

            // Upload on its own task: a slow request must not hold up the ticker
            let client = Arc::clone(&client);
            let callback = Arc::clone(&callback);
            tokio::spawn(async move {
                match client.process_frame(jpeg).await {
                    Ok(result) => callback(result),
                    Err(e) => {
                        warn!(error = %e, "Frame processing unavailable");
                    }
                }
            });
        }
    })
}
