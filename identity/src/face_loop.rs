//! Periodic face-authentication loop.
//!
//! Captures a frame and submits it to the identity service on a fixed
//! interval until one of four things happens: the service accepts the face,
//! the failure ceiling is reached, the caller cancels, or the loop is torn
//! down. On every exit path the camera is released and no further attempts
//! run.

use crate::camera::{to_data_url, FrameSource};
use crate::client::IdentityClient;
use crate::error::IdentityError;

use scrutin_types::{Role, WalletAddress};
use std::future::Future;
use std::time::Duration;
use tokio::sync::broadcast;

/// Timing and retry limits for the face-authentication loop.
#[derive(Clone, Copy, Debug)]
pub struct FaceAuthConfig {
    /// Delay between attempts.
    pub interval: Duration,
    /// Consecutive-failure ceiling; reaching it stops the loop.
    pub max_failures: u32,
}

impl Default for FaceAuthConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            max_failures: 5,
        }
    }
}

/// How the loop ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FaceAuthOutcome {
    /// The service recognized the face and bound a role.
    Authenticated(Role),
    /// The failure ceiling was reached; terminal for this attempt series.
    RetriesExhausted { attempts: u32 },
    /// The caller cancelled (navigation away or teardown).
    Cancelled,
}

/// Run the face-authentication loop against the identity service.
pub async fn run_face_auth<S: FrameSource>(
    client: &IdentityClient,
    address: &WalletAddress,
    source: S,
    config: FaceAuthConfig,
    cancel: broadcast::Receiver<()>,
) -> FaceAuthOutcome {
    let verify = |image: String| {
        let client = client.clone();
        let address = address.clone();
        async move { client.verify_face(&address, &image).await }
    };
    run_face_auth_with_verifier(source, verify, config, cancel).await
}

/// Loop core, generic over the verification call so it can be exercised
/// without a live identity service.
pub async fn run_face_auth_with_verifier<S, F, Fut>(
    mut source: S,
    mut verify: F,
    config: FaceAuthConfig,
    mut cancel: broadcast::Receiver<()>,
) -> FaceAuthOutcome
where
    S: FrameSource,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Role, IdentityError>>,
{
    let mut ticker = tokio::time::interval(config.interval);
    let mut failures = 0u32;

    loop {
        tokio::select! {
            _ = cancel.recv() => {
                tracing::debug!("face authentication cancelled");
                source.release();
                return FaceAuthOutcome::Cancelled;
            }
            _ = ticker.tick() => {
                match attempt(&mut source, &mut verify).await {
                    Ok(role) => {
                        tracing::info!(%role, "face authentication succeeded");
                        source.release();
                        return FaceAuthOutcome::Authenticated(role);
                    }
                    Err(err) => {
                        failures += 1;
                        tracing::warn!(%err, failures, "face authentication attempt failed");
                        if failures >= config.max_failures {
                            source.release();
                            return FaceAuthOutcome::RetriesExhausted { attempts: failures };
                        }
                    }
                }
            }
        }
    }
}

async fn attempt<S, F, Fut>(source: &mut S, verify: &mut F) -> Result<Role, IdentityError>
where
    S: FrameSource,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Role, IdentityError>>,
{
    let frame = source.capture_frame()?;
    verify(to_data_url(&frame)).await
}
