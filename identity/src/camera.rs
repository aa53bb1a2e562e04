//! Camera abstraction for face capture.

use crate::error::IdentityError;
use base64::engine::general_purpose::STANDARD as B64_ENGINE;
use base64::Engine;

/// A source of camera frames.
///
/// The face-authentication loop captures one frame per attempt and releases
/// the source on every exit path, so implementations can hold real device
/// handles safely.
pub trait FrameSource: Send {
    /// Capture one frame as encoded JPEG bytes.
    fn capture_frame(&mut self) -> Result<Vec<u8>, IdentityError>;

    /// Release the underlying device. Called exactly once, after which no
    /// further captures are attempted.
    fn release(&mut self);
}

/// Encode JPEG bytes as the `data:image/jpeg;base64,...` URL the identity
/// service expects.
pub fn to_data_url(jpeg: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", B64_ENGINE.encode(jpeg))
}
