//! HTTP gateway to the external identity verification service.
//!
//! The service is treated purely as an oracle: given a wallet address and a
//! credential proof (face image or WebAuthn assertion), it answers with a
//! role bound to that address. No cryptographic verification happens on
//! this side.

pub mod camera;
pub mod client;
pub mod error;
pub mod face_loop;

pub use camera::{to_data_url, FrameSource};
pub use client::IdentityClient;
pub use error::IdentityError;
pub use face_loop::{run_face_auth, run_face_auth_with_verifier, FaceAuthConfig, FaceAuthOutcome};
