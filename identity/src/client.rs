//! HTTP client for the identity verification service endpoints.

use crate::error::IdentityError;

use scrutin_types::{Role, WalletAddress};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default timeout for identity service requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the identity verification HTTP API.
///
/// All endpoints are JSON POSTs under one base URL. Every response carries
/// at minimum `{"success": bool, "message"?: string, "role"?: string}`.
#[derive(Clone)]
pub struct IdentityClient {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    base_url: String,
}

/// Raw JSON envelope every identity endpoint answers with.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Challenge blob from the WebAuthn begin endpoints (opaque to us).
    #[serde(default)]
    pub challenge: Option<serde_json::Value>,
}

impl ApiResponse {
    /// Treat `success: false` as a rejection carrying the service's message.
    fn accepted(self) -> Result<ApiResponse, IdentityError> {
        if self.success {
            Ok(self)
        } else {
            Err(IdentityError::Rejected(
                self.message
                    .unwrap_or_else(|| "identity service declined the request".into()),
            ))
        }
    }

    /// Extract and parse the bound role.
    fn role(self) -> Result<Role, IdentityError> {
        let raw = self
            .role
            .ok_or_else(|| IdentityError::InvalidResponse("response carries no role".into()))?;
        raw.parse().map_err(IdentityError::UnknownRole)
    }
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    ethereum_address: &'a str,
    role: String,
    consent: bool,
    face_image: &'a str,
}

#[derive(Serialize)]
struct VerifyFaceRequest<'a> {
    ethereum_address: &'a str,
    face_image: &'a str,
}

#[derive(Serialize)]
struct WebAuthnBeginRequest<'a> {
    ethereum_address: &'a str,
}

#[derive(Serialize)]
struct WebAuthnCompleteRequest<'a> {
    ethereum_address: &'a str,
    credential: serde_json::Value,
}

impl IdentityClient {
    /// Create a client with default timeouts against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Enroll a face template for an address. `POST /register`.
    pub async fn register(
        &self,
        address: &WalletAddress,
        role: Role,
        consent: bool,
        face_image: &str,
    ) -> Result<(), IdentityError> {
        let body = RegisterRequest {
            ethereum_address: address.as_str(),
            role: role.to_string(),
            consent,
            face_image,
        };
        self.post("/register", &body).await?.accepted()?;
        Ok(())
    }

    /// Verify a face image against the enrolled template and return the
    /// bound role. `POST /verify-face`.
    pub async fn verify_face(
        &self,
        address: &WalletAddress,
        face_image: &str,
    ) -> Result<Role, IdentityError> {
        let body = VerifyFaceRequest {
            ethereum_address: address.as_str(),
            face_image,
        };
        self.post("/verify-face", &body).await?.accepted()?.role()
    }

    /// Begin WebAuthn credential enrollment; returns the opaque challenge
    /// blob the authenticator must sign. `POST /webauthn/register-begin`.
    pub async fn webauthn_register_begin(
        &self,
        address: &WalletAddress,
    ) -> Result<serde_json::Value, IdentityError> {
        let body = WebAuthnBeginRequest {
            ethereum_address: address.as_str(),
        };
        let resp = self.post("/webauthn/register-begin", &body).await?.accepted()?;
        resp.challenge
            .ok_or_else(|| IdentityError::InvalidResponse("response carries no challenge".into()))
    }

    /// Complete WebAuthn enrollment with the signed proof.
    /// `POST /webauthn/register-complete`.
    pub async fn webauthn_register_complete(
        &self,
        address: &WalletAddress,
        credential: serde_json::Value,
    ) -> Result<(), IdentityError> {
        let body = WebAuthnCompleteRequest {
            ethereum_address: address.as_str(),
            credential,
        };
        self.post("/webauthn/register-complete", &body).await?.accepted()?;
        Ok(())
    }

    /// Begin WebAuthn authentication; returns the assertion challenge.
    /// `POST /webauthn/authenticate-begin`.
    pub async fn webauthn_authenticate_begin(
        &self,
        address: &WalletAddress,
    ) -> Result<serde_json::Value, IdentityError> {
        let body = WebAuthnBeginRequest {
            ethereum_address: address.as_str(),
        };
        let resp = self
            .post("/webauthn/authenticate-begin", &body)
            .await?
            .accepted()?;
        resp.challenge
            .ok_or_else(|| IdentityError::InvalidResponse("response carries no challenge".into()))
    }

    /// Complete WebAuthn authentication and return the bound role.
    /// `POST /webauthn/authenticate-complete`.
    pub async fn webauthn_authenticate_complete(
        &self,
        address: &WalletAddress,
        credential: serde_json::Value,
    ) -> Result<Role, IdentityError> {
        let body = WebAuthnCompleteRequest {
            ethereum_address: address.as_str(),
            credential,
        };
        self.post("/webauthn/authenticate-complete", &body)
            .await?
            .accepted()?
            .role()
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse, IdentityError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IdentityError::Unreachable(format!("request timed out: {e}"))
                } else if e.is_connect() {
                    IdentityError::Unreachable(format!("connection failed: {e}"))
                } else {
                    IdentityError::RequestFailed(e.to_string())
                }
            })?;

        // The service reports failures in the JSON envelope, sometimes with
        // a non-2xx status; parse the body first and fall back to the status.
        let status = response.status();
        match response.json::<ApiResponse>().await {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => {
                Err(IdentityError::RequestFailed(format!("HTTP status {status}")))
            }
            Err(e) => Err(IdentityError::InvalidResponse(format!(
                "failed to parse identity response: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation_normalizes_base_url() {
        let client = IdentityClient::new("https://auth.local:5000/");
        assert_eq!(client.base_url, "https://auth.local:5000");
    }

    #[test]
    fn response_deserializes_with_role() {
        let json = r#"{"success": true, "role": "voter", "message": "ok"}"#;
        let resp: ApiResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.accepted().unwrap().role().unwrap(), Role::Voter);
    }

    #[test]
    fn response_without_optional_fields() {
        let json = r#"{"success": false}"#;
        let resp: ApiResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(resp.accepted(), Err(IdentityError::Rejected(_))));
    }

    #[test]
    fn unknown_role_is_an_error() {
        let json = r#"{"success": true, "role": "superuser"}"#;
        let resp: ApiResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            resp.accepted().unwrap().role(),
            Err(IdentityError::UnknownRole(_))
        ));
    }

    #[test]
    fn challenge_blob_passes_through_opaquely() {
        let json = r#"{"success": true, "challenge": {"publicKey": {"rpId": "localhost"}}}"#;
        let resp: ApiResponse = serde_json::from_str(json).unwrap();
        let challenge = resp.challenge.unwrap();
        assert_eq!(challenge["publicKey"]["rpId"], "localhost");
    }
}
