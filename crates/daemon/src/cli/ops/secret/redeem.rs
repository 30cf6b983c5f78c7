use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::Args;

use common::prelude::Token;
use vsl_daemon::http_server::api::client::ApiError;
use vsl_daemon::http_server::api::v0::secret::{RedeemRequest, RedeemResponse};

#[derive(Args, Debug, Clone)]
pub struct Redeem {
    /// Token returned when the secret was created
    #[arg(long)]
    pub token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SecretRedeemError {
    #[error("Secret does not exist or it was already read")]
    Missing,
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Redeem {
    type Error = SecretRedeemError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        // Accept a pasted share link as well as a bare token
        let token = self
            .token
            .trim()
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();

        let request = RedeemRequest {
            token: Token::from(token),
        };
        let response: RedeemResponse = match ctx.client.call(request).await {
            Ok(response) => response,
            Err(e) if e.is_not_found() => return Err(SecretRedeemError::Missing),
            Err(e) => return Err(e.into()),
        };

        let bytes = STANDARD.decode(&response.content)?;

        // Try to convert to UTF-8 string, or show hex if binary
        match String::from_utf8(bytes) {
            Ok(text) => Ok(format!("Size: {} bytes\n\n{}", response.size, text)),
            Err(e) => Ok(format!(
                "Size: {} bytes\nBinary content (hex): {}",
                response.size,
                hex_dump(e.as_bytes())
            )),
        }
    }
}

fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
