use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::Args;

use vsl_daemon::http_server::api::client::ApiError;
use vsl_daemon::http_server::api::v0::secret::{CreateRequest, CreateResponse};

#[derive(Args, Clone)]
#[group(required = true, multiple = false)]
pub struct Create {
    /// Secret text to share
    #[arg(long)]
    pub text: Option<String>,

    /// File whose contents should be shared
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl std::fmt::Debug for Create {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Create")
            .field("text", &self.text.as_ref().map(|_| "[REDACTED]"))
            .field("file", &self.file)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SecretCreateError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Either --text or --file must be provided")]
    NoContent,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Create {
    type Error = SecretCreateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let content = if let Some(ref text) = self.text {
            text.as_bytes().to_vec()
        } else if let Some(ref path) = self.file {
            tokio::fs::read(path).await?
        } else {
            return Err(SecretCreateError::NoContent);
        };

        let request = CreateRequest {
            content: STANDARD.encode(&content),
        };
        let response: CreateResponse = ctx.client.call(request).await?;

        Ok(format!(
            "Stored {} bytes. The secret can be read exactly once.\nToken: {}\nLink:  {}",
            content.len(),
            response.token,
            response.url
        ))
    }
}
