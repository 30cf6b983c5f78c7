use clap::Args;

use vsl_daemon::state::AppState;

#[derive(Args, Debug, Clone)]
pub struct Health;

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("Health check failed: {0}")]
    Failed(String),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Health {
    type Error = HealthError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut lines = Vec::new();

        // 1. Check config directory
        lines.push("Config:".to_string());
        match AppState::load(ctx.config_path.clone()) {
            Ok(state) => {
                lines.push(format!("  directory:     {}", state.vsl_dir.display()));
                lines.push("  config.toml:   OK".to_string());
                lines.push(format!("  listen_port:   {}", state.config.listen_port));
                lines.push(format!("  secret_length: {}", state.config.secret_length));
            }
            Err(e) => {
                lines.push(format!("  error: {}", e));
            }
        }

        // 2. Check daemon liveness and readiness
        let base = ctx.client.base_url();
        let client = ctx.client.http_client();

        lines.push(String::new());
        lines.push(format!("Daemon ({}):", base));

        for probe in ["livez", "readyz"] {
            let url = base
                .join(&format!("/_status/{}", probe))
                .map_err(|e| HealthError::Failed(e.to_string()))?;
            match client.get(url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    lines.push(format!("  {}: OK", probe));
                }
                Ok(resp) => {
                    lines.push(format!("  {}: UNHEALTHY ({})", probe, resp.status()));
                }
                Err(_) => {
                    lines.push(format!("  {}: NOT REACHABLE", probe));
                }
            }
        }

        Ok(lines.join("\n"))
    }
}
