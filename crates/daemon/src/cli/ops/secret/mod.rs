use clap::{Args, Subcommand};

pub mod create;
pub mod redeem;

use crate::cli::op::Op;

crate::command_enum! {
    (Create, create::Create),
    (Redeem, redeem::Redeem),
}

// Rename the generated Command to SecretCommand for clarity
pub type SecretCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Secret {
    #[command(subcommand)]
    pub command: SecretCommand,
}

#[async_trait::async_trait]
impl Op for Secret {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
