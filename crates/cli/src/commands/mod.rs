use clap::Subcommand;
use condo_config::SessionConfig;
use condo_core::Result;
use condo_superadmin::SuperAdminSession;

pub mod exec;
pub mod verify;

#[derive(Subcommand)]
pub enum Commands {
    /// Obtain an elevated session and show when it expires
    Verify,

    /// Run one privileged operation against a target entity
    Exec {
        /// Operation name (e.g. delete_client, update_condominium)
        operation: String,

        /// Identifier of the entity the operation applies to
        target_id: String,

        /// JSON payload passed to the operation
        #[arg(long, default_value = "{}")]
        payload: String,
    },
}

impl Commands {
    pub async fn execute(self, config: SessionConfig, identity_token: Option<String>) -> Result<()> {
        let session = SuperAdminSession::connect(config, identity_token)?;
        let outcome = match self {
            Commands::Verify => verify::execute(&session).await,
            Commands::Exec {
                operation,
                target_id,
                payload,
            } => exec::execute(&session, &operation, &target_id, &payload).await,
        };
        session.dispose();
        outcome
    }
}
