use condo_core::Result;
use condo_superadmin::SuperAdminSession;

pub async fn execute(session: &SuperAdminSession) -> Result<()> {
    tracing::info!("requesting elevated session");
    session.initialize().await?;
    match session.expires_at() {
        Some(expires_at) => println!("elevated session active until {}", expires_at.to_rfc3339()),
        None => println!("elevated session granted"),
    }
    Ok(())
}
