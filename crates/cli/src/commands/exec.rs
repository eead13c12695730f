use condo_core::{Error, Result};
use condo_superadmin::SuperAdminSession;
use serde_json::Value;

pub async fn execute(
    session: &SuperAdminSession,
    operation: &str,
    target_id: &str,
    payload: &str,
) -> Result<()> {
    let payload = parse_payload(payload)?;

    tracing::info!(operation = %operation, target_id = %target_id, "running privileged operation");
    session.initialize().await?;
    let result = session.execute(operation, target_id, payload).await?;
    tracing::debug!(operation = %operation, target_id = %target_id, "privileged operation finished");

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn parse_payload(raw: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        return Err(Error::configuration("payload must be a JSON object"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_must_be_object() {
        assert!(parse_payload(r#"{"name": "Torre B"}"#).is_ok());
        assert!(parse_payload("[1, 2]").is_err());
        assert!(matches!(parse_payload("{"), Err(Error::Json { .. })));
    }
}
