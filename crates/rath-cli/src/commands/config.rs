use anyhow::Result;
use rath_application::AppSession;
use rath_core::persistence::DATA_SOURCE_NAMESPACE;

pub async fn save(session: &AppSession) -> Result<()> {
    session.store.save_configuration().await?;
    println!("Saved '{}' configuration", DATA_SOURCE_NAMESPACE);
    Ok(())
}

/// Reports the restore performed while the session started.
pub fn load(session: &AppSession) -> Result<()> {
    match &session.restored {
        Ok(true) => println!("Loaded '{}' configuration", DATA_SOURCE_NAMESPACE),
        Ok(false) => println!("No saved '{}' configuration", DATA_SOURCE_NAMESPACE),
        Err(e) => return Err(e.clone().into()),
    }
    Ok(())
}
