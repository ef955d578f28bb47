use anyhow::{Context, Result};
use rath_application::AppSession;
use rath_core::engine::ComputationEngine;

pub async fn run(session: &AppSession, engine: &str) -> Result<()> {
    let engine: ComputationEngine = engine
        .parse()
        .with_context(|| format!("Unknown computation engine '{}'", engine))?;

    if !session.store.set_computation_engine(engine).await {
        let reason = session
            .store
            .snapshot()
            .messages
            .last()
            .map(|notice| notice.content.clone())
            .unwrap_or_default();
        anyhow::bail!("Failed to switch to {}: {}", engine, reason);
    }

    session.store.save_configuration().await?;
    println!("Computation engine: {}", engine);
    Ok(())
}
