use anyhow::{Context, Result};
use rath_application::AppSession;
use rath_core::session::{ExploreMode, TaskTestMode};

pub async fn explore(session: &AppSession, mode: &str) -> Result<()> {
    let mode: ExploreMode = mode
        .parse()
        .with_context(|| format!("Unknown explore mode '{}'", mode))?;

    session.store.set_explore_mode(mode).await;
    session.store.save_configuration().await?;
    println!("Explore mode: {}", mode);
    Ok(())
}

pub async fn task(session: &AppSession, mode: &str) -> Result<()> {
    let mode: TaskTestMode = mode
        .parse()
        .with_context(|| format!("Unknown task mode '{}'", mode))?;

    session
        .store
        .set_task_test_mode(mode)
        .context("Failed to persist task mode")?;
    session.store.save_configuration().await?;
    println!("Task mode: {}", mode);
    Ok(())
}
