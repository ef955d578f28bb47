use anyhow::Result;
use rath_application::AppSession;

pub fn run(session: &AppSession) -> Result<()> {
    let state = session.store.snapshot();
    println!("{}", serde_json::to_string_pretty(&state)?);
    if !session.store.is_engine_live() {
        eprintln!("No computation engine is running.");
    }
    Ok(())
}
