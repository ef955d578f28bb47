use anyhow::Result;
use rath_application::{AppSession, DataSourceSegment};

pub fn run(session: &AppSession) -> Result<()> {
    let view = DataSourceSegment::render(session.datasets.as_ref(), session.store.is_engine_live());
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
