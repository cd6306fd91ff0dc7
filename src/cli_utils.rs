use anyhow::Result;
use tracing_subscriber::EnvFilter;

pub fn readline() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_line(&mut buffer)?;
    Ok(buffer)
}

// RUST_LOG overrides the default level
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
