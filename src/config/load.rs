use anyhow::Context;
use std::path::Path;
use tracing::{debug, info};

use super::types::RouteFile;

/// Read and parse a route file from disk
pub fn load_routes(path: impl AsRef<Path>) -> anyhow::Result<RouteFile> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Loading route file");
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read route file {}", path.display()))?;
    let file = RouteFile::from_toml_str(&content)
        .with_context(|| format!("failed to parse route file {}", path.display()))?;
    info!(
        path = %path.display(),
        routes = file.routes.len(),
        "Route file loaded"
    );
    Ok(file)
}
