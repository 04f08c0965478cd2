//! # Hot Reload Module
//!
//! Live reloading of a route file without restarting the process.
//!
//! ## Overview
//!
//! [`watch_routes`] watches the route file and, on every modify or create event:
//!
//! 1. reloads and parses the file
//! 2. builds a fresh [`Router`] from it
//! 3. swaps it into the shared `Arc<RwLock<Router>>`
//! 4. calls the reload hook with the new router
//!
//! Readers holding the lock keep the table they started with; lookups only ever
//! see a complete old or new table.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use segrouter::hot_reload::watch_routes;
//! use segrouter::router::Router;
//! use std::sync::{Arc, RwLock};
//!
//! let router = Arc::new(RwLock::new(Router::new()));
//! let watcher = watch_routes("routes.toml", router.clone(), |router| {
//!     println!("Reloaded {} routes", router.len());
//! })?;
//!
//! // Keep `watcher` alive for as long as reloads should happen
//! ```
//!
//! ## Error Handling
//!
//! A file that fails to read or parse is logged and the previous router stays
//! active; the hook is not called. A file that parses but holds no routes
//! is logged at `warn` and also leaves the previous router in place.

use crate::config::load_routes;
use crate::router::Router;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{error, info, warn};

/// Watch a route file and rebuild the [`Router`] when it changes.
///
/// The callback receives the new router while the write lock is still held,
/// so it sees exactly the table that was installed.
pub fn watch_routes<P, F>(
    routes_path: P,
    router: Arc<RwLock<Router>>,
    mut on_reload: F,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    F: FnMut(&Router) + Send + 'static,
{
    let path: PathBuf = routes_path.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    return;
                }
                let file = match load_routes(&watch_path) {
                    Ok(file) => file,
                    Err(e) => {
                        warn!(
                            path = %watch_path.display(),
                            error = %format!("{e:#}"),
                            "hot-reload: keeping previous routes"
                        );
                        return;
                    }
                };
                if file.routes.is_empty() {
                    warn!(
                        path = %watch_path.display(),
                        "hot-reload: route file has no routes, keeping previous routes"
                    );
                    return;
                }
                let new_router = file.build_router();
                match router.write() {
                    Ok(mut current) => {
                        *current = new_router;
                        info!(
                            path = %watch_path.display(),
                            routes = current.len(),
                            "hot-reload: applied route updates"
                        );
                        on_reload(&*current);
                    }
                    Err(_) => error!("hot-reload: router lock poisoned"),
                }
            }
            Err(e) => error!(error = ?e, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
