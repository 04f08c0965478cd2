#![allow(dead_code)]

pub mod temp_files {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// Creates a route file with a unique name so parallel tests never collide
    pub fn create_temp_routes(content: &str) -> PathBuf {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::SeqCst);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();

        let path = std::env::temp_dir().join(format!(
            "segr_test_{}_{}_{}.toml",
            std::process::id(),
            counter,
            nanos
        ));

        std::fs::write(&path, content).unwrap();
        path
    }

    /// Cleanup temporary files (best effort)
    pub fn cleanup_temp_files(paths: &[PathBuf]) {
        for path in paths {
            let _ = std::fs::remove_file(path);
        }
    }
}

/// A small shop: configured routes, a regex-guarded route and a catch-all
pub const SHOP_ROUTES: &str = r#"
[dispatcher]
suffix = "Controller"

[[routes]]
name = "home"
path = "/"
class = "home"
method = "index"

[[routes]]
name = "product"
path = "/products/:id"
class = "products"
method = "show"
[routes.elements]
":id" = '^\d+$'

[[routes]]
name = "archive"
path = "/archive/:yearStart/:yearEnd"
class = "archive"
method = "range"
[routes.elements]
":yearStart" = '^[1-9]{1}\d{3}$'
":yearEnd" = '^[1-9]{1}\d{3}$'

[[routes]]
name = "catch_all"
path = "/:class/:method"
[routes.elements]
":class" = ":class"
":method" = ":method"
"#;
