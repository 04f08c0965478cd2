use crate::{
    config::{load_routes, RouteFile},
    dispatcher::Dispatcher,
    echo::EchoResolver,
    hot_reload::watch_routes,
    logging::{init_logging_with_config, LogConfig},
    router::Router,
    runtime_config::DispatcherConfig,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::info;

/// Command-line interface for segrouter
#[derive(Parser, Debug)]
#[command(name = "segrouter")]
#[command(about = "Inspect, match and dispatch segment routes", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List route names and patterns in registration order
    Routes {
        /// Path to the route file (TOML)
        #[arg(short, long, env = "SEGR_ROUTES")]
        routes: PathBuf,
    },
    /// Match a path and print the route, class, method and arguments
    Match {
        /// Path to the route file (TOML)
        #[arg(short, long, env = "SEGR_ROUTES")]
        routes: PathBuf,

        /// Request path, query and fragment allowed
        path: String,
    },
    /// Build the URL of a named route
    Url {
        /// Path to the route file (TOML)
        #[arg(short, long, env = "SEGR_ROUTES")]
        routes: PathBuf,

        /// Route name
        name: String,

        /// Placeholder substitution, e.g. `:id=42` (repeatable)
        #[arg(short = 'a', long = "arg", value_parser = parse_key_val)]
        args: Vec<(String, String)>,
    },
    /// Match a path and dispatch it to the echo handlers
    Dispatch {
        /// Path to the route file (TOML)
        #[arg(short, long, env = "SEGR_ROUTES")]
        routes: PathBuf,

        /// Request path, query and fragment allowed
        path: String,

        /// JSON value handed to the handler constructor
        #[arg(long)]
        context: Option<String>,
    },
    /// Watch the route file and log every reload until interrupted
    Watch {
        /// Path to the route file (TOML)
        #[arg(short, long, env = "SEGR_ROUTES")]
        routes: PathBuf,
    },
}

/// Parse a `KEY=VALUE` pair; the value may itself contain `=`
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{s}`"))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Parse arguments, set up logging and run the command against stdout
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config = log_config.verbose();
    }
    init_logging_with_config(&log_config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&cli.command, &mut out)
}

/// Run one command, writing its output to `out`
pub fn execute<W: Write>(command: &Commands, out: &mut W) -> anyhow::Result<()> {
    match command {
        Commands::Routes { routes } => {
            let router = load_routes(routes)?.build_router();
            for (name, route) in router.routes() {
                writeln!(out, "{name}\t{}", route.path())?;
            }
            Ok(())
        }
        Commands::Match { routes, path } => {
            let router = load_routes(routes)?.build_router();
            let found = router.lookup(path)?;
            let arguments: Map<String, Value> = found
                .map_arguments()
                .iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.clone())))
                .collect();
            let report = json!({
                "name": found.name,
                "path": found.route.path(),
                "class": found.map_class(),
                "method": found.map_method(),
                "arguments": arguments,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            Ok(())
        }
        Commands::Url { routes, name, args } => {
            let router = load_routes(routes)?.build_router();
            let url = router.build_url(name, args.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
            writeln!(out, "{url}")?;
            Ok(())
        }
        Commands::Dispatch {
            routes,
            path,
            context,
        } => {
            let file = load_routes(routes)?;
            let context: Value = match context {
                Some(raw) => serde_json::from_str(raw).context("--context is not valid JSON")?,
                None => Value::Null,
            };
            let result = dispatch_echo(&file, path, &context)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
            Ok(())
        }
        Commands::Watch { routes } => watch(routes),
    }
}

fn dispatch_echo(file: &RouteFile, path: &str, context: &Value) -> anyhow::Result<Value> {
    let config = file.dispatcher_config(DispatcherConfig::from_env());
    let dispatcher = Dispatcher::from_config(EchoResolver, &config);
    let router = file.build_router();
    let found = router.lookup(path)?;
    let result = dispatcher
        .dispatch(&found, context)
        .with_context(|| format!("dispatch of route '{}' failed", found.name))?;
    Ok(result)
}

fn watch(routes: &Path) -> anyhow::Result<()> {
    let router = Arc::new(RwLock::new(load_routes(routes)?.build_router()));
    let _watcher = watch_routes(routes, Arc::clone(&router), |router: &Router| {
        for (name, route) in router.routes() {
            info!(route_name = %name, pattern = %route.path(), "Active route");
        }
    })
    .with_context(|| format!("failed to watch {}", routes.display()))?;

    info!(path = %routes.display(), "Watching route file");
    loop {
        std::thread::park();
    }
}
