//! # CLI Module
//!
//! Command-line access to a route file: list it, match paths against it, build
//! URLs from it and try dispatches through the echo handlers.
//!
//! ## Commands
//!
//! ```bash
//! segrouter routes --routes routes.toml
//! segrouter match --routes routes.toml /orders/show/2009/2010
//! segrouter url --routes routes.toml orders -a :yearStart=2009 -a :yearEnd=2010
//! segrouter dispatch --routes routes.toml /users/list --context '{"user":"alice"}'
//! segrouter watch --routes routes.toml
//! ```
//!
//! `match` and `dispatch` print JSON on stdout; logs go to stderr. A path that
//! matches no route exits non-zero.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use segrouter::cli::{execute, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! execute(&cli.command, &mut std::io::stdout())?;
//! ```

mod commands;


pub use commands::{execute, parse_key_val, run_cli, Cli, Commands};
