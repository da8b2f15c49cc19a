//! syspass is a Command Line Interface (CLI) and client library for the
//! [sysPass](https://syspass.org) password vault JSON-RPC API.
//!
//! Its main use is from automation tools: `syspass lookup` prints the password
//! of an account, creating the account (with a generated password) when it
//! doesn't exist yet, or deletes it. Categories, clients, tags and user groups
//! can also be searched, created and deleted.
//!
//! sysPass >= 3.0 is required.
//!
//! # Usage
//!
//! View CLI help with `syspass help` or `syspass help <subcommand>`.
//!
//! ## Configuration
//!
//! syspass reads its configuration from `~/.config/syspass/syspass.toml`, or
//! from the file given with the `--config path/to/syspass.toml` flag.
//!
//! ```toml
//! [api]
//! url = "https://syspass.example.com/api.php"
//! # Found in Users & Accesses -> API Authorizations
//! token = "API_TOKEN"
//! # Password of the API authorization, needed to view, create or delete
//! # accounts
//! token_pass = "API_TOKEN_PASSWORD"
//! # Optional
//! timeout = 30
//! verify_tls = true
//!
//! # Optional defaults for generated passwords
//! [password]
//! length = 20
//! chars = ["ascii_letters", "digits", ".,:-_"]
//! ```
//!
//! Every setting can be overridden with an environment variable, e.g.
//! `SYSPASS_API__TOKEN=abc` (note the double underscore between the section
//! and the key).
//!
//! ## Commands
//!
//! ```syspass config```
//!
//! Echoes current config (with any overrides applied, and secrets hidden)
//! and exits.
//!
//! <br>
//!
//! ---
//!
//! ```syspass lookup <name> [OPTIONS]```
//!
//! Searches the account named exactly `<name>`. If it exists, its password is
//! printed. Otherwise the account is created with a generated password, which
//! is printed. Creating an account requires `--login`, `--category` and
//! `--customer`; the category, client, tags and user group must already exist.
//!
//! A different field passed to an already existing account won't modify it.
//!
//! With `--state absent`, the account is deleted if it exists and nothing is
//! printed.
//!
//! <br>
//!
//! ---
//!
//! ```syspass genpass [--length N] [--chars CHARS]...```
//!
//! Prints a generated password without contacting sysPass. `--chars` is
//! either a character class (`ascii_letters`, `ascii_lowercase`,
//! `ascii_uppercase`, `digits`, `hexdigits`, `octdigits`, `punctuation`) or
//! literal characters, and may be repeated. A generated password contains at
//! least one character of each set when it is long enough.
//!
//! <br>
//!
//! ---
//!
//! ```syspass account|category|client|tag|user-group search|create|delete```
//!
//! Low-level access to the API. Results are printed as the JSON sysPass
//! returns. `search` fails when no entry has exactly the given name (client,
//! tag and user group names are compared ignoring case).
//!
//! ```syspass backup```
//!
//! Asks sysPass to back up its database.
//!
//! ## Examples
//!
//! ```shell
//! # Minimum declaration to get / create a password
//! syspass lookup 'Server 1 test account' --login test --category MySQL --customer 'Customer 1'
//!
//! # All details for a new account
//! syspass lookup 'Server 1 test account' --login test --category MySQL \
//!     --customer 'Customer 1' --url https://exemp.le --notes 'Additional info' \
//!     --tag prod --private --private-group --length 32 --chars ascii_letters --chars digits
//!
//! # Delete an account
//! syspass lookup 'Server 1 test account' --state absent
//!
//! # Show a category
//! syspass category search MySQL
//! ```
//!
//! # Logging
//!
//! Set `RUST_LOG=syspass=debug` to see the API calls being made. Secrets are
//! never logged.

#[cfg(not(debug_assertions))]
use human_panic::setup_panic;

mod app_config;
mod cli;
pub mod core;

use anyhow::Result;

/// Default location of the configuration file.
const DEFAULT_CONFIG_FILE: &str = "~/.config/syspass/syspass.toml";

#[doc(hidden)]
/// Main entrypoint
pub fn run() -> Result<()> {
    // Human Panic. Only enabled when *not* debugging.
    //
    // Example of what panic message looks like:
    // https://docs.rs/human-panic/1.0.3/human_panic/
    #[cfg(not(debug_assertions))]
    {
        setup_panic!();
    }

    // Better Panic. Only enabled *when* debugging.
    #[cfg(debug_assertions)]
    {
        better_panic::Settings::debug()
            .most_recent_first(false)
            .lineno_suffix(true)
            .verbosity(better_panic::Verbosity::Full)
            .install();
    }

    env_logger::init();

    // Get CLI arguments and flags (one may have provided the config file to use)
    let cli_matches = cli::cli_config()?;

    let mut settings = config::Config::default();
    // Use cmdline arg config file if provided, otherwise use the default path
    // when it exists (environment variables may hold the whole config)
    if let Some(config_file) = cli_matches.value_of("config") {
        settings.merge(config::File::with_name(config_file))?;
    } else {
        settings.merge(
            config::File::with_name(&shellexpand::tilde(DEFAULT_CONFIG_FILE)).required(false),
        )?;
    }

    // Override with environment variables, if present
    // Example of overriding: SYSPASS_API__TOKEN=abc
    // (Note double underscore to reach into lower struct levels!)
    settings.merge(config::Environment::with_prefix("SYSPASS").separator("__"))?;

    // Match against CLI subcommands, which delegate to functions
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(cli::cli_match(settings, cli_matches))
}
