// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

use std::str::FromStr;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{crate_authors, crate_description, crate_version};
use clap::{Arg, ArgMatches, Command};
use strum::{IntoEnumIterator, VariantNames};

use crate::app_config::{ApiConfig, PasswordConfig};
use crate::core::api::accounts::AccountSearchRequest;
use crate::core::commands::{self, EntityKind};
use crate::core::lookup::{LookupRequest, State};
use crate::core::password::PasswordPolicy;

/// Match commands
pub async fn cli_match(config: config::Config, cli_matches: ArgMatches) -> Result<()> {
    // Neither needs sysPass credentials, and `config` is helpful for debugging bad config!
    match cli_matches.subcommand() {
        Some(("config", _config_matches)) => {
            return commands::print_config(config);
        }
        Some(("genpass", genpass_matches)) => {
            let policy = password_policy(&config, genpass_matches)?;
            return commands::generate_password(&policy);
        }
        _ => {}
    }

    // Derive config needed for all other commands (they all talk to sysPass)
    let client = config.clone().try_into::<ApiConfig>()?.api.client()?;

    match cli_matches.subcommand() {
        Some(("lookup", lookup_matches)) => {
            let request = lookup_request(&config, lookup_matches)?;
            commands::lookup(&client, &request).await?;
        }
        Some(("account", account_matches)) => match account_matches.subcommand() {
            Some(("search", search_matches)) => {
                // Safe to unwrap because argument is required
                let params = AccountSearchRequest {
                    count: optional_value(search_matches, "count")?,
                    category_id: optional_value(search_matches, "category-id")?,
                    client_id: optional_value(search_matches, "client-id")?,
                    ..AccountSearchRequest::new(search_matches.value_of("text").unwrap())
                };
                commands::search_accounts(&client, &params, search_matches.is_present("all"))
                    .await?;
            }
            Some(("view", view_matches)) => {
                let account = client.account_view(view_matches.value_of_t("id")?).await?;
                commands::print_json(&account)?;
            }
            Some(("viewpass", viewpass_matches)) => {
                let password = client
                    .account_view_pass(viewpass_matches.value_of_t("id")?)
                    .await?;
                println!("{}", password);
            }
            Some(("delete", delete_matches)) => {
                let result = client
                    .account_delete(delete_matches.value_of_t("id")?)
                    .await?;
                commands::print_json(&result)?;
            }
            _ => unreachable!("No matching account subcommand!"),
        },
        Some(("backup", _backup_matches)) => {
            commands::print_json(&client.backup().await?)?;
        }
        Some((name, entity_matches)) => {
            let kind = EntityKind::from_str(name)?;
            match entity_matches.subcommand() {
                Some(("search", search_matches)) => {
                    let text = search_matches.value_of("text").unwrap();
                    let count = optional_value(search_matches, "count")?;
                    commands::search(&client, kind, text, count).await?;
                }
                Some(("create", create_matches)) => {
                    let name = create_matches.value_of("name").unwrap();
                    let result = match kind {
                        EntityKind::Category => {
                            client
                                .category_create(name, create_matches.value_of("description"))
                                .await?
                        }
                        EntityKind::Client => {
                            client
                                .client_create(
                                    name,
                                    create_matches.value_of("description"),
                                    create_matches.is_present("global"),
                                )
                                .await?
                        }
                        EntityKind::Tag => client.tag_create(name).await?,
                        EntityKind::UserGroup => {
                            client
                                .user_group_create(name, create_matches.value_of("description"))
                                .await?
                        }
                    };
                    commands::print_json(&result)?;
                }
                Some(("delete", delete_matches)) => {
                    commands::delete(&client, kind, delete_matches.value_of_t("id")?).await?;
                }
                _ => unreachable!("No matching {} subcommand!", name),
            }
        }
        None => {
            // Subcommands are required, this section should never execute.
            unreachable!("No matching subcommand!");
        }
    }
    Ok(())
}

/// Configure Clap
/// This function will configure clap and match arguments
pub fn cli_config() -> Result<ArgMatches> {
    let cli_app = Command::new("syspass")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .version(crate_version!())
        .about(crate_description!())
        .author(crate_authors!("\n"))
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Set a custom config file")
                .takes_value(true),
        )
        .subcommand(Command::new("config").about("Show Configuration"))
        .subcommand(
            password_args(Command::new("genpass"))
                .about("Generate a password without contacting sysPass"),
        )
        .subcommand(lookup_command())
        .subcommand(account_command())
        .subcommand(Command::new("backup").about("Back up the sysPass server"));

    let cli_app = EntityKind::iter().fold(cli_app, |app, kind| {
        app.subcommand(entity_command(kind))
    });

    // Get matches
    let cli_matches = cli_app.get_matches();

    Ok(cli_matches)
}

fn lookup_command() -> Command<'static> {
    let command = Command::new("lookup")
        .about("Print an account's password, creating the account if it doesn't exist")
        .arg(
            Arg::new("name")
                .required(true)
                .value_name("NAME")
                .help("Account name (must be unique)"),
        )
        .arg(
            Arg::new("state")
                .long("state")
                .value_name("STATE")
                .help("Use absent to delete the account")
                .default_value("present")
                .possible_values(State::VARIANTS.iter().copied())
                .takes_value(true),
        )
        .arg(value_arg("login", "Login of a new account"))
        .arg(value_arg("category", "Category of a new account"))
        .arg(value_arg("customer", "Client of a new account"))
        .arg(value_arg("url", "URL of a new account"))
        .arg(value_arg("notes", "Notes of a new account"))
        .arg(
            value_arg("expire-date", "Expiration date of a new account")
                .value_name("YYYY-MM-DD"),
        )
        .arg(
            value_arg("tag", "Tag of a new account (repeatable)").multiple_occurrences(true),
        )
        .arg(value_arg("user-group", "User group of a new account"))
        .arg(
            Arg::new("private")
                .long("private")
                .help("Make a new account private to its owner"),
        )
        .arg(
            Arg::new("private-group")
                .long("private-group")
                .help("Make a new account private to its owner's group"),
        );
    password_args(command)
}

fn account_command() -> Command<'static> {
    Command::new("account")
        .about("Manage accounts")
        .subcommand_required(true)
        .subcommand(
            search_command()
                .arg(value_arg("category-id", "Only accounts in this category"))
                .arg(value_arg("client-id", "Only accounts of this client"))
                .arg(
                    Arg::new("all")
                        .long("all")
                        .help("Print every match instead of the exact name"),
                ),
        )
        .subcommand(Command::new("view").about("Show an account").arg(id_arg()))
        .subcommand(
            Command::new("viewpass")
                .about("Print an account's password")
                .arg(id_arg()),
        )
        .subcommand(Command::new("delete").about("Delete an account").arg(id_arg()))
}

fn entity_command(kind: EntityKind) -> Command<'static> {
    let mut create = Command::new("create")
        .about("Create an entry")
        .arg(Arg::new("name").required(true).value_name("NAME"));
    if kind != EntityKind::Tag {
        create = create.arg(value_arg("description", "Description"));
    }
    if kind == EntityKind::Client {
        create = create.arg(
            Arg::new("global")
                .long("global")
                .help("Make the client visible to every user"),
        );
    }

    Command::new(kind.as_ref())
        .about(kind.about())
        .subcommand_required(true)
        .subcommand(search_command())
        .subcommand(create)
        .subcommand(Command::new("delete").about("Delete an entry").arg(id_arg()))
}

fn search_command() -> Command<'static> {
    Command::new("search")
        .about("Print the entry with this exact name")
        .arg(Arg::new("text").required(true).value_name("NAME"))
        .arg(value_arg("count", "Maximum number of results sysPass returns"))
}

fn password_args(command: Command<'static>) -> Command<'static> {
    command
        .arg(
            value_arg("length", "Length of a generated password")
                .short('l')
                .value_name("N"),
        )
        .arg(
            value_arg(
                "chars",
                "Characters of a generated password: a class (ascii_letters, digits, \
                 punctuation...) or literal characters (repeatable)",
            )
            .multiple_occurrences(true),
        )
}

fn value_arg(name: &'static str, help: &'static str) -> Arg<'static> {
    Arg::new(name)
        .long(name)
        .value_name("VALUE")
        .help(help)
        .takes_value(true)
}

fn id_arg() -> Arg<'static> {
    Arg::new("id").required(true).value_name("ID")
}

fn optional_value<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    if matches.is_present(name) {
        Ok(Some(matches.value_of_t(name)?))
    } else {
        Ok(None)
    }
}

/// Password settings from the config file, overridden by flags.
fn password_policy(config: &config::Config, matches: &ArgMatches) -> Result<PasswordPolicy> {
    let mut policy = config
        .clone()
        .try_into::<PasswordConfig>()?
        .password
        .policy();
    if let Some(length) = optional_value(matches, "length")? {
        policy.length = length;
    }
    if let Some(chars) = matches.values_of("chars") {
        policy.chars = chars.map(str::to_owned).collect();
    }
    Ok(policy)
}

fn lookup_request(config: &config::Config, matches: &ArgMatches) -> Result<LookupRequest> {
    let owned = |name: &str| matches.value_of(name).map(str::to_owned);

    Ok(LookupRequest {
        // Safe to unwrap because arguments are required or have defaults
        name: matches.value_of("name").unwrap().to_owned(),
        state: State::from_str(matches.value_of("state").unwrap())?,
        login: owned("login"),
        category: owned("category"),
        customer: owned("customer"),
        url: owned("url"),
        notes: owned("notes"),
        private: matches.is_present("private"),
        private_group: matches.is_present("private-group"),
        expire_date: optional_value::<NaiveDate>(matches, "expire-date")?,
        tags: matches
            .values_of("tag")
            .map(|tags| tags.map(str::to_owned).collect())
            .unwrap_or_default(),
        user_group: owned("user-group"),
        password: password_policy(config, matches)?,
    })
}
