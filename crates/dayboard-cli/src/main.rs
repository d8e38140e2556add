use clap::Parser;
use dayboard_core::error::CoreError;
use dayboard_core::store::{JsonFileStore, TaskStore};
use dialoguer::Confirm;
use owo_colors::{OwoColorize, Style};

use util::resolve_task_id;

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

fn main() {
    let config = config::Config::new().unwrap_or_else(|_| config::Config::default());

    let mut store = match JsonFileStore::open(&config.data_file) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{} Failed to open data file: {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Add(command) => commands::add::add_task(&mut store, command),
        cli::Commands::Agenda(command) => commands::agenda::show_agenda(&store, command, &config),
        cli::Commands::List => commands::list::list_tasks(&store),
        cli::Commands::Preview(command) => commands::preview::preview_task(&store, command),
        cli::Commands::Edit(command) => commands::edit::edit_task(&mut store, command, &config),
        cli::Commands::Skip(command) => commands::skip::skip_occurrence(&mut store, command),
        cli::Commands::Unskip(command) => commands::skip::unskip_occurrence(&mut store, command),
        cli::Commands::Amend(command) => commands::amend::amend_occurrence(&mut store, command),
        cli::Commands::Done(command) => commands::done::done_task(&mut store, command),
        cli::Commands::Delete(command) => {
            let task_id = match resolve_task_id(&store, &command.id) {
                Ok(task_id) => task_id,
                Err(e) => {
                    handle_error(e);
                    std::process::exit(1);
                }
            };
            let task = match store.get(task_id) {
                Ok(Some(task)) => task,
                Ok(None) => {
                    eprintln!(
                        "{} Task with ID '{}' not found.",
                        "Error:".red().bold(),
                        task_id
                    );
                    std::process::exit(1);
                }
                Err(e) => {
                    handle_error(e.into());
                    std::process::exit(1);
                }
            };

            if !command.force && !config.assume_yes {
                let confirmation = Confirm::new()
                    .with_prompt(format!(
                        "Are you sure you want to delete task '{}'?",
                        task.fields.text
                    ))
                    .default(false)
                    .interact()
                    .unwrap_or(false);

                if !confirmation {
                    println!("Deletion cancelled.");
                    return;
                }
            }

            commands::delete::delete_task(&mut store, task_id)
        }
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    let core_error = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<CoreError>());
    if let Some(core_error) = core_error {
        match core_error {
            CoreError::NotFound(message) => {
                eprintln!("{} {}", "Error:".style(error_style), message);
            }
            CoreError::AmbiguousId(candidates) => {
                eprintln!(
                    "{} Ambiguous short ID. Did you mean one of these?",
                    "Error:".style(error_style)
                );
                for (id, text) in candidates {
                    eprintln!("  {} ({})", id.yellow(), text);
                }
            }
            CoreError::InvalidInput(message) => {
                eprintln!("{} {}", "Error:".style(error_style), message);
            }
            _ => {
                eprintln!("{} {}", "Error:".style(error_style), err);
            }
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
