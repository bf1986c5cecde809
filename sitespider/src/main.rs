use colored::Colorize;
use sitespider::commands::command_argument_builder;
use sitespider::handlers::{handle_crawl, init_logging, print_banner};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    init_logging(chosen_command.get_count("verbose"), quiet);

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    let result = match chosen_command.subcommand() {
        Some(("crawl", primary_command)) => handle_crawl(primary_command, quiet).await,
        // No subcommand provided, just show the banner
        _ => Ok(()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
