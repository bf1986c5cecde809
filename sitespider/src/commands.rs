use clap::{arg, command};
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitespider")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitespider")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(
            arg!(-v --"verbose" "Increase log verbosity (repeat for more)")
                .required(false)
                .global(true)
                .action(clap::ArgAction::Count),
        )
        .subcommand_required(false)
        .subcommand(
            command!("crawl")
                .about(
                    "Map a site two hops deep: the seed page, then every same-origin page it \
                links to.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("The seed URL to crawl")
                        .value_parser(clap::value_parser!(Url))
                        .conflicts_with("hosts-file"),
                )
                .arg(
                    arg!(-H --"hosts-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of seed URLs to crawl")
                        .conflicts_with("url"),
                )
                .arg(
                    arg!(-c --"concurrency" <NUM_FETCHES>)
                        .required(false)
                        .help("Maximum number of pages fetched at the same time")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("50"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Per-page fetch timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("15"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(--"show-cache")
                        .required(false)
                        .help("Print the site map cache as JSON after the report")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitespider_scanner::config::{DEFAULT_CONCURRENCY, FETCH_TIMEOUT_SECS};

    #[test]
    fn test_crawl_defaults() {
        let matches = command_argument_builder()
            .try_get_matches_from(["sitespider", "crawl", "-u", "https://x.com/"])
            .unwrap();
        let (name, crawl) = matches.subcommand().unwrap();
        assert_eq!(name, "crawl");
        assert_eq!(crawl.get_one::<usize>("concurrency"), Some(&DEFAULT_CONCURRENCY));
        assert_eq!(crawl.get_one::<u64>("timeout"), Some(&FETCH_TIMEOUT_SECS));
        assert_eq!(crawl.get_one::<String>("format").map(String::as_str), Some("text"));
        assert!(!crawl.get_flag("show-cache"));
    }

    #[test]
    fn test_url_conflicts_with_hosts_file() {
        let result = command_argument_builder().try_get_matches_from([
            "sitespider",
            "crawl",
            "-u",
            "https://x.com/",
            "-H",
            "hosts.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_counts() {
        let matches = command_argument_builder()
            .try_get_matches_from(["sitespider", "-vv", "crawl", "-u", "https://x.com/"])
            .unwrap();
        assert_eq!(matches.get_count("verbose"), 2);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result = command_argument_builder().try_get_matches_from([
            "sitespider",
            "crawl",
            "-u",
            "https://x.com/",
            "-f",
            "csv",
        ]);
        assert!(result.is_err());
    }
}
