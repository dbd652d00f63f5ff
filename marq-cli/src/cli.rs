use clap::{Arg, ArgAction, Command, value_parser};

/// Command-line surface: `marq <INPUT_DIR> <OUTPUT_DIR> [TEMPLATE]` plus
/// flags. The positionals are not required here because the config file
/// may supply them; the merge layer enforces presence.
pub fn build_command() -> Command {
    Command::new("marq")
        .about("Convert Markdown files to HTML")
        .arg(
            Arg::new("input")
                .value_name("INPUT_DIR")
                .help("Directory or single Markdown file"),
        )
        .arg(
            Arg::new("output")
                .value_name("OUTPUT_DIR")
                .help("Directory for output HTML files"),
        )
        .arg(
            Arg::new("template")
                .value_name("TEMPLATE")
                .help("Path to HTML template"),
        )
        .arg(
            Arg::new("css")
                .short('c')
                .long("css")
                .value_name("FILE")
                .help("CSS file(s) to apply to the HTML")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("watch")
                .short('w')
                .long("watch")
                .help("Watch for changes in Markdown files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("single")
                .short('s')
                .long("single")
                .help("Convert a single Markdown file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("live")
                .short('l')
                .long("live")
                .help("Start a live server with auto-refresh")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port for the live server [default: 8080]")
                .value_parser(value_parser!(u16)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positionals_and_flags() {
        let matches = build_command()
            .try_get_matches_from(["marq", "docs", "site", "-w", "-l", "-p", "9000"])
            .unwrap();

        assert_eq!(matches.get_one::<String>("input").unwrap(), "docs");
        assert_eq!(matches.get_one::<String>("output").unwrap(), "site");
        assert!(matches.get_flag("watch"));
        assert!(matches.get_flag("live"));
        assert!(!matches.get_flag("single"));
        assert_eq!(matches.get_one::<u16>("port"), Some(&9000));
    }

    #[test]
    fn css_flag_repeats() {
        let matches = build_command()
            .try_get_matches_from(["marq", "docs", "site", "-c", "a.css", "--css", "b.css"])
            .unwrap();

        let css: Vec<&String> = matches.get_many::<String>("css").unwrap().collect();
        assert_eq!(css, ["a.css", "b.css"]);
    }

    #[test]
    fn rejects_a_non_numeric_port() {
        assert!(
            build_command()
                .try_get_matches_from(["marq", "docs", "site", "--port", "nope"])
                .is_err()
        );
    }
}
