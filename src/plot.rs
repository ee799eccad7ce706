use super::VERSION;
use anyhow::Context;
use clap::{App, Arg, ArgMatches};
use std::ffi::OsString;
use std::path::PathBuf;

fn cli_app() -> App<'static, 'static> {
    let arg_precision = Arg::with_name("precision_file")
        .help("csv file with the precision (%) in the second column")
        .required(true)
        .index(1);
    let arg_transcripts = Arg::with_name("transcripts_file")
        .help("csv file with the number of annotated transcripts assembled in the second column")
        .required(true)
        .index(2);
    let arg_verbose = Arg::with_name("verbose")
        .help("print more log information, repeat for more")
        .short("v")
        .long("verbose")
        .multiple(true)
        .takes_value(false);
    let arg_quiet = Arg::with_name("quiet")
        .help("silence all log output")
        .short("q")
        .long("quiet")
        .conflicts_with("verbose")
        .takes_value(false);
    App::new("dot_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to scatter plot the number of assembled transcripts against precision")
        .arg(arg_precision)
        .arg(arg_transcripts)
        .arg(arg_verbose)
        .arg(arg_quiet)
}

fn from_matches(cli_args: &ArgMatches) -> (PathBuf, PathBuf, usize, bool) {
    let precision = PathBuf::from(cli_args.value_of_os("precision_file").unwrap_or_default());
    let transcripts = PathBuf::from(cli_args.value_of_os("transcripts_file").unwrap_or_default());
    // info, then debug and trace
    let verbosity = 2 + cli_args.occurrences_of("verbose") as usize;
    let quiet = cli_args.is_present("quiet");
    (precision, transcripts, verbosity, quiet)
}

/// Takes the CLI arguments of the scatter plot:
/// the two input files, the log verbosity and the quiet flag.
pub fn parse_cli() -> (PathBuf, PathBuf, usize, bool) {
    from_matches(&cli_app().get_matches())
}

/// As `parse_cli` but from the given arguments, returning usage errors instead of exiting.
pub fn parse_cli_from<I, T>(args: I) -> clap::Result<(PathBuf, PathBuf, usize, bool)>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli_args = cli_app().get_matches_from_safe(args)?;
    Ok(from_matches(&cli_args))
}

/// Logs to stderr; verbosity 0 is error only, 4 is trace.
pub fn init_log(verbosity: usize, quiet: bool) -> anyhow::Result<()> {
    stderrlog::new()
        .quiet(quiet)
        .verbosity(verbosity)
        .timestamp(stderrlog::Timestamp::Off)
        .init()
        .context("could not initialize the logger")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_two_positional_files() {
        let (p, t, v, q) = parse_cli_from(vec!["dot_plot", "prec.csv", "num.tran"]).unwrap();
        assert_eq!(p, PathBuf::from("prec.csv"));
        assert_eq!(t, PathBuf::from("num.tran"));
        assert_eq!(v, 2);
        assert!(!q);
    }

    #[test]
    fn repeated_verbose_raises_level() {
        let (_, _, v, _) = parse_cli_from(vec!["dot_plot", "-vv", "a", "b"]).unwrap();
        assert_eq!(v, 4);
    }

    #[test]
    fn quiet_flag() {
        let (_, _, _, q) = parse_cli_from(vec!["dot_plot", "a", "b", "--quiet"]).unwrap();
        assert!(q);
    }

    #[test]
    fn missing_transcripts_file_is_an_error() {
        let err = parse_cli_from(vec!["dot_plot", "prec.csv"]).unwrap_err();
        assert_eq!(err.kind, clap::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn third_positional_is_rejected() {
        assert!(parse_cli_from(vec!["dot_plot", "a", "b", "c"]).is_err());
    }
}
