use crate::heat::DEFAULT_MONTHS;
use crate::scan::DEFAULT_IGNORE_FILE;
use crate::store::DEFAULT_DOTFILE;
use crate::util::home_file;
use anyhow::Result;
use clap::{ArgAction, ArgGroup, Args, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitcal")]
#[command(about = "Contribution calendar of your commits across local git repositories")]
#[command(version)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .multiple(true)
        .args(["add", "email"])
))]
pub struct Cli {
    #[arg(long, value_name = "FOLDER", help = "Add a folder to the scan list of your git repositories")]
    pub add: Option<PathBuf>,

    #[arg(long, value_name = "EMAIL", help = "Show the contribution calendar of this author email")]
    pub email: Option<String>,

    #[clap(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(long, env = "GITCAL_DOTFILE", help = "File holding the list of known repositories")]
    pub dotfile: Option<PathBuf>,

    #[arg(long, env = "GITCAL_IGNORE_FILE", help = "File of directory patterns to skip while scanning")]
    pub ignore_file: Option<PathBuf>,

    #[arg(
        long,
        default_value_t = DEFAULT_MONTHS,
        value_parser = clap::value_parser!(u32).range(1..=120),
        help = "Number of months to look back"
    )]
    pub months: u32,

    #[arg(long, help = "Output stats as JSON")]
    pub json: bool,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (-v info, -vv debug)")]
    pub verbose: u8,
}

impl CommonArgs {
    pub fn dotfile_path(&self) -> Result<PathBuf> {
        match &self.dotfile {
            Some(path) => Ok(path.clone()),
            None => Ok(home_file(DEFAULT_DOTFILE)?),
        }
    }

    pub fn ignore_file_path(&self) -> Result<PathBuf> {
        match &self.ignore_file {
            Some(path) => Ok(path.clone()),
            None => Ok(home_file(DEFAULT_IGNORE_FILE)?),
        }
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// `RUST_LOG` wins over `-v`.
    pub fn init_logging(&self) {
        let env = env_logger::Env::default().default_filter_or(self.common.log_level());
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .try_init();
    }

    pub fn execute(self) -> Result<()> {
        if self.common.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        if let Some(folder) = &self.add {
            crate::scan::exec(&self.common, folder)?;
        }
        if let Some(email) = &self.email {
            crate::heat::exec(&self.common, email)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn an_action_is_required() {
        assert!(Cli::try_parse_from(["gitcal"]).is_err());
        assert!(Cli::try_parse_from(["gitcal", "--json"]).is_err());
    }

    #[test]
    fn add_and_email_can_be_combined() {
        let cli = Cli::try_parse_from(["gitcal", "--add", "/src", "--email", "me@example.com"]).unwrap();
        assert_eq!(cli.add, Some(PathBuf::from("/src")));
        assert_eq!(cli.email.as_deref(), Some("me@example.com"));
        assert_eq!(cli.common.months, DEFAULT_MONTHS);
    }

    #[test]
    fn months_must_be_positive() {
        assert!(Cli::try_parse_from(["gitcal", "--email", "a@b", "--months", "0"]).is_err());
        let cli = Cli::try_parse_from(["gitcal", "--email", "a@b", "--months", "12"]).unwrap();
        assert_eq!(cli.common.months, 12);
    }

    #[test]
    fn verbosity_maps_to_log_level() {
        let cli = Cli::try_parse_from(["gitcal", "--email", "a@b", "-vv"]).unwrap();
        assert_eq!(cli.common.log_level(), "debug");
    }
}
