use crate::report::{run_rubric, run_score, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use skill_audit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "skill-audit",
    about = "Score agent skill descriptors against the weighted quality rubric",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score one skill document stored as JSON and print the report
    Score(ScoreArgs),
    /// Print the rubric categories and their weights
    Rubric,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Rubric => run_rubric(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["skill-audit"]).expect("parses");

        assert!(cli.command.is_none());
    }

    #[test]
    fn score_takes_a_path_and_json_flag() {
        let cli = Cli::try_parse_from(["skill-audit", "score", "skill.json", "--json"])
            .expect("parses");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.path, std::path::PathBuf::from("skill.json"));
                assert!(args.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
