use advisor::cli::{
    candidates::handle_candidates, handle_completions, handle_config_init,
    recommend::handle_recommend, Cli, Commands, ConfigCommands,
};
use clap::Parser;
use colored::Colorize;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => advisor::cli::serve::run_serve(args).await,
        Commands::Recommend(args) => handle_recommend(&args).await.map(|output| {
            println!("{}", output);
        }),
        Commands::Candidates(args) => handle_candidates(&args).await.map(|output| {
            println!("{}", output);
        }),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}
