use clap::{Parser, Subcommand};
use logpile::{app, app::config::Config, http::auth::hash_password};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "logpile", version, about = "Minimal self-hosted log sink")]
struct Cli {
  /// Config file (defaults to $LOGPILE_CONFIG, then ./config.toml)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Start the HTTP server (default)
  Serve,
  /// Delete logs older than `keep_logs_days`
  Cleanup,
  /// Print a password hash for the `[auth.users]` table
  HashPassword { password: String },
}

#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  let command = cli.command.unwrap_or(Command::Serve);

  if let Command::HashPassword { password } = &command {
    match hash_password(password) {
      Ok(hash) => println!("{hash}"),
      Err(e) => {
        eprintln!("error: {e}");
        std::process::exit(1);
      }
    }
    return;
  }

  logpile::util::init_tracing();

  let config = match Config::load(cli.config.as_deref()) {
    Ok(config) => config,
    Err(e) => {
      eprintln!("{e}");
      std::process::exit(1);
    }
  };

  let result = match command {
    Command::Cleanup => app::cleanup(config).await.map(|_| ()),
    _ => app::run(config).await,
  };
  if let Err(e) = result {
    eprintln!("error: {e}");
    std::process::exit(1);
  }
}
