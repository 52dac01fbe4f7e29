use anyhow::Result;
use tracing_subscriber::EnvFilter;

use mailsift::app::App;
use mailsift::cli::Cli;

/// Diagnostics filter: `RUST_LOG` wins, otherwise derived from `--verbose`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0..=4 => "off",
        5 => "mailsift=debug",
        _ => "mailsift=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();
    init_tracing(cli.verbose);

    let code = App::run(&cli).await?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
