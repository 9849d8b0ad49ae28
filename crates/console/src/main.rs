use clap::Parser;

use auditdesk_console::{Cli, run};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    auditdesk_observability::init_with_level(&cli.log_level);

    if let Err(e) = run(cli).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
