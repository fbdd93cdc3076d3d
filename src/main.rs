use clap::Parser;
use colored::Colorize;

use ipcountry::cli::Cli;
use ipcountry::config::AppConfig;
use ipcountry::runtime::modes::run_server;
use ipcountry::system::init_logging;

#[actix_web::main]
async fn main() {
    let cli = Cli::parse();

    if cli.generate_config {
        match AppConfig::generate_sample_config() {
            Ok(sample) => {
                print!("{}", sample);
                return;
            }
            Err(e) => {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
        }
    }

    let config = match AppConfig::load_with_overrides(cli.config.as_deref(), &cli.to_overrides())
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    // guard 必须存活到进程结束，否则缓冲中的日志会丢失
    let _log_guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    if let Err(e) = run_server(&config).await {
        eprintln!("{} {:#}", "Error:".bold().red(), e);
        std::process::exit(1);
    }
}
