use std::process::ExitCode;

use clap::Parser;

use pg_json_views::cli::Args;
use pg_json_views::config::ConfigFile;
use pg_json_views::context::AppContext;
use pg_json_views::error::ServiceError;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let result = ConfigFile::resolve(args.config.as_deref())
        .map(AppContext::from_config)
        .and_then(|ctx| args.command.run(&ctx, args.format));

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let error = ServiceError::from_error(err.as_ref());
            log::debug!("{} failed: {}", error.status_code(), err);
            eprintln!("{}", error.body());
            ExitCode::FAILURE
        }
    }
}
