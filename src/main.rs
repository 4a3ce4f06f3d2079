#![cfg_attr(windows, windows_subsystem = "windows")]

use bugme::cli::{self, Invocation};
use bugme::config::Settings;
use bugme::error::EXIT_OK;
use bugme::logging;

fn main() {
    let settings = Settings::from_env();
    if let Err(e) = logging::init(&settings) {
        eprintln!("Warning: {:#}", e);
    }

    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            let code = e.exit_code();
            tracing::error!(code, "{:#}", anyhow::Error::new(e));
            code
        }
    };
    std::process::exit(code);
}

fn run() -> bugme::Result<i32> {
    let cli = match cli::parse_from(std::env::args_os()) {
        Ok(Invocation::Notify(cli)) => cli,
        Ok(Invocation::Help(text)) | Ok(Invocation::Version(text)) => {
            print!("{}", text);
            return Ok(EXIT_OK);
        }
        Err(e) => {
            let _ = e.print();
            return Err(cli::parse_error(&e));
        }
    };

    let request = cli.into_request()?;
    bugme::show(&request)
}
