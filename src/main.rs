use clap::Parser;
use env_logger::Env;
use std::io;
use std::process::ExitCode;
use xp::{Args, run};

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("xp=warn")).init();

    let args = Args::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match run(&args, io::stdin().lock(), &mut out, &mut io::stderr()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
