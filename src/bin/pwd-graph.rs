//! Analyze one password from the command line and print the result as JSON.

use std::process::ExitCode;

use clap::Parser;
use pwd_graph::analyze_password;
use secrecy::SecretString;

#[derive(Parser)]
#[command(name = "pwd-graph", about = "Graph-theoretic password strength analysis", version)]
struct Args {
    /// Password to analyze
    password: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let password = SecretString::new(args.password.into());

    #[cfg(feature = "async")]
    let outcome = analyze_password(&password, None);

    #[cfg(not(feature = "async"))]
    let outcome = analyze_password(&password);

    match outcome.map(|r| serde_json::to_string_pretty(&r)) {
        Ok(Ok(json)) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Ok(Err(e)) => {
            eprintln!("error: failed to serialize result: {e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
