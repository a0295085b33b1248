use labelcheck::cli::{self, ParseOutcome};
use labelcheck::error::EXIT_FAILURE;

fn main() {
    let cli = match cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(ParseOutcome::Informational(e)) => e.exit(),
        Err(ParseOutcome::Failed(e)) => {
            println!("{}", e);
            std::process::exit(e.exit_code());
        }
    };

    match cli::run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_FAILURE);
        }
    }
}
