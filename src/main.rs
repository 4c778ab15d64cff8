use clap::{CommandFactory, Parser};
use predef::error::GetExitCode;

fn main() {
    env_logger::init();

    let args = match predef::Args::try_parse() {
        Ok(args) => args,
        Err(error) if error.use_stderr() => {
            // Bad argument shape: usage goes to stdout, exit code 1.
            println!("{}", predef::Args::command().render_usage());
            std::process::exit(1);
        }
        Err(error) => {
            // --help or --version.
            error.exit();
        }
    };

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let result = predef::run(stdout, stderr, args);
    std::process::exit(result.get_exit_code());
}
