use std::process::ExitCode;

fn main() -> ExitCode {
    stampy_cli::run()
}
