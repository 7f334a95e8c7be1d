use std::process::ExitCode;

fn main() -> ExitCode {
    cadastro_cli::run()
}
