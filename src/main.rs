use gitget::presentation::cli::CliApp;
use std::process::ExitCode;

fn main() -> ExitCode {
    CliApp::new().run()
}
