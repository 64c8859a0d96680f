use std::process::ExitCode;

use audio_rename::AudioRenameError;
use audio_rename::output as out;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = audio_rename::cli::parse();
    match app::run(args) {
        Ok(code) => code,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            match e.downcast_ref::<AudioRenameError>() {
                Some(typed) => app::exit_code(typed.code()),
                None => ExitCode::FAILURE,
            }
        }
    }
}
