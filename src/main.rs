//=========================================================================
// Genesis
//
// Usage: genesis [CONFIG]
//
// CONFIG defaults to `assets/genesis.ron`. Logging follows `RUST_LOG`
// (default `info`), e.g. `RUST_LOG=scene=debug,game=info`.
//
//=========================================================================

use std::process::ExitCode;

use genesis::EngineBuilder;
use log::error;

const DEFAULT_CONFIG: &str = "assets/genesis.ron";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let builder = match EngineBuilder::from_config_file(&path) {
        Ok(builder) => builder,
        Err(e) => {
            error!(target: "game", "{e}");
            return ExitCode::FAILURE;
        }
    };

    match builder.build().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(target: "platform", "{e}");
            ExitCode::FAILURE
        }
    }
}
