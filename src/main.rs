//! A grid-snapped placement reticle built with Rust, the Bevy game engine, and
//! Linebender crates.

use crosshairs::core;

fn main() {
    core::platform::init_panic_handling();
    let cli_args = core::platform::get_cli_args();
    if let Err(error) = core::runner::run_app(cli_args) {
        core::platform::handle_error(error);
    }
}
