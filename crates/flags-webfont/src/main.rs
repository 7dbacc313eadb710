//! Builds the country-flag web font with the default Twemoji inputs.

use std::process;

use flags_webfont::{build_flags_font, BuildOptions};

fn main() {
    env_logger::init();
    let options = BuildOptions::default();
    if let Err(err) = build_flags_font(&options) {
        eprintln!("failed building flags font: {err}");
        process::exit(1);
    }
}
