//! routinely main entrypoint.

use routinely::run;
use routinely::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
