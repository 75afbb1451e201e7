//! rTriplog main entrypoint.

use rtriplog::run;
use rtriplog::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
