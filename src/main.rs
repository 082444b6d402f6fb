//! pomolog main entrypoint.

use pomolog::run;
use pomolog::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
