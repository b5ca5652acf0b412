use std::{env, process};

fn main() {
    if let Err(err) = pcb::cli::run(env::args().skip(1)) {
        pcb::cli::report_error(&err);
        process::exit(1);
    }
}
