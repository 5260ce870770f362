use crossbow::run_crossbow;

fn main() {
    let args_itr = std::env::args_os().skip(1);
    if run_crossbow(args_itr).is_err() {
        // Already logged with its context
        std::process::exit(1);
    }
}
