fn main() {
    if let Err(err) = olympic_stats::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
