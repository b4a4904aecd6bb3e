fn main() {
    env_logger::init();
    if let Err(err) = scriptwright::cli::run() {
        // Failure messages go to stdout, each on its own paragraph.
        println!("\n{}", err);
        std::process::exit(1);
    }
}
