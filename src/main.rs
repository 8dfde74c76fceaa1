fn main() {
    if let Err(err) = pandaset::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
