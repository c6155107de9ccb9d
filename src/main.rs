#[tokio::main]
async fn main() {
    if let Err(e) = droplog_reports::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
