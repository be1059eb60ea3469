use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(e) = idmsim_cli::run().await {
        error!("Error: {e}");
        std::process::exit(1);
    }
}
