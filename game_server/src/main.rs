#[tokio::main]
async fn main() -> std::io::Result<()> {
    wolves_server::run_with_config().await
}
