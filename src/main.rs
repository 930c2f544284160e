#[tokio::main]
async fn main() -> godocbot::error::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("godocbot=info"))
        .init();
    log::info!("Starting godocbot");

    match godocbot::run().await {
        Ok(()) => {
            log::info!("Server shut down successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Server encountered an error: {}", e);
            Err(e)
        }
    }
}
