#[tokio::main]
async fn main() {
    // Setup failures (bad tuning, bind, accept) end the process with a failure status.
    if let Err(error) = lander_server::run_with_config().await {
        tracing::error!(%error, "lander server failed");
        std::process::exit(1);
    }
}
