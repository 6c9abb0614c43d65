#[tokio::main]
async fn main() -> anyhow::Result<()> {
    guess_range_bot::run_bot().await
}
