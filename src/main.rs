#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = secmark_rust::run().await {
        eprintln!("secmark-rust fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
