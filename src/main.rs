#[tokio::main]
async fn main() -> anyhow::Result<()> {
    acc_console_lib::run().await
}
