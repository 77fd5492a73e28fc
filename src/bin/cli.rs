use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    deepsource::cli::run().await
}
