#[tokio::main]
async fn main() {
    tourops_backend::run().await;
}
