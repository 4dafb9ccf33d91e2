#[tokio::main]
async fn main() {
    if let Err(e) = relocation_planner::run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
