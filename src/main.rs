#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    if let Err(err) = chincol::run::run(args, None).await {
        eprintln!("❌ {err:#}");
        std::process::exit(1);
    }
}
