#[tokio::main]
async fn main() {
    if let Err(error) = health_pulse_lib::run().await {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
