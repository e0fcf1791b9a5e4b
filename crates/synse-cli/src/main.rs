use std::process;

#[tokio::main]
async fn main() {
    let code = synse_cli::run().await;
    if code != 0 {
        process::exit(code);
    }
}
