use module_registry_pusher::cli::{Args, Runner};
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse_args().from_env();
    let runner = Runner::new(args);

    if let Err(e) = runner.run().await {
        runner.logger().error(&e.to_string());
        process::exit(1);
    }
}
