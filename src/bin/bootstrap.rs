// This is the Lambda bootstrap entry point for the notifier function

use lambda_runtime::{Error, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    cf_notify::setup_logging();
    run(service_fn(cf_notify::notify::handler)).await
}
