//! Lists scripts page by page and shows how to branch on error kinds.
//!
//! Expects a processor service at `PROCESSOR_URL` (default `http://localhost:3003`).
//!
//! Run with: `cargo run --example list_scripts`

use processor_client::{Client, Error};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("processor_client=debug")
        .init();

    let base_url =
        std::env::var("PROCESSOR_URL").unwrap_or_else(|_| "http://localhost:3003".to_string());

    let client = Client::builder()
        .base_url(base_url)
        .timeout(Duration::from_secs(5))
        .build()?;

    println!("=== Scripts ===");
    let mut query = Some("page=1&per_page=10".to_string());
    while let Some(current) = query.take() {
        let page = client.list_scripts(&current).await?;
        for script in &page.data {
            println!(
                "{:<24} {:<12} v{:<6} enabled={}",
                script.name, script.service, script.version, script.enabled
            );
        }
        query = page.pagination.and_then(|p| p.next_query());
    }
    println!();

    println!("=== Looking up a missing execution ===");
    match client.get_script_execution("does-not-exist").await {
        Ok(execution) => println!("Unexpectedly found: {:?}", execution.data),
        Err(Error::Api(api)) => {
            println!("Service said no");
            println!("  Status: {}", api.status);
            println!("  Message: {}", api.message);
            println!("  Raw body: {}", api.body);
        }
        Err(e) if e.is_transport() => println!("Could not talk to the service: {}", e),
        Err(e) => return Err(e.into()),
    }
    println!();

    println!("=== Validation happens before the network ===");
    let err = client.delete_event("").await.unwrap_err();
    println!("  {} (validation: {})", err, err.is_validation());

    Ok(())
}
