//! Quota report example.
//!
//! Prints the monthly quota of every resource, logging retries and failures.
//!
//! Run with: `REYAH_ACCESS_TOKEN=your-token cargo run --example quota_report`
//!
//! `REYAH_API_PROTOCOL` and `REYAH_API_HOSTNAME` point the client at another host.

use reyah::{Client, Config, Event, RangeSelector, TokenAuthProvider};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), reyah::Error> {
    // RUST_LOG=reyah=debug shows every attempt
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reyah=warn")))
        .init();

    let token = std::env::var("REYAH_ACCESS_TOKEN").expect("REYAH_ACCESS_TOKEN must be set");

    let client = Client::builder()
        .config(Config::from_env()?)
        .auth_provider(Arc::new(TokenAuthProvider::from_access_token(token)))
        .user_agent_suffix("QuotaReport/1.0")
        .build()?;

    client.events().on("error", |event| {
        if let Event::Error(err) = event {
            eprintln!("request failed: {}", err);
        }
    });

    let status = client.quota().alive().await?;
    if !status.ok {
        eprintln!(
            "quota service degraded: {}",
            status.reason.as_deref().unwrap_or("no reason given")
        );
    }

    let resources = client.quota().retrieve_all().await?;
    println!("{:<20} {:>10} {:>10}", "resource", "used", "limit");
    for resource in &resources.quotas {
        match resource.quota(RangeSelector::Monthly) {
            Some(q) => println!("{:<20} {:>10} {:>10}", resource.resource_name, q.current, q.max),
            None => println!("{:<20} {:>10} {:>10}", resource.resource_name, "-", "-"),
        }
    }

    Ok(())
}
