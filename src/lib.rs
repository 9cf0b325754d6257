//! # processor-client - typed client for the processor service
//!
//! An async client for the processor service's REST API, built on `reqwest`.
//! It covers three resources: events, the scripts run against them, and the
//! executions those runs leave behind.
//!
//! ## Quick Start
//!
//! ```no_run
//! use processor_client::{Client, CreateScript, UpdateScript};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), processor_client::Error> {
//!     let client = Client::builder()
//!         .base_url("http://localhost:3003")
//!         .timeout(Duration::from_secs(5))
//!         .build()?;
//!
//!     let created = client
//!         .create_script(
//!             &CreateScript::new("tag-vip", "orders", "javascript", "event.vip = true;")
//!                 .enabled(false),
//!         )
//!         .await?;
//!
//!     let update = UpdateScript {
//!         enabled: Some(true),
//!         ..Default::default()
//!     };
//!     client.update_script(&created.data.id, &update).await?;
//!
//!     let runs = client
//!         .list_script_executions_by_script(&created.data.id, "page=1&per_page=20")
//!         .await?;
//!     for run in &runs.data {
//!         println!("{} {} {}ms", run.event_id, run.status, run.duration_ms);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **One method per endpoint** - events, scripts and script executions
//! - **Typed envelopes** - every response decodes into [`ListResponse`] or [`ItemResponse`]
//! - **Three-way errors** - validation, transport and API failures are distinct [`Error`] kinds
//! - **Verbatim query forwarding** - list filters and pagination pass through untouched
//! - **Structured logging** - request and response events via `tracing`
//!
//! ## Error Handling
//!
//! Remote failures carry the status code, a best-effort message and the raw body:
//!
//! ```no_run
//! use processor_client::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::builder().base_url("http://localhost:3003").build()?;
//! match client.delete_script("obsolete").await {
//!     Ok(()) => println!("deleted"),
//!     Err(e) => match e.api_error() {
//!         Some(api) if api.status.as_u16() == 404 => println!("already gone"),
//!         Some(api) => eprintln!("service refused ({}): {}", api.status, api.message),
//!         None => eprintln!("could not reach the service: {}", e),
//!     },
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod events;
mod executions;
mod request;
mod scripts;
pub mod types;

pub use client::{Client, ClientBuilder};
pub use config::{Config, DEFAULT_TIMEOUT};
pub use error::{ApiError, Error, Result};
pub use request::API_PATH_PREFIX;
pub use types::{
    CreateScript, Event, GetEventResponse, GetScriptExecutionResponse, GetScriptResponse,
    ItemResponse, ListEventsResponse, ListResponse, ListScriptExecutionsResponse,
    ListScriptsResponse, Pagination, Payload, Script, ScriptExecution, UpdateEvent, UpdateScript,
};
