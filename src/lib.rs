//! # Recap - Order History Report Generator
//!
//! Recap turns exported food-delivery order-history JSON into a single
//! summary image. Users paste up to eight raw order-dump payloads into a
//! web form; the server parses and deduplicates the orders, aggregates a
//! year of delivered orders, and rasterizes a four-panel recap report
//! (stat tiles plus monthly, venue and dish bar charts) served as
//! `reports/<guid>.png`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use recap::client::SubmissionController;
//! use recap::wire::SubmissionPayload;
//!
//! # async fn example() -> Result<(), recap::client::SubmissionError> {
//! let mut controller = SubmissionController::new("http://localhost:8080");
//!
//! // Before any submission the display shows the instructions image.
//! assert_eq!(controller.current_image(), "static/instructions.jpg");
//!
//! let payload = SubmissionPayload {
//!     orders1: std::fs::read_to_string("orders.json").unwrap(),
//!     ..Default::default()
//! };
//!
//! // One round trip; on success the display path points at the report.
//! let path = controller.submit(&payload).await?;
//! assert_eq!(path, controller.current_image());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Submission state machine and HTTP client |
//! | [`wire`] | Shared request/response contract types |
//! | [`orders`] | Order-dump parsing and aggregation |
//! | [`report`] | Report rasterization and persistence |
//! | [`server`] | axum HTTP server |
//! | [`error`] | Error types |

pub mod client;
pub mod error;
pub mod orders;
pub mod report;
pub mod server;
pub mod wire;

// Re-exports for convenience
pub use error::RecapError;
pub use wire::SubmissionPayload;
