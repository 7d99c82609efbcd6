//! Airline customer-support router.
//!
//! A conversation starts at a triage handler that hands off to specialists
//! (FAQ, seat booking, flight status, airport info, airline info). Each
//! handler owns a few tools backed by fixed tables or the aviationstack API;
//! what to say and which tool or handoff to invoke is decided by a pluggable
//! [`provider::ModelProvider`]. Context and transcript are persisted per
//! conversation in MongoDB, or in memory when MongoDB is unreachable.
//!
//! # Quick Start
//!
//! ```no_run
//! use airline_support::config::SupportConfig;
//! use airline_support::service::SupportService;
//!
//! # async fn example() -> airline_support::error::Result<()> {
//! let config = SupportConfig::from_env()?;
//! let service = SupportService::connect(&config).await?;
//! let mut session = service.start_session();
//! for reply in session.send(&service, "Check AA123 status").await? {
//!     println!("{reply}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod aviation;
pub mod config;
pub mod console;
pub mod context;
pub mod error;
pub mod handlers;
pub mod provider;
pub mod runtime;
pub mod service;
pub mod session;
pub mod storage;
pub mod tools;
pub mod types;
pub mod util;
pub mod validators;
