//! # hubdir - a typed client for a GitHub-style user directory
//!
//! hubdir turns declarative endpoint descriptions into HTTP requests, runs
//! each one exactly once over a shared, pooled connection, and folds every
//! failure into a single closed [`Error`] type. Successful calls return the
//! raw body; decode it with [`models::decode`] or call
//! [`Client::call_json`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use hubdir::{Client, UserRepository, UserRepositoryImpl};
//! use hubdir::endpoint::{GetUserParams, ListUsersParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hubdir::Error> {
//!     let client = Client::builder().build()?;
//!     let repo = UserRepositoryImpl::new(client);
//!
//!     let users = repo.list_users_decoded(ListUsersParams::new(30, 0)).await?;
//!     for user in &users {
//!         println!("{} ({})", user.login, user.html_url);
//!     }
//!
//!     let octocat = repo.get_user_decoded(GetUserParams::new("octocat")).await?;
//!     println!("{} has {} followers", octocat.name, octocat.followers);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every outcome is a value. Nothing is retried; one failed attempt is final.
//!
//! ```no_run
//! use hubdir::{Client, Error, endpoint::{Endpoint, GetUserParams}};
//!
//! # async fn example(client: Client) {
//! match client.call(&Endpoint::GetUser(GetUserParams::new("ghost"))).await {
//!     Ok(body) => println!("{} bytes", body.len()),
//!     Err(Error::NotFound) => println!("no such user"),
//!     Err(Error::NoInternet | Error::Timeout) => println!("check your connection"),
//!     Err(e) => println!("{e}"),
//! }
//! # }
//! ```
//!
//! ## Logging
//!
//! Calls emit `tracing` events: `Make request` and `Received response` at
//! info, the pretty-printed body at debug, and a warning when the body is
//! not JSON or the call fails. Install a subscriber to see them.

pub mod classify;
mod client;
pub mod config;
pub mod endpoint;
mod error;
pub mod metadata;
pub mod models;
mod repository;
pub mod request;
mod response;
pub mod transport;

pub use client::{CallState, Client, ClientBuilder};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use repository::{UserRepository, UserRepositoryImpl};
pub use response::RawResponse;
pub use transport::{ReqwestTransport, Transport, TransportError};
