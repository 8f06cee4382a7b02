//! REST resource layer for the ActiveCampaign API.
//!
//! This module turns raw API responses into typed resources and provides the
//! generic machinery every resource kind shares:
//!
//! - **[`Resource`] trait**: wire names plus generic `fetch`, `list`,
//!   `create`, `update` and `delete`
//! - **[`transform`] / [`first_or_none`]**: envelope unwrapping
//! - **[`Reference`] / [`Resolve`]**: id / natural key / value references and
//!   their resolution to canonical resources
//! - **[`ResourceError`]**: semantic error types for resource operations
//! - **[`resources`]**: the resource kinds (Contact, Order, ...)
//!
//! # Example
//!
//! ```rust,ignore
//! use activecampaign::rest::{Reference, Resource};
//! use activecampaign::rest::resources::Contact;
//!
//! let client = RestClient::new(&config)?;
//!
//! // Fetch by id; a 404 is Ok(None)
//! let contact = Contact::fetch(&client, 12).await?;
//!
//! // Resolve whatever the caller handed us
//! let contact = Reference::<Contact>::from("jane@example.com")
//!     .resolve(&client)
//!     .await?;
//! ```

mod errors;
pub(crate) mod lenient;
mod reference;
mod resource;
mod transform;

pub mod resources;

pub use errors::ResourceError;
pub use reference::{Reference, Resolve};
pub use resource::Resource;
pub use transform::{first_or_none, transform};
