//! Client for the storefront's create-product endpoint.
//!
//! The form only depends on the [`ProductApi`] trait; [`HttpProductApi`] is
//! the `reqwest` implementation used by the binary.

mod client;
mod error;

pub use client::{HttpProductApi, ProductApi, rejection};
pub use error::{REJECTED_FALLBACK, SubmitError, TRANSPORT_FALLBACK};
