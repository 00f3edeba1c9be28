//! Client SDK for the storefront edge.

mod client;

pub use client::{CartLine, CartSummary, ClientError, StorefrontClient};
