//! HTTP client for the REST backend and its wire formats

pub mod client;
pub mod dto;

#[cfg(test)]
mod tests;

pub use client::ApiClient;
