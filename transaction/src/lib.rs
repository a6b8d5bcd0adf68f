//! The Dredd hook transaction record and its tolerant JSON decoding.
//!
//! Header values may arrive as strings, numbers or arrays of those; they are
//! always normalized to lists of strings, and any other shape is an error.

mod data;
mod decoder_configuration;
mod error;
mod headers;

pub use data::{
    transactions_from_slice, transactions_from_slice_with, Expected, Real, Request, Transaction,
};
pub use decoder_configuration::DecoderConfiguration;
pub use error::Error;
pub use headers::{Headers, ValueKind};
