//! finlytics-ingest: the boundary to the statement parsing service.
//! Decodes its loosely-typed JSON into core types and performs uploads.

pub mod client;
pub mod wire;

pub use client::{DEFAULT_BASE_URL, UploadClient, submit};
pub use wire::{decode_parsed_result, decode_transaction};
