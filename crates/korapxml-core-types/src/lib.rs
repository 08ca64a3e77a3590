//! Core types shared across the KorAP-XML exporter crates
//!
//! This crate provides foundational types used by the export engine,
//! the seed loader and the logging facility:
//!
//! - **Qualified names**: `QName` for `namespace::name` annotation keys
//! - **Format constants**: KorAP-XML namespace, version and file names
//! - **Schema constants**: Canonical field keys and event names

pub mod format;
pub mod qname;
pub mod schema;

pub use qname::QName;
