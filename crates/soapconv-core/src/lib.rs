//! Conversion logic for the SOAP converter.
//!
//! [`SoapConverter`] turns request bodies into converted documents;
//! [`SoapConverterHandler`] plugs it into the HTTP service.

pub mod config;
pub mod error;
pub mod handler;
pub mod provider;

pub use config::ConverterConfig;
pub use handler::SoapConverterHandler;
pub use provider::SoapConverter;
