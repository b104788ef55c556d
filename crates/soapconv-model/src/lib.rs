//! Model types for the SOAP converter.
//!
//! Operations, request inputs, outputs and the error type shared by the HTTP
//! layer and the converter core.

pub mod error;
pub mod input;
pub mod operations;
pub mod output;

pub use error::{ConverterError, ConverterErrorCode};
pub use input::{OutputFormat, RestConvertInput, RestCustomInput};
pub use operations::ConverterOperation;
pub use output::{ConvertSoapOutput, ServiceDescription};
