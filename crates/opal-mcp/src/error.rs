//! Mapping from Opal errors to MCP error data.

use crate::model::ErrorData;
use opal_core::Error;

/// Conversion into the MCP wire error.
pub trait McpErrorExt {
    /// Map this error to the appropriate MCP error code.
    fn to_mcp_error(&self) -> ErrorData;
}

impl McpErrorExt for Error {
    fn to_mcp_error(&self) -> ErrorData {
        match self {
            // Bad caller input maps to invalid params; everything else
            // (missing schemas, transport and upstream failures) is an
            // internal error whose message keeps the original detail.
            Error::Validation(message) => ErrorData::invalid_params(message.clone(), None),
            other => ErrorData::internal_error(other.to_string(), None),
        }
    }
}
