//! Built-in side-effect functions

pub mod email;
pub mod sheets;

pub use email::SendEmail;
pub use sheets::AddSpreadsheetRow;

use super::registry::FunctionDescriptor;

/// Descriptors of the built-in functions, in registration order
pub fn descriptors() -> Vec<FunctionDescriptor> {
    vec![email::descriptor(), sheets::descriptor()]
}
