//! CLI command implementations.

pub(crate) mod convert;
pub(crate) mod serve;

pub(crate) use convert::ConvertArgs;
pub(crate) use serve::ServeArgs;
