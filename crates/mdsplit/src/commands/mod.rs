//! CLI command implementations.

pub(crate) mod serve;
pub(crate) mod split;

pub(crate) use serve::ServeArgs;
pub(crate) use split::SplitArgs;
