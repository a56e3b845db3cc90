mod commands;
mod responses;

pub(crate) use commands::Command;
pub use commands::CommandParseError;
pub(crate) use responses::CommandResponse;
