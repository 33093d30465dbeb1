//! Process execution for toolchain probes
//!
//! The cache only ever talks to external programs through [`CommandRunner`],
//! so tests can substitute a scripted runner for `node`/`npm`/`yarn`.

mod command;
#[cfg(test)]
pub(crate) mod fake;
mod system;

pub use command::CommandRunner;
pub use system::SystemRunner;
