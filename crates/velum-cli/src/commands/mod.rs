//! Command implementations for the velum CLI.

mod apply;
mod batch;
mod init;
mod preset;

// Re-export all command functions
pub use apply::cmd_apply;
pub use batch::cmd_batch;
pub use init::cmd_init;
pub use preset::{cmd_preset_create, cmd_preset_list, cmd_preset_show};
