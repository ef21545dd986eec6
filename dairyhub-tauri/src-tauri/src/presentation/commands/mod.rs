pub mod backup_commands;
pub mod offline_commands;
pub mod storage_commands;
pub mod system_commands;

pub use backup_commands::*;
pub use offline_commands::*;
pub use storage_commands::*;
pub use system_commands::*;
