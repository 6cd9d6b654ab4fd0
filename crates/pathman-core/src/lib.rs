//! The pathman core library: the PATH-string engine, the target resolver,
//! the PowerShell bridge, and the ambient support (errors, logging,
//! sessions) shared by the pathman CLI.

pub mod error;
pub mod event;
pub mod fs;
pub mod layout;
pub mod log;
pub mod modify;
pub mod path_list;
pub mod powershell;
pub mod refresh;
pub mod resolve;
pub mod scope;
pub mod session;
pub mod style;
