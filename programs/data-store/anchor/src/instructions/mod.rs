pub mod init;
pub mod update;
pub mod close;

pub use init::*;
pub use update::*;
pub use close::*;
