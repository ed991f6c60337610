pub mod installation;
pub mod platform;

pub use installation::{JvmInstallation, ProbeSource};
pub use platform::{Architecture, OsFamily};
