mod session;
mod shell;

pub use session::*;
pub use shell::*;
