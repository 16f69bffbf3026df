pub mod args;
pub mod transport;

pub use args::OscArg;
pub use transport::Transport;
