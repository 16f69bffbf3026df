pub mod config;
pub mod device;
pub mod error;
pub mod osc;
pub mod params;
pub mod traits;

pub use config::Config;
pub use error::OscError;
pub use osc::args::OscArg;
pub use osc::transport::Transport;
