//! Utilities shared across the workspace.

pub mod buffer2;
pub mod cancel;
pub mod log_setup;
pub mod shared_fn;

pub use buffer2::Buffer2;
pub use cancel::CancelToken;
pub use log_setup::setup_logging;
pub use shared_fn::SharedFn;
