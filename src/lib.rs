pub mod checksum;
pub mod constants;
pub mod error;
pub mod frame;
pub mod types;

// Re-export the codec surface for easy access
pub use frame::{ReceiveFrame, SendFrame, make_frame};
pub use types::{Command, FrameType};
