//! Common test utilities and shared reference frames

// Allow unused imports and dead code since this is a shared module
// used across multiple test files - not all items are used in every test file
#[allow(unused_imports)]
pub use bytes::Bytes;
#[allow(unused_imports)]
pub use rctframe::error::RctError;
#[allow(unused_imports)]
pub use rctframe::{Command, FrameType, ReceiveFrame, SendFrame, make_frame};

/// Decode hex string to bytes for testing
#[allow(dead_code)]
pub fn hex_to_bytes(hex_data: &str) -> Vec<u8> {
    hex::decode(hex_data).expect("Failed to decode hex")
}

/// Initialize tracing for a test; honors `RUST_LOG` so decoder state
/// transitions can be inspected with e.g. `RUST_LOG=rctframe=trace`
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Read request for object id 1, standard frame
#[allow(dead_code)]
pub const READ_ID1: &str = "2b010400000001dc87";

/// Read request for object id 0x959930BF (battery state of charge)
#[allow(dead_code)]
pub const READ_BATTERY_SOC: &str = "2b0104959930bf0375";

/// Response for object 0x959930BF carrying the float 0.6 (0x3F19999A)
#[allow(dead_code)]
pub const RESPONSE_BATTERY_SOC: &str = "2b0508959930bf3f19999a1574";

/// Write of [0xAA, 0xBB] to object id 0x10, standard frame
#[allow(dead_code)]
pub const WRITE_SMALL: &str = "2b020600000010aabb89e5";

/// WRITE_SMALL with one payload byte corrupted (0xAA -> 0xAB)
#[allow(dead_code)]
pub const WRITE_SMALL_CORRUPT: &str = "2b020600000010abbb89e5";

/// Write where the object id and payload contain the start and escape token
/// values (id 0x2B2D002B, payload [0x2D])
#[allow(dead_code)]
pub const WRITE_ESCAPED: &str = "2b02052d2b2d2d002d2b2d2d2fe8";

/// Long response for object id 5 with payload [0x01, 0x02, 0x03]
#[allow(dead_code)]
pub const LONG_RESPONSE_SMALL: &str = "2b0600070000000501020369d3";

/// Plant write of [0xAA, 0xBB] to object id 0x10 at bus address 0xCAFEBABE
#[allow(dead_code)]
pub const PLANT_WRITE: &str = "2b0212cafebabe00000010aabbdb2e";

/// Plant read of object 0x959930BF at bus address 1
#[allow(dead_code)]
pub const PLANT_READ: &str = "2b011000000001959930bf5939";

/// Frame with an unmapped command byte (0x99) and a valid checksum
#[allow(dead_code)]
pub const UNKNOWN_COMMAND: &str = "2b9904000000011f61";
