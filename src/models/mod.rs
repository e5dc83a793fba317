/// Symbol version and error correction level
pub mod qr_code;

pub use qr_code::{ECLevel, Version};
