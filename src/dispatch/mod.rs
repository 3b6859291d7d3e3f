//! Decision logic: turns an inbound update into the outbound actions to perform.
//!
//! Dispatchers are pure. They read the update and their injected configuration
//! and never talk to the network; the webhook handler executes what they return.

pub mod celebrate;
pub mod hunt;

use crate::core::models::{Action, Update};

pub use celebrate::CelebrationDispatcher;
pub use hunt::HuntDispatcher;

pub const START_COMMAND: &str = "/start";

/// Maps one update to zero or more outbound actions, in execution order.
pub trait Dispatcher: Send + Sync {
    fn decide(&self, update: &Update) -> Vec<Action>;
}

/// Decodes a button payload into a rotation index. Anything that is not a
/// non-negative decimal integer maps to `0`.
#[must_use]
pub fn decode_index(payload: &str) -> usize {
    payload.trim().parse().unwrap_or(0)
}

/// Encodes a rotation index as the decimal text carried in `callback_data`.
#[must_use]
pub fn encode_index(index: usize) -> String {
    index.to_string()
}

/// Next position in a rotation of `len` items. `len` must be non-zero.
#[must_use]
pub fn next_index(index: usize, len: usize) -> usize {
    (index + 1) % len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_falls_back_to_zero() {
        assert_eq!(decode_index("4"), 4);
        assert_eq!(decode_index(" 2 "), 2);
        assert_eq!(decode_index(""), 0);
        assert_eq!(decode_index("abc"), 0);
        assert_eq!(decode_index("-1"), 0);
    }

    #[test]
    fn payload_codec_is_decimal_text() {
        assert_eq!(encode_index(0), "0");
        assert_eq!(encode_index(17), "17");
        assert_eq!(decode_index(&encode_index(17)), 17);
    }

    #[test]
    fn rotation_cycles_back_to_start() {
        for len in 1..=6 {
            for start in 0..len {
                let mut idx = start;
                for _ in 0..len {
                    idx = next_index(idx, len);
                    assert!(idx < len);
                }
                assert_eq!(idx, start, "len {len}, start {start}");
            }
        }
    }
}
