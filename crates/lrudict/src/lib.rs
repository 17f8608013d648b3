//! # lrudict
//!
//! Bounded, recency-ordered key/value dictionary.
//!
//! ## Architecture
//! - **HashMap**: AHash table from key to arena handle (O(1) lookup)
//! - **Recency list**: doubly-linked list of arena slots, tail = least
//!   recently used, head = most recently used (O(1) move/unlink)
//! - **Cropping**: evicts from the tail whenever an insert, a capacity change
//!   or a forced length trim would leave too many entries
//! - **SharedLruDict**: `RwLock`-serialized handle with hit/miss statistics
//!   for callers that share one dictionary across threads
//!
//! ```
//! use lrudict::LruDict;
//!
//! let mut dict = LruDict::new(3);
//! dict.set("foo", 42).set("bar", 43).set("zot", 44);
//! dict.get("foo");
//! dict.set("moo", 45);
//!
//! assert_eq!(dict.keys(), vec!["zot", "foo", "moo"]);
//! ```

#![warn(missing_docs)]

mod bound;
mod config;
mod dict;
mod error;
mod list;
mod shared;
mod stats;

pub use bound::{clamp_len, len_from_signed, parse_len, Capacity};
pub use config::DictConfig;
pub use dict::LruDict;
pub use error::{Error, Result};
pub use list::Iter;
pub use shared::SharedLruDict;
pub use stats::CacheStats;
