//! Bounded-capacity stream I/O over a fixed byte region.
//!
//! [`BufRw`] exposes a pre-allocated region through `read`, `write`,
//! `seek`, positional and stream-to-stream operations without ever
//! growing the region:
//!
//! ```
//! use std::io::Write;
//!
//! let mut rw = boundio::allocate(3);
//! rw.write_all(&[255, 0, 255]).unwrap();
//! assert_eq!(&*rw.head(), &[255, 0, 255]);
//! assert!(rw.write_all(&[1]).is_err());
//! ```

pub mod buf;

pub use buf::*;
