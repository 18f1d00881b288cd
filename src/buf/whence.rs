use num_enum::{IntoPrimitive, TryFromPrimitive};
use tracing::trace;

use super::{BufRw, Error};

/// Reference point of a seek.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Whence {
    /// The offset is absolute.
    Start = 0,
    /// The offset is added to the current one, as a signed `i64`.
    Current = 1,
    /// The offset counts backwards from the capacity.
    End = 2,
}

/// Validates a resolved offset against `[0, capacity]`.
pub(super) fn check_offset(candidate: i128, capacity: usize) -> Result<usize, Error> {
    let err = if candidate < 0 {
        Error::SeekBeforeStart
    } else if candidate > isize::MAX as i128 {
        Error::OffsetOverflow
    } else if candidate > capacity as i128 {
        Error::InsufficientCapacity { count: 0 }
    } else {
        return Ok(candidate as usize);
    };
    trace!(candidate = %candidate, capacity, %err, "offset rejected");
    Err(err)
}

impl BufRw {
    /// Sets the read/write offset and returns it.
    ///
    /// Fails with [`Error::SeekBeforeStart`] if the resolved offset would be
    /// negative, or if `offset` exceeds the capacity under [`Whence::End`].
    /// Fails with [`Error::OffsetOverflow`] if the resolved offset does not
    /// fit into an `isize`, and with [`Error::InsufficientCapacity`] if it
    /// exceeds the capacity. The offset is unchanged on failure.
    pub fn seek(&mut self, offset: u64, whence: Whence) -> Result<u64, Error> {
        let current = self.offset() as i128;
        let capacity = self.capacity();
        let candidate = match whence {
            Whence::Start => i128::from(offset),
            Whence::Current => current + i128::from(offset as i64),
            Whence::End => {
                if offset > capacity as u64 {
                    trace!(offset, capacity, "seek before the start");
                    return Err(Error::SeekBeforeStart);
                }
                capacity as i128 - i128::from(offset)
            }
        };
        let resolved = check_offset(candidate, capacity)?;
        self.set_offset(resolved);
        Ok(resolved as u64)
    }

    /// Seeks to the start.
    pub fn rewind(&mut self) {
        // seeking to 0 cannot fail
        let _ = self.seek(0, Whence::Start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seek_start() {
        let mut rw = BufRw::allocate(10);
        assert_eq!(rw.seek(4, Whence::Start).unwrap(), 4);
        assert_eq!(rw.seek(10, Whence::Start).unwrap(), 10);
        assert_eq!(rw.rest_len(), 0);
        assert_eq!(
            rw.seek(11, Whence::Start).unwrap_err(),
            Error::InsufficientCapacity { count: 0 }
        );
        assert_eq!(rw.offset(), 10);
    }

    #[test]
    fn seek_current() {
        let mut rw = BufRw::wrap(vec![0; 10], 3);
        assert_eq!(rw.seek(2, Whence::Current).unwrap(), 5);
        assert_eq!(rw.seek(-4i64 as u64, Whence::Current).unwrap(), 1);
        assert_eq!(rw.seek(-2i64 as u64, Whence::Current).unwrap_err(), Error::SeekBeforeStart);
        assert_eq!(
            rw.seek(10, Whence::Current).unwrap_err(),
            Error::InsufficientCapacity { count: 0 }
        );
        assert_eq!(rw.offset(), 1);
    }

    #[test]
    fn seek_end() {
        let mut rw = BufRw::allocate(10);
        assert_eq!(rw.seek(5, Whence::End).unwrap(), 5);
        assert_eq!(rw.seek(11, Whence::End).unwrap_err(), Error::SeekBeforeStart);
        assert_eq!(rw.offset(), 5);
        assert_eq!(rw.seek(0, Whence::End).unwrap(), 10);
        assert_eq!(rw.seek(10, Whence::End).unwrap(), 0);
    }

    #[test]
    fn seek_overflow() {
        let mut rw = BufRw::wrap(vec![0; 4], 2);
        let max = isize::MAX as u64;
        assert_eq!(rw.seek(max + 1, Whence::Start).unwrap_err(), Error::OffsetOverflow);
        assert_eq!(rw.seek(u64::MAX, Whence::Start).unwrap_err(), Error::OffsetOverflow);
        assert_eq!(rw.offset(), 2);
    }

    #[test]
    fn rewind() {
        let mut rw = BufRw::wrap(vec![1, 2, 3], 3);
        rw.rewind();
        assert_eq!(rw.offset(), 0);
        assert_eq!(rw.rest_len(), 3);
    }

    #[test]
    fn whence_from_u8() {
        assert_eq!(Whence::try_from(0u8).unwrap(), Whence::Start);
        assert_eq!(Whence::try_from(2u8).unwrap(), Whence::End);
        assert!(Whence::try_from(3u8).is_err());
        assert_eq!(u8::from(Whence::Current), 1);
    }
}
