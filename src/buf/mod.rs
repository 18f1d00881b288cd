mod buf_rw;
mod error;
mod region;
mod std_io;
mod whence;

pub use buf_rw::*;
pub use error::*;
pub use region::Region;
pub use whence::Whence;
