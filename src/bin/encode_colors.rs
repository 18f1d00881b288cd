use std::io;

use boundio::BufRw;
use byteorder::{LittleEndian, WriteBytesExt};
use tracing::info;
use tracing_subscriber::EnvFilter;

const COLOR_LEN: usize = 3;

struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    fn append_to(&self, wtr: &mut impl io::Write) -> io::Result<()> {
        wtr.write_u8(self.r)?;
        wtr.write_u8(self.g)?;
        wtr.write_u8(self.b)?;
        Ok(())
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let fuchsia = Color { r: 255, g: 0, b: 255 };
    let cyan = Color { r: 0, g: 255, b: 255 };

    let mut rw = BufRw::allocate(COLOR_LEN);
    fuchsia.append_to(&mut rw)?;
    info!(head = ?&*rw.head(), content = ?&*rw.content(), "encoded fuchsia");

    let old = rw.copy_head(Vec::new());
    rw.rewind();
    cyan.append_to(&mut rw)?;
    info!(fuchsia = ?old, cyan = ?&*rw.head(), "encoded both");

    // a fourth byte does not fit
    let err = rw.write_u16::<LittleEndian>(0xffff).unwrap_err();
    info!(%err, offset = rw.offset(), "capacity exhausted");
    Ok(())
}
