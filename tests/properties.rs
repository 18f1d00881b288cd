use boundio::{BufRw, Error, Whence};
use proptest::prelude::*;

fn buf_rw_with_offset() -> impl Strategy<Value = BufRw> {
    prop::collection::vec(any::<u8>(), 0..64).prop_flat_map(|content| {
        let len = content.len();
        (Just(content), 0..=len).prop_map(|(content, offset)| BufRw::wrap(content, offset))
    })
}

proptest! {
    #[test]
    fn rest_len_tracks_offset(
        mut rw in buf_rw_with_offset(),
        data in prop::collection::vec(any::<u8>(), 0..80),
        pos in any::<u64>(),
    ) {
        let _ = rw.write(&data);
        prop_assert_eq!(rw.rest_len(), rw.capacity() - rw.offset());
        let _ = rw.seek(pos, Whence::End);
        prop_assert_eq!(rw.rest_len(), rw.capacity() - rw.offset());
        let mut buf = vec![0; data.len()];
        let _ = rw.read(&mut buf);
        prop_assert_eq!(rw.rest_len(), rw.capacity() - rw.offset());
        prop_assert!(rw.offset() <= rw.capacity());
    }

    #[test]
    fn round_trip_through_shared_view(
        mut rw in buf_rw_with_offset(),
        data in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let data = &data[..usize::min(data.len(), rw.rest_len())];
        let mut reader = rw.share_view();
        let start = rw.offset();
        prop_assert_eq!(rw.write(data).unwrap(), data.len());

        reader.seek(start as u64, Whence::Start).unwrap();
        let mut buf = vec![0; data.len()];
        prop_assert_eq!(reader.read(&mut buf).unwrap(), data.len());
        prop_assert_eq!(&buf[..], data);
    }

    #[test]
    fn long_write_is_truncated(
        mut rw in buf_rw_with_offset(),
        extra in 1usize..16,
    ) {
        let remaining = rw.rest_len();
        let data: Vec<u8> = (0..remaining + extra).map(|i| i as u8 ^ 0x5a).collect();
        let start = rw.offset();

        let err = rw.write(&data).unwrap_err();
        prop_assert_eq!(err, Error::InsufficientCapacity { count: remaining });
        prop_assert_eq!(rw.offset(), rw.capacity());
        let content = rw.content();
        prop_assert_eq!(&content[start..], &data[..remaining]);
    }

    #[test]
    fn copy_view_is_independent(mut rw in buf_rw_with_offset(), byte in any::<u8>()) {
        let before = rw.copy_content(Vec::new());
        let mut copied = rw.copy_view(Vec::new());
        let mut shared = rw.share_view();
        prop_assume!(rw.rest_len() > 0);

        copied.write(&[!byte]).unwrap();
        {
            let content = rw.content();
            prop_assert_eq!(&content[..], &before[..]);
        }

        shared.write(&[byte]).unwrap();
        prop_assert_eq!(rw.rest()[0], byte);
        rw.rewind();
        prop_assert_eq!(rw.offset(), 0);
    }
}
