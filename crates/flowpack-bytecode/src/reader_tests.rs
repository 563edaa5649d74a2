use super::*;

#[test]
fn primitives_are_little_endian() {
    let bytes = [0x01, 0x02, 0x03, 0x04, 0xFF, 0xFF];
    let r = ByteReader::new(&bytes);

    assert_eq!(r.u8(0).unwrap(), 1);
    assert_eq!(r.u16(0).unwrap(), 0x0201);
    assert_eq!(r.u32(0).unwrap(), 0x0403_0201);
    assert_eq!(r.i16(4).unwrap(), -1);
}

#[test]
fn out_of_bounds_read() {
    let bytes = [0u8; 3];
    let r = ByteReader::new(&bytes);

    let err = r.u32(0).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"read of 4 bytes at 0 is out of bounds (payload is 3 bytes)");
}

#[test]
fn offset_is_relative_to_slot() {
    // slot at 4 stores 4 -> target 8
    let bytes = [0, 0, 0, 0, 4, 0, 0, 0, 0xAA, 0, 0, 0];
    let r = ByteReader::new(&bytes);

    assert_eq!(r.offset(4).unwrap(), 8);
    assert_eq!(r.u8(8).unwrap(), 0xAA);
}

#[test]
fn null_and_dangling_offsets() {
    let bytes = [0, 0, 0, 0, 100, 0, 0, 0];
    let r = ByteReader::new(&bytes);

    assert_eq!(r.offset(0), Err(ReadError::NullOffset(0)));
    assert_eq!(
        r.offset(4),
        Err(ReadError::DanglingOffset {
            slot: 4,
            target: 104
        })
    );
}

#[test]
fn object_array_follows_item_table() {
    #[rustfmt::skip]
    let bytes = [
        2, 0, 0, 0,   // count
        4, 0, 0, 0,   // table at 8
        8, 0, 0, 0,   // item 0 at 16
        8, 0, 0, 0,   // item 1 at 20
        0x11, 0, 0, 0,
        0x22, 0, 0, 0,
    ];
    let r = ByteReader::new(&bytes);

    let items = r.object_array(0).unwrap();
    assert_eq!(items, vec![16, 20]);
    assert_eq!(r.u8(items[1]).unwrap(), 0x22);
}

#[test]
fn empty_arrays_have_no_offset() {
    let bytes = [0u8; 8];
    let r = ByteReader::new(&bytes);

    assert!(r.object_array(0).unwrap().is_empty());
    assert_eq!(r.number_array(0).unwrap(), NumberArray { count: 0, start: 0 });
}

#[test]
fn c_str_stops_at_nul() {
    let bytes = *b"abc\0def";
    let r = ByteReader::new(&bytes);

    assert_eq!(r.c_str(0).unwrap(), "abc");
    assert_eq!(r.c_str(4), Err(ReadError::UnterminatedString(4)));
}
