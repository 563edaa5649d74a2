use flowpack_bytecode::ByteReader;

use super::*;

#[test]
fn primitives_pad_to_natural_alignment() {
    let mut buf = DataBuffer::new();
    buf.write_u8(1);
    buf.write_u16(0x0302);
    buf.write_u8(4);
    buf.write_u32(0x0807_0605);
    buf.write_u8(9);
    buf.write_f64(0.0);

    let bytes = buf.finalize().unwrap();
    #[rustfmt::skip]
    assert_eq!(bytes, vec![
        1, 0, 2, 3,
        4, 0, 0, 0,
        5, 6, 7, 8,
        9, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0,
    ]);
}

#[test]
fn non_aligned_u16_skips_padding() {
    let mut buf = DataBuffer::new();
    buf.write_u8(0xFF);
    buf.write_u16_non_aligned(0xE000);

    assert_eq!(buf.finalize().unwrap(), vec![0xFF, 0x00, 0xE0]);
}

#[test]
fn strings_are_nul_terminated() {
    let mut buf = DataBuffer::new();
    buf.write_string("ok");

    assert_eq!(buf.finalize().unwrap(), b"ok\0".to_vec());
}

#[test]
fn object_offset_is_relative_to_slot() {
    let mut buf = DataBuffer::new();
    buf.write_u32(7);
    buf.write_object_offset(4, |child| child.write_u32(0xAABB));
    buf.write_u32(9);

    let bytes = buf.finalize().unwrap();
    let r = ByteReader::new(&bytes);

    // slot at 4, root ends at 12, child placed at 12
    assert_eq!(r.u32(4).unwrap(), 8);
    assert_eq!(r.offset(4).unwrap(), 12);
    assert_eq!(r.u32(12).unwrap(), 0xAABB);
    assert_eq!(r.u32(8).unwrap(), 9);
}

#[test]
fn children_keep_their_internal_alignment() {
    let mut buf = DataBuffer::new();
    buf.write_u8(1);
    buf.write_object_offset(1, |child| {
        child.write_u8(2);
        child.write_f64(1.5);
    });

    let bytes = buf.finalize().unwrap();
    let r = ByteReader::new(&bytes);

    let child = r.offset(4).unwrap();
    assert_eq!(child % 8, 0);
    assert_eq!(r.u8(child).unwrap(), 2);
    assert_eq!(r.f64(child + 8).unwrap(), 1.5);
}

#[test]
fn nested_objects_are_placed_breadth_first() {
    let mut buf = DataBuffer::new();
    buf.write_object_offset(4, |a| {
        a.write_u32(0xA);
        a.write_object_offset(4, |c| c.write_u32(0xC));
    });
    buf.write_object_offset(4, |b| b.write_u32(0xB));

    let bytes = buf.finalize().unwrap();
    let r = ByteReader::new(&bytes);

    let a = r.offset(0).unwrap();
    let b = r.offset(4).unwrap();
    let c = r.offset(a + 4).unwrap();
    assert!(a < b && b < c);
    assert_eq!(r.u32(a).unwrap(), 0xA);
    assert_eq!(r.u32(b).unwrap(), 0xB);
    assert_eq!(r.u32(c).unwrap(), 0xC);
}

#[test]
fn array_reads_back_item_bytes() {
    let items = ["one", "two", "three"];
    let mut buf = DataBuffer::new();
    buf.write_array(&items, |b, s| b.write_string(s));

    let bytes = buf.finalize().unwrap();
    let r = ByteReader::new(&bytes);

    let positions = r.object_array(0).unwrap();
    assert_eq!(positions.len(), items.len());
    let read: Vec<String> = positions.iter().map(|&p| r.c_str(p).unwrap()).collect();
    assert_eq!(read, items);
}

#[test]
fn aligned_array_items() {
    let mut buf = DataBuffer::new();
    buf.write_array_aligned(&[1u8, 2], 8, |b, v| b.write_u8(*v));

    let bytes = buf.finalize().unwrap();
    let r = ByteReader::new(&bytes);

    for pos in r.object_array(0).unwrap() {
        assert_eq!(pos % 8, 0);
    }
}

#[test]
fn empty_array_has_zero_offset() {
    let mut buf = DataBuffer::new();
    buf.write_array(&[] as &[u8], |b, v| b.write_u8(*v));
    buf.write_number_array(&[] as &[u16], |b, v| b.write_u16(*v));

    assert_eq!(buf.finalize().unwrap(), vec![0; 16]);
}

#[test]
fn number_array_is_contiguous() {
    let mut buf = DataBuffer::new();
    buf.write_number_array(&[10u16, 20, 30], |b, v| b.write_u16(*v));

    let bytes = buf.finalize().unwrap();
    let r = ByteReader::new(&bytes);

    let array = r.number_array(0).unwrap();
    assert_eq!(array.count, 3);
    assert_eq!(r.u16(array.start + 4).unwrap(), 30);
}

#[test]
fn reserved_array_filled_later() {
    let mut buf = DataBuffer::new();
    let pool = buf.reserve_array(4);
    buf.write_u32(0x55);
    buf.fill_array(pool, &[3u32, 4], |b, v| b.write_u32(*v))
        .unwrap();

    let bytes = buf.finalize().unwrap();
    let r = ByteReader::new(&bytes);

    let items = r.object_array(0).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(r.u32(items[1]).unwrap(), 4);
    assert_eq!(r.u32(8).unwrap(), 0x55);
}

#[test]
fn reserved_array_filled_empty() {
    let mut buf = DataBuffer::new();
    let pool = buf.reserve_array(4);
    buf.fill_array(pool, &[] as &[u32], |b, v| b.write_u32(*v))
        .unwrap();

    assert_eq!(buf.finalize().unwrap(), vec![0; 8]);
}

#[test]
fn unfilled_reservation_is_fatal() {
    let mut buf = DataBuffer::new();
    buf.write_u32(1);
    let _pool = buf.reserve_array(4);

    let err = buf.finalize().unwrap_err();
    assert_eq!(err, WriterError::UnfilledReservation { slot: 8 });
}

#[test]
fn reservation_from_another_buffer_is_rejected() {
    let mut a = DataBuffer::new();
    let pool = a.reserve_array(4);
    let mut b = DataBuffer::new();
    b.write_u32(0);

    let err = b
        .fill_array(pool, &[1u32], |buf, v| buf.write_u32(*v))
        .unwrap_err();
    assert_eq!(err, WriterError::ForeignReservation { index: 0 });
}

#[test]
fn reserved_number_array_is_contiguous() {
    let mut buf = DataBuffer::new();
    let flags = buf.reserve_number_array();
    buf.write_u32(0x77);
    buf.fill_array(flags, &[1u8, 2, 3], |b, v| b.write_u8(*v))
        .unwrap();

    let bytes = buf.finalize().unwrap();
    let r = ByteReader::new(&bytes);

    let array = r.number_array(0).unwrap();
    assert_eq!(array.count, 3);
    assert_eq!(r.bytes(array.start, 3).unwrap(), &[1, 2, 3]);
}
