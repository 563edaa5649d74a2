use super::*;

#[test]
fn header_layout() {
    let header = Header::new(ProjectType::Dashboard, 0x0102_0304);
    let bytes = header.to_bytes();

    assert_eq!(&bytes[0..4], b"~eez");
    assert_eq!(bytes[4], 3);
    assert_eq!(bytes[5], 0);
    assert_eq!(&bytes[6..8], &[5, 0]);
    assert_eq!(&bytes[8..12], &[4, 3, 2, 1]);
}

#[test]
fn header_decodes_what_it_encodes() {
    let header = Header::new(ProjectType::Lvgl, 1234);
    let decoded = Header::from_bytes(&header.to_bytes()).unwrap();

    assert_eq!(decoded, header);
    assert!(decoded.validate_tag());
    assert!(decoded.validate_version());
    assert_eq!(ProjectType::from_u16(decoded.project_type), Some(ProjectType::Lvgl));
}

#[test]
fn header_rejects_short_input() {
    assert_eq!(Header::from_bytes(b"~eez"), None);
}

#[test]
fn header_flags_foreign_tag() {
    let mut bytes = Header::new(ProjectType::Firmware, 0).to_bytes();
    bytes[0] = b'#';
    let header = Header::from_bytes(&bytes).unwrap();

    assert!(!header.validate_tag());
}

#[test]
fn project_type_codes() {
    assert_eq!(ProjectType::Firmware as u16, 1);
    assert_eq!(ProjectType::FirmwareModule as u16, 2);
    assert_eq!(ProjectType::Resource as u16, 3);
    assert_eq!(ProjectType::Applet as u16, 4);
    assert_eq!(ProjectType::Dashboard as u16, 5);
    assert_eq!(ProjectType::Lvgl as u16, 6);
    assert_eq!(ProjectType::from_u16(0), None);
    assert_eq!(ProjectType::from_u16(7), None);
}
