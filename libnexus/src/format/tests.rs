use super::*;

#[test]
fn test_format_size_raw() {
    assert_eq!(format_size(0, false), "0");
    assert_eq!(format_size(1536, false), "1536");
}

#[test]
fn test_format_size_decimal_units() {
    assert_eq!(format_size(1000 * 5, true), "5 kB");
    assert_eq!(format_size(1000 * 1000 * 2, true), "2 MB");
}

#[test]
fn test_format_size_small_values_stay_bytes() {
    assert_eq!(format_size(512, true), "512 B");
}
