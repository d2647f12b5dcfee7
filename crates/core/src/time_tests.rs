use super::*;
use chrono::TimeZone;

#[test]
fn unix_epoch_maps_to_known_tick_count() {
    assert_eq!(FileTime::from_system_time(UNIX_EPOCH).ticks(), 116_444_736_000_000_000);
    assert_eq!(FileTime::from_ticks(UNIX_EPOCH_TICKS).to_system_time(), UNIX_EPOCH);
}

#[test]
fn system_time_conversion_cases() {
    let cases: &[(SystemTime, u64)] = &[
        (UNIX_EPOCH + Duration::from_secs(1), UNIX_EPOCH_TICKS + TICKS_PER_SEC),
        (UNIX_EPOCH + Duration::from_nanos(250), UNIX_EPOCH_TICKS + 2),
        (UNIX_EPOCH - Duration::from_secs(1), UNIX_EPOCH_TICKS - TICKS_PER_SEC),
        // Before 1601 clamps to zero.
        (UNIX_EPOCH - Duration::from_secs(20_000_000_000), 0),
    ];

    for (input, expected) in cases {
        let got = FileTime::from_system_time(*input).ticks();
        assert_eq!(got, *expected, "from_system_time({input:?})");
    }
}

#[test]
fn system_time_round_trip_at_tick_precision() {
    let t = UNIX_EPOCH + Duration::new(1_700_000_000, 123_456_700);
    assert_eq!(FileTime::from(t).to_system_time(), t);
}

#[test]
fn datetime_round_trip() {
    let dt = Utc.with_ymd_and_hms(2024, 2, 29, 12, 30, 45).unwrap();
    let ft = FileTime::from_datetime(dt);
    assert_eq!(ft.to_datetime(), Some(dt));
    assert_eq!(ft, FileTime::from_system_time(SystemTime::from(dt)));
}

#[test]
fn zero_ticks_is_1601() {
    let dt = FileTime::from_ticks(0).to_datetime().expect("1601 is representable");
    assert_eq!(dt, Utc.with_ymd_and_hms(1601, 1, 1, 0, 0, 0).unwrap());
}

#[test]
fn halves_split_and_join() {
    let ft = FileTime::from_ticks(0x01DA_1234_89AB_CDEF);
    assert_eq!(ft.high(), 0x01DA_1234);
    assert_eq!(ft.low(), 0x89AB_CDEF);
    assert_eq!(FileTime::from_halves(ft.high(), ft.low()), ft);
}

#[test]
fn now_is_after_2020() {
    let floor = FileTime::from_datetime(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    assert!(FileTime::now() > floor);
}

#[test]
fn display_uses_rfc3339() {
    let ft = FileTime::from_system_time(UNIX_EPOCH);
    assert_eq!(ft.to_string(), "1970-01-01T00:00:00Z");
}
