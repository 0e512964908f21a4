use chrono::{NaiveDate, NaiveDateTime};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use vires_time::calendar::{datetime_to_mjd2000, mjd2000_to_datetime};
use vires_time::cdf::{
    cdf_rawtime_to_datetime, cdf_rawtime_to_datetime64, convert_cdf_raw_time,
    datetime_to_cdf_rawtime,
};
use vires_time::epoch::{cdf_epoch_to_utc_datetime, utc_datetime_to_cdf_epoch};
use vires_time::iso::{format_datetime, parse_iso_datetime};
use vires_time::leap_seconds::{initialize, leap_nanoseconds_table};
use vires_time::tt2000::{
    cdf_tt2000_to_cdf_epoch, cdf_tt2000_to_mjd2000, cdf_tt2000_to_mjd2000_array,
    cdf_tt2000_to_unix_epoch, cdf_tt2000_to_utc_datetime, cdf_tt2000_to_utc_datetime64_ns,
    cdf_tt2000_to_utc_datetime64_us, convert_tt2000_to_utc2000_ns, convert_utc2000_to_tt2000_ns,
    utc_datetime_to_cdf_tt2000, CDF_TT2000_INVALID_VALUE, CDF_TT2000_PADDING_VALUE,
};
use vires_time::{
    parse_input_times, CdfRawTime, CdfTimeType, Datetime64Value, InputTimeFormat, InputTimes,
    IsoPrecision, LeapNanoSecondsTable, LeapSecondsConfig, LeapSecondsError, Tt2000Converter,
};

const UTC2000NS_1960: i64 = -1_262_304_000_000_000_000;
const UTC2000NS_1972: i64 = -883_612_800_000_000_000;
const SECONDS_1960_TO_1972: u32 = 378_691_200;
const UTC2000NS_1999: i64 = -31_536_000_000_000_000;
const UTC2000NS_2017: i64 = 536_544_000_000_000_000;
const TT2000_2017: i64 = 536_500_869_184_000_000;
const NANOSECONDS_PER_SECOND: i64 = 1_000_000_000;
const NANOSECONDS_PER_DAY: i64 = 86_400 * NANOSECONDS_PER_SECOND;

fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, us: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_micro_opt(h, min, s, us)
        .unwrap()
}

#[test]
fn synthetic_three_line_table() {
    let table = LeapNanoSecondsTable::from_lines([
        "1972 1 1 10.0 0.0 0.0",
        "1999 1 1 32.0 0.0 0.0",
        "2017 1 1 37.0 0.0 0.0",
    ])
    .unwrap();

    for utc2000ns in [UTC2000NS_1972, UTC2000NS_1972 + 1, UTC2000NS_1999 - 1] {
        assert_eq!(table.get_tai_offset_for_utc2000ns(utc2000ns), 10_000_000_000);
    }
    for utc2000ns in [UTC2000NS_1999, 0, UTC2000NS_2017 - 1] {
        assert_eq!(table.get_tai_offset_for_utc2000ns(utc2000ns), 32_000_000_000);
    }
    for utc2000ns in [UTC2000NS_2017, UTC2000NS_2017 + 1, i64::MAX] {
        assert_eq!(table.get_tai_offset_for_utc2000ns(utc2000ns), 37_000_000_000);
    }
    assert_eq!(table.get_tai_offset_for_utc2000ns(UTC2000NS_1972 - 1), 0);
}

#[test]
fn bundled_table_offsets() {
    let table = leap_nanoseconds_table();
    assert_eq!(table.get_tai_offset_for_utc2000ns(UTC2000NS_1972), 10_000_000_000);
    assert_eq!(table.get_tai_offset_for_utc2000ns(UTC2000NS_1972 - 1), 9_890_946_000);
    assert_eq!(table.get_tai_offset_for_utc2000ns(UTC2000NS_1999), 32_000_000_000);
    assert_eq!(table.get_tai_offset_for_utc2000ns(UTC2000NS_2017), 37_000_000_000);
    assert!(table.times_utc().windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn table_file_matches_bundled_table() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/CDFLeapSeconds.txt");
    let table = LeapNanoSecondsTable::load_from_file(path).unwrap();
    assert_eq!(&table, leap_nanoseconds_table());

    let converter = Tt2000Converter::new(&table);
    assert_eq!(converter.cdf_tt2000_to_mjd2000(TT2000_2017), 6210.0);
}

#[test]
fn unbound_drift_is_fatal() {
    let result = LeapNanoSecondsTable::from_lines([
        "1961 1 1 1.4228180 37300.0 0.001296",
        "1968 2 1 4.2131700 39126.0 0.002592",
    ]);
    assert!(matches!(result, Err(LeapSecondsError::UnboundDrift)));
}

#[test]
fn late_initialization_is_rejected() {
    leap_nanoseconds_table();
    assert!(matches!(
        initialize(&LeapSecondsConfig::default()),
        Err(LeapSecondsError::AlreadyInitialized)
    ));
}

#[test]
fn cdf_epoch_keeps_its_float_precision() {
    let dt = datetime(2023, 1, 2, 12, 37, 48, 123_456);
    let epoch = utc_datetime_to_cdf_epoch(dt);
    assert_eq!(epoch, 63_839_882_268_123.456);
    assert_eq!(
        cdf_epoch_to_utc_datetime(epoch),
        Some(datetime(2023, 1, 2, 12, 37, 48, 123_453))
    );
}

#[test]
fn leap_second_folds_into_next_day() {
    let before = datetime(2016, 12, 31, 23, 59, 59, 0);
    assert_eq!(utc_datetime_to_cdf_tt2000(before), TT2000_2017 - 2 * NANOSECONDS_PER_SECOND);
    assert_eq!(
        utc_datetime_to_cdf_tt2000(datetime(2017, 1, 1, 0, 0, 0, 0)),
        TT2000_2017
    );
    let leap_second = TT2000_2017 - NANOSECONDS_PER_SECOND;
    assert_eq!(
        cdf_tt2000_to_utc_datetime(leap_second),
        Some(datetime(2017, 1, 1, 0, 0, 0, 0))
    );
    assert_eq!(cdf_tt2000_to_unix_epoch(TT2000_2017), 1_483_228_800.0);
}

#[test]
fn invalid_values_propagate() {
    for tt2000 in [CDF_TT2000_INVALID_VALUE, CDF_TT2000_PADDING_VALUE] {
        assert_eq!(cdf_tt2000_to_utc_datetime(tt2000), None);
        assert!(cdf_tt2000_to_utc_datetime64_ns(tt2000).is_nat());
        assert!(cdf_tt2000_to_utc_datetime64_us(tt2000).is_nat());
        assert!(cdf_tt2000_to_unix_epoch(tt2000).is_nan());
        assert!(cdf_tt2000_to_mjd2000(tt2000).is_nan());
        assert_eq!(cdf_rawtime_to_datetime(CdfRawTime::TimeTt2000(tt2000)), None);
    }
    assert_eq!(cdf_tt2000_to_cdf_epoch(CDF_TT2000_INVALID_VALUE), -1.0e31);
    assert_eq!(cdf_tt2000_to_cdf_epoch(CDF_TT2000_PADDING_VALUE), 0.0);
}

#[test]
fn raw_times_through_the_dispatch_layer() {
    let dt = datetime(2016, 3, 30, 23, 59, 59, 999_000);
    let epoch = datetime_to_cdf_rawtime(dt, CdfTimeType::Epoch).unwrap();
    let tt2000 = convert_cdf_raw_time(epoch, CdfTimeType::TimeTt2000).unwrap();
    assert_eq!(tt2000.cdf_type(), CdfTimeType::TimeTt2000);
    assert_eq!(cdf_rawtime_to_datetime(tt2000), Some(dt));

    let Datetime64Value::Ns(dt64) = cdf_rawtime_to_datetime64(tt2000) else {
        panic!("TT2000 converts to datetime64[ns]");
    };
    assert_eq!(dt64.to_string(), "2016-03-30T23:59:59.999000000Z");
    assert_eq!(
        format_datetime(dt, IsoPrecision::Millisecond),
        "2016-03-30T23:59:59.999Z"
    );
}

#[test]
fn iso_input_times_agree_with_calendar() {
    let text = "2016-03-30T23:59:59Z";
    let mjd2000 = parse_input_times(
        InputTimeFormat::IsoDatetime,
        &InputTimes::Text(vec![text.to_string()]),
    )
    .unwrap();
    let dt = parse_iso_datetime(text).unwrap();
    assert_eq!(mjd2000, vec![datetime_to_mjd2000(dt)]);
    assert_eq!(mjd2000_to_datetime(mjd2000[0]), Some(dt));

    let format: InputTimeFormat = "CDF_TIME_TT2000".parse().unwrap();
    let mjd2000 = parse_input_times(format, &InputTimes::Integer(vec![TT2000_2017])).unwrap();
    assert_eq!(mjd2000, vec![6210.0]);
}

#[quickcheck]
fn utc2000ns_round_trips_through_tt2000(seconds: u32, nanoseconds: u32) -> bool {
    let utc2000ns = UTC2000NS_1972
        + i64::from(seconds) * NANOSECONDS_PER_SECOND
        + i64::from(nanoseconds) % NANOSECONDS_PER_SECOND;
    let (tt2000, underflow) = convert_utc2000_to_tt2000_ns(utc2000ns);
    let (back, overflow) = convert_tt2000_to_utc2000_ns(tt2000);
    !underflow && !overflow && back == utc2000ns
}

#[quickcheck]
fn drift_era_utc2000ns_round_trips(seconds: u32, nanoseconds: u32) -> TestResult {
    let utc2000ns = UTC2000NS_1960
        + i64::from(seconds % SECONDS_1960_TO_1972) * NANOSECONDS_PER_SECOND
        + i64::from(nanoseconds) % NANOSECONDS_PER_SECOND;

    // A negative offset step at the next midnight repeats the last TAI
    // instants of the day.
    let table = leap_nanoseconds_table();
    let midnight = utc2000ns - utc2000ns.rem_euclid(NANOSECONDS_PER_DAY);
    let step = table.get_tai_offset_for_utc2000ns(midnight + NANOSECONDS_PER_DAY)
        - table.get_tai_offset_for_utc2000ns(midnight);
    if utc2000ns - midnight >= NANOSECONDS_PER_DAY + step {
        return TestResult::discard();
    }

    let (tt2000, underflow) = convert_utc2000_to_tt2000_ns(utc2000ns);
    let (back, overflow) = convert_tt2000_to_utc2000_ns(tt2000);
    TestResult::from_bool(!underflow && !overflow && back == utc2000ns)
}

#[test]
fn drift_era_offsets_step_at_utc_midnights() {
    let table = leap_nanoseconds_table();
    let drift_era: Vec<i64> = table
        .times_utc()
        .iter()
        .copied()
        .filter(|&utc| (UTC2000NS_1960..UTC2000NS_1972).contains(&utc))
        .collect();
    assert_eq!(drift_era.first(), Some(&UTC2000NS_1960));
    assert!(drift_era.iter().all(|utc| utc.rem_euclid(NANOSECONDS_PER_DAY) == 0));

    // 1968-02-01 lowers TAI-UTC by 0.1 s; the repeated window is skipped above
    let utc2000ns_1968_02_01 = UTC2000NS_1972 - 1430 * NANOSECONDS_PER_DAY;
    let step = table.get_tai_offset_for_utc2000ns(utc2000ns_1968_02_01)
        - table.get_tai_offset_for_utc2000ns(utc2000ns_1968_02_01 - NANOSECONDS_PER_DAY);
    assert!(step < 0 && step > -NANOSECONDS_PER_SECOND, "{step}");
}

#[quickcheck]
fn scalar_and_array_conversions_agree(values: Vec<i64>) -> bool {
    let array = cdf_tt2000_to_mjd2000_array(&values);
    values
        .iter()
        .zip(&array)
        .all(|(&tt2000, mjd2000)| cdf_tt2000_to_mjd2000(tt2000).to_bits() == mjd2000.to_bits())
}

#[cfg(feature = "serde")]
#[test]
fn serde_labels() {
    let json = serde_json::to_string(&(CdfTimeType::TimeTt2000, InputTimeFormat::UnixEpoch)).unwrap();
    assert_eq!(json, r#"["CDF_TIME_TT2000","Unix epoch"]"#);
    let back: (CdfTimeType, InputTimeFormat) = serde_json::from_str(&json).unwrap();
    assert_eq!(back, (CdfTimeType::TimeTt2000, InputTimeFormat::UnixEpoch));
}
