use chrono::Utc;
use tracing_subscriber::EnvFilter;
use vires_time::calendar::{datetime_to_decimal_year, datetime_to_mjd2000};
use vires_time::epoch::utc_datetime_to_cdf_epoch;
use vires_time::iso::format_datetime;
use vires_time::leap_seconds::initialize;
use vires_time::tt2000::{cdf_tt2000_to_utc_datetime64_ns, utc_datetime_to_cdf_tt2000};
use vires_time::{IsoPrecision, LeapSecondsConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let table = initialize(&LeapSecondsConfig::from_env()?)?;
    println!("leap seconds breakpoints: {}", table.len());

    let now = Utc::now().naive_utc();
    let tt2000 = utc_datetime_to_cdf_tt2000(now);

    println!("UTC: {}", format_datetime(now, IsoPrecision::Microsecond));
    println!("CDF_EPOCH: {}", utc_datetime_to_cdf_epoch(now));
    println!("CDF_TIME_TT2000: {tt2000}");
    println!("datetime64[ns]: {}", cdf_tt2000_to_utc_datetime64_ns(tt2000));
    println!("MJD2000: {}", datetime_to_mjd2000(now));
    println!("decimal year: {}", datetime_to_decimal_year(now));
    Ok(())
}
