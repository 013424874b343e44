//! Shared statistics fixtures for unit tests.

use chrono::NaiveDate;
use hlf_types::{DateRange, FeeStatistics, StatisticValues, StatisticsMeta};

/// Fixed statistics with `order_value.mean = 723.24`, `shipping.percentile_75 = 150`
/// and `customs.mean = 153.15`.
pub(crate) fn fixture_statistics() -> FeeStatistics {
    let earliest = NaiveDate::from_ymd_opt(2023, 2, 9).unwrap();
    let latest = NaiveDate::from_ymd_opt(2025, 10, 8).unwrap();
    FeeStatistics {
        meta: StatisticsMeta {
            total_orders: 17,
            date_range: DateRange::new(earliest, latest).unwrap(),
            generated_at: latest.and_hms_opt(18, 0, 0).unwrap(),
        },
        order_value: StatisticValues::new(723.24, 650.0, 180.0, 1900.0).with_std(402.0),
        shipping: StatisticValues::new(130.0, 120.0, 60.0, 260.0).with_percentiles(
            Some(95.0),
            Some(150.0),
            Some(210.0),
        ),
        customs: StatisticValues::new(153.15, 140.0, 20.0, 420.0),
        hlf_total: StatisticValues::new(390.0, 350.0, 100.0, 900.0),
        hlf_percentage: StatisticValues::new(57.8, 55.9, 34.2, 96.4).with_percentiles(
            None,
            Some(64.3),
            Some(78.1),
        ),
        exchange_rate: StatisticValues::new(3.9, 3.9, 3.7, 4.1),
        vat_rate: 0.18,
    }
}
