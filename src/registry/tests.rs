//! Tests for the report registry

use super::*;
use crate::error::Error;
use test_case::test_case;

#[test]
fn test_builtin_registry_size() {
    let registry = ReportRegistry::builtin();
    assert_eq!(registry.len(), 14);
    assert!(!registry.is_empty());
}

#[test_case("ad_reports", StatsLevel::Ad ; "ad level")]
#[test_case("campaign_reports", StatsLevel::Campaign ; "campaign level")]
fn test_stats_streams(stream: &str, level: StatsLevel) {
    let registry = ReportRegistry::builtin();
    assert_eq!(registry.resolve(stream).unwrap(), StreamKind::Stats(level));
}

#[test_case("campaign_general_summary_reports", 728_559, "fact_delivery.event_date")]
#[test_case("campaign_device_reports", 728_558, "summary_delivery_events.event_date")]
#[test_case("ad_summary_reports", 728_565, "fact_delivery.event_date")]
#[test_case("ad_network_publisher_reports", 728_567, "summary_delivery_events.event_date")]
fn test_report_streams(stream: &str, report_id: u64, date_param: &str) {
    let registry = ReportRegistry::builtin();
    match registry.resolve(stream).unwrap() {
        StreamKind::Report(descriptor) => {
            assert_eq!(descriptor.stream_id, stream);
            assert_eq!(descriptor.report_id, report_id);
            assert_eq!(descriptor.date_filter_param, date_param);
        }
        other => panic!("expected report stream, got {other:?}"),
    }
}

#[test]
fn test_unknown_stream_is_schema_lookup_failure() {
    let registry = ReportRegistry::builtin();
    assert!(matches!(
        registry.resolve("AD_PERFORMANCE_REPORT"),
        Err(Error::SchemaLookup { stream }) if stream == "AD_PERFORMANCE_REPORT"
    ));
}

#[test]
fn test_custom_registry() {
    let registry = ReportRegistry::empty()
        .with_report(ReportDescriptor::new("test_reports", 1, "day"))
        .with_stats("test_stats", StatsLevel::Campaign);

    assert!(registry.contains("test_reports"));
    assert_eq!(registry.stream_ids(), vec!["test_reports", "test_stats"]);
    assert_eq!(registry.resolve("test_stats").unwrap().mode(), "stats");
    assert_eq!(registry.resolve("test_reports").unwrap().mode(), "report");
}

#[test]
fn test_stats_level_flag() {
    assert!(StatsLevel::Ad.by_ad());
    assert!(!StatsLevel::Campaign.by_ad());
}
