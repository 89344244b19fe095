//! Registrar naming and error propagation against a recording sink.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Mutex};

use connmetrics_core::instrument::MAX_WINDOW_SECS;
use connmetrics_core::{
    BaseNames, Counter, Gauge, MetricNames, MetricRegistrar, MetricValue, MetricsError, MetricsSink,
    RateMeter, Result,
};

#[derive(Debug, Clone, PartialEq)]
enum Kind {
    Counter,
    Meter,
    Gauge,
}

#[derive(Clone, Default)]
struct RecordingSink {
    path: Vec<String>,
    log: Arc<Mutex<Vec<(String, Kind)>>>,
    reject_meters: bool,
}

impl RecordingSink {
    fn id(&self, name: &str) -> String {
        let mut parts = self.path.clone();
        parts.push(name.to_string());
        parts.join("/")
    }

    fn record(&self, name: &str, kind: Kind) {
        self.log.lock().unwrap().push((self.id(name), kind));
    }

    fn entries(&self) -> Vec<(String, Kind)> {
        self.log.lock().unwrap().clone()
    }
}

impl MetricsSink for RecordingSink {
    type Group = RecordingSink;

    fn group(&self, name: &str) -> Result<Self::Group> {
        let mut child = self.clone();
        child.path.push(name.to_string());
        Ok(child)
    }

    fn counter(&self, name: &str) -> Result<Arc<Counter>> {
        self.record(name, Kind::Counter);
        Ok(Arc::new(Counter::new()))
    }

    fn meter(&self, name: &str, meter: RateMeter) -> Result<Arc<RateMeter>> {
        if self.reject_meters {
            return Err(MetricsError::Duplicate { identifier: self.id(name) });
        }
        self.record(name, Kind::Meter);
        Ok(Arc::new(meter))
    }

    fn gauge<G>(&self, name: &str, gauge: G) -> Result<Arc<G>>
    where
        G: Gauge + 'static,
        G::Value: Into<MetricValue>,
    {
        self.record(name, Kind::Gauge);
        Ok(Arc::new(gauge))
    }
}

#[test]
fn derived_names_are_computed_from_base_names() {
    let n = MetricNames::default();
    assert_eq!(n.num_records_in_rate(), "numRecordsInPerSecond");
    assert_eq!(n.num_records_out_rate(), "numRecordsOutPerSecond");
    assert_eq!(n.sink_in_tps_counter(), "inTps_counter");
    assert_eq!(n.sink_out_bps_counter(), "outBps_counter");
    assert_eq!(n.tps_counter(), "tps_counter");
    assert_eq!(n.current_fetch_event_time_lag(), "currentFetchEventTimeLag");
    assert_eq!(n.current_emit_event_time_lag(), "currentEmitEventTimeLag");
}

#[test]
fn custom_bases_drive_derived_names() {
    let names = MetricNames::from_bases(BaseNames {
        num_records_in: "recordsIn".into(),
        sink_in_tps: "sinkTps".into(),
        sink_out_latency: "latency".into(),
        ..Default::default()
    });
    assert_eq!(names.num_records_in_rate(), "recordsInPerSecond");
    assert_eq!(names.sink_in_tps_counter(), "sinkTps_counter");

    let ctx = RecordingSink::default();
    let r = MetricRegistrar::new().with_names(names);
    r.register_num_records_in_per_second(&ctx).unwrap();
    r.register_sink_in_tps(&ctx).unwrap();
    r.register_out_latency(&ctx).unwrap();

    assert_eq!(
        ctx.entries(),
        vec![
            ("source/recordsIn".to_string(), Kind::Counter),
            ("source/recordsInPerSecond".to_string(), Kind::Meter),
            ("sink/sinkTps_counter".to_string(), Kind::Counter),
            ("sink/sinkTps".to_string(), Kind::Meter),
            ("sink/latency".to_string(), Kind::Gauge),
        ]
    );
}

#[test]
fn five_instruments_land_in_their_groups() {
    let ctx = RecordingSink::default();
    let r = MetricRegistrar::new();

    let in_tps = r.register_sink_in_tps(&ctx).unwrap();
    let out_bps = r.register_out_bps(&ctx).unwrap();
    let latency = r.register_out_latency(&ctx).unwrap();
    let rec_in = r.register_num_records_in_per_second(&ctx).unwrap();
    let rec_out = r.register_num_records_out_per_second(&ctx).unwrap();

    assert_eq!(
        ctx.entries(),
        vec![
            ("sink/inTps_counter".to_string(), Kind::Counter),
            ("sink/inTps".to_string(), Kind::Meter),
            ("sink/outBps_counter".to_string(), Kind::Counter),
            ("sink/outBps".to_string(), Kind::Meter),
            ("sink/outLatency".to_string(), Kind::Gauge),
            ("source/numRecordsIn".to_string(), Kind::Counter),
            ("source/numRecordsInPerSecond".to_string(), Kind::Meter),
            ("sink/numRecordsOut".to_string(), Kind::Counter),
            ("sink/numRecordsOutPerSecond".to_string(), Kind::Meter),
        ]
    );

    for m in [&in_tps, &out_bps, &rec_in, &rec_out] {
        assert_eq!(m.window_secs(), 60);
    }
    assert_eq!(latency.value(), 0.0);
}

#[test]
fn supplementary_instruments() {
    let ctx = RecordingSink::default();
    let r = MetricRegistrar::new();

    let fetch = r.register_current_fetch_event_time_lag(&ctx).unwrap();
    let emit = r.register_current_emit_event_time_lag(&ctx).unwrap();
    r.register_tps(&ctx).unwrap();

    assert_eq!(fetch.value(), None);
    assert_eq!(emit.value(), None);
    assert_eq!(
        ctx.entries(),
        vec![
            ("source/currentFetchEventTimeLag".to_string(), Kind::Gauge),
            ("source/currentEmitEventTimeLag".to_string(), Kind::Gauge),
            ("tps_counter".to_string(), Kind::Counter),
            ("tps".to_string(), Kind::Meter),
        ]
    );
}

#[test]
fn every_call_creates_a_fresh_instrument() {
    let ctx = RecordingSink::default();
    let r = MetricRegistrar::new();
    let a = r.register_out_latency(&ctx).unwrap();
    let b = r.register_out_latency(&ctx).unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
    a.report(10, 1);
    assert_eq!(b.value(), 0.0);
}

#[test]
fn host_errors_propagate_unchanged() {
    let ctx = RecordingSink {
        reject_meters: true,
        ..Default::default()
    };
    let err = MetricRegistrar::new().register_out_bps(&ctx).unwrap_err();
    assert_eq!(err.code().as_str(), "DUPLICATE_METRIC");
    match err {
        MetricsError::Duplicate { identifier } => assert_eq!(identifier, "sink/outBps"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn window_is_configurable() {
    let ctx = RecordingSink::default();
    let m = MetricRegistrar::new()
        .with_window(30)
        .register_num_records_in_per_second(&ctx)
        .unwrap();
    assert_eq!(m.window_secs(), 30);
}

#[test]
fn oversized_window_does_not_panic() {
    let ctx = RecordingSink::default();
    let m = MetricRegistrar::new()
        .with_window(u64::MAX)
        .register_num_records_in_per_second(&ctx)
        .unwrap();
    assert_eq!(m.window_secs(), MAX_WINDOW_SECS);
}
