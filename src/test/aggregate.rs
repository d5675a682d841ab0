use super::support::{background_record, ue_addr, video_record};
use crate::flow::{FiveTuple, FlowId, FlowRecord, FlowSnapshot};
use crate::qos::{FlowClassifier, QosMetrics, SubscriberAggregator, reduce};
use std::net::Ipv4Addr;

fn classifier(n: u8) -> FlowClassifier {
    FlowClassifier::new(8000, 9000, (0..n).map(ue_addr).collect())
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9
}

#[test]
fn eight_lossless_64kbps_flows_aggregate_to_their_own_throughput() {
    let snapshot = FlowSnapshot {
        flows: (0..8u8)
            .map(|u| video_record(u32::from(u) + 1, u, 64_000, 20))
            .collect(),
    };
    let report = reduce(&snapshot, &classifier(8));

    assert_eq!(report.totals.len(), 8);
    for (u, flow) in report.flows.iter().enumerate() {
        assert!(close(flow.metrics.throughput_mbps, 0.064));
        assert_eq!(flow.metrics.loss_ratio_pct, 0.0);
        let total = report.totals.get(u).expect("ue total");
        assert!(close(total, flow.metrics.throughput_mbps), "ue{u} total={total}");
        assert_eq!(report.totals.video_flows[u], 1);
    }
}

#[test]
fn multiple_video_flows_for_one_subscriber_are_summed() {
    let mut second = video_record(2, 1, 128_000, 20);
    // 同一 UE 的另一条视频流（不同源端口，仍在区间内）
    second.tuple.src_port = 8003;
    let snapshot = FlowSnapshot {
        flows: vec![video_record(1, 1, 64_000, 20), second, background_record(3, 1)],
    };
    let report = reduce(&snapshot, &classifier(4));

    assert!(close(report.totals.get(1).expect("ue1"), 0.064 + 0.128));
    assert_eq!(report.totals.video_flows[1], 2);
    assert_eq!(report.totals.get(0), Some(0.0));
}

#[test]
fn subscriber_sum_never_exceeds_video_sum() {
    let orphan = {
        let tuple = FiveTuple::udp(Ipv4Addr::new(1, 0, 0, 2), 8002, Ipv4Addr::new(10, 0, 0, 1), 49153);
        let mut rec = FlowRecord::new(FlowId(3), tuple);
        rec.rx_bytes = 10_000;
        rec.time_last_rx = crate::sim::SimTime::from_secs(1);
        rec
    };
    let attributed = FlowSnapshot {
        flows: vec![video_record(1, 0, 64_000, 20), video_record(2, 1, 64_000, 20)],
    };
    let with_orphan = FlowSnapshot {
        flows: vec![
            video_record(1, 0, 64_000, 20),
            video_record(2, 1, 64_000, 20),
            orphan,
        ],
    };

    let r = reduce(&attributed, &classifier(4));
    assert!(close(r.totals.sum(), r.video_throughput_mbps()));

    let r = reduce(&with_orphan, &classifier(4));
    assert!(r.totals.sum() < r.video_throughput_mbps());
    assert_eq!(r.flows.len(), 3, "orphan flow still reported per flow");
}

#[test]
fn aggregation_is_order_independent() {
    let recs = [
        video_record(1, 0, 64_000, 20),
        video_record(2, 1, 96_000, 10),
        video_record(3, 0, 32_000, 20),
        background_record(4, 0),
    ];
    let c = classifier(2);

    let mut forward = SubscriberAggregator::new(2);
    for r in &recs {
        forward.add(&c.classify(r), &QosMetrics::from_record(r));
    }
    let mut backward = SubscriberAggregator::new(2);
    for r in recs.iter().rev() {
        backward.add(&c.classify(r), &QosMetrics::from_record(r));
    }

    let a = forward.finish();
    let b = backward.finish();
    for u in 0..2 {
        assert!(close(a.get(u).expect("a"), b.get(u).expect("b")));
    }
    assert_eq!(a.video_flows, vec![2, 1]);
}

#[test]
fn non_video_flows_contribute_nothing() {
    let c = classifier(2);
    let bg = background_record(1, 0);
    let mut agg = SubscriberAggregator::new(2);
    assert!(!agg.add(&c.classify(&bg), &QosMetrics::from_record(&bg)));
    assert_eq!(agg.finish().sum(), 0.0);
}
