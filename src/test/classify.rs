use super::support::{REMOTE, background_record, ue_addr, video_record};
use crate::config::RunConfig;
use crate::flow::{FiveTuple, FlowId, FlowRecord};
use crate::qos::{FlowCategory, FlowClassifier};
use std::net::Ipv4Addr;

fn classifier(n: u8) -> FlowClassifier {
    FlowClassifier::new(8000, 9000, (0..n).map(ue_addr).collect())
}

#[test]
fn video_port_range_is_half_open() {
    let c = classifier(8);
    assert!(!c.is_video_port(7999));
    assert!(c.is_video_port(8000));
    assert!(c.is_video_port(8007));
    assert!(!c.is_video_port(8008));
}

#[test]
fn video_downlink_is_attributed_by_destination_address() {
    let c = classifier(8);
    let rec = video_record(3, 5, 64_000, 20);
    let f = c.classify(&rec);
    assert_eq!(f.category, FlowCategory::VideoDownlink);
    assert_eq!(f.subscriber, Some(5));
    assert_eq!(f.record.flow_id, FlowId(3));
}

#[test]
fn owner_comes_from_destination_not_from_the_port_offset() {
    let c = classifier(8);
    // 端口属于 UE 0 的区间，但目的地址是 UE 6
    let tuple = FiveTuple::udp(REMOTE, 8000, ue_addr(6), 49153);
    let rec = FlowRecord::new(FlowId(1), tuple);
    assert_eq!(c.classify(&rec).subscriber, Some(6));
}

#[test]
fn video_flow_to_unknown_address_stays_unattributed() {
    let c = classifier(8);
    let tuple = FiveTuple::udp(REMOTE, 8001, Ipv4Addr::new(10, 9, 9, 9), 49153);
    let rec = FlowRecord::new(FlowId(9), tuple);
    let f = c.classify(&rec);
    assert_eq!(f.category, FlowCategory::VideoDownlink);
    assert_eq!(f.subscriber, None);
}

#[test]
fn background_and_request_flows_are_never_attributed() {
    let c = classifier(8);

    let bg = background_record(1, 2);
    let f = c.classify(&bg);
    assert_eq!(f.category, FlowCategory::Background);
    assert_eq!(f.subscriber, None);

    // 上行视频请求：目的端口在视频区间，但源端口不在
    let req = FlowRecord::new(FlowId(2), FiveTuple::udp(ue_addr(0), 49153, REMOTE, 8000));
    let f = c.classify(&req);
    assert_eq!(f.category, FlowCategory::Other);
    assert_eq!(f.subscriber, None);
}

#[test]
fn range_width_follows_subscriber_count() {
    let c = classifier(2);
    let rec = video_record(1, 2, 64_000, 20);
    assert_eq!(c.classify(&rec).category, FlowCategory::Other);
}

#[test]
fn classifier_from_config_uses_epc_address_plan() {
    let cfg = RunConfig::default();
    let c = FlowClassifier::from_config(&cfg);
    assert_eq!(c.subscriber_count(), 8);
    assert_eq!(c.subscriber_of(Ipv4Addr::new(7, 0, 0, 2)), Some(0));
    assert_eq!(c.subscriber_of(Ipv4Addr::new(7, 0, 0, 9)), Some(7));
    assert_eq!(c.subscriber_of(Ipv4Addr::new(7, 0, 0, 1)), None);
}
