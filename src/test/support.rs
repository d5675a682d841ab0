//! 测试用的流记录构造工具

use crate::flow::{FiveTuple, FlowId, FlowRecord};
use crate::sim::SimTime;
use std::net::Ipv4Addr;

pub(crate) const REMOTE: Ipv4Addr = Ipv4Addr::new(1, 0, 0, 2);

pub(crate) fn ue_addr(index: u8) -> Ipv4Addr {
    Ipv4Addr::new(7, 0, 0, 2 + index)
}

/// 无丢包的视频下行流：`rate_bps` 持续 `secs` 秒
pub(crate) fn video_record(id: u32, ue: u8, rate_bps: u64, secs: u64) -> FlowRecord {
    let tuple = FiveTuple::udp(REMOTE, 8000 + u16::from(ue), ue_addr(ue), 49153);
    let bytes = rate_bps / 8 * secs;
    let pkts = bytes / 1000;
    let mut rec = FlowRecord::new(FlowId(id), tuple);
    rec.tx_packets = pkts;
    rec.tx_bytes = bytes;
    rec.rx_packets = pkts;
    rec.rx_bytes = bytes;
    rec.time_first_tx = SimTime::from_secs(5);
    rec.time_last_tx = SimTime::from_secs(5 + secs);
    rec.time_first_rx = SimTime::from_secs(5);
    rec.time_last_rx = SimTime::from_secs(5 + secs);
    rec
}

pub(crate) fn background_record(id: u32, ue: u8) -> FlowRecord {
    let tuple = FiveTuple::udp(REMOTE, 49153 + u16::from(ue), ue_addr(ue), 9000);
    let mut rec = FlowRecord::new(FlowId(id), tuple);
    rec.tx_packets = 100;
    rec.tx_bytes = 120_000;
    rec.rx_packets = 50;
    rec.rx_bytes = 60_000;
    rec.lost_packets = 50;
    rec.time_first_tx = SimTime::from_secs(2);
    rec.time_last_rx = SimTime::from_secs(12);
    rec
}

/// 每个测试独占的临时目录
pub(crate) fn unique_temp_dir(prefix: &str) -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "lte-sdn-qos-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}
