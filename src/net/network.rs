//! 接入网络
//!
//! 下行：远端主机 -> 交换机 -> 回程瓶颈链路（PGW）-> 接入侧 -> UE。
//! 上行：UE -> 交换机 -> 远端主机，固定时延、无竞争。

use super::deliver_packet::DeliverPacket;
use super::link::Link;
use super::link_ready::LinkReady;
use super::packet::Packet;
use super::stats::Stats;
use super::switch::OfSwitch;
use crate::config::RunConfig;
use crate::flow::{FiveTuple, FlowMonitor};
use crate::queue::mem_from_pkt;
use crate::scenario::{Scenario, SchedulerKind};
use crate::sim::{SimTime, Simulator};
use std::net::Ipv4Addr;
use tracing::{debug, trace};

/// 远端主机地址（PGW 侧为 1.0.0.1）
pub const REMOTE_HOST_ADDR: Ipv4Addr = Ipv4Addr::new(1, 0, 0, 2);

/// 网络构建参数
#[derive(Debug, Clone)]
pub struct NetworkOpts {
    pub dp_id: u64,
    pub scheduler: SchedulerKind,
    pub backhaul_rate_bps: u64,
    pub backhaul_latency: SimTime,
    pub backhaul_queue_bytes: u64,
    pub access_latency: SimTime,
    pub uplink_latency: SimTime,
}

impl NetworkOpts {
    pub fn from_config(cfg: &RunConfig, scenario: Scenario) -> Self {
        Self {
            dp_id: cfg.dp_id,
            scheduler: scenario.scheduler(),
            backhaul_rate_bps: cfg.backhaul_rate_bps(scenario),
            backhaul_latency: SimTime::from_millis(cfg.backhaul_latency_ms),
            backhaul_queue_bytes: mem_from_pkt(cfg.backhaul_queue_pkts),
            access_latency: SimTime::from_millis(cfg.access_latency_ms),
            uplink_latency: SimTime::from_millis(cfg.uplink_latency_ms),
        }
    }
}

#[derive(Debug)]
pub struct Network {
    pub switch: OfSwitch,
    pub backhaul: Link,
    access_latency: SimTime,
    uplink_latency: SimTime,
    pub monitor: FlowMonitor,
    pub stats: Stats,
    next_pkt_id: u64,
}

impl Network {
    pub fn new(opts: &NetworkOpts) -> Self {
        Self {
            switch: OfSwitch::new(opts.dp_id),
            backhaul: Link::new(
                "pgw-backhaul",
                opts.backhaul_latency,
                opts.backhaul_rate_bps,
                opts.scheduler,
                opts.backhaul_queue_bytes,
            ),
            access_latency: opts.access_latency,
            uplink_latency: opts.uplink_latency,
            monitor: FlowMonitor::default(),
            stats: Stats::default(),
            next_pkt_id: 0,
        }
    }

    /// 创建数据包并在监控器中记录发送
    fn make_packet(&mut self, tuple: FiveTuple, size_bytes: u32, gbr: bool, now: SimTime) -> Packet {
        let id = self.next_pkt_id;
        self.next_pkt_id = self.next_pkt_id.wrapping_add(1);
        let flow_id = self.monitor.record_tx(tuple, size_bytes, now);
        self.stats.sent_pkts += 1;
        let mut pkt = Packet {
            id,
            flow_id,
            tuple,
            size_bytes,
            sent_at: now,
            rule_priority: None,
            gbr,
        };
        if self.switch.apply(&mut pkt) {
            self.stats.rule_hits += 1;
        }
        pkt
    }

    /// 远端主机 -> UE
    #[tracing::instrument(level = "trace", skip(self, sim))]
    pub fn send_downlink(&mut self, tuple: FiveTuple, size_bytes: u32, gbr: bool, sim: &mut Simulator) {
        let pkt = self.make_packet(tuple, size_bytes, gbr, sim.now());
        for dropped in self.backhaul.enqueue(pkt) {
            trace!(
                pkt_id = dropped.id,
                flow_id = %dropped.flow_id,
                q_bytes = self.backhaul.queue.bytes(),
                cap_bytes = self.backhaul.queue.capacity_bytes(),
                "回程队列丢包"
            );
            self.stats.dropped_pkts += 1;
            self.stats.dropped_bytes += u64::from(dropped.size_bytes);
            self.monitor.record_lost(dropped.flow_id);
        }
        if !self.backhaul.busy {
            self.start_tx(sim);
        }
    }

    /// UE -> 远端主机
    pub fn send_uplink(&mut self, tuple: FiveTuple, size_bytes: u32, sim: &mut Simulator) {
        let pkt = self.make_packet(tuple, size_bytes, false, sim.now());
        sim.schedule_in(self.uplink_latency, DeliverPacket { pkt });
    }

    /// 回程链路完成一次序列化
    pub(crate) fn on_link_ready(&mut self, sim: &mut Simulator) {
        self.backhaul.busy = false;
        self.start_tx(sim);
    }

    fn start_tx(&mut self, sim: &mut Simulator) {
        let Some(pkt) = self.backhaul.queue.dequeue() else {
            return;
        };
        let now = sim.now();
        let depart = now + self.backhaul.tx_time(pkt.size_bytes);
        let arrive = depart + self.backhaul.latency + self.access_latency;
        self.backhaul.busy = true;
        trace!(pkt_id = pkt.id, depart = ?depart, arrive = ?arrive, q_len = self.backhaul.queue.len(), "回程开始发送");
        sim.schedule(depart, LinkReady);
        sim.schedule(arrive, DeliverPacket { pkt });
    }

    /// 数据包送达目的地
    pub(crate) fn on_delivered(&mut self, pkt: Packet, now: SimTime) {
        self.stats.delivered_pkts += 1;
        self.stats.delivered_bytes += u64::from(pkt.size_bytes);
        self.monitor
            .record_rx(pkt.flow_id, pkt.size_bytes, now, pkt.sent_at);
        debug!(pkt_id = pkt.id, flow_id = %pkt.flow_id, delay = ?(now - pkt.sent_at), "数据包送达");
    }
}
