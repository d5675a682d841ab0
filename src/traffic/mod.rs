//! 应用流量
//!
//! 背景 On/Off UDP 流（远端主机 -> 每个 UE）与 EvalVid 风格的视频流
//! （客户端先发请求，服务端随后以恒定码率下发）。

mod onoff;
mod video;

pub use onoff::OnOffSource;
pub use video::{CbrSource, VideoRequest};

use crate::config::RunConfig;
use crate::flow::FiveTuple;
use crate::net::REMOTE_HOST_ADDR;
use crate::scenario::{Scenario, Subscriber};
use crate::sim::{SimTime, Simulator};
use tracing::{debug, info};

/// 第一个临时端口
pub const EPHEMERAL_PORT_BASE: u16 = 49153;
/// 视频请求包大小
pub const VIDEO_REQUEST_BYTES: u32 = 64;

/// 以 `rate_bps` 发送 `pkt_bytes` 大小的包时的发包间隔；速率为 0 时不发包
pub fn packet_interval(pkt_bytes: u32, rate_bps: u64) -> Option<SimTime> {
    if rate_bps == 0 || pkt_bytes == 0 {
        return None;
    }
    let bits = u128::from(pkt_bytes) * 8;
    let bps = u128::from(rate_bps);
    let nanos = (bits * 1_000_000_000 + (bps - 1)) / bps;
    Some(SimTime(nanos.min(u128::from(u64::MAX)) as u64))
}

/// 为所有 UE 安装背景流与视频应用，返回安装的源数量
pub fn install_traffic(
    sim: &mut Simulator,
    cfg: &RunConfig,
    scenario: Scenario,
    subscribers: &[Subscriber],
) -> usize {
    let mut installed = 0;
    let mut remote_port = EPHEMERAL_PORT_BASE;

    if cfg.background {
        let rate = cfg.background_rate_bps(scenario);
        let interval = packet_interval(cfg.background_pkt_bytes, rate);
        let on = SimTime::from_millis(cfg.background_on_ms);
        let off = SimTime::from_millis(cfg.background_off_ms);
        match interval {
            Some(interval) if cfg.background_on_ms > 0 => {
                let start = cfg.background_start();
                for ue in subscribers {
                    let tuple =
                        FiveTuple::udp(REMOTE_HOST_ADDR, remote_port, ue.addr, cfg.background_port);
                    remote_port = remote_port.wrapping_add(1);
                    sim.schedule(
                        start,
                        OnOffSource {
                            tuple,
                            pkt_bytes: cfg.background_pkt_bytes,
                            interval,
                            on,
                            off,
                            on_until: start + on,
                            stop: cfg.background_stop(),
                        },
                    );
                    installed += 1;
                }
                info!(rate_bps = rate, ues = subscribers.len(), "背景流已安装");
            }
            _ => debug!("背景流速率或开启时长为 0，不安装"),
        }
    }

    let Some(video_interval) = packet_interval(cfg.video_pkt_bytes, cfg.video_rate_bps())
    else {
        debug!("视频码率为 0，不安装视频应用");
        return installed;
    };
    let server_delay = SimTime::from_millis(cfg.uplink_latency_ms);
    for ue in subscribers {
        let server_port = cfg.video_port_base + ue.index as u16;
        let request = FiveTuple::udp(ue.addr, EPHEMERAL_PORT_BASE, REMOTE_HOST_ADDR, server_port);
        let stream = CbrSource {
            tuple: FiveTuple::udp(REMOTE_HOST_ADDR, server_port, ue.addr, EPHEMERAL_PORT_BASE),
            pkt_bytes: cfg.video_pkt_bytes,
            interval: video_interval,
            stop: cfg.video_stop(),
            gbr: ue.vip && scenario.has_dedicated_bearers(),
        };
        debug!(
            ue = ue.index,
            vip = ue.vip,
            gbr = stream.gbr,
            sender_dump = %ue.sender_dump_name(scenario),
            receiver_dump = %ue.receiver_dump_name(scenario),
            "安装视频应用"
        );
        sim.schedule(
            cfg.video_start(),
            VideoRequest {
                tuple: request,
                request_bytes: VIDEO_REQUEST_BYTES,
                server_delay,
                stream,
            },
        );
        installed += 1;
    }
    installed
}
