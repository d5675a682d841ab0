//! 视频应用
//!
//! 客户端在启动时向 `video_port_base + u` 发送一个请求；服务端在请求到达后
//! 从该端口向客户端下发恒定码率的视频包，直到停止时刻。

use crate::flow::FiveTuple;
use crate::net::NetWorld;
use crate::sim::{Event, SimTime, Simulator, World};
use tracing::debug;

/// 恒定码率下行源
#[derive(Debug, Clone, Copy)]
pub struct CbrSource {
    pub tuple: FiveTuple,
    pub pkt_bytes: u32,
    pub interval: SimTime,
    pub stop: SimTime,
    /// 走 GBR 专用承载
    pub gbr: bool,
}

impl Event for CbrSource {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let src = *self;
        let now = sim.now();
        if now >= src.stop {
            return;
        }
        let Some(w) = world.as_any_mut().downcast_mut::<NetWorld>() else {
            return;
        };
        w.net.send_downlink(src.tuple, src.pkt_bytes, src.gbr, sim);
        let next = now + src.interval;
        if next < src.stop {
            sim.schedule(next, src);
        }
    }
}

/// 客户端请求：发出上行请求包，并在请求到达服务端时启动下行流
#[derive(Debug, Clone, Copy)]
pub struct VideoRequest {
    pub tuple: FiveTuple,
    pub request_bytes: u32,
    pub server_delay: SimTime,
    pub stream: CbrSource,
}

impl Event for VideoRequest {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let VideoRequest {
            tuple,
            request_bytes,
            server_delay,
            stream,
        } = *self;
        let Some(w) = world.as_any_mut().downcast_mut::<NetWorld>() else {
            return;
        };
        w.net.send_uplink(tuple, request_bytes, sim);
        debug!(request = %tuple, stream = %stream.tuple, "视频请求已发出");
        sim.schedule_in(server_delay, stream);
    }
}
