//! 数据包交付事件

use super::net_world::NetWorld;
use super::packet::Packet;
use crate::sim::{Event, Simulator, World};
use tracing::warn;

/// 事件：packet 到达目的端，计入流监控。
#[derive(Debug)]
pub struct DeliverPacket {
    pub pkt: Packet,
}

impl Event for DeliverPacket {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let DeliverPacket { pkt } = *self;
        let Some(w) = world.as_any_mut().downcast_mut::<NetWorld>() else {
            warn!(pkt_id = pkt.id, "world is not NetWorld, packet discarded");
            return;
        };
        w.net.on_delivered(pkt, sim.now());
    }
}
