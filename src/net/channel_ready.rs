//! 控制通道建立事件

use super::net_world::NetWorld;
use crate::sim::{Event, Simulator, World};

/// 事件：交换机与控制器的 OpenFlow 通道完成握手
#[derive(Debug)]
pub struct ChannelEstablished;

impl Event for ChannelEstablished {
    fn execute(self: Box<Self>, _sim: &mut Simulator, world: &mut dyn World) {
        if let Some(w) = world.as_any_mut().downcast_mut::<NetWorld>() {
            w.net.switch.on_channel_established();
        }
    }
}
