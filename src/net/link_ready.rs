//! 链路就绪事件（用于驱动回程队列出队）

use super::net_world::NetWorld;
use crate::sim::{Event, Simulator, World};

/// 事件：回程链路完成一次序列化后，在 depart 时刻触发，尝试发送队列中的下一个 packet。
#[derive(Debug)]
pub struct LinkReady;

impl Event for LinkReady {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        if let Some(w) = world.as_any_mut().downcast_mut::<NetWorld>() {
            w.net.on_link_ready(sim);
        }
    }
}
