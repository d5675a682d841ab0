//! On/Off 背景流源
//!
//! 开启期间以恒定速率发包，关闭期间静默；`off` 为 0 时退化为恒定码率。

use crate::flow::FiveTuple;
use crate::net::NetWorld;
use crate::sim::{Event, SimTime, Simulator, World};

#[derive(Debug, Clone, Copy)]
pub struct OnOffSource {
    pub tuple: FiveTuple,
    pub pkt_bytes: u32,
    pub interval: SimTime,
    pub on: SimTime,
    pub off: SimTime,
    /// 当前开启周期的结束时刻
    pub on_until: SimTime,
    pub stop: SimTime,
}

impl Event for OnOffSource {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let src = *self;
        let now = sim.now();
        if now >= src.stop {
            return;
        }
        let Some(w) = world.as_any_mut().downcast_mut::<NetWorld>() else {
            return;
        };
        w.net.send_downlink(src.tuple, src.pkt_bytes, false, sim);

        let mut next = now + src.interval;
        let mut on_until = src.on_until;
        if src.off > SimTime::ZERO && next >= on_until {
            next = on_until + src.off;
            on_until = next + src.on;
        }
        if next < src.stop {
            sim.schedule(next, OnOffSource { on_until, ..src });
        }
    }
}
