//! 事件 trait
//!
//! 所有被调度的动作（发包、链路就绪、策略注入等）都实现该接口。

use super::simulator::Simulator;
use super::world::World;

/// 事件：在调度时刻被执行一次。`self: Box<Self>` 使事件可以移出自身持有的数据。
pub trait Event: Send + 'static {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World);
}
