//! SDN 视频优先策略
//!
//! 控制器握手门控 + 一次性规则注入。控制通道被视为不透明的请求/应答传输。

mod injector;
mod rule;

pub use injector::{GateState, HandshakeGate, InstallVideoPolicy, PolicyDecision, PolicyInjector};
pub use rule::{
    Action, ControllerTransport, ETH_TYPE_IPV4, FlowMatch, PolicyRule, VIDEO_RULE_PRIORITY,
};
