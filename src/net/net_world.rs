//! 网络世界实现
//!
//! 持有接入网络与本次运行的策略门控。

use super::network::Network;
use crate::policy::HandshakeGate;
use crate::sim::World;
use std::any::Any;

#[derive(Debug)]
pub struct NetWorld {
    pub net: Network,
    pub gate: HandshakeGate,
}

impl NetWorld {
    pub fn new(net: Network) -> Self {
        Self {
            net,
            gate: HandshakeGate::default(),
        }
    }
}

impl World for NetWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
