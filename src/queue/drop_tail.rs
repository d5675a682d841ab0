//! DropTail（尾丢弃）FIFO
//!
//! 不区分流量类别：规则标记与 GBR 标志都被忽略。

use std::collections::VecDeque;

use crate::net::Packet;

use super::PacketQueue;

#[derive(Debug)]
pub struct DropTailQueue {
    max_bytes: u64,
    cur_bytes: u64,
    q: VecDeque<Packet>,
}

impl DropTailQueue {
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            cur_bytes: 0,
            q: VecDeque::new(),
        }
    }

    fn fits(&self, pkt: &Packet) -> bool {
        self.cur_bytes.saturating_add(u64::from(pkt.size_bytes)) <= self.max_bytes
    }
}

impl PacketQueue for DropTailQueue {
    fn enqueue(&mut self, pkt: Packet) -> Vec<Packet> {
        if !self.fits(&pkt) {
            return vec![pkt];
        }
        self.cur_bytes += u64::from(pkt.size_bytes);
        self.q.push_back(pkt);
        Vec::new()
    }

    fn dequeue(&mut self) -> Option<Packet> {
        let pkt = self.q.pop_front()?;
        self.cur_bytes = self.cur_bytes.saturating_sub(u64::from(pkt.size_bytes));
        Some(pkt)
    }

    fn len(&self) -> usize {
        self.q.len()
    }

    fn bytes(&self) -> u64 {
        self.cur_bytes
    }

    fn capacity_bytes(&self) -> u64 {
        self.max_bytes
    }
}
