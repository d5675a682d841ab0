//! Two-class strict priority queue with a shared byte budget.
//!
//! Packets stamped by an installed flow rule, or carried on a GBR dedicated
//! bearer, go to the high class. When the buffer is full a high-class
//! arrival pushes out the newest low-class packets; a low-class arrival is
//! tail-dropped.

use std::collections::VecDeque;

use crate::net::Packet;

use super::PacketQueue;

#[derive(Debug)]
pub struct PriorityQueue {
    max_bytes: u64,
    cur_bytes: u64,
    hi: VecDeque<Packet>,
    lo: VecDeque<Packet>,
}

impl PriorityQueue {
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            cur_bytes: 0,
            hi: VecDeque::new(),
            lo: VecDeque::new(),
        }
    }

    fn is_high_priority(pkt: &Packet) -> bool {
        pkt.rule_priority.is_some() || pkt.gbr
    }

    fn lo_bytes(&self) -> u64 {
        self.lo.iter().map(|p| u64::from(p.size_bytes)).sum()
    }
}

impl PacketQueue for PriorityQueue {
    fn enqueue(&mut self, pkt: Packet) -> Vec<Packet> {
        let sz = u64::from(pkt.size_bytes);
        let need = self.cur_bytes.saturating_add(sz);
        if need <= self.max_bytes {
            self.cur_bytes = need;
            if Self::is_high_priority(&pkt) {
                self.hi.push_back(pkt);
            } else {
                self.lo.push_back(pkt);
            }
            return Vec::new();
        }

        let overflow = need - self.max_bytes;
        if !Self::is_high_priority(&pkt) || self.lo_bytes() < overflow {
            return vec![pkt];
        }

        let mut freed = 0u64;
        let mut evicted = Vec::new();
        while freed < overflow {
            let Some(v) = self.lo.pop_back() else {
                break;
            };
            freed += u64::from(v.size_bytes);
            evicted.push(v);
        }
        self.cur_bytes = self.cur_bytes.saturating_sub(freed).saturating_add(sz);
        self.hi.push_back(pkt);
        evicted
    }

    fn dequeue(&mut self) -> Option<Packet> {
        let pkt = self.hi.pop_front().or_else(|| self.lo.pop_front())?;
        self.cur_bytes = self.cur_bytes.saturating_sub(u64::from(pkt.size_bytes));
        Some(pkt)
    }

    fn len(&self) -> usize {
        self.hi.len() + self.lo.len()
    }

    fn bytes(&self) -> u64 {
        self.cur_bytes
    }

    fn capacity_bytes(&self) -> u64 {
        self.max_bytes
    }
}
