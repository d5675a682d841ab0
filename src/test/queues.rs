use crate::flow::{FiveTuple, FlowId};
use crate::net::Packet;
use crate::queue::{DEFAULT_PKT_BYTES, DropTailQueue, PacketQueue, PriorityQueue, mem_from_pkt};
use crate::sim::SimTime;
use std::net::Ipv4Addr;

fn pkt(id: u64, size_bytes: u32) -> Packet {
    Packet {
        id,
        flow_id: FlowId(1),
        tuple: FiveTuple::udp(
            Ipv4Addr::new(1, 0, 0, 2),
            49153,
            Ipv4Addr::new(7, 0, 0, 2),
            9000,
        ),
        size_bytes,
        sent_at: SimTime::ZERO,
        rule_priority: None,
        gbr: false,
    }
}

fn gbr_pkt(id: u64, size_bytes: u32) -> Packet {
    Packet {
        gbr: true,
        ..pkt(id, size_bytes)
    }
}

#[test]
fn droptail_queue_enforces_capacity_and_preserves_order() {
    let mut q = DropTailQueue::new(100);
    assert_eq!(q.capacity_bytes(), 100);
    assert!(q.is_empty());

    assert!(q.enqueue(pkt(1, 60)).is_empty());
    assert_eq!(q.bytes(), 60);

    let dropped = q.enqueue(pkt(2, 50));
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].id, 2);
    assert_eq!(q.len(), 1);
    assert_eq!(q.bytes(), 60);

    assert_eq!(q.dequeue().expect("pkt").id, 1);
    assert_eq!(q.bytes(), 0);
    assert!(q.dequeue().is_none());
}

#[test]
fn droptail_queue_ignores_priority_marks() {
    let mut q = DropTailQueue::new(1_000);
    assert!(q.enqueue(pkt(1, 100)).is_empty());
    assert!(q.enqueue(gbr_pkt(2, 100)).is_empty());

    assert_eq!(q.dequeue().expect("pkt").id, 1);
    assert_eq!(q.dequeue().expect("pkt").id, 2);
}

#[test]
fn priority_queue_serves_gbr_and_rule_marked_packets_first() {
    let mut q = PriorityQueue::new(1_000);

    let mut marked = pkt(3, 100);
    marked.rule_priority = Some(1000);

    assert!(q.enqueue(pkt(1, 100)).is_empty());
    assert!(q.enqueue(gbr_pkt(2, 100)).is_empty());
    assert!(q.enqueue(marked).is_empty());
    assert_eq!(q.len(), 3);

    assert_eq!(q.dequeue().expect("pkt").id, 2);
    assert_eq!(q.dequeue().expect("pkt").id, 3);
    assert_eq!(q.dequeue().expect("pkt").id, 1);
    assert!(q.dequeue().is_none());
}

#[test]
fn priority_queue_tail_drops_low_class_when_full() {
    let mut q = PriorityQueue::new(200);
    assert!(q.enqueue(gbr_pkt(1, 150)).is_empty());

    let dropped = q.enqueue(pkt(2, 100));
    assert_eq!(dropped.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    assert_eq!(q.bytes(), 150);
}

#[test]
fn priority_queue_high_class_pushes_out_newest_low_class_packets() {
    let mut q = PriorityQueue::new(300);
    assert!(q.enqueue(pkt(1, 100)).is_empty());
    assert!(q.enqueue(pkt(2, 100)).is_empty());
    assert!(q.enqueue(pkt(3, 100)).is_empty());

    let dropped = q.enqueue(gbr_pkt(4, 150));
    assert_eq!(dropped.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3, 2]);
    assert_eq!(q.len(), 2);
    assert_eq!(q.bytes(), 250);

    assert_eq!(q.dequeue().expect("pkt").id, 4);
    assert_eq!(q.dequeue().expect("pkt").id, 1);
}

#[test]
fn priority_queue_drops_high_class_when_no_low_class_room_exists() {
    let mut q = PriorityQueue::new(200);
    assert!(q.enqueue(gbr_pkt(1, 150)).is_empty());

    let dropped = q.enqueue(gbr_pkt(2, 100));
    assert_eq!(dropped.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    assert_eq!(q.len(), 1);
}

#[test]
fn mem_from_pkt_multiplies_default_packet_bytes_and_saturates() {
    assert_eq!(mem_from_pkt(0), 0);
    assert_eq!(mem_from_pkt(100), DEFAULT_PKT_BYTES * 100);
    assert_eq!(mem_from_pkt(u64::MAX), u64::MAX);
}
