use crate::config::RunConfig;
use crate::flow::{FiveTuple, PROTO_UDP};
use crate::net::{
    ChannelEstablished, NetWorld, Network, NetworkOpts, OfSwitch, STATUS_NO_DEVICE,
    STATUS_NOT_CONNECTED,
};
use crate::policy::{
    Action, ControllerTransport, FlowMatch, GateState, HandshakeGate, InstallVideoPolicy,
    PolicyDecision, PolicyInjector, PolicyRule, VIDEO_RULE_PRIORITY,
};
use crate::scenario::Scenario;
use crate::sim::{SimTime, Simulator};
use std::net::Ipv4Addr;

/// 记录每次提交的传输桩
#[derive(Default)]
struct CountingTransport {
    status: i32,
    calls: Vec<(u64, FlowMatch, Vec<Action>, u16)>,
}

impl ControllerTransport for CountingTransport {
    fn submit(&mut self, dp_id: u64, flow_match: &FlowMatch, actions: &[Action], priority: u16) -> i32 {
        self.calls.push((dp_id, *flow_match, actions.to_vec(), priority));
        self.status
    }
}

fn injector(scenario: Scenario) -> PolicyInjector {
    PolicyInjector {
        scenario,
        dp_id: 1,
        video_port: 8000,
    }
}

#[test]
fn video_rule_renders_the_dpctl_flow_mod() {
    let rule = PolicyRule::video_priority(1, 8000);
    assert_eq!(
        rule.to_dpctl(),
        "flow-mod cmd=add,table=0,prio=1000 eth_type=0x0800,ip_proto=17,udp_dst=8000 apply:output=all"
    );
    assert_eq!(rule.flow_match.ip_proto, PROTO_UDP);
}

#[test]
fn flow_match_checks_protocol_and_destination_port() {
    let m = PolicyRule::video_priority(1, 8000).flow_match;
    let ue = Ipv4Addr::new(7, 0, 0, 2);
    let remote = Ipv4Addr::new(1, 0, 0, 2);

    assert!(m.matches(&FiveTuple::udp(ue, 49153, remote, 8000)));
    assert!(!m.matches(&FiveTuple::udp(remote, 8000, ue, 49153)));
    let mut tcp = FiveTuple::udp(ue, 49153, remote, 8000);
    tcp.protocol = 6;
    assert!(!m.matches(&tcp));
}

#[test]
fn baseline_never_submits() {
    let mut gate = HandshakeGate::default();
    let mut transport = CountingTransport::default();

    let d = injector(Scenario::Baseline).fire(&mut gate, &mut transport, SimTime::from_millis(500));
    assert_eq!(d, PolicyDecision::Skipped);
    assert_eq!(gate.state(), GateState::Decided(PolicyDecision::Skipped));
    assert_eq!(gate.decided_at(), Some(SimTime::from_millis(500)));
    assert!(transport.calls.is_empty());
    assert_eq!(gate.submissions(), 0);
}

#[test]
fn policy_enabled_submits_exactly_once_even_if_fired_twice() {
    let mut gate = HandshakeGate::default();
    let mut transport = CountingTransport::default();
    let inj = injector(Scenario::PolicyEnabled);

    assert_eq!(
        inj.fire(&mut gate, &mut transport, SimTime::from_millis(500)),
        PolicyDecision::Installed
    );
    assert_eq!(
        inj.fire(&mut gate, &mut transport, SimTime::from_millis(900)),
        PolicyDecision::Installed
    );

    assert_eq!(transport.calls.len(), 1);
    let (dp_id, m, actions, prio) = &transport.calls[0];
    assert_eq!(*dp_id, 1);
    assert_eq!(m.udp_dst, 8000);
    assert_eq!(actions, &vec![Action::OutputAll]);
    assert_eq!(*prio, VIDEO_RULE_PRIORITY);
    assert_eq!(gate.decided_at(), Some(SimTime::from_millis(500)));
    assert_eq!(gate.submissions(), 1);
}

#[test]
fn failed_submission_is_recorded_and_not_retried() {
    let mut gate = HandshakeGate::default();
    let mut transport = CountingTransport {
        status: -1,
        ..Default::default()
    };
    let inj = injector(Scenario::PolicyEnabled);

    let d = inj.fire(&mut gate, &mut transport, SimTime::from_millis(500));
    assert_eq!(d, PolicyDecision::Failed { status: -1 });
    inj.fire(&mut gate, &mut transport, SimTime::from_millis(600));
    assert_eq!(transport.calls.len(), 1);
    assert_eq!(gate.decision(), Some(PolicyDecision::Failed { status: -1 }));
}

#[test]
fn switch_rejects_rules_before_channel_and_for_unknown_datapath() {
    let mut sw = OfSwitch::new(1);
    let rule = PolicyRule::video_priority(1, 8000);

    assert_eq!(
        sw.submit(1, &rule.flow_match, &rule.actions, rule.priority),
        STATUS_NOT_CONNECTED
    );
    sw.on_channel_established();
    assert_eq!(
        sw.submit(2, &rule.flow_match, &rule.actions, rule.priority),
        STATUS_NO_DEVICE
    );
    assert!(sw.flow_table().is_empty());

    assert_eq!(sw.submit(1, &rule.flow_match, &rule.actions, rule.priority), 0);
    assert_eq!(sw.flow_table().len(), 1);
    assert_eq!(sw.submissions(), 3);
}

fn world_for(scenario: Scenario) -> NetWorld {
    let cfg = RunConfig::default();
    NetWorld::new(Network::new(&NetworkOpts::from_config(&cfg, scenario)))
}

fn run_gate(scenario: Scenario, channel_at: SimTime, fire_at: SimTime) -> NetWorld {
    let mut sim = Simulator::default();
    let mut world = world_for(scenario);
    sim.schedule(channel_at, ChannelEstablished);
    sim.schedule(
        fire_at,
        InstallVideoPolicy {
            injector: injector(scenario),
        },
    );
    sim.run_until(SimTime::from_secs(1), &mut world);
    world
}

#[test]
fn scheduled_injection_installs_rule_after_handshake() {
    let world = run_gate(
        Scenario::PolicyEnabled,
        SimTime::from_millis(100),
        SimTime::from_millis(500),
    );
    assert_eq!(world.gate.decision(), Some(PolicyDecision::Installed));
    assert_eq!(world.net.switch.flow_table().len(), 1);
    assert_eq!(world.net.switch.submissions(), 1);
}

#[test]
fn scheduled_injection_in_baseline_leaves_switch_untouched() {
    let world = run_gate(
        Scenario::Baseline,
        SimTime::from_millis(100),
        SimTime::from_millis(500),
    );
    assert_eq!(world.gate.decision(), Some(PolicyDecision::Skipped));
    assert!(world.net.switch.flow_table().is_empty());
    assert_eq!(world.net.switch.submissions(), 0);
}

#[test]
fn injection_racing_a_slow_handshake_degrades_to_failure() {
    let world = run_gate(
        Scenario::PolicyEnabled,
        SimTime::from_millis(800),
        SimTime::from_millis(500),
    );
    assert_eq!(
        world.gate.decision(),
        Some(PolicyDecision::Failed {
            status: STATUS_NOT_CONNECTED
        })
    );
    assert!(world.net.switch.flow_table().is_empty());
}
