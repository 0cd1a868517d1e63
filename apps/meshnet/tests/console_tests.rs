//! # Console Integration Tests
//!
//! Full command scripts through the interpreter, asserting the exact
//! response lines an operator would see in the output log.

use meshnet::Console;

/// Run a script and collect one rendered message per non-blank line.
fn run_script(script: &str) -> Vec<String> {
    let mut console = Console::new();
    script
        .lines()
        .filter_map(|line| console.handle_line(line))
        .map(|reply| reply.message)
        .collect()
}

#[test]
fn build_and_route_workflow() {
    let output = run_script(
        "spawn_host GATEWAY 5\n\
         spawn_host RELAY_1 3\n\
         spawn_host RELAY_2 3\n\
         spawn_host TARGET 1\n\
         link_backdoor GATEWAY RELAY_1 10 100 2\n\
         link_backdoor RELAY_1 RELAY_2 10 100 2\n\
         link_backdoor RELAY_2 TARGET 10 100 2\n\
         trace_route GATEWAY TARGET 50 0\n",
    );

    assert_eq!(
        output,
        vec![
            "Spawned host GATEWAY with clearance level 5.",
            "Spawned host RELAY_1 with clearance level 3.",
            "Spawned host RELAY_2 with clearance level 3.",
            "Spawned host TARGET with clearance level 1.",
            "Linked GATEWAY <-> RELAY_1 with latency 10ms, bandwidth 100Mbps, firewall 2.",
            "Linked RELAY_1 <-> RELAY_2 with latency 10ms, bandwidth 100Mbps, firewall 2.",
            "Linked RELAY_2 <-> TARGET with latency 10ms, bandwidth 100Mbps, firewall 2.",
            "Optimal route GATEWAY -> TARGET: GATEWAY -> RELAY_1 -> RELAY_2 -> TARGET (Latency = 30ms)",
        ]
    );
}

#[test]
fn chain_preferred_over_expensive_direct_edge() {
    let output = run_script(
        "spawn_host A 9\n\
         spawn_host B 9\n\
         spawn_host C 9\n\
         spawn_host D 9\n\
         link_backdoor A B 4 50 0\n\
         link_backdoor B C 4 50 0\n\
         link_backdoor C D 4 50 0\n\
         link_backdoor A D 20 50 0\n\
         trace_route A D 1 0\n\
         trace_route A D 1 6\n",
    );

    // λ = 0 picks the cheap chain; λ = 6 makes hops 2 and 3 cost 10 and 16,
    // so the direct edge wins.
    assert_eq!(
        output[8],
        "Optimal route A -> D: A -> B -> C -> D (Latency = 12ms)"
    );
    assert_eq!(output[9], "Optimal route A -> D: A -> D (Latency = 20ms)");
}

#[test]
fn seal_split_and_breach_workflow() {
    let output = run_script(
        "spawn_host A 2\n\
         spawn_host B 2\n\
         spawn_host C 2\n\
         link_backdoor A B 5 40 0\n\
         link_backdoor B C 5 40 0\n\
         scan_connectivity\n\
         simulate_breach B\n\
         simulate_breach A B\n\
         seal_backdoor A B\n\
         scan_connectivity\n\
         trace_route A C 1 0\n\
         seal_backdoor A B\n\
         scan_connectivity\n",
    );

    assert_eq!(output[5], "Network is fully connected.");
    assert_eq!(
        output[6],
        "Host B IS an articulation point.\nFailure results in 2 disconnected components."
    );
    assert_eq!(
        output[7],
        "Backdoor A <-> B IS a bridge.\nFailure results in 2 disconnected components."
    );
    assert_eq!(output[8], "Backdoor A <-> B sealed.");
    assert_eq!(output[9], "Network has 2 disconnected components.");
    assert_eq!(output[10], "No route found from A to C");
    assert_eq!(output[11], "Backdoor A <-> B unsealed.");
    assert_eq!(output[12], "Network is fully connected.");
}

#[test]
fn oracle_report_renders_the_full_block() {
    let output = run_script(
        "spawn_host N1 2\n\
         spawn_host N2 3\n\
         spawn_host N3 3\n\
         link_backdoor N1 N2 5 40 0\n\
         link_backdoor N2 N3 5 25 0\n\
         link_backdoor N3 N1 5 10 0\n\
         oracle_report\n",
    );

    assert_eq!(
        output[6],
        "--- Resistance Network Report ---\n\
         Total Hosts: 3\n\
         Total Unsealed Backdoors: 3\n\
         Network Connectivity: Connected\n\
         Connected Components: 1\n\
         Contains Cycles: Yes\n\
         Average Bandwidth: 25.0Mbps\n\
         Average Clearance Level: 2.7"
    );
}

#[test]
fn empty_network_oracle_report_uses_degenerate_values() {
    let output = run_script("oracle_report\n");
    assert_eq!(
        output[0],
        "--- Resistance Network Report ---\n\
         Total Hosts: 0\n\
         Total Unsealed Backdoors: 0\n\
         Network Connectivity: Connected\n\
         Connected Components: 1\n\
         Contains Cycles: No\n\
         Average Bandwidth: 0.0Mbps\n\
         Average Clearance Level: 0.0"
    );
}

#[test]
fn failures_render_the_generic_error_line_with_codes() {
    let mut console = Console::new();

    let reply = console.handle_line("trace_route A B 1 0").expect("reply");
    assert_eq!(reply.message, "Some error occurred in trace_route.");
    assert_eq!(reply.code, Some("HOST_NOT_FOUND"));

    console.handle_line("spawn_host A 1").expect("reply");
    let reply = console.handle_line("simulate_breach A GHOST").expect("reply");
    assert_eq!(reply.message, "Some error occurred in simulate_breach.");
    assert_eq!(reply.code, Some("HOST_NOT_FOUND"));

    console.handle_line("spawn_host B 1").expect("reply");
    let reply = console.handle_line("simulate_breach A B").expect("reply");
    assert_eq!(reply.code, Some("NO_BACKDOOR"));

    console.handle_line("link_backdoor A B 1 10 0").expect("reply");
    console.handle_line("seal_backdoor A B").expect("reply");
    let reply = console.handle_line("simulate_breach A B").expect("reply");
    assert_eq!(reply.code, Some("BACKDOOR_IS_SEALED"));
}

#[test]
fn self_route_traces_a_single_host() {
    let output = run_script(
        "spawn_host HQ 9\n\
         trace_route HQ HQ 500 3\n",
    );
    assert_eq!(output[1], "Optimal route HQ -> HQ: HQ (Latency = 0ms)");
}

#[test]
fn json_replies_serialize_cleanly() {
    let mut console = Console::new();
    let reply = console.handle_line("spawn_host A 1").expect("reply");
    let rendered = serde_json::to_string(&reply).expect("json");
    assert_eq!(
        rendered,
        r#"{"endpoint":"spawn_host","ok":true,"message":"Spawned host A with clearance level 1."}"#
    );

    let reply = console.handle_line("spawn_host A 1").expect("reply");
    let rendered = serde_json::to_string(&reply).expect("json");
    assert!(rendered.contains(r#""code":"HOST_ALREADY_EXISTS""#));
    assert!(rendered.contains(r#""ok":false"#));
}
