//! # Command Console
//!
//! The request-validation and formatting layer between the line-oriented
//! command stream and the engine: tokenizes each line, validates argument
//! shape and identifier charset, delegates to [`Engine`], and renders the
//! structured results as response text.
//!
//! The engine only ever sees well-typed, pre-validated arguments; the
//! console only ever renders; no topology logic lives here.

use meshnet_core::{Engine, MeshError, format_tenths};
use serde::Serialize;

/// Reason code emitted for a command with the wrong argument shape.
const INVALID_ARGS: &str = "INVALID_ARGS";

/// Reason code emitted for an identifier outside `[A-Z0-9_]`.
const ILLEGAL_CHARACTER: &str = "ILLEGAL_CHARACTER";

/// Reason code emitted for an unknown command word.
const ENDPOINT_NOT_FOUND: &str = "ENDPOINT_NOT_FOUND";

/// One rendered response: the endpoint that handled the command, whether it
/// succeeded, a machine-readable reason code on failure, and the response
/// line(s) to log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsoleReply {
    pub endpoint: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    pub message: String,
}

impl ConsoleReply {
    fn success(endpoint: &'static str, message: String) -> Self {
        Self {
            endpoint,
            ok: true,
            code: None,
            message,
        }
    }

    fn failure(endpoint: &'static str, code: &'static str) -> Self {
        Self {
            endpoint,
            ok: false,
            code: Some(code),
            message: format!("Some error occurred in {endpoint}."),
        }
    }

    fn engine_failure(endpoint: &'static str, error: &MeshError) -> Self {
        Self::failure(endpoint, error.code())
    }

    fn endpoint_not_found() -> Self {
        Self {
            endpoint: "unknown",
            ok: false,
            code: Some(ENDPOINT_NOT_FOUND),
            message: ENDPOINT_NOT_FOUND.to_owned(),
        }
    }
}

/// Identifiers accepted by the console: uppercase letters, digits,
/// underscore. The engine itself treats identifiers as opaque.
fn valid_identifier(id: &str) -> bool {
    id.bytes()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}

fn parse_int(token: &str) -> Option<i64> {
    token.parse().ok()
}

/// Stateful interpreter: one console drives one engine for the lifetime of
/// a command script.
#[derive(Debug, Default)]
pub struct Console {
    engine: Engine,
}

impl Console {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one input line. Blank lines produce no reply.
    pub fn handle_line(&mut self, line: &str) -> Option<ConsoleReply> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return None;
        }
        Some(self.dispatch(&tokens))
    }

    /// Route a tokenized command to the corresponding handler.
    pub fn dispatch(&mut self, tokens: &[&str]) -> ConsoleReply {
        match tokens[0] {
            "spawn_host" => self.spawn_host(&tokens[1..]),
            "link_backdoor" => self.link_backdoor(&tokens[1..]),
            "seal_backdoor" => self.seal_backdoor(&tokens[1..]),
            "trace_route" => self.trace_route(&tokens[1..]),
            "scan_connectivity" => self.scan_connectivity(&tokens[1..]),
            "oracle_report" => self.oracle_report(&tokens[1..]),
            "simulate_breach" => self.simulate_breach(&tokens[1..]),
            _ => ConsoleReply::endpoint_not_found(),
        }
    }

    fn spawn_host(&mut self, args: &[&str]) -> ConsoleReply {
        const ENDPOINT: &str = "spawn_host";

        let [id, clearance] = args else {
            return ConsoleReply::failure(ENDPOINT, INVALID_ARGS);
        };
        let Some(clearance) = parse_int(clearance) else {
            return ConsoleReply::failure(ENDPOINT, INVALID_ARGS);
        };

        if self.engine.network().contains(id) {
            return ConsoleReply::failure(ENDPOINT, "HOST_ALREADY_EXISTS");
        }
        if !valid_identifier(id) {
            return ConsoleReply::failure(ENDPOINT, ILLEGAL_CHARACTER);
        }

        match self.engine.create_host(id, clearance) {
            Ok(()) => ConsoleReply::success(
                ENDPOINT,
                format!("Spawned host {id} with clearance level {clearance}."),
            ),
            Err(error) => ConsoleReply::engine_failure(ENDPOINT, &error),
        }
    }

    fn link_backdoor(&mut self, args: &[&str]) -> ConsoleReply {
        const ENDPOINT: &str = "link_backdoor";

        let [id1, id2, latency, bandwidth, firewall] = args else {
            return ConsoleReply::failure(ENDPOINT, INVALID_ARGS);
        };
        let (Some(latency), Some(bandwidth), Some(firewall)) = (
            parse_int(latency),
            parse_int(bandwidth),
            parse_int(firewall),
        ) else {
            return ConsoleReply::failure(ENDPOINT, INVALID_ARGS);
        };

        match self
            .engine
            .create_backdoor(id1, id2, latency, bandwidth, firewall)
        {
            Ok(()) => ConsoleReply::success(
                ENDPOINT,
                format!(
                    "Linked {id1} <-> {id2} with latency {latency}ms, bandwidth {bandwidth}Mbps, firewall {firewall}."
                ),
            ),
            Err(error) => ConsoleReply::engine_failure(ENDPOINT, &error),
        }
    }

    fn seal_backdoor(&mut self, args: &[&str]) -> ConsoleReply {
        const ENDPOINT: &str = "seal_backdoor";

        let [id1, id2] = args else {
            return ConsoleReply::failure(ENDPOINT, INVALID_ARGS);
        };

        match self.engine.toggle_seal(id1, id2) {
            Ok(sealed) => {
                let state = if sealed { "sealed" } else { "unsealed" };
                ConsoleReply::success(ENDPOINT, format!("Backdoor {id1} <-> {id2} {state}."))
            }
            Err(error) => ConsoleReply::engine_failure(ENDPOINT, &error),
        }
    }

    fn trace_route(&mut self, args: &[&str]) -> ConsoleReply {
        const ENDPOINT: &str = "trace_route";

        let [source, destination, min_bandwidth, congestion] = args else {
            return ConsoleReply::failure(ENDPOINT, INVALID_ARGS);
        };
        let (Some(min_bandwidth), Some(congestion)) =
            (parse_int(min_bandwidth), parse_int(congestion))
        else {
            return ConsoleReply::failure(ENDPOINT, INVALID_ARGS);
        };

        match self
            .engine
            .find_route(source, destination, min_bandwidth, congestion)
        {
            Ok(Some(route)) => {
                let mut message =
                    format!("Optimal route {source} -> {destination}: ");
                message.push_str(&route.hosts.join(" -> "));
                message.push_str(&format!(" (Latency = {}ms)", route.total_latency));
                ConsoleReply::success(ENDPOINT, message)
            }
            Ok(None) => ConsoleReply::success(
                ENDPOINT,
                format!("No route found from {source} to {destination}"),
            ),
            Err(error) => ConsoleReply::engine_failure(ENDPOINT, &error),
        }
    }

    fn scan_connectivity(&mut self, args: &[&str]) -> ConsoleReply {
        const ENDPOINT: &str = "scan_connectivity";

        if !args.is_empty() {
            return ConsoleReply::failure(ENDPOINT, INVALID_ARGS);
        }

        let components = self.engine.component_count();
        if components <= 1 {
            ConsoleReply::success(ENDPOINT, "Network is fully connected.".to_owned())
        } else {
            ConsoleReply::success(
                ENDPOINT,
                format!("Network has {components} disconnected components."),
            )
        }
    }

    fn oracle_report(&mut self, args: &[&str]) -> ConsoleReply {
        const ENDPOINT: &str = "oracle_report";

        if !args.is_empty() {
            return ConsoleReply::failure(ENDPOINT, INVALID_ARGS);
        }

        let report = self.engine.report();
        let connectivity = if report.connected {
            "Connected"
        } else {
            "Disconnected"
        };
        let cycles = if report.has_cycle { "Yes" } else { "No" };

        let message = format!(
            "--- Resistance Network Report ---\n\
             Total Hosts: {}\n\
             Total Unsealed Backdoors: {}\n\
             Network Connectivity: {}\n\
             Connected Components: {}\n\
             Contains Cycles: {}\n\
             Average Bandwidth: {}Mbps\n\
             Average Clearance Level: {}",
            report.total_hosts,
            report.unsealed_backdoors,
            connectivity,
            report.components,
            cycles,
            format_tenths(report.avg_bandwidth_tenths),
            format_tenths(report.avg_clearance_tenths),
        );

        ConsoleReply::success(ENDPOINT, message)
    }

    fn simulate_breach(&mut self, args: &[&str]) -> ConsoleReply {
        const ENDPOINT: &str = "simulate_breach";

        match args {
            [id] => match self.engine.simulate_host_breach(id) {
                Ok(impact) if impact.critical => ConsoleReply::success(
                    ENDPOINT,
                    format!(
                        "Host {id} IS an articulation point.\nFailure results in {} disconnected components.",
                        impact.components
                    ),
                ),
                Ok(_) => ConsoleReply::success(
                    ENDPOINT,
                    format!("Host {id} is NOT an articulation point. Network remains the same."),
                ),
                Err(error) => ConsoleReply::engine_failure(ENDPOINT, &error),
            },
            [id1, id2] => match self.engine.simulate_backdoor_breach(id1, id2) {
                Ok(impact) if impact.critical => ConsoleReply::success(
                    ENDPOINT,
                    format!(
                        "Backdoor {id1} <-> {id2} IS a bridge.\nFailure results in {} disconnected components.",
                        impact.components
                    ),
                ),
                Ok(_) => ConsoleReply::success(
                    ENDPOINT,
                    format!(
                        "Backdoor {id1} <-> {id2} is NOT a bridge. Network remains the same."
                    ),
                ),
                Err(error) => ConsoleReply::engine_failure(ENDPOINT, &error),
            },
            _ => ConsoleReply::failure(ENDPOINT, INVALID_ARGS),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
