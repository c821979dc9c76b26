use clap::Parser;
use std::net::SocketAddr;

/// one router in the statically-configured mesh.
///
/// the topology is a compile-time fixture: it is never read from a file or
/// negotiated at runtime, only consulted at bootstrap to resolve which
/// identity this process is and who its direct neighbors are.
pub struct RouterIdentity {
    pub name: &'static str,
    pub endpoint: SocketAddr,
    pub neighbors: Vec<SocketAddr>,
}

fn addr(s: &str) -> SocketAddr {
    s.parse().expect("built-in mesh address literal is well-formed")
}

/// the four-router ring used throughout this daemon's test mesh.
pub fn mesh() -> Vec<RouterIdentity> {
    vec![
        RouterIdentity {
            name: "queeg",
            endpoint: addr("129.21.30.37:5000"),
            neighbors: vec![addr("129.21.34.80:5000"), addr("129.21.22.196:5000")],
        },
        RouterIdentity {
            name: "comet",
            endpoint: addr("129.21.34.80:5000"),
            neighbors: vec![addr("129.21.30.37:5000"), addr("129.21.27.49:5000")],
        },
        RouterIdentity {
            name: "rhea",
            endpoint: addr("129.21.27.49:5000"),
            neighbors: vec![addr("129.21.34.80:5000"), addr("129.21.22.196:5000")],
        },
        RouterIdentity {
            name: "glados",
            endpoint: addr("129.21.22.196:5000"),
            neighbors: vec![addr("129.21.27.49:5000"), addr("129.21.30.37:5000")],
        },
    ]
}

/// resolve which configured identity a local bind address corresponds to.
///
/// fails fast (returns `None`) if the address matches no entry in the mesh.
pub fn resolve(local_ip: &str) -> Option<RouterIdentity> {
    mesh().into_iter().find(|r| r.endpoint.ip().to_string() == local_ip)
}

/// subnet mask bits. the mask width is a single global constant (non-goal:
/// variable-length subnet masks per entry).
pub const SUB_BITS: u8 = 24;

/// infinity sentinel hop count.
pub const HOP_LIMIT: u32 = 16;

/// send-cycles of silence tolerated before a neighbor is declared dead.
pub const TTL: u32 = 5;

/// seconds between per-neighbor broadcasts.
pub const SEND_CADENCE: u64 = 5;

/// seconds between table renders.
pub const PRINT_CADENCE: u64 = 3;

/// per-loop debug toggles, read at startup from `RIP_DEBUG_{SEND,RECV,PRINT}`
/// environment variables so the binary doesn't need a recompile to turn on
/// verbose per-datagram tracing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugToggles {
    pub send: bool,
    pub recv: bool,
    pub print: bool,
}

impl DebugToggles {
    pub fn from_env() -> Self {
        let flag = |name: &str| std::env::var(name).is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
        Self {
            send: flag("RIP_DEBUG_SEND"),
            recv: flag("RIP_DEBUG_RECV"),
            print: flag("RIP_DEBUG_PRINT"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_level(&self) -> log::Level {
        match *self {
            Self::Error => log::Level::Error,
            Self::Warn => log::Level::Warn,
            Self::Info => log::Level::Info,
            Self::Debug => log::Level::Debug,
            Self::Trace => log::Level::Trace,
        }
    }
}

#[derive(Parser)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// the local IP address that selects which configured router identity
    /// this process assumes.
    pub local_address: String,
}
