//! Test harness for the taskwire dispatcher
//!
//! Provides what the core deliberately leaves out of scope so it can be
//! exercised end to end without hardware:
//!
//! - [`loopback`]: in-memory byte-frame links implementing the core's
//!   `Transport` capability, wired as host↔device pairs;
//! - [`tcp`]: a reference socket driver — single-client server on the
//!   device side, outbound client on the host side;
//! - [`tasks`]: a small fleet of fixture tasks covering every lifecycle
//!   shape (single-shot, multi-pass, endless, parameter echo).
//!
//! See `examples/basic_usage.rs` for a complete register → execute →
//! result round trip driven from a simulated host.

pub mod loopback;
pub mod tasks;
pub mod tcp;

pub use loopback::{loopback_pair, LoopbackEndpoint, SilentTransport};
pub use tasks::{BeaconTask, EchoTask, PingTask, SweepTask};
pub use tcp::{TcpClientTransport, TcpServerTransport};
