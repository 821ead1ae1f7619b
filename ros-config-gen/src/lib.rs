//! MikroTik RouterOS configuration generation.
//!
//! Typed router settings go in, a section-keyed [`RouterConfig`] comes out.
//! Every generator is a pure function; documents are combined with
//! [`merge_router_configs`] and cleaned up with [`command_shortener`]
//! before rendering.
//!
//! # Architecture
//!
//! ## Input
//!
//! - [`model`]: user-facing configuration structs (credentials, protocol
//!   servers, networks, tunnels)
//! - [`settings`]: defaulting pass, one `resolve()` per protocol config
//! - [`input`]: loading a [`GenerationInput`] from TOML or JSON
//!
//! ## Building blocks
//!
//! - [`builders`]: command-line builder and per-section helpers
//! - [`addressing`]: gateway, pool and client address planning
//! - [`naming`]: auto-naming of unnamed network entries
//! - [`section`]: RouterOS menu paths and well-known list names
//!
//! ## Generators
//!
//! - [`networks`]: LAN bridges, DHCP, routing tables and mangle rules
//! - [`tunnels`]: IPIP, EoIP, GRE and VXLAN interfaces
//! - [`vpn`]: WireGuard, OpenVPN, PPTP, L2TP, SSTP and IKEv2 servers,
//!   certificates and the top-level VPN wrappers
//! - [`pipeline`]: full generation run
//!
//! ## Reporting
//!
//! - [`report`]: section summaries for terminal output
//!
//! # Example
//!
//! ```ignore
//! use ros_config_gen::input::load_input;
//! use ros_config_gen::pipeline::{generate, Scope};
//! use ros_script_core::render_script;
//!
//! let input = load_input("router.toml".as_ref())?;
//! let doc = generate(&input, Scope::All, true);
//! print!("{}", render_script(&doc));
//! ```

pub mod addressing;
pub mod builders;
pub mod input;
pub mod model;
pub mod naming;
pub mod networks;
pub mod pipeline;
pub mod report;
pub mod section;
pub mod settings;
pub mod tunnels;
pub mod vpn;

pub use input::{load_input, GenerationInput, InputLoadError};
pub use pipeline::{generate, Scope};
pub use ros_script_core::{command_shortener, merge_router_configs, RouterConfig};
