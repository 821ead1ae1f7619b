//! Typed configuration handed to the generators.
//!
//! These structs mirror what a user fills in: most fields are optional and
//! get their defaults in [`crate::settings`], never inside a generator.

mod credentials;
mod network;
mod servers;
mod tunnel;

pub use credentials::{users_for, Credentials, VpnType};
pub use network::{
    BaseNetworks, NetworkDefinition, Subnets, TunnelNetworks, VpnClientNetworks,
    VpnServerNetworks,
};
pub use servers::{
    AuthMethod, CertificateSettings, DhGroup, IkeEncryption, IkeHash, Ikev2AuthMethod,
    Ikev2ServerConfig, IpsecMode, L2tpServerConfig, OpenVpnServerConfig, OvpnAuth, OvpnCipher,
    OvpnMode, OvpnProtocol, PfsGroup, PptpServerConfig, ProposalEncryption, SstpCipher,
    SstpServerConfig, TlsVersion, VpnServer, WireguardInterfaceConfig,
};
pub use tunnel::{EoipTunnel, PointToPointTunnel, Tunnel, TunnelKind, VxlanTunnel};
