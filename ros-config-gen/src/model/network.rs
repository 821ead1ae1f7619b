use serde::{Deserialize, Serialize};

/// A named IPv4 network.
///
/// An empty `name` asks for an auto-generated one; an empty `subnet` marks
/// the entry as disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkDefinition {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Subnet")]
    pub subnet: String,
}

impl NetworkDefinition {
    pub fn new(name: impl Into<String>, subnet: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subnet: subnet.into(),
        }
    }
}

/// The four networks every router provisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseNetworks {
    #[serde(alias = "Split")]
    pub split: Option<NetworkDefinition>,
    #[serde(alias = "Domestic")]
    pub domestic: Option<NetworkDefinition>,
    #[serde(alias = "Foreign")]
    pub foreign: Option<NetworkDefinition>,
    #[serde(alias = "VPN")]
    pub vpn: Option<NetworkDefinition>,
}

/// LAN networks routed through VPN client connections, per protocol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VpnClientNetworks {
    #[serde(alias = "Wireguard")]
    pub wireguard: Vec<NetworkDefinition>,
    #[serde(alias = "OpenVPN")]
    pub openvpn: Vec<NetworkDefinition>,
    #[serde(alias = "PPTP")]
    pub pptp: Vec<NetworkDefinition>,
    #[serde(alias = "L2TP")]
    pub l2tp: Vec<NetworkDefinition>,
    #[serde(alias = "SSTP")]
    pub sstp: Vec<NetworkDefinition>,
    #[serde(alias = "IKeV2")]
    pub ikev2: Vec<NetworkDefinition>,
}

/// Networks handed out by the router's own VPN servers.
///
/// WireGuard and OpenVPN may run several servers; the PPP protocols and
/// IKEv2 have a single server each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VpnServerNetworks {
    #[serde(alias = "Wireguard")]
    pub wireguard: Vec<NetworkDefinition>,
    #[serde(alias = "OpenVPN")]
    pub openvpn: Vec<NetworkDefinition>,
    #[serde(alias = "PPTP")]
    pub pptp: Option<NetworkDefinition>,
    #[serde(alias = "L2TP")]
    pub l2tp: Option<NetworkDefinition>,
    #[serde(alias = "SSTP")]
    pub sstp: Option<NetworkDefinition>,
    #[serde(alias = "IKeV2")]
    pub ikev2: Option<NetworkDefinition>,
}

/// Networks carried over site-to-site tunnels, per tunnel kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelNetworks {
    #[serde(alias = "IPIP")]
    pub ipip: Vec<NetworkDefinition>,
    #[serde(alias = "Eoip")]
    pub eoip: Vec<NetworkDefinition>,
    #[serde(alias = "Gre")]
    pub gre: Vec<NetworkDefinition>,
    #[serde(alias = "Vxlan")]
    pub vxlan: Vec<NetworkDefinition>,
}

/// Every network the router should provision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnets {
    #[serde(alias = "BaseNetworks")]
    pub base_networks: BaseNetworks,
    #[serde(alias = "ForeignNetworks", default)]
    pub foreign_networks: Vec<NetworkDefinition>,
    #[serde(alias = "DomesticNetworks", default)]
    pub domestic_networks: Vec<NetworkDefinition>,
    #[serde(alias = "VPNClientNetworks", default)]
    pub vpn_client_networks: Option<VpnClientNetworks>,
    #[serde(alias = "VPNServerNetworks", default)]
    pub vpn_server_networks: Option<VpnServerNetworks>,
    #[serde(alias = "TunnelNetworks", default)]
    pub tunnel_networks: Option<TunnelNetworks>,
}
