use serde::{Deserialize, Serialize};

/// Site-to-site tunnel interface kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TunnelKind {
    Ipip,
    Eoip,
    Gre,
    Vxlan,
}

impl TunnelKind {
    /// Prefix used for auto-generated tunnel and network names.
    pub fn name_prefix(self) -> &'static str {
        match self {
            TunnelKind::Ipip => "IPIP",
            TunnelKind::Eoip => "EoIP",
            TunnelKind::Gre => "GRE",
            TunnelKind::Vxlan => "VXLAN",
        }
    }

    /// Menu path of the tunnel interface.
    pub fn section(self) -> &'static str {
        match self {
            TunnelKind::Ipip => "/interface ipip",
            TunnelKind::Eoip => "/interface eoip",
            TunnelKind::Gre => "/interface gre",
            TunnelKind::Vxlan => "/interface vxlan",
        }
    }

    pub fn default_mtu(self) -> u16 {
        match self {
            TunnelKind::Ipip => 1480,
            TunnelKind::Eoip => 1458,
            TunnelKind::Gre => 1476,
            TunnelKind::Vxlan => 1450,
        }
    }
}

/// Fields shared by IPIP, EoIP and GRE tunnels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointToPointTunnel {
    pub name: String,
    pub local_address: Option<String>,
    pub remote_address: String,
    /// Address assigned to the tunnel interface, CIDR form.
    pub address: Option<String>,
    pub ipsec_secret: Option<String>,
    pub mtu: Option<u16>,
    pub keepalive: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EoipTunnel {
    #[serde(flatten)]
    pub link: PointToPointTunnel,
    pub tunnel_id: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VxlanTunnel {
    pub name: String,
    pub local_address: Option<String>,
    pub remote_address: String,
    pub address: Option<String>,
    pub vni: u32,
    pub port: Option<u16>,
    pub mtu: Option<u16>,
}

/// A site-to-site tunnel, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Tunnel {
    Ipip(PointToPointTunnel),
    Eoip(EoipTunnel),
    Gre(PointToPointTunnel),
    Vxlan(VxlanTunnel),
}

impl Tunnel {
    pub fn kind(&self) -> TunnelKind {
        match self {
            Tunnel::Ipip(_) => TunnelKind::Ipip,
            Tunnel::Eoip(_) => TunnelKind::Eoip,
            Tunnel::Gre(_) => TunnelKind::Gre,
            Tunnel::Vxlan(_) => TunnelKind::Vxlan,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Tunnel::Ipip(t) | Tunnel::Gre(t) => &t.name,
            Tunnel::Eoip(t) => &t.link.name,
            Tunnel::Vxlan(t) => &t.name,
        }
    }

    pub fn remote_address(&self) -> &str {
        match self {
            Tunnel::Ipip(t) | Tunnel::Gre(t) => &t.remote_address,
            Tunnel::Eoip(t) => &t.link.remote_address,
            Tunnel::Vxlan(t) => &t.remote_address,
        }
    }
}
