use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// VPN protocols a credential can be enabled for.
///
/// Declaration order is the order wrappers process protocols in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VpnType {
    Wireguard,
    #[serde(rename = "OpenVPN")]
    OpenVpn,
    #[serde(rename = "PPTP")]
    Pptp,
    #[serde(rename = "L2TP")]
    L2tp,
    #[serde(rename = "SSTP")]
    Sstp,
    #[serde(rename = "IKeV2", alias = "IKEv2")]
    Ikev2,
}

impl VpnType {
    pub const ALL: [VpnType; 6] = [
        VpnType::Wireguard,
        VpnType::OpenVpn,
        VpnType::Pptp,
        VpnType::L2tp,
        VpnType::Sstp,
        VpnType::Ikev2,
    ];

    /// Human-facing protocol name used in comments.
    pub fn display_name(self) -> &'static str {
        match self {
            VpnType::Wireguard => "WireGuard",
            VpnType::OpenVpn => "OpenVPN",
            VpnType::Pptp => "PPTP",
            VpnType::L2tp => "L2TP",
            VpnType::Sstp => "SSTP",
            VpnType::Ikev2 => "IKEv2",
        }
    }

    /// Client subnet reserved for the protocol's server side.
    pub fn server_subnet(self) -> &'static str {
        match self {
            VpnType::Wireguard => "192.168.170.0/24",
            VpnType::OpenVpn => "192.168.60.0/24",
            VpnType::Pptp => "192.168.70.0/24",
            VpnType::L2tp => "192.168.80.0/24",
            VpnType::Sstp => "192.168.90.0/24",
            VpnType::Ikev2 => "192.168.77.0/24",
        }
    }

    /// `/ppp secret` service tag for PPP-based protocols.
    pub fn ppp_service(self) -> Option<&'static str> {
        match self {
            VpnType::OpenVpn => Some("ovpn"),
            VpnType::Pptp => Some("pptp"),
            VpnType::L2tp => Some("l2tp"),
            VpnType::Sstp => Some("sstp"),
            VpnType::Wireguard | VpnType::Ikev2 => None,
        }
    }

    /// Protocols that need a server certificate.
    pub fn requires_certificate(self) -> bool {
        matches!(self, VpnType::OpenVpn | VpnType::Sstp | VpnType::Ikev2)
    }
}

impl Display for VpnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A VPN user and the protocols it may connect with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(alias = "Username")]
    pub username: String,
    #[serde(alias = "Password")]
    pub password: String,
    #[serde(alias = "VPNType", default)]
    pub vpn_types: BTreeSet<VpnType>,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        vpn_types: impl IntoIterator<Item = VpnType>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            vpn_types: vpn_types.into_iter().collect(),
        }
    }

    /// True when the credential is enabled for `vpn_type`.
    pub fn allows(&self, vpn_type: VpnType) -> bool {
        self.vpn_types.contains(&vpn_type)
    }
}

/// Credentials usable with `vpn_type`, in input order.
pub fn users_for(users: &[Credentials], vpn_type: VpnType) -> Vec<&Credentials> {
    users.iter().filter(|u| u.allows(vpn_type)).collect()
}
