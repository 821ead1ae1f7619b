//! RouterOS menu paths used as section keys.

pub const COMMENTS: &str = "";
pub const SUMMARY: &str = "# Summary";

pub const INTERFACE_BRIDGE: &str = "/interface bridge";
pub const INTERFACE_LIST: &str = "/interface list";
pub const INTERFACE_LIST_MEMBER: &str = "/interface list member";
pub const INTERFACE_WIREGUARD: &str = "/interface wireguard";
pub const INTERFACE_WIREGUARD_PEERS: &str = "/interface wireguard peers";
pub const INTERFACE_VXLAN_VTEPS: &str = "/interface vxlan vteps";
pub const PPTP_SERVER: &str = "/interface pptp-server server";
pub const L2TP_SERVER: &str = "/interface l2tp-server server";
pub const SSTP_SERVER: &str = "/interface sstp-server server";
pub const OVPN_SERVER: &str = "/interface ovpn-server server";

pub const IP_ADDRESS: &str = "/ip address";
pub const IP_POOL: &str = "/ip pool";
pub const IP_ROUTE: &str = "/ip route";
pub const IP_CLOUD: &str = "/ip cloud";
pub const DHCP_SERVER: &str = "/ip dhcp-server";
pub const DHCP_SERVER_NETWORK: &str = "/ip dhcp-server network";
pub const FIREWALL_FILTER: &str = "/ip firewall filter";
pub const FIREWALL_MANGLE: &str = "/ip firewall mangle";
pub const FIREWALL_ADDRESS_LIST: &str = "/ip firewall address-list";

pub const IPSEC_PROFILE: &str = "/ip ipsec profile";
pub const IPSEC_PROPOSAL: &str = "/ip ipsec proposal";
pub const IPSEC_MODE_CONFIG: &str = "/ip ipsec mode-config";
pub const IPSEC_POLICY_GROUP: &str = "/ip ipsec policy group";
pub const IPSEC_POLICY: &str = "/ip ipsec policy";
pub const IPSEC_PEER: &str = "/ip ipsec peer";
pub const IPSEC_IDENTITY: &str = "/ip ipsec identity";

pub const PPP_PROFILE: &str = "/ppp profile";
pub const PPP_SECRET: &str = "/ppp secret";
pub const ROUTING_TABLE: &str = "/routing table";
pub const CERTIFICATE: &str = "/certificate";
pub const SYSTEM_SCRIPT: &str = "/system script";
pub const SYSTEM_SCHEDULER: &str = "/system scheduler";

/// Interface list every WAN uplink belongs to.
pub const WAN_LIST: &str = "WAN";
/// Interface list of LAN bridges.
pub const LAN_LIST: &str = "LAN";
/// Interface list of static VPN server interfaces.
pub const VPN_IN_LIST: &str = "VPN-IN";
/// Address list of VPN server client subnets.
pub const VPN_SERVER_ADDRESS_LIST: &str = "VPN-SERVER";
/// Address list of every locally attached subnet.
pub const LOCAL_ADDRESS_LIST: &str = "LOCAL-IP";
/// Address list of destinations routed through the domestic uplink.
pub const DOMESTIC_ADDRESS_LIST: &str = "DOMAddList";

/// Map a section key to a coarse group for reporting.
pub fn section_group(key: &str) -> &'static str {
    if key.is_empty() || key.starts_with('#') {
        return "comments";
    }
    let path = key.trim_start_matches('/');
    match path.split_whitespace().next() {
        Some("interface") => "interfaces",
        Some("ip") if path.starts_with("ip firewall") => "firewall",
        Some("ip") if path.starts_with("ip ipsec") => "ipsec",
        Some("ip") => "ip",
        Some("ppp") => "ppp",
        Some("routing") => "routing",
        Some("certificate") => "certificates",
        Some("system") => "system",
        _ => "other",
    }
}
