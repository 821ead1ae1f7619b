use std::net::Ipv4Addr;

use ipnet::Ipv4Net;

/// Gateway and pool layout derived from an IPv4 subnet.
///
/// The first host is the router's gateway address and the pool runs from
/// the second host to the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubnetPlan {
    pub net: Ipv4Net,
    pub gateway: Ipv4Addr,
    pub pool_start: Ipv4Addr,
    pub pool_end: Ipv4Addr,
}

impl SubnetPlan {
    /// Parse `a.b.c.d/len`; host bits are cleared. Subnets with fewer than
    /// two usable hosts have no room for a pool and yield `None`.
    pub fn parse(subnet: &str) -> Option<Self> {
        let net = subnet.trim().parse::<Ipv4Net>().ok()?.trunc();
        let mut hosts = net.hosts();
        let gateway = hosts.next()?;
        let pool_start = hosts.next()?;
        let pool_end = hosts.last().unwrap_or(pool_start);
        Some(Self {
            net,
            gateway,
            pool_start,
            pool_end,
        })
    }

    /// Gateway address with prefix, as assigned to the interface.
    pub fn gateway_cidr(&self) -> String {
        format!("{}/{}", self.gateway, self.net.prefix_len())
    }

    /// Pool range in RouterOS `start-end` form.
    pub fn pool_range(&self) -> String {
        format!("{}-{}", self.pool_start, self.pool_end)
    }

    pub fn network(&self) -> Ipv4Addr {
        self.net.network()
    }
}

/// Allocate `count` client addresses from the subnet of `interface_cidr`,
/// skipping the interface's own address.
pub fn client_addresses(interface_cidr: &str, count: usize) -> Option<Vec<Ipv4Addr>> {
    let iface = interface_cidr.trim().parse::<Ipv4Net>().ok()?;
    let own = iface.addr();
    let addresses: Vec<Ipv4Addr> = iface
        .trunc()
        .hosts()
        .filter(|host| *host != own)
        .take(count)
        .collect();
    (addresses.len() == count).then_some(addresses)
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::{client_addresses, SubnetPlan};

    #[test]
    fn plans_a_slash_24() {
        let plan = SubnetPlan::parse("192.168.10.0/24").expect("plan");
        assert_eq!(plan.gateway_cidr(), "192.168.10.1/24");
        assert_eq!(plan.pool_range(), "192.168.10.2-192.168.10.254");
        assert_eq!(plan.network(), Ipv4Addr::new(192, 168, 10, 0));
    }

    #[test]
    fn clears_host_bits() {
        let plan = SubnetPlan::parse("10.1.2.77/16").expect("plan");
        assert_eq!(plan.network(), Ipv4Addr::new(10, 1, 0, 0));
        assert_eq!(plan.gateway_cidr(), "10.1.0.1/16");
    }

    #[test]
    fn rejects_garbage_and_tiny_subnets() {
        assert!(SubnetPlan::parse("not-a-subnet").is_none());
        assert!(SubnetPlan::parse("10.0.0.1/32").is_none());
    }

    #[test]
    fn client_addresses_skip_interface_address() {
        let addrs = client_addresses("192.168.170.1/24", 2).expect("addresses");
        assert_eq!(
            addrs,
            [Ipv4Addr::new(192, 168, 170, 2), Ipv4Addr::new(192, 168, 170, 3)]
        );
        assert!(client_addresses("192.168.170.1/30", 3).is_none());
    }
}
