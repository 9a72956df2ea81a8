//! Network front-ends (`-nic`) and host backends (`-netdev`).
//!
//! Every backend struct renders `-netdev KIND[,key=value...]` with keys in
//! declaration order; unset keys are skipped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownVariant;

use super::args::{Fragments, ToArgs};

/// Host backend attached to an on-board NIC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NicType {
    #[default]
    Tap,
    Bridge,
    Passt,
    User,
    L2tpv3,
    Vde,
    AfXdp,
    VhostUser,
    Socket,
    None,
}

const NIC_TYPES: [(NicType, &str); 10] = [
    (NicType::Tap, "tap"),
    (NicType::Bridge, "bridge"),
    (NicType::Passt, "passt"),
    (NicType::User, "user"),
    (NicType::L2tpv3, "l2tpv3"),
    (NicType::Vde, "vde"),
    (NicType::AfXdp, "af-xdp"),
    (NicType::VhostUser, "vhost-user"),
    (NicType::Socket, "socket"),
    (NicType::None, "none"),
];

impl NicType {
    pub fn as_str(self) -> &'static str {
        NIC_TYPES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, name)| *name)
            .unwrap_or("none")
    }
}

impl fmt::Display for NicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NicType {
    type Err = UnknownVariant;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let lower = input.trim().to_ascii_lowercase();
        NIC_TYPES
            .iter()
            .find(|(_, name)| *name == lower)
            .map(|(kind, _)| *kind)
            .ok_or_else(|| UnknownVariant {
                kind: "nic type",
                value: input.to_string(),
                expected: NIC_TYPES
                    .iter()
                    .map(|(_, name)| *name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl TryFrom<String> for NicType {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NicType> for String {
    fn from(kind: NicType) -> Self {
        kind.as_str().to_string()
    }
}

/// `-nic TYPE[,option][,mac=MAC]`.
///
/// `option` is an already-joined backend option list, passed through as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NicOptions {
    #[serde(rename = "type")]
    pub kind: NicType,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub option: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mac: String,
}

impl ToArgs for NicOptions {
    fn to_args(&self) -> Vec<String> {
        Fragments::head(self.kind.as_str())
            .raw(&self.option)
            .opt("mac", &self.mac)
            .finish("-nic")
    }
}

/// `-netdev user,...`: user-mode networking with built-in DHCP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetdevUserOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ipv4: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub net: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ipv6: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ipv6_net: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ipv6_host: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub restrict: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hostname: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dhcpstart: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dns: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ipv6_dns: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dnssearch: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub domainname: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tftp: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tftp_server_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bootfile: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hostfwd: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub guestfwd: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub smb: String,
}

impl ToArgs for NetdevUserOptions {
    fn to_args(&self) -> Vec<String> {
        Fragments::head("user")
            .opt("id", &self.id)
            .opt("ipv4", &self.ipv4)
            .opt("net", &self.net)
            .opt("host", &self.host)
            .opt("ipv6", &self.ipv6)
            .opt("ipv6-net", &self.ipv6_net)
            .opt("ipv6-host", &self.ipv6_host)
            .opt("restrict", &self.restrict)
            .opt("hostname", &self.hostname)
            .opt("dhcpstart", &self.dhcpstart)
            .opt("dns", &self.dns)
            .opt("ipv6-dns", &self.ipv6_dns)
            .opt("dnssearch", &self.dnssearch)
            .opt("domainname", &self.domainname)
            .opt("tftp", &self.tftp)
            .opt("tftp-server-name", &self.tftp_server_name)
            .opt("bootfile", &self.bootfile)
            .opt("hostfwd", &self.hostfwd)
            .opt("guestfwd", &self.guestfwd)
            .opt("smb", &self.smb)
            .finish("-netdev")
    }
}

/// `-netdev tap,...`: host TAP interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetdevTapOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fd: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fds: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ifname: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub script: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub downscript: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub br: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub helper: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sndbuf: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vnet_hdr: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vhost: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vhostfd: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vhostfds: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vhostforce: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub queues: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub poll_us: String,
}

impl ToArgs for NetdevTapOptions {
    fn to_args(&self) -> Vec<String> {
        Fragments::head("tap")
            .opt("id", &self.id)
            .opt("fd", &self.fd)
            .opt("fds", &self.fds)
            .opt("ifname", &self.ifname)
            .opt("script", &self.script)
            .opt("downscript", &self.downscript)
            .opt("br", &self.br)
            .opt("helper", &self.helper)
            .opt("sndbuf", &self.sndbuf)
            .opt("vnet_hdr", &self.vnet_hdr)
            .opt("vhost", &self.vhost)
            .opt("vhostfd", &self.vhostfd)
            .opt("vhostfds", &self.vhostfds)
            .opt("vhostforce", &self.vhostforce)
            .opt("queues", &self.queues)
            .opt("poll-us", &self.poll_us)
            .finish("-netdev")
    }
}

/// `-netdev passt,...`: unprivileged passt backend. See passt(1).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetdevPasstOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub quiet: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vhost_user: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mtu: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub netmask: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mac: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub gateway: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub interface: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub outbound: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub outbound_if4: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub outbound_if6: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dns: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fqdn: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dhcp_dns: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dhcp_search: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub map_host_loopback: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub map_guest_addr: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dns_forward: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dns_host: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tcp: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub udp: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icmp: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dhcp: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ndp: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dhcpv6: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ra: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub freebind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ipv4: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ipv6: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tcp_ports: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub udp_ports: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub param: String,
}

impl ToArgs for NetdevPasstOptions {
    fn to_args(&self) -> Vec<String> {
        Fragments::head("passt")
            .opt("id", &self.id)
            .opt("path", &self.path)
            .opt("quiet", &self.quiet)
            .opt("vhost-user", &self.vhost_user)
            .opt("mtu", &self.mtu)
            .opt("address", &self.address)
            .opt("netmask", &self.netmask)
            .opt("mac", &self.mac)
            .opt("gateway", &self.gateway)
            .opt("interface", &self.interface)
            .opt("outbound", &self.outbound)
            .opt("outbound-if4", &self.outbound_if4)
            .opt("outbound-if6", &self.outbound_if6)
            .opt("dns", &self.dns)
            .opt("search", &self.search)
            .opt("fqdn", &self.fqdn)
            .opt("dhcp-dns", &self.dhcp_dns)
            .opt("dhcp-search", &self.dhcp_search)
            .opt("map-host-loopback", &self.map_host_loopback)
            .opt("map-guest-addr", &self.map_guest_addr)
            .opt("dns-forward", &self.dns_forward)
            .opt("dns-host", &self.dns_host)
            .opt("tcp", &self.tcp)
            .opt("udp", &self.udp)
            .opt("icmp", &self.icmp)
            .opt("dhcp", &self.dhcp)
            .opt("ndp", &self.ndp)
            .opt("dhcpv6", &self.dhcpv6)
            .opt("ra", &self.ra)
            .opt("freebind", &self.freebind)
            .opt("ipv4", &self.ipv4)
            .opt("ipv6", &self.ipv6)
            .opt("tcp-ports", &self.tcp_ports)
            .opt("udp-ports", &self.udp_ports)
            .opt("param", &self.param)
            .finish("-netdev")
    }
}

/// `-netdev bridge,...`: TAP device attached to a host bridge via the helper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetdevBridgeOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub br: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub helper: String,
}

impl ToArgs for NetdevBridgeOptions {
    fn to_args(&self) -> Vec<String> {
        Fragments::head("bridge")
            .opt("id", &self.id)
            .opt("br", &self.br)
            .opt("helper", &self.helper)
            .finish("-netdev")
    }
}

/// `-netdev vhost-user,...`, backed by a chardev.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetdevVhostUserOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub chardev: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vhostforce: String,
}

impl ToArgs for NetdevVhostUserOptions {
    fn to_args(&self) -> Vec<String> {
        Fragments::head("vhost-user")
            .opt("id", &self.id)
            .opt("chardev", &self.chardev)
            .opt("vhostforce", &self.vhostforce)
            .finish("-netdev")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetdevVhostVdpaOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vhostdev: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vhostfd: String,
}

impl ToArgs for NetdevVhostVdpaOptions {
    fn to_args(&self) -> Vec<String> {
        Fragments::head("vhost-vdpa")
            .opt("id", &self.id)
            .opt("vhostdev", &self.vhostdev)
            .opt("vhostfd", &self.vhostfd)
            .finish("-netdev")
    }
}

/// `-netdev hubport,...`: port on the emulated hub `hubid`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetdevHubportOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hubid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub netdev: String,
}

impl ToArgs for NetdevHubportOptions {
    fn to_args(&self) -> Vec<String> {
        Fragments::head("hubport")
            .opt("id", &self.id)
            .opt("hubid", &self.hubid)
            .opt("netdev", &self.netdev)
            .finish("-netdev")
    }
}

/// `-netdev vde,...`: port on a VDE switch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetdevVdeOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sock: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub port: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub group: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mode: String,
}

impl ToArgs for NetdevVdeOptions {
    fn to_args(&self) -> Vec<String> {
        Fragments::head("vde")
            .opt("id", &self.id)
            .opt("sock", &self.sock)
            .opt("port", &self.port)
            .opt("group", &self.group)
            .opt("mode", &self.mode)
            .finish("-netdev")
    }
}

/// `-netdev af-xdp,...`: attach to an existing host interface with AF_XDP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetdevAfXdpOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ifname: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mode: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub force_copy: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub queues: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub start_queue: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub inhibit: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sock_fds: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub map_path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub map_start_index: String,
}

impl ToArgs for NetdevAfXdpOptions {
    fn to_args(&self) -> Vec<String> {
        Fragments::head("af-xdp")
            .opt("id", &self.id)
            .opt("ifname", &self.ifname)
            .opt("mode", &self.mode)
            .opt("force-copy", &self.force_copy)
            .opt("queues", &self.queues)
            .opt("start-queue", &self.start_queue)
            .opt("inhibit", &self.inhibit)
            .opt("sock-fds", &self.sock_fds)
            .opt("map-path", &self.map_path)
            .opt("map-start-index", &self.map_start_index)
            .finish("-netdev")
    }
}

/// `-netdev l2tpv3,...`: Ethernet over a static L2TPv3 pseudowire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetdevL2tpv3Options {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub src: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dst: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub srcport: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dstport: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rxsession: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub txsession: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ipv6: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub udp: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cookie64: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub counter: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pincounter: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub txcookie: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rxcookie: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub offset: String,
}

impl ToArgs for NetdevL2tpv3Options {
    fn to_args(&self) -> Vec<String> {
        Fragments::head("l2tpv3")
            .opt("id", &self.id)
            .opt("src", &self.src)
            .opt("dst", &self.dst)
            .opt("srcport", &self.srcport)
            .opt("dstport", &self.dstport)
            .opt("rxsession", &self.rxsession)
            .opt("txsession", &self.txsession)
            .opt("ipv6", &self.ipv6)
            .opt("udp", &self.udp)
            .opt("cookie64", &self.cookie64)
            .opt("counter", &self.counter)
            .opt("pincounter", &self.pincounter)
            .opt("txcookie", &self.txcookie)
            .opt("rxcookie", &self.rxcookie)
            .opt("offset", &self.offset)
            .finish("-netdev")
    }
}

/// `-netdev socket,...`: TCP listen/connect, multicast or UDP tunnel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetdevSocketOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fd: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub listen: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub connect: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mcast: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub udp: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub localaddr: String,
}

impl ToArgs for NetdevSocketOptions {
    fn to_args(&self) -> Vec<String> {
        Fragments::head("socket")
            .opt("id", &self.id)
            .opt("fd", &self.fd)
            .opt("listen", &self.listen)
            .opt("connect", &self.connect)
            .opt("mcast", &self.mcast)
            .opt("udp", &self.udp)
            .opt("localaddr", &self.localaddr)
            .finish("-netdev")
    }
}
