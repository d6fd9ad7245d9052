//! Core Domain Entities for the IP Tracker
//!
//! `ClaimedIpPort` is the unit the tracker stores: a signed claim that a
//! node is reachable at an address as of a timestamp.

use sha2::{Digest, Sha256};
use std::fmt;
use std::hash::Hash;

/// 256-bit node identifier derived from public key hash.
///
/// # Security
///
/// This type implements constant-time comparison. Standard `PartialEq` for
/// byte arrays short-circuits on first difference, which leaks NodeIds via
/// timing measurements.
// SAFETY: derived_hash_with_manual_eq is intentionally allowed here.
// The manual PartialEq provides constant-time comparison for security,
// but Hash using the underlying bytes is semantically correct since
// equal NodeIds (same bytes) will have the same hash.
#[allow(clippy::derived_hash_with_manual_eq)]
#[derive(Debug, Clone, Copy, Hash)]
pub struct NodeId(pub [u8; 32]);

impl PartialEq for NodeId {
    /// Constant-time comparison to prevent timing attacks.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        let mut result = 0u8;
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            result |= a ^ b;
        }
        result == 0
    }
}

impl Eq for NodeId {}

impl NodeId {
    /// Create a NodeId from raw 32-byte array.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Create a zero-initialized NodeId.
    pub fn zero() -> Self {
        Self([0u8; 32])
    }
}

impl AsRef<[u8]> for NodeId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First 8 bytes are enough to tell peers apart in logs
        for byte in &self.0[..8] {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Socket address (IP + Port) - abstraction over std::net::SocketAddr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SocketAddr {
    /// IP address (v4 or v6).
    pub ip: IpAddr,
    /// Port number.
    pub port: u16,
}

impl SocketAddr {
    /// Create a new socket address from IP and port.
    pub fn new(ip: IpAddr, port: u16) -> Self {
        Self { ip, port }
    }
}

impl From<std::net::SocketAddr> for SocketAddr {
    fn from(addr: std::net::SocketAddr) -> Self {
        let ip = match addr.ip() {
            std::net::IpAddr::V4(v4) => IpAddr::V4(v4.octets()),
            std::net::IpAddr::V6(v6) => IpAddr::V6(v6.octets()),
        };
        Self::new(ip, addr.port())
    }
}

impl fmt::Display for SocketAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ip {
            IpAddr::V4(o) => write!(f, "{}.{}.{}.{}:{}", o[0], o[1], o[2], o[3], self.port),
            IpAddr::V6(bytes) => write!(f, "[{}]:{}", std::net::Ipv6Addr::from(bytes), self.port),
        }
    }
}

/// IP address enum supporting both IPv4 and IPv6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpAddr {
    /// IPv4 address (4 bytes).
    V4([u8; 4]),
    /// IPv6 address (16 bytes).
    V6([u8; 16]),
}

impl IpAddr {
    /// Create an IPv4 address
    pub fn v4(a: u8, b: u8, c: u8, d: u8) -> Self {
        IpAddr::V4([a, b, c, d])
    }

    /// Create an IPv6 address from bytes
    pub fn v6(bytes: [u8; 16]) -> Self {
        IpAddr::V6(bytes)
    }
}

/// Claim timestamp in seconds
///
/// Compared as a raw logical clock; any two distinct values stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a new timestamp.
    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the underlying seconds value.
    pub fn as_secs(&self) -> u64 {
        self.0
    }
}

/// Fixed-size digest identifying a claim in gossip bloom filters
pub type GossipId = [u8; 32];

/// A signed, timestamped claim that `node_id` is reachable at `addr`.
///
/// Immutable after construction; a node changing its address produces a new
/// claim with a later timestamp. The signature is carried opaquely: whoever
/// hands a claim to the tracker has already decided whether to trust it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimedIpPort {
    node_id: NodeId,
    addr: SocketAddr,
    timestamp: Timestamp,
    signature: Vec<u8>,
    gossip_id: GossipId,
}

impl ClaimedIpPort {
    /// Create a claim and derive its gossip id.
    pub fn new(node_id: NodeId, addr: SocketAddr, timestamp: Timestamp, signature: Vec<u8>) -> Self {
        let gossip_id = compute_gossip_id(&node_id, timestamp);
        Self {
            node_id,
            addr,
            timestamp,
            signature,
            gossip_id,
        }
    }

    /// Node making the claim
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// Claimed address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Time the claim was signed
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Signature over the claim, as received
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// `SHA-256(node_id || timestamp_be)`
    ///
    /// Two claims by the same node at the same time share a gossip id even if
    /// their addresses differ: a node only gets one address per timestamp.
    pub fn gossip_id(&self) -> &GossipId {
        &self.gossip_id
    }
}

fn compute_gossip_id(node_id: &NodeId, timestamp: Timestamp) -> GossipId {
    let mut hasher = Sha256::new();
    hasher.update(node_id.as_bytes());
    hasher.update(timestamp.as_secs().to_be_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(id: u8, port: u16, ts: u64) -> ClaimedIpPort {
        ClaimedIpPort::new(
            NodeId::new([id; 32]),
            SocketAddr::new(IpAddr::v4(10, 0, 0, id), port),
            Timestamp::new(ts),
            vec![0xAB; 64],
        )
    }

    #[test]
    fn test_node_id_equality() {
        let id1 = NodeId::new([1u8; 32]);
        let id2 = NodeId::new([1u8; 32]);
        let id3 = NodeId::new([2u8; 32]);

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_gossip_id_is_not_node_id() {
        let ip = claim(1, 9651, 100);
        assert_ne!(ip.gossip_id(), ip.node_id().as_bytes());
    }

    #[test]
    fn test_gossip_id_tracks_node_and_timestamp() {
        let a = claim(1, 9651, 100);
        let same_time_other_port = claim(1, 9652, 100);
        let later = claim(1, 9651, 101);
        let other_node = claim(2, 9651, 100);

        assert_eq!(a.gossip_id(), same_time_other_port.gossip_id());
        assert_ne!(a.gossip_id(), later.gossip_id());
        assert_ne!(a.gossip_id(), other_node.gossip_id());
    }

    #[test]
    fn test_timestamp_keeps_full_range() {
        assert_eq!(Timestamp::new(u64::MAX).as_secs(), u64::MAX);
        assert!(Timestamp::new(u64::MAX) > Timestamp::new(u64::MAX - 1));
        assert!(Timestamp::new(1) < Timestamp::new(2));
    }

    #[test]
    fn test_far_future_claims_have_distinct_gossip_ids() {
        assert_ne!(claim(1, 9651, u64::MAX).gossip_id(), claim(1, 9651, u64::MAX - 1).gossip_id());
    }

    #[test]
    fn test_socket_addr_from_std() {
        let std_addr: std::net::SocketAddr = "192.168.1.100:9651".parse().unwrap();
        let addr = SocketAddr::from(std_addr);
        assert_eq!(addr, SocketAddr::new(IpAddr::v4(192, 168, 1, 100), 9651));
        assert_eq!(addr.to_string(), "192.168.1.100:9651");
    }

    #[test]
    fn test_node_id_display_is_short_hex() {
        let id = NodeId::new([0xAB; 32]);
        assert_eq!(id.to_string(), "abababababababab");
    }
}
