//! Yggdrasil address representation and derivation.

use std::fmt;
use std::net::Ipv6Addr;

use super::keypair::{PublicKey, PUBLIC_KEY_LEN};

/// Length of a node address.
pub const ADDRESS_LEN: usize = 16;

/// First byte of every node address (`200::/7` range).
pub const ADDRESS_PREFIX: u8 = 0x02;

/// A node address (16 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Creates an address from raw bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the address as raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn to_ipv6(&self) -> Ipv6Addr {
        Ipv6Addr::from(self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_ipv6())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ipv6())
    }
}

/// Derives the node address for a public key.
///
/// Process:
/// 1. Invert every bit of the key
/// 2. Count the leading ones (wrapping at 256) and skip the first zero bit
/// 3. Pack the remaining bits into bytes
/// 4. Emit `prefix || ones || packed`, truncated to 16 bytes
pub fn addr_for_key(public_key: &PublicKey) -> Address {
    let mut bytes = [0u8; ADDRESS_LEN];
    bytes[0] = ADDRESS_PREFIX;

    let mut ones: u8 = 0;
    let mut counting = true;
    let mut acc: u8 = 0;
    let mut acc_bits = 0;
    let mut out = 2;

    for idx in 0..PUBLIC_KEY_LEN * 8 {
        let bit = (!public_key[idx / 8] >> (7 - idx % 8)) & 1;
        if counting {
            if bit == 1 {
                ones = ones.wrapping_add(1);
            } else {
                counting = false;
            }
            continue;
        }

        acc = (acc << 1) | bit;
        acc_bits += 1;
        if acc_bits == 8 {
            bytes[out] = acc;
            out += 1;
            acc_bits = 0;
            if out == ADDRESS_LEN {
                break;
            }
        }
    }

    bytes[1] = ones;
    Address(bytes)
}

/// Maps a public key to a node address.
///
/// Implementations must be pure: the same key always yields the same address.
pub trait AddressDeriver {
    fn derive(&self, public_key: &PublicKey) -> Address;
}

/// The network's own addressing scheme, see [`addr_for_key`].
#[derive(Debug, Default, Clone, Copy)]
pub struct YggdrasilDeriver;

impl AddressDeriver for YggdrasilDeriver {
    #[inline]
    fn derive(&self, public_key: &PublicKey) -> Address {
        addr_for_key(public_key)
    }
}

impl<F> AddressDeriver for F
where
    F: Fn(&PublicKey) -> Address,
{
    #[inline]
    fn derive(&self, public_key: &PublicKey) -> Address {
        self(public_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_with_head(head: &[u8], fill: u8) -> PublicKey {
        let mut key = [fill; PUBLIC_KEY_LEN];
        key[..head.len()].copy_from_slice(head);
        key
    }

    #[test]
    fn test_no_leading_ones() {
        let addr = addr_for_key(&[0xff; PUBLIC_KEY_LEN]);
        assert_eq!(addr.to_string(), "200::");
    }

    #[test]
    fn test_leading_ones_counted() {
        // Inverted: ff 00 ..., eight ones then the terminating zero
        let addr = addr_for_key(&key_with_head(&[0x00], 0xff));
        assert_eq!(addr.as_bytes()[1], 8);
        assert_eq!(addr.to_string(), "208::");
    }

    #[test]
    fn test_bits_after_first_zero_are_packed() {
        // Inverted: 80 ff 00 ...; one leading one, then 000000 11111111 000...
        let addr = addr_for_key(&key_with_head(&[0x7f, 0x00], 0xff));
        assert_eq!(&addr.as_bytes()[..4], &[0x02, 0x01, 0x03, 0xfc]);
        assert_eq!(addr.to_string(), "201:3fc::");
    }

    #[test]
    fn test_all_ones_wraps_count() {
        let addr = addr_for_key(&[0x00; PUBLIC_KEY_LEN]);
        assert_eq!(addr.as_bytes(), &[0x02, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_deterministic() {
        let key = key_with_head(&[0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef], 0x5a);
        assert_eq!(YggdrasilDeriver.derive(&key), addr_for_key(&key));
        assert_eq!(addr_for_key(&key), addr_for_key(&key));
    }

    #[test]
    fn test_closure_deriver() {
        let stub = |_: &PublicKey| Address::from_bytes([0xfd; ADDRESS_LEN]);
        assert_eq!(stub.derive(&[0; PUBLIC_KEY_LEN]).as_bytes(), &[0xfd; ADDRESS_LEN]);
    }
}
