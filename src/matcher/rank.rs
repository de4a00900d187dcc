//! Ranking rules deciding which key is "better".

use crate::crypto::{addr_for_key, Keypair, PublicKey, TreeId, PUBLIC_KEY_LEN, TREE_ID_LEN};

/// Returns true if `candidate` is strictly lower than `incumbent`, comparing bytes
/// from index 0 and stopping at the first difference. Equal inputs are not better.
#[inline]
pub fn is_better(incumbent: &[u8], candidate: &[u8]) -> bool {
    debug_assert_eq!(incumbent.len(), candidate.len());
    for (new, old) in candidate.iter().zip(incumbent) {
        if new < old {
            return true;
        }
        if new > old {
            return false;
        }
    }
    false
}

/// A total order over keypairs, expressed through a per-keypair comparison key.
pub trait Ranker: Clone + Send + 'static {
    /// The value keys are compared by.
    type Key: Clone + Send + 'static;

    /// Label used when reporting [`Ranker::render`] output.
    const LABEL: &'static str;

    /// Extracts the comparison key from a keypair.
    fn key(&self, keypair: &Keypair) -> Self::Key;

    /// The worst possible key. No real key is worse.
    fn worst(&self) -> Self::Key;

    /// Returns true if `candidate` strictly improves on `incumbent`.
    fn is_better(&self, incumbent: &Self::Key, candidate: &Self::Key) -> bool;

    /// Human-readable form of what this ranker optimizes.
    fn render(&self, keypair: &Keypair) -> String;
}

/// Lower public keys are better: they invert to more leading ones, which the
/// address format compresses, leaving more key bits in the address.
#[derive(Debug, Default, Clone, Copy)]
pub struct PublicKeyRanker;

impl Ranker for PublicKeyRanker {
    type Key = PublicKey;

    const LABEL: &'static str = "IP";

    #[inline]
    fn key(&self, keypair: &Keypair) -> PublicKey {
        *keypair.public_key()
    }

    fn worst(&self) -> PublicKey {
        [0xff; PUBLIC_KEY_LEN]
    }

    #[inline]
    fn is_better(&self, incumbent: &PublicKey, candidate: &PublicKey) -> bool {
        is_better(incumbent, candidate)
    }

    fn render(&self, keypair: &Keypair) -> String {
        addr_for_key(keypair.public_key()).to_string()
    }
}

/// Higher tree identifiers are better; the highest one in the network is the root.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeIdRanker;

impl Ranker for TreeIdRanker {
    type Key = TreeId;

    const LABEL: &'static str = "TreeID";

    #[inline]
    fn key(&self, keypair: &Keypair) -> TreeId {
        TreeId::for_key(keypair.public_key())
    }

    fn worst(&self) -> TreeId {
        TreeId::from_bytes([0x00; TREE_ID_LEN])
    }

    #[inline]
    fn is_better(&self, incumbent: &TreeId, candidate: &TreeId) -> bool {
        // Reversed arguments turn "strictly lower" into "strictly higher"
        is_better(candidate.as_bytes(), incumbent.as_bytes())
    }

    fn render(&self, keypair: &Keypair) -> String {
        self.key(keypair).to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn key_with_head(head: &[u8], fill: u8) -> PublicKey {
        let mut key = [fill; PUBLIC_KEY_LEN];
        key[..head.len()].copy_from_slice(head);
        key
    }

    #[test]
    fn test_irreflexive() {
        let key = key_with_head(&[0x12, 0x34], 0x56);
        assert!(!is_better(&key, &key));
    }

    #[rstest]
    #[case(&[0x00, 0x01], &[0x00, 0x02])]
    #[case(&[0x00], &[0x01])]
    #[case(&[0x7f, 0xff, 0xff], &[0x80, 0x00, 0x00])]
    fn test_asymmetric(#[case] lower: &[u8], #[case] higher: &[u8]) {
        let lower = key_with_head(lower, 0x00);
        let higher = key_with_head(higher, 0x00);
        assert!(is_better(&higher, &lower));
        assert!(!is_better(&lower, &higher));
    }

    #[test]
    fn test_first_difference_decides() {
        // Tails disagree with the head; only index 1 matters
        let a = key_with_head(&[0x00, 0x01], 0xff);
        let b = key_with_head(&[0x00, 0x02], 0x00);
        assert!(is_better(&b, &a));
        assert!(!is_better(&a, &b));
    }

    #[test]
    fn test_public_key_ranker_worst() {
        let ranker = PublicKeyRanker;
        let worst = ranker.worst();
        assert!(!ranker.is_better(&worst, &worst));
        assert!(ranker.is_better(&worst, &key_with_head(&[0xff, 0xfe], 0xff)));
    }

    #[test]
    fn test_tree_id_ranker_prefers_higher() {
        let ranker = TreeIdRanker;
        let low = TreeId::from_bytes([0x10; TREE_ID_LEN]);
        let high = TreeId::from_bytes([0x20; TREE_ID_LEN]);
        assert!(ranker.is_better(&low, &high));
        assert!(!ranker.is_better(&high, &low));
        assert!(!ranker.is_better(&high, &high));
        assert!(ranker.is_better(&ranker.worst(), &low));
    }

    #[test]
    fn test_render() {
        let keypair = Keypair::from_parts([0; 64], [0xff; PUBLIC_KEY_LEN]);
        assert_eq!(PublicKeyRanker.render(&keypair), "200::");
        assert_eq!(TreeIdRanker.render(&keypair).len(), TREE_ID_LEN * 2);
    }
}
