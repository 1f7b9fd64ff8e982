use crate::af::AddressFamily;

//------------ Node -----------------------------------------------------------

/// A node in a binary radix (Patricia) trie.
///
/// Every node owns its own children outright; there are no back-pointers
/// and no shared ownership, so the tree is torn down by ordinary recursive
/// drop (see spec.md §9, "Cyclic references / deep ownership").
pub struct Node<AF: AddressFamily> {
    /// The length of the prefix this node represents; the node sits at
    /// depth `bit_length` in its tree.
    pub bit_length: u8,
    /// The flag word set by the most recent `add` that targeted this
    /// node exactly. Zero at creation.
    pub flags: u32,
    /// True iff this node corresponds to a prefix explicitly inserted by a
    /// caller (including a split branch promoted to terminal when its
    /// depth equals an inserted length).
    pub terminal: bool,
    /// The address exactly as supplied to the `add` call that created this
    /// node. Bits beyond `bit_length` are not cleared: a caller that
    /// inserts a prefix with nonzero host bits gets them back unchanged
    /// from `get_net` (see DESIGN.md — spec.md §3 describes this field as
    /// masked, but the original implementation's own fixture,
    /// `testIpV6`, asserts a network string that keeps a host bit set,
    /// so the fixture wins). Only the top `bit_length` bits are
    /// meaningful for matching; see [`AddressFamily::truncate_to_len`] at
    /// comparison sites.
    pub network: AF,
    pub left: Option<Box<Node<AF>>>,
    pub right: Option<Box<Node<AF>>>,
}

impl<AF: AddressFamily> Node<AF> {
    /// The root sentinel: the empty prefix, matching every address of its
    /// family, not itself terminal until `add(_, AF::BITS, _)` is called.
    pub fn root() -> Self {
        Node {
            bit_length: 0,
            flags: 0,
            terminal: false,
            network: AF::zero(),
            left: None,
            right: None,
        }
    }

    fn new_terminal(addr: AF, bit_length: u8, flags: u32) -> Self {
        Node {
            bit_length,
            flags,
            terminal: true,
            network: addr,
            left: None,
            right: None,
        }
    }

    fn child_mut(&mut self, go_right: bool) -> &mut Option<Box<Node<AF>>> {
        if go_right {
            &mut self.right
        } else {
            &mut self.left
        }
    }

    /// Insert `addr/len` (host bits already resolved into `len`) below this
    /// node, with the given flags. `self.bit_length` must be strictly less
    /// than `len` — the root-insertion edge case (`len == 0`) is handled by
    /// the caller in [`crate::tree::Tree::add`].
    ///
    /// Implements spec.md §4.1 cases (a)-(d).
    pub(crate) fn insert(&mut self, addr: AF, len: u8, flags: u32) {
        debug_assert!(self.bit_length < len);
        let go_right = addr.bit_at(self.bit_length);
        let slot = self.child_mut(go_right);

        let Some(child) = slot else {
            // (a)/(b): empty slot. The new node is attached directly at
            // depth `len`; no chain of implicit interior nodes is
            // materialised for the bits in between.
            log::trace!(
                "attaching new terminal node at depth {len} (empty slot)"
            );
            *slot = Some(Box::new(Node::new_terminal(addr, len, flags)));
            return;
        };

        let raw_diff = child.network.first_diff_bit(addr);
        let d = raw_diff.min(child.bit_length).min(len);

        if d == child.bit_length {
            if len > child.bit_length {
                // (c): prefixes agree over the child's whole range and the
                // new prefix reaches deeper — keep descending.
                child.insert(addr, len, flags);
            } else {
                // (c), arrival: `len == child.bit_length` and the networks
                // match exactly. Re-insertion replaces the flag word
                // (last write wins) rather than OR-ing it in — see
                // DESIGN.md for why this reading wins over the "OR the
                // new flags in" prose elsewhere in spec.md §4.1/§8: the
                // worked scenario (spec.md §8, five-flag-word fixture)
                // only computes out to the documented totals under
                // replace semantics.
                log::trace!(
                    "exact match at depth {len}, setting flags {flags:#x}"
                );
                child.terminal = true;
                child.flags = flags;
            }
            return;
        }

        // (d): split. `d` is strictly less than `child.bit_length`, and at
        // most `len`.
        log::trace!("splitting existing edge at depth {d}");
        let old_child = slot.take().expect("checked Some above");
        // A purely structural branch's network is the canonical `A &
        // mask(d)` spec.md §4.1(d) calls for — it isn't itself an
        // inserted prefix, so there's no host-bit-preservation policy to
        // honor here (unlike a terminal node, see `new_terminal`).
        let mut branch = Node {
            bit_length: d,
            flags: 0,
            terminal: false,
            network: addr.truncate_to_len(d),
            left: None,
            right: None,
        };
        let old_child_goes_right = old_child.network.bit_at(d);

        if d == len {
            // The new prefix *is* the split point: the branch node itself
            // becomes the terminal for the inserted prefix (spec.md §9),
            // so it takes on the same unmasked-network policy as any
            // other terminal node.
            branch.terminal = true;
            branch.flags = flags;
            branch.network = addr;
            *branch.child_mut(old_child_goes_right) = Some(old_child);
        } else {
            let new_node =
                Box::new(Node::new_terminal(addr, len, flags));
            *branch.child_mut(old_child_goes_right) = Some(old_child);
            *branch.child_mut(!old_child_goes_right) = Some(new_node);
        }

        *slot = Some(Box::new(branch));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(a: u32) -> u32 {
        a
    }

    #[test]
    fn empty_slot_insert_direct_attach() {
        let mut root: Node<u32> = Node::root();
        root.insert(net(0x5500_0000), 24, 0); // 85.0.0.0/24
        let child = root.left.as_ref().unwrap();
        assert_eq!(child.bit_length, 24);
        assert!(child.terminal);
        assert_eq!(child.network, 0x5500_0000);
    }

    #[test]
    fn split_creates_terminal_branch_when_d_equals_len() {
        let mut root: Node<u32> = Node::root();
        root.insert(0x5500_0000, 24, 0); // 85.0.0.0/24
        root.insert(0x5500_0000, 16, 1); // 85.0.0.0/16, less specific
        let child = root.left.as_ref().unwrap();
        assert_eq!(child.bit_length, 16);
        assert!(child.terminal);
        assert_eq!(child.flags, 1);
        let grandchild = child.left.as_ref().unwrap();
        assert_eq!(grandchild.bit_length, 24);
        assert!(grandchild.terminal);
    }

    #[test]
    fn split_creates_two_siblings_when_d_less_than_len() {
        let mut root: Node<u32> = Node::root();
        root.insert(0x5500_0000, 24, 0); // 85.0.0.0/24
        root.insert(0x5500_0100, 24, 1); // 85.0.1.0/24 — diverges at bit 23
        let branch = root.left.as_ref().unwrap();
        assert_eq!(branch.bit_length, 23);
        assert!(!branch.terminal);
        assert!(branch.left.is_some());
        assert!(branch.right.is_some());
    }

    #[test]
    fn split_branch_network_is_masked_to_its_own_depth() {
        // testNotSoEasy4's first two inserts: the /23 branch must read
        // back as 85.0.0.0/23, not 85.0.1.0/23 (the address that
        // happened to trigger the split).
        let mut root: Node<u32> = Node::root();
        root.insert(0x5500_0000, 24, 0); // 85.0.0.0/24
        root.insert(0x5500_0100, 24, 1); // 85.0.1.0/24 — diverges at bit 23
        let branch = root.left.as_ref().unwrap();
        assert_eq!(branch.bit_length, 23);
        assert_eq!(branch.network, 0x5500_0000);
    }
}
