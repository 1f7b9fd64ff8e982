use crate::af::AddressFamily;
use crate::node::Node;

//------------ Tree ------------------------------------------------------------

/// One family's binary radix trie: a root sentinel plus the insertion,
/// longest-prefix-match, and dump operations that work on it (spec.md §3,
/// §4.1-§4.3).
pub struct Tree<AF: AddressFamily> {
    root: Node<AF>,
}

/// The outcome of a longest-prefix-match descent (spec.md §4.2), before
/// it's been formatted into a [`crate::query::QueryResult`].
pub(crate) struct MatchResult<AF> {
    pub(crate) matched: Option<(AF, u8)>,
    pub(crate) flags: u32,
}

impl<AF: AddressFamily> Tree<AF> {
    pub fn new() -> Self {
        Tree { root: Node::root() }
    }

    /// Insert `addr` with effective prefix length `len` (already resolved
    /// from `extra_bits` and clamped into `[0, AF::BITS]` by the caller),
    /// setting `flags` on the matching node. Re-inserting the same
    /// `(addr, len)` replaces its flag word (last write wins); see
    /// DESIGN.md for why replace, not OR, is the resolution of this
    /// spec's internal tension on re-insertion.
    pub fn add(&mut self, addr: AF, len: u8, flags: u32) {
        if len == 0 {
            // Root insertion: tags the sentinel itself (spec.md §4.1,
            // "L = 0 writes to the root sentinel").
            log::debug!("inserting default route with flags {flags:#x}");
            self.root.terminal = true;
            self.root.flags = flags;
            return;
        }
        log::debug!("inserting {} bits with flags {flags:#x}", len);
        self.root.insert(addr, len, flags);
    }

    /// Longest-prefix-match walk (spec.md §4.2).
    pub fn lookup(&self, addr: AF) -> MatchResult<AF> {
        let mut acc = self.root.flags;
        let mut best = self
            .root
            .terminal
            .then_some((self.root.network, self.root.bit_length));

        let mut cur = &self.root;
        loop {
            let go_right = addr.bit_at(cur.bit_length);
            let child = match if go_right { &cur.right } else { &cur.left } {
                Some(child) => child,
                None => break,
            };

            // `network` may carry host bits exactly as they were supplied
            // to `add`; only the top `bit_length` bits are part of the
            // match, on both sides.
            if child.network.truncate_to_len(child.bit_length)
                != addr.truncate_to_len(child.bit_length)
            {
                break;
            }

            acc |= child.flags;
            if child.terminal {
                best = Some((child.network, child.bit_length));
            }
            cur = child;
        }

        match best {
            Some(matched) => {
                log::trace!("lookup matched /{} with flags {acc:#x}", matched.1);
                MatchResult {
                    matched: Some(matched),
                    flags: acc,
                }
            }
            None => MatchResult {
                matched: None,
                flags: 0,
            },
        }
    }

    /// Pre-order dump of every reachable node (spec.md §4.3). The root
    /// sentinel itself is never emitted.
    pub fn dump(&self, out: &mut String) {
        Self::dump_children(&self.root, 1, out);
    }

    fn dump_children(node: &Node<AF>, depth: usize, out: &mut String) {
        if let Some(left) = &node.left {
            Self::dump_node(left, depth, out);
        }
        if let Some(right) = &node.right {
            Self::dump_node(right, depth, out);
        }
    }

    fn dump_node(node: &Node<AF>, depth: usize, out: &mut String) {
        let indent = if depth == 1 { "-" } else { "|-" };
        out.push_str(indent);
        out.push_str(&AF::fmt_net(node.network));
        out.push('/');
        out.push_str(&node.bit_length.to_string());
        out.push('\n');
        Self::dump_children(node, depth + 1, out);
    }
}

impl<AF: AddressFamily> Default for Tree<AF> {
    fn default() -> Self {
        Self::new()
    }
}
