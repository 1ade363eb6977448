//! Identity of nodes, pins and links.
//!
//! Node and link ids come from monotonically increasing counters owned by the
//! graph and are never reused while the graph is alive. Pins are not stored
//! anywhere; a [`PinId`] names a pin by its node, direction and slot.

use std::fmt;

/// Unique identifier of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Direction of a pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PinRole {
    /// Receives a field; at most one incoming link.
    Input,
    /// Emits the node's field; any number of outgoing links.
    Output,
}

/// Identifier of one pin on one node.
///
/// `slot` is the input index for input pins and always 0 for the single
/// output pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinId {
    pub node: NodeId,
    pub role: PinRole,
    pub slot: usize,
}

impl PinId {
    /// The input pin at `slot` on `node`.
    pub fn input(node: NodeId, slot: usize) -> Self {
        Self {
            node,
            role: PinRole::Input,
            slot,
        }
    }

    /// The output pin of `node`.
    pub fn output(node: NodeId) -> Self {
        Self {
            node,
            role: PinRole::Output,
            slot: 0,
        }
    }

    /// Returns true for input pins.
    pub fn is_input(&self) -> bool {
        self.role == PinRole::Input
    }

    /// Returns true for output pins.
    pub fn is_output(&self) -> bool {
        self.role == PinRole::Output
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            PinRole::Input => write!(f, "{}.in[{}]", self.node, self.slot),
            PinRole::Output => write!(f, "{}.out", self.node),
        }
    }
}

/// Unique identifier of a link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub u64);

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link#{}", self.0)
    }
}

/// A directed edge from an output pin to an input pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
    pub id: LinkId,
    /// Output pin the field comes from.
    pub source: PinId,
    /// Input pin the field goes to.
    pub dest: PinId,
}

impl Link {
    /// Returns true if either end of the link is on `node`.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source.node == node || self.dest.node == node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_constructors() {
        let node = NodeId(4);
        let input = PinId::input(node, 2);
        assert!(input.is_input());
        assert_eq!(input.slot, 2);

        let output = PinId::output(node);
        assert!(output.is_output());
        assert_eq!(output.slot, 0);
        assert_ne!(input, output);
    }

    #[test]
    fn test_display() {
        assert_eq!(PinId::input(NodeId(3), 1).to_string(), "node#3.in[1]");
        assert_eq!(PinId::output(NodeId(3)).to_string(), "node#3.out");
        assert_eq!(LinkId(9).to_string(), "link#9");
    }

    #[test]
    fn test_link_touches() {
        let link = Link {
            id: LinkId(1),
            source: PinId::output(NodeId(1)),
            dest: PinId::input(NodeId(2), 0),
        };
        assert!(link.touches(NodeId(1)));
        assert!(link.touches(NodeId(2)));
        assert!(!link.touches(NodeId(3)));
    }
}
