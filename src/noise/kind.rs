//! The closed set of node kinds and the roles they are grouped by.
//!
//! A node's role fixes how many input pins it has; the kind selects the
//! field function that computes its output.

use egui::Color32;
use egui_node_graph2::CategoryTrait;

/// Role of a node kind, used for menu grouping, header coloring and arity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeRole {
    /// Field sources with no inputs.
    Generator,
    /// Unary transforms of one field.
    Modifier,
    /// Binary operators over two fields.
    Combiner,
    /// Picks between two fields using a third control field.
    Selector,
}

impl NodeRole {
    /// All roles in menu display order.
    pub const ALL: [NodeRole; 4] = [
        NodeRole::Generator,
        NodeRole::Modifier,
        NodeRole::Combiner,
        NodeRole::Selector,
    ];

    /// Number of input pins a node of this role has.
    pub fn arity(&self) -> usize {
        match self {
            NodeRole::Generator => 0,
            NodeRole::Modifier => 1,
            NodeRole::Combiner => 2,
            NodeRole::Selector => 3,
        }
    }

    /// Returns a human-readable name for the role.
    pub fn name(&self) -> &'static str {
        match self {
            NodeRole::Generator => "Generator",
            NodeRole::Modifier => "Modifier",
            NodeRole::Combiner => "Combiner",
            NodeRole::Selector => "Selector",
        }
    }

    /// Header color for nodes of this role.
    pub fn color(&self) -> Color32 {
        match self {
            NodeRole::Generator => Color32::from_rgb(66, 165, 245), // Blue #42A5F5
            NodeRole::Modifier => Color32::from_rgb(38, 166, 154),  // Teal #26A69A
            NodeRole::Combiner => Color32::from_rgb(255, 183, 77),  // Orange #FFB74D
            NodeRole::Selector => Color32::from_rgb(126, 87, 194),  // Purple #7E57C2
        }
    }
}

impl CategoryTrait for NodeRole {
    fn name(&self) -> String {
        NodeRole::name(self).to_string()
    }
}

/// Every kind of node that can be placed in the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    // Generators
    Billow,
    Checkerboard,
    Const,
    Cylinders,
    Perlin,
    RidgedMulti,
    Spheres,
    Voronoi,
    // Modifiers
    Abs,
    Clamp,
    Exponent,
    Invert,
    ScaleBias,
    // Combiners
    Add,
    Max,
    Min,
    // Selector
    Select,
}

impl NodeKind {
    /// All kinds, grouped by role and sorted by name within a role.
    pub const ALL: [NodeKind; 17] = [
        NodeKind::Billow,
        NodeKind::Checkerboard,
        NodeKind::Const,
        NodeKind::Cylinders,
        NodeKind::Perlin,
        NodeKind::RidgedMulti,
        NodeKind::Spheres,
        NodeKind::Voronoi,
        NodeKind::Abs,
        NodeKind::Clamp,
        NodeKind::Exponent,
        NodeKind::Invert,
        NodeKind::ScaleBias,
        NodeKind::Add,
        NodeKind::Max,
        NodeKind::Min,
        NodeKind::Select,
    ];

    /// The role this kind belongs to.
    pub fn role(&self) -> NodeRole {
        match self {
            NodeKind::Perlin
            | NodeKind::Billow
            | NodeKind::RidgedMulti
            | NodeKind::Voronoi
            | NodeKind::Checkerboard
            | NodeKind::Const
            | NodeKind::Cylinders
            | NodeKind::Spheres => NodeRole::Generator,
            NodeKind::Abs
            | NodeKind::Clamp
            | NodeKind::Exponent
            | NodeKind::Invert
            | NodeKind::ScaleBias => NodeRole::Modifier,
            NodeKind::Add | NodeKind::Max | NodeKind::Min => NodeRole::Combiner,
            NodeKind::Select => NodeRole::Selector,
        }
    }

    /// Number of input pins, derived from the role.
    pub fn arity(&self) -> usize {
        self.role().arity()
    }

    /// Module identifier used by the registry (e.g. `"gen.perlin"`).
    pub fn module_id(&self) -> &'static str {
        match self {
            NodeKind::Perlin => "gen.perlin",
            NodeKind::Billow => "gen.billow",
            NodeKind::RidgedMulti => "gen.ridged_multi",
            NodeKind::Voronoi => "gen.voronoi",
            NodeKind::Checkerboard => "gen.checkerboard",
            NodeKind::Const => "gen.const",
            NodeKind::Cylinders => "gen.cylinders",
            NodeKind::Spheres => "gen.spheres",
            NodeKind::Abs => "mod.abs",
            NodeKind::Clamp => "mod.clamp",
            NodeKind::Exponent => "mod.exponent",
            NodeKind::Invert => "mod.invert",
            NodeKind::ScaleBias => "mod.scale_bias",
            NodeKind::Add => "comb.add",
            NodeKind::Max => "comb.max",
            NodeKind::Min => "comb.min",
            NodeKind::Select => "sel.select",
        }
    }

    /// Label shown in the node header and the creation menu.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Perlin => "Perlin",
            NodeKind::Billow => "Billow",
            NodeKind::RidgedMulti => "RidgedMulti",
            NodeKind::Voronoi => "Voronoi",
            NodeKind::Checkerboard => "Checkerboard",
            NodeKind::Const => "Const",
            NodeKind::Cylinders => "Cylinders",
            NodeKind::Spheres => "Spheres",
            NodeKind::Abs => "Abs",
            NodeKind::Clamp => "Clamp",
            NodeKind::Exponent => "Exponent",
            NodeKind::Invert => "Invert",
            NodeKind::ScaleBias => "ScaleBias",
            NodeKind::Add => "Add",
            NodeKind::Max => "Max",
            NodeKind::Min => "Min",
            NodeKind::Select => "Select",
        }
    }

    /// All kinds grouped by role, in menu display order.
    ///
    /// Only roles with at least one kind are included.
    pub fn by_role() -> Vec<(NodeRole, Vec<NodeKind>)> {
        NodeRole::ALL
            .into_iter()
            .map(|role| {
                let kinds = Self::ALL
                    .into_iter()
                    .filter(|kind| kind.role() == role)
                    .collect::<Vec<_>>();
                (role, kinds)
            })
            .filter(|(_, kinds)| !kinds.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_role_arity() {
        assert_eq!(NodeRole::Generator.arity(), 0);
        assert_eq!(NodeRole::Modifier.arity(), 1);
        assert_eq!(NodeRole::Combiner.arity(), 2);
        assert_eq!(NodeRole::Selector.arity(), 3);
    }

    #[test]
    fn test_kind_arity_follows_role() {
        assert_eq!(NodeKind::Perlin.arity(), 0);
        assert_eq!(NodeKind::ScaleBias.arity(), 1);
        assert_eq!(NodeKind::Max.arity(), 2);
        assert_eq!(NodeKind::Select.arity(), 3);
    }

    #[test]
    fn test_role_colors_are_distinct() {
        for i in 0..NodeRole::ALL.len() {
            for j in (i + 1)..NodeRole::ALL.len() {
                assert_ne!(NodeRole::ALL[i].color(), NodeRole::ALL[j].color());
            }
        }
    }

    #[test]
    fn test_module_ids_are_unique() {
        let ids: HashSet<_> = NodeKind::ALL.iter().map(|k| k.module_id()).collect();
        assert_eq!(ids.len(), NodeKind::ALL.len());
    }

    #[test]
    fn test_by_role_covers_every_kind_once() {
        let grouped = NodeKind::by_role();
        assert_eq!(grouped.len(), 4);
        assert_eq!(grouped[0].0, NodeRole::Generator);
        assert_eq!(grouped[0].1.len(), 8);
        assert_eq!(grouped[3].1, vec![NodeKind::Select]);

        let total: usize = grouped.iter().map(|(_, kinds)| kinds.len()).sum();
        assert_eq!(total, NodeKind::ALL.len());
        for (role, kinds) in grouped {
            assert!(kinds.iter().all(|k| k.role() == role));
        }
    }
}
