//! Node positions along the beam

use serde::{Deserialize, Serialize};

/// A named node at a distance from the beam origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyNode {
    pub id: String,
    pub x: f64,
}

/// Nodes `N0..N(k-1)` in ascending x
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeTopology {
    nodes: Vec<TopologyNode>,
}

impl NodeTopology {
    /// Nodes at every location plus both beam ends, sorted and
    /// deduplicated by exact equality.
    pub fn synthesize(locations: impl IntoIterator<Item = f64>, length: f64) -> Self {
        let mut xs: Vec<f64> = locations.into_iter().collect();
        xs.push(0.0);
        xs.push(length);
        // -0.0 sorts ahead of 0.0 and would survive dedup
        xs.iter_mut().for_each(|x| *x += 0.0);
        xs.sort_by(f64::total_cmp);
        xs.dedup();

        let nodes = xs
            .into_iter()
            .enumerate()
            .map(|(i, x)| TopologyNode {
                id: format!("N{}", i),
                x,
            })
            .collect();
        Self { nodes }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TopologyNode> {
        self.nodes.iter()
    }

    pub fn first(&self) -> Option<&TopologyNode> {
        self.nodes.first()
    }

    pub fn last(&self) -> Option<&TopologyNode> {
        self.nodes.last()
    }

    /// Id of the node at exactly `x`
    pub fn id_at(&self, x: f64) -> Option<&str> {
        self.nodes.iter().find(|n| n.x == x).map(|n| n.id.as_str())
    }

    pub fn coordinates(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.x).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesize() {
        let topology = NodeTopology::synthesize([1000.0, 4000.0, 8000.0], 10000.0);
        let nodes: Vec<(&str, f64)> = topology.iter().map(|n| (n.id.as_str(), n.x)).collect();
        assert_eq!(
            nodes,
            vec![
                ("N0", 0.0),
                ("N1", 1000.0),
                ("N2", 4000.0),
                ("N3", 8000.0),
                ("N4", 10000.0),
            ]
        );
    }

    #[test]
    fn test_supports_at_ends_are_not_duplicated() {
        let topology = NodeTopology::synthesize([4800.0, 0.0, 3000.0, 3000.0], 4800.0);
        assert_eq!(topology.coordinates(), vec![0.0, 3000.0, 4800.0]);
        assert_eq!(topology.id_at(4800.0), Some("N2"));
        assert_eq!(topology.id_at(1.0), None);
    }

    #[test]
    fn test_strictly_ascending_with_both_ends() {
        let locations = [7.5, 0.25, 3.0, 9.0, 0.25, 1e-3, 6.0];
        let topology = NodeTopology::synthesize(locations, 10.0);
        let xs = topology.coordinates();

        assert!(xs.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(xs.first(), Some(&0.0));
        assert_eq!(xs.last(), Some(&10.0));
        assert_eq!(topology.first().map(|n| n.id.as_str()), Some("N0"));
    }

    #[test]
    fn test_negative_zero_is_the_origin() {
        let topology = NodeTopology::synthesize([-0.0, 4800.0], 4800.0);
        assert_eq!(topology.len(), 2);
        let first = topology.first().unwrap();
        assert!(first.x == 0.0 && first.x.is_sign_positive());
    }

    #[test]
    fn test_no_supports() {
        let topology = NodeTopology::synthesize(std::iter::empty(), 5.0);
        assert_eq!(topology.len(), 2);
    }
}
