use serde::{Deserialize, Serialize};

/// One node of a regression tree. `feature: None` marks a leaf whose
/// `value` is the tree's output; internal nodes branch left when
/// `x[feature] < threshold` (missing features are treated as 0.0 by the
/// caller, which lands them on the left like the trainer's default).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(default)]
    pub feature: Option<usize>,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub left: usize,
    #[serde(default)]
    pub right: usize,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Child links must point forward in the node array and features must be
    /// in range; checked once at load so `predict` cannot loop or index out.
    pub fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            let Some(feature) = node.feature else {
                continue;
            };
            if feature >= n_features {
                return Err(format!("node {i} references feature {feature} of {n_features}"));
            }
            for child in [node.left, node.right] {
                if child <= i || child >= self.nodes.len() {
                    return Err(format!("node {i} has invalid child index {child}"));
                }
            }
        }
        Ok(())
    }

    pub fn predict(&self, x: &[f64]) -> f64 {
        let mut i = 0;
        loop {
            let node = &self.nodes[i];
            match node.feature {
                None => return node.value,
                Some(feature) => {
                    let v = x.get(feature).copied().unwrap_or(0.0);
                    i = if v < node.threshold { node.left } else { node.right };
                }
            }
        }
    }
}

/// Gradient-boosted regression tree ensemble: base score plus the sum of
/// every tree's output. Inference only — training happens offline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoostedRegressor {
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

impl GradientBoostedRegressor {
    pub fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("model has no trees".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(n_features)
                .map_err(|e| format!("tree {i}: {e}"))?;
        }
        Ok(())
    }

    pub fn predict(&self, x: &[f64]) -> f64 {
        self.base_score + self.trees.iter().map(|t| t.predict(x)).sum::<f64>()
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: f64) -> TreeNode {
        TreeNode {
            feature: None,
            threshold: 0.0,
            left: 0,
            right: 0,
            value,
        }
    }

    fn split(feature: usize, threshold: f64, left: usize, right: usize) -> TreeNode {
        TreeNode {
            feature: Some(feature),
            threshold,
            left,
            right,
            value: 0.0,
        }
    }

    fn stump() -> Tree {
        // x[0] < 5 → 10, else 20
        Tree {
            nodes: vec![split(0, 5.0, 1, 2), leaf(10.0), leaf(20.0)],
        }
    }

    #[test]
    fn stump_branches_on_threshold() {
        let t = stump();
        assert_eq!(t.predict(&[4.9]), 10.0);
        assert_eq!(t.predict(&[5.0]), 20.0);
    }

    #[test]
    fn missing_feature_goes_left() {
        // feature index 3 absent from a 1-wide row → treated as 0.0 → left
        let t = Tree {
            nodes: vec![split(3, 5.0, 1, 2), leaf(10.0), leaf(20.0)],
        };
        assert_eq!(t.predict(&[1.0]), 10.0);
    }

    #[test]
    fn ensemble_sums_trees_over_base() {
        let model = GradientBoostedRegressor {
            base_score: 100.0,
            trees: vec![stump(), Tree { nodes: vec![leaf(1.5)] }],
        };
        assert_eq!(model.predict(&[0.0]), 111.5);
        assert_eq!(model.predict(&[9.0]), 121.5);
    }

    #[test]
    fn validation_rejects_backward_links() {
        let bad = Tree {
            nodes: vec![split(0, 5.0, 0, 2), leaf(1.0), leaf(2.0)],
        };
        assert!(bad.validate(1).is_err());
    }

    #[test]
    fn validation_rejects_out_of_range_feature() {
        assert!(stump().validate(0).is_err());
        assert!(stump().validate(1).is_ok());
    }
}
