//! CART decision tree with Gini impurity.
//!
//! Nodes are stored in a flat vector; children are referenced by index.
//! Class targets are dense indices (`0..n_classes`), mapped back to tier
//! labels by the forest.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Growth limits shared by every tree in a forest.
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Features examined per split before settling on the best one found
    pub max_features: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf {
        class: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

/// Best split found for one node.
struct Candidate {
    feature: usize,
    threshold: f64,
    /// Sum of child sizes times child impurity; lower is better
    weighted_impurity: f64,
}

impl DecisionTree {
    /// Grow a tree over `samples` (indices into `features`, repeats allowed).
    pub fn fit(
        features: &[Vec<f64>],
        targets: &[usize],
        n_classes: usize,
        samples: Vec<usize>,
        params: &TreeParams,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let n_features = features.first().map_or(0, Vec::len);
        let mut nodes = vec![Node::Leaf { class: 0 }];
        // (node slot, samples reaching it, depth)
        let mut work = vec![(0usize, samples, 0usize)];
        let mut order: Vec<usize> = (0..n_features).collect();

        while let Some((slot, samples, depth)) = work.pop() {
            let counts = class_counts(&samples, targets, n_classes);
            let majority = majority_class(&counts);

            let depth_exhausted = params.max_depth.is_some_and(|max| depth >= max);
            let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
            if depth_exhausted || pure || samples.len() < params.min_samples_split {
                nodes[slot] = Node::Leaf { class: majority };
                continue;
            }

            order.shuffle(rng);
            let Some(best) = best_split(features, targets, n_classes, &samples, &order, params)
            else {
                nodes[slot] = Node::Leaf { class: majority };
                continue;
            };

            let (left, right): (Vec<usize>, Vec<usize>) = samples
                .iter()
                .partition(|&&s| features[s][best.feature] <= best.threshold);

            let left_slot = nodes.len();
            let right_slot = left_slot + 1;
            nodes.push(Node::Leaf { class: majority });
            nodes.push(Node::Leaf { class: majority });
            nodes[slot] = Node::Split {
                feature: best.feature,
                threshold: best.threshold,
                left: left_slot,
                right: right_slot,
            };
            work.push((right_slot, right, depth + 1));
            work.push((left_slot, left, depth + 1));
        }

        Self { nodes }
    }

    pub fn predict(&self, row: &[f64]) -> usize {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { class } => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], idx: usize) -> usize {
            match &nodes[idx] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        walk(&self.nodes, 0)
    }
}

/// Scan features in `order` until at least `max_features` have been examined
/// and a valid split exists, or every feature has been tried.
fn best_split(
    features: &[Vec<f64>],
    targets: &[usize],
    n_classes: usize,
    samples: &[usize],
    order: &[usize],
    params: &TreeParams,
) -> Option<Candidate> {
    let n = samples.len();
    if n < 2 {
        return None;
    }

    let mut best: Option<Candidate> = None;
    let mut sorted = samples.to_vec();
    let total = class_counts(samples, targets, n_classes);

    for (examined, &feature) in order.iter().enumerate() {
        if examined >= params.max_features && best.is_some() {
            break;
        }

        sorted.sort_by(|&a, &b| features[a][feature].total_cmp(&features[b][feature]));

        let mut left = vec![0usize; n_classes];
        for i in 0..n - 1 {
            left[targets[sorted[i]]] += 1;
            let here = features[sorted[i]][feature];
            let next = features[sorted[i + 1]][feature];
            if here == next {
                continue;
            }

            let n_left = i + 1;
            let n_right = n - n_left;
            let right: Vec<usize> = total.iter().zip(&left).map(|(t, l)| t - l).collect();
            let weighted =
                n_left as f64 * gini(&left, n_left) + n_right as f64 * gini(&right, n_right);

            if best
                .as_ref()
                .map_or(true, |b| weighted < b.weighted_impurity)
            {
                best = Some(Candidate {
                    feature,
                    threshold: here + (next - here) / 2.0,
                    weighted_impurity: weighted,
                });
            }
        }
    }

    best
}

fn class_counts(samples: &[usize], targets: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &s in samples {
        counts[targets[s]] += 1;
    }
    counts
}

fn gini(counts: &[usize], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum::<f64>()
}

/// Index of the largest count; ties go to the lowest index.
pub(crate) fn majority_class(counts: &[usize]) -> usize {
    let mut best = 0;
    for (class, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = class;
        }
    }
    best
}
