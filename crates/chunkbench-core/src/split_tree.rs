//! Divide-and-conquer split plans stored as an arena.
//!
//! A `SplitTree` is built once per invocation, before any worker runs. Nodes
//! live in a single `Vec` and refer to each other by `NodeId`; the children
//! of a node occupy a contiguous id range. Leaves are numbered in depth-first
//! order and every node records the leaf interval beneath it, which lets a
//! recursive walk hand each subtree exactly its share of per-leaf state.

use std::mem;
use std::ops::Range;

use crate::matrix::Matrix;
use crate::partition::Block;

/// Index of a node inside a `SplitTree`.
pub type NodeId = usize;

/// Mutable row segments owned by one leaf block, top to bottom.
pub type LeafSegments<'a> = Vec<&'a mut [i64]>;

/// A region that can be measured for the split threshold.
pub trait Span: Clone + Send + Sync {
    /// Number of elements in the region.
    fn size(&self) -> usize;
}

impl Span for Range<usize> {
    fn size(&self) -> usize {
        self.len()
    }
}

impl Span for Block {
    fn size(&self) -> usize {
        self.area()
    }
}

/// One partition descriptor in the arena.
#[derive(Debug, Clone)]
pub struct SplitNode<S> {
    span: S,
    first_child: NodeId,
    child_count: usize,
    leaves: Range<usize>,
}

impl<S: Span> SplitNode<S> {
    fn new(span: S) -> Self {
        Self {
            span,
            first_child: 0,
            child_count: 0,
            leaves: 0..0,
        }
    }

    #[must_use]
    pub fn span(&self) -> &S {
        &self.span
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.child_count == 0
    }

    /// Ids of the direct children (empty for a leaf).
    #[must_use]
    pub fn children(&self) -> Range<NodeId> {
        self.first_child..self.first_child + self.child_count
    }

    /// Depth-first leaf indices covered by this node.
    #[must_use]
    pub fn leaves(&self) -> Range<usize> {
        self.leaves.clone()
    }
}

/// Arena of split descriptors rooted at id 0.
#[derive(Debug, Clone)]
pub struct SplitTree<S> {
    nodes: Vec<SplitNode<S>>,
    leaf_ids: Vec<NodeId>,
    threshold: usize,
}

impl SplitTree<Range<usize>> {
    /// Halve `0..len` until every piece is at most `threshold` long.
    ///
    /// # Example
    /// ```
    /// use chunkbench_core::split_tree::SplitTree;
    ///
    /// let tree = SplitTree::linear(10, 3);
    /// let leaves: Vec<_> = tree.leaves().cloned().collect();
    /// assert_eq!(leaves, vec![0..2, 2..5, 5..7, 7..10]);
    /// ```
    #[must_use]
    pub fn linear(len: usize, threshold: usize) -> Self {
        Self::build(0..len, threshold, |range, emit| {
            let mid = range.start + range.len() / 2;
            emit(range.start..mid);
            emit(mid..range.end);
        })
    }
}

impl SplitTree<Block> {
    /// Quarter a `rows x cols` block until every piece has at most
    /// `threshold` cells.
    #[must_use]
    pub fn quad(rows: usize, cols: usize, threshold: usize) -> Self {
        Self::build(Block::full(rows, cols), threshold, |block, emit| {
            block.quadrants(emit);
        })
    }

    /// Carve `output` into per-leaf row segments, indexed by leaf number.
    ///
    /// The tree must have been built for `output`'s shape. The carving is a
    /// single pass over the rows; the recursive walk then only splits the
    /// returned slice.
    pub fn carve<'a>(&self, output: &'a mut Matrix) -> Vec<LeafSegments<'a>> {
        debug_assert_eq!(self.root().span(), &Block::full(output.rows(), output.cols()));
        let mut buckets: Vec<LeafSegments<'a>> = self
            .leaves()
            .map(|block| Vec::with_capacity(block.height()))
            .collect();
        if output.is_empty() {
            return buckets;
        }

        // (row, first column, leaf) for every row a leaf touches.
        let mut pieces: Vec<(usize, usize, usize)> = self
            .leaves()
            .enumerate()
            .flat_map(|(leaf, block)| block.rows().map(move |r| (r, block.col_start, leaf)))
            .collect();
        pieces.sort_unstable();

        let cols = output.cols();
        let mut pieces = pieces.into_iter().peekable();
        for (r, row) in output.as_mut_slice().chunks_mut(cols).enumerate() {
            let mut rest = row;
            while let Some(&(piece_row, col_start, leaf)) = pieces.peek() {
                if piece_row != r {
                    break;
                }
                pieces.next();
                let width = self.leaf(leaf).width();
                debug_assert_eq!(cols - rest.len(), col_start);
                let (segment, tail) = mem::take(&mut rest).split_at_mut(width);
                buckets[leaf].push(segment);
                rest = tail;
            }
            debug_assert!(rest.is_empty(), "row {r} not fully covered");
        }
        buckets
    }
}

impl<S: Span> SplitTree<S> {
    fn build(root: S, threshold: usize, split: impl Fn(&S, &mut dyn FnMut(S))) -> Self {
        let mut tree = Self {
            nodes: vec![SplitNode::new(root)],
            leaf_ids: Vec::new(),
            threshold: threshold.max(1),
        };
        tree.expand(0, &split);
        tree
    }

    fn expand(&mut self, id: NodeId, split: &impl Fn(&S, &mut dyn FnMut(S))) {
        let first_leaf = self.leaf_ids.len();
        if self.nodes[id].span.size() > self.threshold {
            let span = self.nodes[id].span.clone();
            let first = self.nodes.len();
            let nodes = &mut self.nodes;
            split(&span, &mut |piece: S| {
                if piece.size() > 0 {
                    nodes.push(SplitNode::new(piece));
                }
            });
            let end = self.nodes.len();
            let node = &mut self.nodes[id];
            node.first_child = first;
            node.child_count = end - first;
            for child in first..end {
                self.expand(child, split);
            }
        } else {
            self.leaf_ids.push(id);
        }
        self.nodes[id].leaves = first_leaf..self.leaf_ids.len();
    }

    #[must_use]
    pub fn root(&self) -> &SplitNode<S> {
        &self.nodes[0]
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &SplitNode<S> {
        &self.nodes[id]
    }

    /// Total number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaf_ids.len()
    }

    #[must_use]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// The `index`-th leaf in depth-first order.
    #[must_use]
    pub fn leaf(&self, index: usize) -> &S {
        &self.nodes[self.leaf_ids[index]].span
    }

    /// Leaf spans in depth-first order.
    pub fn leaves(&self) -> impl Iterator<Item = &S> + '_ {
        self.leaf_ids.iter().map(|&id| &self.nodes[id].span)
    }

    /// Longest root-to-leaf path, counted in edges.
    #[must_use]
    pub fn depth(&self) -> usize {
        fn walk<S: Span>(tree: &SplitTree<S>, id: NodeId) -> usize {
            tree.node(id)
                .children()
                .map(|child| 1 + walk(tree, child))
                .max()
                .unwrap_or(0)
        }
        walk(self, 0)
    }
}
