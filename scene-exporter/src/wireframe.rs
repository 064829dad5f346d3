use nalgebra::Point3;

use pcd_core::annotation::bbox::BoxCorners;

/// Corner index pairs of the 12 box edges, in drawing order:
/// the forward face, the four front-to-rear edges, then the rear face.
pub const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
    (4, 7),
    (5, 4),
    (6, 5),
    (7, 6),
];

/// Disjoint line segments as three parallel coordinate sequences.
///
/// Every segment occupies three slots per axis: start, end, and a `None` gap
/// so a polyline renderer does not join consecutive segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeList {
    pub xs: Vec<Option<f64>>,
    pub ys: Vec<Option<f64>>,
    pub zs: Vec<Option<f64>>,
}

impl EdgeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_box_capacity(box_count: usize) -> Self {
        let capacity = box_count * BOX_EDGES.len() * 3;
        Self {
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
            zs: Vec::with_capacity(capacity),
        }
    }

    pub fn push_segment(&mut self, a: &Point3<f64>, b: &Point3<f64>) {
        self.xs.extend([Some(a.x), Some(b.x), None]);
        self.ys.extend([Some(a.y), Some(b.y), None]);
        self.zs.extend([Some(a.z), Some(b.z), None]);
    }

    pub fn push_box(&mut self, corners: &BoxCorners) {
        for (a, b) in BOX_EDGES {
            self.push_segment(&corners[a], &corners[b]);
        }
    }

    pub fn segment_count(&self) -> usize {
        self.xs.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = (Point3<f64>, Point3<f64>)> + '_ {
        self.xs
            .chunks_exact(3)
            .zip(self.ys.chunks_exact(3))
            .zip(self.zs.chunks_exact(3))
            .filter_map(|((x, y), z)| {
                let a = Point3::new(x[0]?, y[0]?, z[0]?);
                let b = Point3::new(x[1]?, y[1]?, z[1]?);
                Some((a, b))
            })
    }
}

pub fn box_edges(corners: &BoxCorners) -> EdgeList {
    let mut edges = EdgeList::with_box_capacity(1);
    edges.push_box(corners);
    edges
}
