//! Connected components over dark pixels
//! Labels 8-connected regions and tracks their bounding boxes
use crate::models::{BitMatrix, Region};

/// Union-Find data structure over provisional labels (label 0 is background)
pub struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    /// Empty structure holding only the background label
    pub fn new() -> Self {
        Self { parent: vec![0] }
    }

    /// Allocate a fresh label
    pub fn make_set(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        label
    }

    /// Root of `x`, halving the path on the way
    pub fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grandparent = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Merge the sets containing `x` and `y`
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x != root_y {
            // Keep the older label as root so it stays first in raster order
            let (keep, merge) = if root_x < root_y {
                (root_x, root_y)
            } else {
                (root_y, root_x)
            };
            self.parent[merge as usize] = keep;
        }
    }
}

impl Default for UnionFind {
    fn default() -> Self {
        Self::new()
    }
}

/// One connected region of dark pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Label in the owning [`Labeling`] (1-based)
    pub label: u32,
    /// Leftmost column
    pub min_x: usize,
    /// Top row
    pub min_y: usize,
    /// Rightmost column
    pub max_x: usize,
    /// Bottom row
    pub max_y: usize,
    /// Number of dark pixels
    pub pixels: usize,
    /// First pixel in raster order (top-most, then left-most)
    pub start: (usize, usize),
}

impl Component {
    fn new(label: u32, x: usize, y: usize) -> Self {
        Self {
            label,
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
            pixels: 0,
            start: (x, y),
        }
    }

    fn include(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self.pixels += 1;
    }

    /// Bounding box
    pub fn bounds(&self) -> Region {
        Region::from_bounds(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Label image plus the components it contains
pub struct Labeling {
    width: usize,
    height: usize,
    labels: Vec<u32>,
    components: Vec<Component>,
}

impl Labeling {
    /// Width of the labelled image
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the labelled image
    pub fn height(&self) -> usize {
        self.height
    }

    /// Component label at (x, y); 0 for background or out of bounds
    pub fn label_at(&self, x: i32, y: i32) -> u32 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return 0;
        }
        self.labels[y as usize * self.width + x as usize]
    }

    /// Components ordered by first appearance in raster order
    pub fn components(&self) -> &[Component] {
        &self.components
    }
}

/// Label 8-connected dark regions
pub fn label_components(matrix: &BitMatrix) -> Labeling {
    let width = matrix.width();
    let height = matrix.height();

    let mut labels = vec![0u32; width * height];
    let mut uf = UnionFind::new();

    // First pass: provisional labels
    for y in 0..height {
        for x in 0..width {
            if !matrix.get(x, y) {
                continue;
            }

            // left, upper-left, above, upper-right
            let mut neighbors = [0u32; 4];
            if x > 0 {
                neighbors[0] = labels[y * width + x - 1];
            }
            if y > 0 {
                let above = (y - 1) * width + x;
                if x > 0 {
                    neighbors[1] = labels[above - 1];
                }
                neighbors[2] = labels[above];
                if x + 1 < width {
                    neighbors[3] = labels[above + 1];
                }
            }

            let label = match neighbors.iter().copied().filter(|&l| l != 0).min() {
                Some(min_label) => {
                    for &l in &neighbors {
                        if l != 0 && l != min_label {
                            uf.union(min_label, l);
                        }
                    }
                    min_label
                }
                None => uf.make_set(),
            };
            labels[y * width + x] = label;
        }
    }

    // Second pass: resolve roots to compact 1-based labels
    let mut compact = vec![0u32; uf.parent.len()];
    let mut components: Vec<Component> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if labels[idx] == 0 {
                continue;
            }
            let root = uf.find(labels[idx]) as usize;
            if compact[root] == 0 {
                components.push(Component::new(components.len() as u32 + 1, x, y));
                compact[root] = components.len() as u32;
            }
            let label = compact[root];
            labels[idx] = label;
            components[label as usize - 1].include(x, y);
        }
    }

    Labeling {
        width,
        height,
        labels,
        components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(matrix: &mut BitMatrix, x0: usize, y0: usize, x1: usize, y1: usize) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                matrix.set(x, y, true);
            }
        }
    }

    #[test]
    fn test_single_square() {
        let mut matrix = BitMatrix::new(10, 10);
        fill(&mut matrix, 2, 2, 3, 3);

        let labeling = label_components(&matrix);
        let components = labeling.components();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].bounds(), Region::new(2, 2, 2, 2));
        assert_eq!(components[0].pixels, 4);
        assert_eq!(components[0].start, (2, 2));
    }

    #[test]
    fn test_diagonal_pixels_join() {
        let mut matrix = BitMatrix::new(5, 5);
        matrix.set(1, 1, true);
        matrix.set(2, 2, true);
        matrix.set(3, 1, true);

        let labeling = label_components(&matrix);
        assert_eq!(labeling.components().len(), 1);
        assert_eq!(labeling.label_at(3, 1), labeling.label_at(1, 1));
    }

    #[test]
    fn test_u_shape_merges_late() {
        // Two arms that only join on the bottom row
        let mut matrix = BitMatrix::new(7, 6);
        fill(&mut matrix, 1, 0, 1, 5);
        fill(&mut matrix, 5, 0, 5, 5);
        fill(&mut matrix, 1, 5, 5, 5);

        let labeling = label_components(&matrix);
        assert_eq!(labeling.components().len(), 1);
        let c = &labeling.components()[0];
        assert_eq!((c.min_x, c.max_x, c.min_y, c.max_y), (1, 5, 0, 5));
        assert_eq!(c.start, (1, 0));
    }

    #[test]
    fn test_separate_bars() {
        let mut matrix = BitMatrix::new(12, 8);
        fill(&mut matrix, 1, 1, 2, 6);
        fill(&mut matrix, 5, 3, 6, 4);
        fill(&mut matrix, 9, 0, 10, 7);

        let labeling = label_components(&matrix);
        let components = labeling.components();
        assert_eq!(components.len(), 3);
        // Raster order of first pixel: (9,0), (1,1), (5,3)
        assert_eq!(components[0].start, (9, 0));
        assert_eq!(components[1].start, (1, 1));
        assert_eq!(components[2].start, (5, 3));
        assert_eq!(labeling.label_at(0, 0), 0);
        assert_eq!(labeling.label_at(-1, 3), 0);
    }
}
