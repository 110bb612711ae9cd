use crate::detector::connected_components::{Component, Labeling};
use crate::models::{Point, PointI};
use crate::utils::geometry::{closed_arc_length, perpendicular_distance};

/// 8-neighbourhood, clockwise on screen (y grows downward), starting east
const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];
const WEST: usize = 4;

/// Follow the outer border of a component clockwise.
///
/// Starts at the component's first raster pixel, whose west neighbour is
/// known to be outside, and sweeps the neighbourhood clockwise from the
/// previous border pixel. Stops when the start pixel would be left through
/// the same step a second time.
pub fn trace_outer_border(labeling: &Labeling, component: &Component) -> Vec<PointI> {
    let is_member = |p: PointI| labeling.label_at(p.x, p.y) == component.label;

    let start = PointI::new(component.start.0 as i32, component.start.1 as i32);
    let mut contour = vec![start];
    let mut current = start;
    let mut back = WEST;
    let mut first_step: Option<PointI> = None;

    // Each border pixel is entered at most once per side
    let max_steps = 4 * component.pixels + 8;
    for _ in 0..max_steps {
        let next = (1..=8).map(|i| (back + i) % 8).find_map(|dir| {
            let (dx, dy) = DIRECTIONS[dir];
            let candidate = current.offset(dx, dy);
            is_member(candidate).then_some((candidate, dir))
        });
        let Some((candidate, dir)) = next else {
            // Isolated pixel
            break;
        };

        if current == start {
            match first_step {
                Some(first) if first == candidate => break,
                Some(_) => {}
                None => first_step = Some(candidate),
            }
        }

        contour.push(candidate);
        back = (dir + 4) % 8;
        current = candidate;
    }

    if contour.len() > 1 && contour.last() == Some(&start) {
        contour.pop();
    }
    contour
}

/// Simplify a closed contour with Douglas-Peucker.
///
/// The contour is split at its first point and the point farthest from it;
/// each half is simplified separately so the polygon stays closed.
pub fn approx_polygon(contour: &[PointI], epsilon: f32) -> Vec<PointI> {
    let n = contour.len();
    if n < 3 {
        return contour.to_vec();
    }

    let points: Vec<Point> = contour.iter().map(|&p| p.into()).collect();
    let mut far = 0;
    let mut far_dist = 0.0f32;
    for (i, p) in points.iter().enumerate().skip(1) {
        let d = points[0].distance_squared(p);
        if d > far_dist {
            far_dist = d;
            far = i;
        }
    }
    if far == 0 {
        return vec![contour[0]];
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[far] = true;

    let first_half: Vec<usize> = (0..=far).collect();
    let second_half: Vec<usize> = (far..n).chain(std::iter::once(0)).collect();
    simplify(&points, &first_half, epsilon, &mut keep);
    simplify(&points, &second_half, epsilon, &mut keep);

    contour
        .iter()
        .zip(&keep)
        .filter_map(|(&p, &k)| k.then_some(p))
        .collect()
}

/// Mark points of the open chain `chain` (indices into `points`) to keep
fn simplify(points: &[Point], chain: &[usize], epsilon: f32, keep: &mut [bool]) {
    let mut stack = vec![(0usize, chain.len() - 1)];
    while let Some((lo, hi)) = stack.pop() {
        if hi <= lo + 1 {
            continue;
        }
        let a = &points[chain[lo]];
        let b = &points[chain[hi]];

        let mut max_dist = 0.0f32;
        let mut max_pos = lo;
        for pos in (lo + 1)..hi {
            let d = perpendicular_distance(&points[chain[pos]], a, b);
            if d > max_dist {
                max_dist = d;
                max_pos = pos;
            }
        }

        if max_dist > epsilon {
            keep[chain[max_pos]] = true;
            stack.push((lo, max_pos));
            stack.push((max_pos, hi));
        }
    }
}

/// Perimeter of a traced contour
pub fn contour_perimeter(contour: &[PointI]) -> f32 {
    let points: Vec<Point> = contour.iter().map(|&p| p.into()).collect();
    closed_arc_length(&points)
}
