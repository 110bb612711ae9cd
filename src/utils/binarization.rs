use crate::models::BitMatrix;

/// Binarize with a local mean threshold (tolerates uneven lighting)
///
/// A pixel is dark when it is more than `offset` below the mean of the
/// `block_size` x `block_size` window centred on it. Windows are clipped at
/// the image edges. Uniform areas, dark or light, come out white, so thick
/// dark shapes turn into outlines; their bounding boxes are preserved.
pub fn adaptive_binarize(
    gray: &[u8],
    width: usize,
    height: usize,
    block_size: usize,
    offset: i32,
) -> BitMatrix {
    let mut binary = BitMatrix::new(width, height);
    if width == 0 || height == 0 {
        return binary;
    }

    let integral = integral_image(gray, width, height);
    let stride = width + 1;
    let radius = block_size / 2;

    for y in 0..height {
        let y0 = y.saturating_sub(radius);
        let y1 = (y + radius + 1).min(height);
        for x in 0..width {
            let x0 = x.saturating_sub(radius);
            let x1 = (x + radius + 1).min(width);
            let count = ((y1 - y0) * (x1 - x0)) as i64;
            let sum = integral[y1 * stride + x1] - integral[y0 * stride + x1]
                - integral[y1 * stride + x0]
                + integral[y0 * stride + x0];
            // gray < mean - offset, without dividing
            let pixel = gray[y * width + x] as i64;
            binary.set(x, y, pixel * count < sum - offset as i64 * count);
        }
    }

    binary
}

/// Summed-area table with a zero row and column in front
fn integral_image(gray: &[u8], width: usize, height: usize) -> Vec<i64> {
    let stride = width + 1;
    let mut integral = vec![0i64; stride * (height + 1)];
    for y in 0..height {
        let mut row_sum = 0i64;
        for x in 0..width {
            row_sum += gray[y * width + x] as i64;
            integral[(y + 1) * stride + x + 1] = row_sum + integral[y * stride + x + 1];
        }
    }
    integral
}

/// Convert grayscale image to binary using Otsu's thresholding method
pub fn otsu_binarize(gray: &[u8], width: usize, height: usize) -> BitMatrix {
    let threshold = calculate_otsu_threshold(gray);
    threshold_binarize(gray, width, height, threshold)
}

/// Calculate Otsu's optimal threshold
fn calculate_otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total = gray.len() as f64;
    let total_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut below_count = 0u64;
    let mut below_sum = 0f64;
    let mut max_variance = 0.0;
    let mut optimal_threshold = 128u8;

    // Class 1 is every intensity strictly below `threshold`
    for threshold in 1..=255usize {
        below_count += histogram[threshold - 1];
        below_sum += (threshold - 1) as f64 * histogram[threshold - 1] as f64;
        let above_count = gray.len() as u64 - below_count;
        if below_count == 0 || above_count == 0 {
            continue;
        }

        let mean1 = below_sum / below_count as f64;
        let mean2 = (total_sum - below_sum) / above_count as f64;
        let weight1 = below_count as f64 / total;
        let weight2 = above_count as f64 / total;
        let variance = weight1 * weight2 * (mean1 - mean2).powi(2);

        if variance > max_variance {
            max_variance = variance;
            optimal_threshold = threshold as u8;
        }
    }

    optimal_threshold
}

/// Simple global threshold binarization
pub fn threshold_binarize(gray: &[u8], width: usize, height: usize, threshold: u8) -> BitMatrix {
    let mut binary = BitMatrix::new(width, height);
    for y in 0..height {
        for x in 0..width {
            binary.set(x, y, gray[y * width + x] < threshold);
        }
    }
    binary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_binarize() {
        let gray = vec![100, 150, 200, 50]; // 2x2 image
        let binary = threshold_binarize(&gray, 2, 2, 128);

        assert!(binary.get(0, 0));
        assert!(!binary.get(1, 0));
        assert!(!binary.get(0, 1));
        assert!(binary.get(1, 1));
    }

    #[test]
    fn test_otsu_binarize() {
        let mut gray = vec![50u8; 50]; // Dark class
        gray.extend(vec![200u8; 50]); // Light class

        let binary = otsu_binarize(&gray, 10, 10);

        assert!(binary.get(0, 0));
        assert!(!binary.get(0, 7));
    }

    #[test]
    fn test_adaptive_uniform_is_white() {
        let gray = vec![255u8; 20 * 20];
        assert_eq!(adaptive_binarize(&gray, 20, 20, 11, 2).count_set(), 0);
        let gray = vec![0u8; 20 * 20];
        assert_eq!(adaptive_binarize(&gray, 20, 20, 11, 2).count_set(), 0);
    }

    #[test]
    fn test_adaptive_marks_thin_dark_line() {
        // 3-px dark column on white
        let (w, h) = (21, 15);
        let mut gray = vec![255u8; w * h];
        for y in 0..h {
            for x in 9..12 {
                gray[y * w + x] = 0;
            }
        }
        let binary = adaptive_binarize(&gray, w, h, 11, 2);
        for y in 0..h {
            assert!(binary.get(10, y));
            assert!(!binary.get(2, y));
            assert!(!binary.get(12, y));
        }
    }

    #[test]
    fn test_adaptive_hollows_thick_shapes() {
        // 30x30 dark square on white: edges dark, centre white
        let (w, h) = (50, 50);
        let mut gray = vec![255u8; w * h];
        for y in 10..40 {
            for x in 10..40 {
                gray[y * w + x] = 0;
            }
        }
        let binary = adaptive_binarize(&gray, w, h, 11, 2);
        assert!(binary.get(10, 10));
        assert!(binary.get(39, 25));
        assert!(!binary.get(25, 25));
    }
}
