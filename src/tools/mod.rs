use crate::capture::FrameSource;
use crate::decoder::DecodeConfig;
use crate::error::BarError;
use crate::models::BitMatrix;
use crate::pipeline::decode_frame;
use crate::utils::binarization::{adaptive_binarize, otsu_binarize};
use image::{GenericImageView, GrayImage};
use rayon::prelude::*;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn max_dim_from_env() -> Option<u32> {
    match env::var("BAR_MAX_DIM") {
        Ok(value) => match value.trim().parse::<u32>() {
            Ok(0) => None,
            Ok(v) => Some(v),
            Err(_) => None,
        },
        Err(_) => None,
    }
}

/// Load an image as 8-bit grayscale.
///
/// Inputs larger than `BAR_MAX_DIM` on their longest side are downscaled first.
pub fn load_gray<P: AsRef<Path>>(path: P) -> Result<GrayImage, image::ImageError> {
    let img = image::open(path)?;
    let gray = match max_dim_from_env() {
        Some(max_dim) if img.dimensions().0.max(img.dimensions().1) > max_dim => img
            .resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
            .to_luma8(),
        _ => img.to_luma8(),
    };
    Ok(gray)
}

/// Write a grayscale image; the format follows the file extension.
pub fn save_png<P: AsRef<Path>>(image: &GrayImage, path: P) -> Result<(), image::ImageError> {
    image.save(path)
}

/// Binarize a grayscale image the way the locator does on its first pass.
pub fn binarize(gray: &GrayImage, config: &DecodeConfig) -> BitMatrix {
    adaptive_binarize(
        gray.as_raw(),
        gray.width() as usize,
        gray.height() as usize,
        config.locator_block,
        config.locator_offset,
    )
}

/// Binarize a grayscale image using Otsu's method.
pub fn binarize_otsu(gray: &GrayImage) -> BitMatrix {
    otsu_binarize(gray.as_raw(), gray.width() as usize, gray.height() as usize)
}

/// Summary statistics for grayscale data.
#[derive(Debug, Clone, Copy)]
pub struct GrayStats {
    /// Minimum grayscale value.
    pub min: u8,
    /// Maximum grayscale value.
    pub max: u8,
    /// Average grayscale value.
    pub avg: u8,
}

/// Summary statistics for a binary matrix.
#[derive(Debug, Clone, Copy)]
pub struct BinaryStats {
    /// Count of dark pixels.
    pub dark_pixels: usize,
    /// Total pixels in the matrix.
    pub total_pixels: usize,
    /// Ratio of dark pixels to total pixels.
    pub dark_ratio: f64,
}

/// Compute min/max/avg for grayscale values.
pub fn grayscale_stats(gray: &[u8]) -> GrayStats {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    for &v in gray {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
    }
    let avg = if gray.is_empty() {
        0
    } else {
        (sum / gray.len() as u64) as u8
    };
    GrayStats { min, max, avg }
}

/// Compute dark pixel stats for a binary matrix.
pub fn binary_stats(binary: &BitMatrix) -> BinaryStats {
    let dark = binary.count_set();
    let total = binary.width() * binary.height();
    let ratio = if total == 0 {
        0.0
    } else {
        dark as f64 / total as f64
    };
    BinaryStats {
        dark_pixels: dark,
        total_pixels: total,
        dark_ratio: ratio,
    }
}

/// Default dataset root from environment variables.
pub fn dataset_root_from_env() -> PathBuf {
    env::var("BAR_DATASET_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("benches/images"))
}

/// Iterate image paths under `root` in sorted order, optionally limited.
pub fn dataset_iter<P: AsRef<Path>>(root: P, limit: Option<usize>) -> impl Iterator<Item = PathBuf> {
    let mut images = collect_images(root.as_ref());
    images.sort();
    if let Some(limit) = limit {
        images.truncate(limit);
    }
    images.into_iter()
}

fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if ext == "png" || ext == "jpg" || ext == "jpeg" || ext == "gif" || ext == "bmp" {
                    images.push(path);
                }
            }
        }
    }

    images
}

/// Frames read from image files in sorted path order; stands in for a camera.
#[derive(Debug, Clone)]
pub struct ImageSequenceSource {
    paths: std::vec::IntoIter<PathBuf>,
}

impl ImageSequenceSource {
    /// Every image under `dir`, at most `limit` of them
    pub fn from_dir<P: AsRef<Path>>(dir: P, limit: Option<usize>) -> Self {
        Self::from_paths(dataset_iter(dir, limit).collect())
    }

    /// The given files, in order
    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            paths: paths.into_iter(),
        }
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<Option<GrayImage>, BarError> {
        match self.paths.next() {
            Some(path) => load_gray(&path)
                .map(Some)
                .map_err(|e| BarError::Capture(format!("{}: {}", path.display(), e))),
            None => Ok(None),
        }
    }
}

/// Outcome for one file of a batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    /// Input file
    pub path: PathBuf,
    /// Decoded text or the reason it failed
    pub result: Result<String, BarError>,
}

/// Decode many image files in parallel; results keep the input order.
pub fn decode_batch(paths: &[PathBuf], config: &DecodeConfig) -> Vec<BatchEntry> {
    paths
        .par_iter()
        .map(|path| {
            let result = load_gray(path)
                .map_err(|e| BarError::Capture(e.to_string()))
                .and_then(|gray| decode_frame(&gray, config));
            BatchEntry {
                path: path.clone(),
                result,
            }
        })
        .collect()
}
