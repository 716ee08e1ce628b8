use crate::config::RecognizerConfig;
use crate::error::Result;
use crate::models::{BitMatrix, LuminanceMap, PixelGrid};
use crate::utils::binarization::binarize;
use crate::utils::grayscale::to_luminance;
use crate::utils::rotation::{Rotation, rotate_by};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Summary statistics for luminance data.
#[derive(Debug, Clone, Copy)]
pub struct GrayStats {
    /// Minimum luminance value.
    pub min: u8,
    /// Maximum luminance value.
    pub max: u8,
    /// Average luminance value.
    pub avg: u8,
}

/// Summary statistics for a binary matrix.
#[derive(Debug, Clone, Copy)]
pub struct BinaryStats {
    /// Count of dark pixels.
    pub black_pixels: usize,
    /// Total pixels in the matrix.
    pub total_pixels: usize,
    /// Ratio of dark pixels to total pixels.
    pub black_ratio: f64,
}

/// Per-rotation view of the preprocessing stages
#[derive(Debug, Clone, Copy)]
pub struct RotationStats {
    /// Rotation applied before preprocessing
    pub rotation: Rotation,
    /// Rotated width
    pub width: usize,
    /// Rotated height
    pub height: usize,
    /// Luminance summary
    pub gray: GrayStats,
    /// Binarized summary
    pub binary: BinaryStats,
}

/// Compute min/max/avg for a luminance map.
pub fn grayscale_stats(map: &LuminanceMap) -> GrayStats {
    let gray = map.as_bytes();
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
    BinaryStats {
        black_pixels: binary.count_set(),
        total_pixels: binary.width() * binary.height(),
        black_ratio: binary.dark_ratio(),
    }
}

/// Run the preprocessing stages at every rotation and summarize each.
///
/// Fails like the pipeline does when the image is too small to binarize.
pub fn rotation_stats(grid: &PixelGrid, config: &RecognizerConfig) -> Result<Vec<RotationStats>> {
    Rotation::ALL
        .iter()
        .map(|&rotation| {
            let rotated = rotate_by(grid, rotation);
            let luminance = to_luminance(&rotated);
            let bitmap = binarize(&luminance, config)?;
            Ok(RotationStats {
                rotation,
                width: rotated.width(),
                height: rotated.height(),
                gray: grayscale_stats(&luminance),
                binary: binary_stats(&bitmap),
            })
        })
        .collect()
}

/// Default dataset root from environment variables.
pub fn dataset_root_from_env() -> PathBuf {
    env::var("RECOGNIZER_DATASET_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("images"))
}

/// Iterate image paths under `root`, sorted, with an optional limit.
pub fn dataset_iter<P: AsRef<Path>>(root: P, limit: Option<usize>) -> impl Iterator<Item = PathBuf> {
    let mut images = collect_images(root.as_ref());
    images.sort();
    if let Some(limit) = limit {
        images.truncate(limit);
    }
    images.into_iter()
}

/// Expected text stored next to an image as `<name>.txt`, if present.
pub fn expected_text<P: AsRef<Path>>(image_path: P) -> Option<String> {
    let content = fs::read_to_string(image_path.as_ref().with_extension("txt")).ok()?;
    let trimmed = content.trim_end_matches(['\r', '\n']);
    Some(trimmed.to_string())
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEMP_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before UNIX epoch")
            .as_nanos();
        let sequence = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = env::temp_dir().join(format!("recognizer_tools_{nanos}_{sequence}"));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn dataset_iter_finds_nested_images_sorted() {
        let root = temp_dir();
        fs::create_dir_all(root.join("nested")).unwrap();
        fs::write(root.join("b.png"), b"").unwrap();
        fs::write(root.join("a.JPG"), b"").unwrap();
        fs::write(root.join("notes.txt"), b"").unwrap();
        fs::write(root.join("nested").join("c.bmp"), b"").unwrap();

        let all: Vec<PathBuf> = dataset_iter(&root, None).collect();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(dataset_iter(&root, Some(1)).count(), 1);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn expected_text_reads_sidecar() {
        let root = temp_dir();
        let image = root.join("code.png");
        fs::write(root.join("code.txt"), "hello\n").unwrap();
        assert_eq!(expected_text(&image).as_deref(), Some("hello"));
        assert_eq!(expected_text(root.join("missing.png")), None);
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn rotation_stats_swap_dimensions() {
        let grid = PixelGrid::from_rgba(16, 8, vec![255; 16 * 8 * 4]).unwrap();
        let stats = rotation_stats(&grid, &RecognizerConfig::default()).unwrap();
        assert_eq!(stats.len(), 4);
        assert_eq!((stats[1].width, stats[1].height), (8, 16));
        assert_eq!(stats[0].binary.black_pixels, 0);
        assert!(stats[0].gray.min >= 254);
    }
}
