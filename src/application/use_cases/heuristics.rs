// ============================================================
// IMAGE SIGNAL HEURISTICS (STAGE 1)
// ============================================================
// Seven numeric signals extracted from a 200x200 downsample,
// fed to an ordered rule list. First matching rule wins.

use std::collections::HashSet;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, RgbImage};

use crate::domain::classification::{ClassificationResult, ImageLabel, ImageSignals};

/// Analysis frame edge length
pub const FRAME_SIZE: u32 = 200;

/// Confidence of the fallback label; deliberately low to mark
/// uncertainty for the stage-2 cascade
pub const FALLBACK_CONFIDENCE: u8 = 55;

const WHITE_THRESHOLD: u8 = 230;
const LIGHT_THRESHOLD: u8 = 210;
const EDGE_THRESHOLD: u8 = 30;
const BLOCK_SIZE: u32 = 20;
const BLOCK_ACTIVE_EDGE_COUNT: u32 = 40;

/// 3x3 edge kernel (discrete Laplacian)
const EDGE_KERNEL: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0];

/// Extract all seven signals from one image
pub fn analyze(image: &DynamicImage) -> ImageSignals {
    let small: RgbImage = image
        .resize_exact(FRAME_SIZE, FRAME_SIZE, FilterType::Lanczos3)
        .to_rgb8();
    let total = (FRAME_SIZE * FRAME_SIZE) as f32;

    let mut white = 0u32;
    let mut light = 0u32;
    let mut buckets: HashSet<(u8, u8, u8)> = HashSet::new();
    for pixel in small.pixels() {
        let [r, g, b] = pixel.0;
        if r > WHITE_THRESHOLD && g > WHITE_THRESHOLD && b > WHITE_THRESHOLD {
            white += 1;
        }
        if r > LIGHT_THRESHOLD && g > LIGHT_THRESHOLD && b > LIGHT_THRESHOLD {
            light += 1;
        }
        // 8 bins per channel, 512 possible buckets
        buckets.insert((r / 32, g / 32, b / 32));
    }

    let gray: GrayImage = imageops::grayscale(&small);
    let edges = imageops::filter3x3(&gray, &EDGE_KERNEL);

    let edge_count = edges
        .pixels()
        .filter(|p| p.0[0] > EDGE_THRESHOLD)
        .count() as f32;

    // 10x10 grid of 20x20 blocks; a block is "active" when it holds
    // enough edge pixels to look like text or dense line work.
    let mut text_blocks = 0usize;
    for block_y in 0..(FRAME_SIZE / BLOCK_SIZE) {
        for block_x in 0..(FRAME_SIZE / BLOCK_SIZE) {
            let mut count = 0u32;
            for y in (block_y * BLOCK_SIZE)..((block_y + 1) * BLOCK_SIZE) {
                for x in (block_x * BLOCK_SIZE)..((block_x + 1) * BLOCK_SIZE) {
                    if edges.get_pixel(x, y).0[0] > EDGE_THRESHOLD {
                        count += 1;
                    }
                }
            }
            if count > BLOCK_ACTIVE_EDGE_COUNT {
                text_blocks += 1;
            }
        }
    }

    // Inner 50% region brightness vs the full frame
    let quarter = FRAME_SIZE / 4;
    let mut center_light = 0u32;
    for y in quarter..(FRAME_SIZE - quarter) {
        for x in quarter..(FRAME_SIZE - quarter) {
            let [r, g, b] = small.get_pixel(x, y).0;
            if r > LIGHT_THRESHOLD && g > LIGHT_THRESHOLD && b > LIGHT_THRESHOLD {
                center_light += 1;
            }
        }
    }
    let center_total = ((FRAME_SIZE / 2) * (FRAME_SIZE / 2)) as f32;

    let mean = gray.pixels().map(|p| p.0[0] as f32).sum::<f32>() / total;
    let variance = gray
        .pixels()
        .map(|p| {
            let d = p.0[0] as f32 - mean;
            d * d
        })
        .sum::<f32>()
        / total;

    ImageSignals {
        white_pct: white as f32 / total * 100.0,
        light_pct: light as f32 / total * 100.0,
        color_buckets: buckets.len(),
        edge_pct: edge_count / total * 100.0,
        text_blocks,
        center_light_pct: center_light as f32 / center_total * 100.0,
        gray_std: variance.sqrt(),
    }
}

/// One branch of the ordered decision list
pub struct DecisionRule {
    pub name: &'static str,
    pub label: ImageLabel,
    pub confidence: u8,
    pub applies: fn(&ImageSignals) -> bool,
}

fn is_swatch(s: &ImageSignals) -> bool {
    // Almost no detail, tiny palette, not predominantly white
    s.color_buckets <= 4 && s.gray_std < 20.0 && s.white_pct < 75.0
}

fn is_main_product(s: &ImageSignals) -> bool {
    // Light surround, darker centre (the object), few text blocks
    s.light_pct > 55.0 && s.center_light_pct < 45.0 && s.text_blocks < 25
}

fn is_dimension(s: &ImageSignals) -> bool {
    // Near-white bg, limited palette, geometric edges. Checked before
    // informational: dimension drawings also carry text blocks.
    s.light_pct > 75.0 && s.color_buckets < 18 && s.edge_pct > 6.0 && s.text_blocks > 10
}

fn is_informational(s: &ImageSignals) -> bool {
    // Many text blocks on a light background
    s.text_blocks > 35 && s.light_pct > 40.0
}

fn is_lifestyle(s: &ImageSignals) -> bool {
    // Dark colourful scene with real-photo complexity
    s.light_pct < 30.0 && s.color_buckets > 15 && s.gray_std > 30.0
}

/// Evaluated top to bottom; order is load-bearing
pub static DECISION_RULES: [DecisionRule; 5] = [
    DecisionRule {
        name: "swatch",
        label: ImageLabel::Swatch,
        confidence: 90,
        applies: is_swatch,
    },
    DecisionRule {
        name: "main_product",
        label: ImageLabel::MainProductImage,
        confidence: 88,
        applies: is_main_product,
    },
    DecisionRule {
        name: "dimension",
        label: ImageLabel::Dimension,
        confidence: 75,
        applies: is_dimension,
    },
    DecisionRule {
        name: "informational",
        label: ImageLabel::Informational,
        confidence: 82,
        applies: is_informational,
    },
    DecisionRule {
        name: "lifestyle",
        label: ImageLabel::Lifestyle,
        confidence: 78,
        applies: is_lifestyle,
    },
];

/// First matching rule wins; no match falls back to a low-confidence
/// `detail` so the cascade knows to escalate.
pub fn classify_signals(signals: &ImageSignals) -> (ImageLabel, u8) {
    for rule in &DECISION_RULES {
        if (rule.applies)(signals) {
            return (rule.label, rule.confidence);
        }
    }
    (ImageLabel::Detail, FALLBACK_CONFIDENCE)
}

/// Stage 1 in one call
pub fn classify_heuristic(image: &DynamicImage) -> ClassificationResult {
    let signals = analyze(image);
    let (label, confidence) = classify_signals(&signals);
    ClassificationResult::heuristic(label, confidence, signals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classification::ClassificationStage;
    use image::Rgb;

    /// Flat three-band swatch in close shades of one hue
    fn swatch_image() -> DynamicImage {
        let shades = [
            Rgb([100u8, 70, 40]),
            Rgb([110, 75, 45]),
            Rgb([120, 85, 55]),
        ];
        let img = RgbImage::from_fn(200, 200, |_, y| shades[(y / 67).min(2) as usize]);
        DynamicImage::ImageRgb8(img)
    }

    /// Bright surround with a dark centred object
    fn product_on_white() -> DynamicImage {
        let img = RgbImage::from_fn(200, 200, |x, y| {
            if (60..140).contains(&x) && (60..140).contains(&y) {
                Rgb([60u8, 60, 60])
            } else {
                Rgb([245, 245, 245])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    /// White sheet with a sparse black measurement grid
    fn technical_drawing() -> DynamicImage {
        let img = RgbImage::from_fn(200, 200, |x, y| {
            if x % 25 == 0 || y % 25 == 0 {
                Rgb([0u8, 0, 0])
            } else {
                Rgb([250, 250, 250])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    /// Dense dark strokes on a light ground plus a colourful strip
    fn infographic() -> DynamicImage {
        let img = RgbImage::from_fn(200, 200, |x, y| {
            if y < 10 {
                let i = (x / 10) as u8 % 18;
                Rgb([16 + 32 * (i % 8), 16 + 32 * (i / 8), 16])
            } else if y % 4 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([220, 220, 220])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    /// Dark colour-rich pattern
    fn lifestyle_scene() -> DynamicImage {
        let img = RgbImage::from_fn(200, 200, |x, y| {
            Rgb([
                ((x * 7 + y * 13) % 200) as u8,
                ((x * 11 + y * 3) % 180) as u8,
                ((y * 17 + x * 5) % 160) as u8,
            ])
        });
        DynamicImage::ImageRgb8(img)
    }

    /// Two mid-tone halves: matches nothing on the rule list
    fn ambiguous_image() -> DynamicImage {
        let img = RgbImage::from_fn(200, 200, |x, _| {
            if x < 100 {
                Rgb([150u8, 150, 150])
            } else {
                Rgb([100, 100, 100])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_flat_swatch_classifies_with_high_confidence() {
        let result = classify_heuristic(&swatch_image());
        assert_eq!(result.label, ImageLabel::Swatch);
        assert_eq!(result.stage, ClassificationStage::Heuristic);
        assert!(result.confidence >= 85);
    }

    #[test]
    fn test_product_on_white_is_main() {
        let result = classify_heuristic(&product_on_white());
        assert_eq!(result.label, ImageLabel::MainProductImage);
        assert_eq!(result.confidence, 88);
    }

    #[test]
    fn test_dimension_checked_before_informational() {
        // The grid has plenty of text blocks; the whiter, sparser
        // dimension signature must still win by rule order.
        let signals = analyze(&technical_drawing());
        assert!(signals.text_blocks > 10);
        let (label, confidence) = classify_signals(&signals);
        assert_eq!(label, ImageLabel::Dimension);
        assert_eq!(confidence, 75);
    }

    #[test]
    fn test_dense_text_blocks_classify_informational() {
        let signals = analyze(&infographic());
        let (label, confidence) = classify_signals(&signals);
        assert_eq!(label, ImageLabel::Informational);
        assert_eq!(confidence, 82);
    }

    #[test]
    fn test_dark_complex_scene_is_lifestyle() {
        let result = classify_heuristic(&lifestyle_scene());
        assert_eq!(result.label, ImageLabel::Lifestyle);
    }

    #[test]
    fn test_ambiguous_image_falls_back_uncertain() {
        let result = classify_heuristic(&ambiguous_image());
        assert_eq!(result.label, ImageLabel::Detail);
        assert_eq!(result.confidence, FALLBACK_CONFIDENCE);
    }

    #[test]
    fn test_signals_are_recorded() {
        let result = classify_heuristic(&swatch_image());
        let signals = result.signals.expect("stage 1 retains its measurements");
        assert!(signals.color_buckets <= 4);
        assert!(signals.gray_std < 20.0);
    }

    #[test]
    fn test_analyze_handles_non_square_input() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(37, 353, Rgb([245, 245, 245])));
        let signals = analyze(&img);
        assert!(signals.white_pct > 95.0);
        assert_eq!(signals.text_blocks, 0);
    }
}
