//! Word-cloud layout: greedy placement along a fixed set of angles.
//!
//! Words are processed largest first.  Each word walks outward from the
//! canvas centre in radius steps along the current angle; every few steps
//! without success the shared angle cursor advances.  A candidate is
//! accepted when its centre is at least the average of the two sizes away
//! from every placed centre.  Words that find no spot within the radius
//! ceiling are dropped.
//!
//! The layout is a fold: [`CloudLayout::place`] takes one word and the
//! placements so far and returns the new placement (if any).  Nothing here
//! knows about the rendering surface; coordinates are relative to the
//! canvas centre.

use super::model::AnalysisResult;

/// How many of the most frequent words the cloud considers.
pub const MAX_CLOUD_WORDS: usize = 50;
pub const MIN_SIZE: f64 = 10.0;
pub const MAX_SIZE: f64 = 50.0;
/// Candidate rotations, in the order they are tried.
pub const ANGLES: [i32; 5] = [0, 45, -45, 90, -90];
pub const RADIUS_STEP: f64 = 10.0;
/// No candidate is tried beyond this radius.
pub const MAX_RADIUS: f64 = 200.0;
/// Radius steps tried along one angle before moving to the next.
pub const STEPS_PER_ANGLE: u32 = 5;
/// Hover emphasis factor.
pub const EMPHASIS: f64 = 1.2;

/// A word ready for placement: its text, size, and original rank index.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudWord<'a> {
    pub text: &'a str,
    pub size: f64,
    pub index: usize,
}

/// A word that found a spot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord<'a> {
    pub text: &'a str,
    pub size: f64,
    pub x: f64,
    pub y: f64,
    /// Degrees; one of [`ANGLES`].
    pub angle: i32,
    /// Index in the original (pre-placement) order; drives the palette.
    pub index: usize,
}

impl PlacedWord<'_> {
    /// Palette slot for a 10-colour cyclic palette.
    pub fn color_index(&self) -> usize {
        self.index % 10
    }

    pub fn emphasised_size(&self) -> f64 {
        self.size * EMPHASIS
    }
}

/// `10 + count / max_count * 40`, i.e. a size in `[10, 50]`.
pub fn font_size(count: u64, max_count: u64) -> f64 {
    if max_count == 0 {
        return MIN_SIZE;
    }
    MIN_SIZE + (count as f64 / max_count as f64) * (MAX_SIZE - MIN_SIZE)
}

/// Size the top [`MAX_CLOUD_WORDS`] entries relative to the first one.
pub fn cloud_words(result: &AnalysisResult) -> Vec<CloudWord<'_>> {
    let Some(max_count) = result.max_count() else {
        return Vec::new();
    };
    result
        .frequencies
        .iter()
        .take(MAX_CLOUD_WORDS)
        .enumerate()
        .map(|(index, f)| CloudWord {
            text: &f.word,
            size: font_size(f.count, max_count),
            index,
        })
        .collect()
}

/// Minimum centre distance between two words.
pub fn overlap_threshold(size_a: f64, size_b: f64) -> f64 {
    (size_a + size_b) / 2.0
}

fn overlaps_any(x: f64, y: f64, size: f64, placed: &[PlacedWord<'_>]) -> bool {
    placed.iter().any(|p| {
        let (dx, dy) = (p.x - x, p.y - y);
        (dx * dx + dy * dy).sqrt() < overlap_threshold(size, p.size)
    })
}

/// Fold state: which angle the search is currently on.  The cursor carries
/// over from one word to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloudLayout {
    angle_cursor: usize,
}

impl CloudLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_angle(&self) -> i32 {
        ANGLES[self.angle_cursor % ANGLES.len()]
    }

    /// Search for a spot for `word` that clears everything in `placed`.
    pub fn place<'a>(
        &mut self,
        word: &CloudWord<'a>,
        placed: &[PlacedWord<'a>],
    ) -> Option<PlacedWord<'a>> {
        let mut step = 0u32;
        loop {
            step += 1;
            let radius = RADIUS_STEP * f64::from(step);
            if radius > MAX_RADIUS {
                return None;
            }

            let angle = self.current_angle();
            let radians = f64::from(angle).to_radians();
            let (x, y) = (radius * radians.cos(), radius * radians.sin());

            if !overlaps_any(x, y, word.size, placed) {
                return Some(PlacedWord {
                    text: word.text,
                    size: word.size,
                    x,
                    y,
                    angle,
                    index: word.index,
                });
            }

            if step % STEPS_PER_ANGLE == 0 {
                self.angle_cursor += 1;
            }
        }
    }
}

/// Place every word in order, dropping those that do not fit.
pub fn layout<'a>(words: &[CloudWord<'a>]) -> Vec<PlacedWord<'a>> {
    let mut cursor = CloudLayout::new();
    words.iter().fold(Vec::new(), |mut placed, word| {
        if let Some(p) = cursor.place(word, &placed) {
            placed.push(p);
        }
        placed
    })
}

/// Convenience: size and place the top words of a result.
pub fn layout_result(result: &AnalysisResult) -> Vec<PlacedWord<'_>> {
    layout(&cloud_words(result))
}
