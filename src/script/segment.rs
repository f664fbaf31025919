//! Narrative segmentation under a total-duration budget.
//!
//! The word sequence is split into contiguous chunks of near-equal size, with
//! cuts pulled onto nearby sentence ends. Each chunk gets a reading-time duration clamped to the clip bounds, and the
//! durations are then nudged one second at a time, round-robin, until their
//! sum is within tolerance of the requested total or no clip can move.

use tracing::{trace, warn};

use super::model::DEFAULT_DURATION_SEC;

/// Upper bound on the requested total, in seconds.
pub const MAX_TOTAL_DURATION_SEC: u32 = 600;

/// A slice of narrative with its clip duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub duration_sec: u32,
}

/// Tunables for [`segment_narrative`].
#[derive(Debug, Clone, PartialEq)]
pub struct SegmenterConfig {
    pub min_clip_sec: u32,
    pub max_clip_sec: u32,
    /// Reading rate used to estimate a chunk's duration.
    pub words_per_second: f64,
    /// Chunks are not made smaller than this while the text allows.
    pub min_words_per_clip: usize,
    /// Target seconds per clip when estimating the clip count.
    pub seconds_per_clip: f64,
    /// Allowed gap between the duration sum and the requested total.
    pub tolerance_sec: u32,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_clip_sec: 3,
            max_clip_sec: 6,
            words_per_second: 2.5,
            min_words_per_clip: 8,
            seconds_per_clip: 3.5,
            tolerance_sec: 1,
        }
    }
}

impl SegmenterConfig {
    /// Builder: Set clip bounds.
    pub fn with_clip_bounds(mut self, min_sec: u32, max_sec: u32) -> Self {
        self.min_clip_sec = min_sec;
        self.max_clip_sec = max_sec;
        self
    }

    /// Builder: Set reading rate.
    pub fn with_words_per_second(mut self, rate: f64) -> Self {
        self.words_per_second = rate;
        self
    }

    /// Builder: Set tolerance.
    pub fn with_tolerance(mut self, tolerance_sec: u32) -> Self {
        self.tolerance_sec = tolerance_sec;
        self
    }

    /// Returns a copy with unusable values replaced by defaults.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let min_clip_sec = self.min_clip_sec.max(1);
        let max_clip_sec = self.max_clip_sec.max(min_clip_sec);
        let positive = |v: f64, d: f64| if v.is_finite() && v > 0.0 { v } else { d };
        Self {
            min_clip_sec,
            max_clip_sec,
            words_per_second: positive(self.words_per_second, defaults.words_per_second),
            min_words_per_clip: self.min_words_per_clip.max(1),
            seconds_per_clip: positive(self.seconds_per_clip, defaults.seconds_per_clip),
            tolerance_sec: self.tolerance_sec,
        }
    }

    fn clamp_clip(&self, seconds: u32) -> u32 {
        seconds.clamp(self.min_clip_sec, self.max_clip_sec)
    }
}

/// Collapses whitespace runs to single spaces and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Converts a caller-supplied duration to whole seconds in `0..=MAX_TOTAL_DURATION_SEC`.
pub fn sanitize_total_duration(total_sec: f64) -> u32 {
    if !total_sec.is_finite() {
        warn!(total_sec, "non-finite duration, using default");
        return DEFAULT_DURATION_SEC as u32;
    }
    let rounded = total_sec.round();
    if rounded < 0.0 || rounded > MAX_TOTAL_DURATION_SEC as f64 {
        warn!(total_sec, "duration out of range, clamping");
    }
    rounded.clamp(0.0, MAX_TOTAL_DURATION_SEC as f64) as u32
}

/// Splits `text` into timed segments. Never returns an empty vector.
pub fn segment_narrative(text: &str, total_sec: f64, config: &SegmenterConfig) -> Vec<Segment> {
    let config = config.sanitized();
    let total = sanitize_total_duration(total_sec);
    let normalized = normalize_whitespace(text);

    if normalized.is_empty() {
        return vec![Segment {
            text: String::new(),
            duration_sec: config.clamp_clip(total),
        }];
    }

    let words: Vec<&str> = normalized.split(' ').collect();
    let clip_count = target_clip_count(total, words.len(), &config);

    let mut segments: Vec<Segment> = chunk_words(&words, clip_count)
        .into_iter()
        .map(|chunk| {
            let estimate = (chunk.len() as f64 / config.words_per_second).round() as u32;
            Segment {
                text: chunk.join(" "),
                duration_sec: config.clamp_clip(estimate),
            }
        })
        .collect();

    reconcile_durations(&mut segments, total, &config);
    segments
}

fn target_clip_count(total: u32, word_count: usize, config: &SegmenterConfig) -> usize {
    let by_duration = ((total as f64 / config.seconds_per_clip).round() as usize).max(1);
    let by_words = (word_count / config.min_words_per_clip).max(1);
    by_duration.min(by_words)
}

/// Contiguous chunks of near-equal size, larger chunks first. Each cut moves
/// to the nearest sentence end within half a chunk, earlier cut on ties.
fn chunk_words<'a>(words: &[&'a str], count: usize) -> Vec<Vec<&'a str>> {
    let count = count.clamp(1, words.len().max(1));
    let base = words.len() / count;
    let extra = words.len() % count;
    let window = base.div_ceil(2);

    let mut cuts = Vec::with_capacity(count);
    let mut ideal = 0;
    let mut prev = 0;
    for i in 0..count - 1 {
        ideal += base + usize::from(i < extra);
        // Leave at least one word for every later chunk.
        let upper = words.len() - (count - 1 - i);
        let cut = nearest_sentence_cut(words, ideal, window, prev + 1, upper);
        cuts.push(cut);
        prev = cut;
    }
    cuts.push(words.len());

    let mut start = 0;
    cuts.into_iter()
        .map(|end| {
            let chunk = words[start..end].to_vec();
            start = end;
            chunk
        })
        .collect()
}

/// A cut at `pos` ends the chunk after `words[pos - 1]`.
fn nearest_sentence_cut(words: &[&str], ideal: usize, window: usize, lower: usize, upper: usize) -> usize {
    let ideal = ideal.clamp(lower, upper);
    for distance in 0..=window {
        let candidates = [ideal.checked_sub(distance), Some(ideal + distance)];
        for pos in candidates.into_iter().flatten() {
            if (lower..=upper).contains(&pos) && ends_sentence(words[pos - 1]) {
                return pos;
            }
        }
    }
    ideal
}

fn ends_sentence(word: &str) -> bool {
    word.trim_end_matches(['"', '\'', ')', '»', '”'])
        .ends_with(['.', '!', '?', '…'])
}

fn reconcile_durations(segments: &mut [Segment], total: u32, config: &SegmenterConfig) {
    let mut sum: u32 = segments.iter().map(|s| s.duration_sec).sum();

    while sum > total + config.tolerance_sec {
        let mut moved = false;
        for seg in segments.iter_mut() {
            if sum <= total + config.tolerance_sec {
                break;
            }
            if seg.duration_sec > config.min_clip_sec {
                seg.duration_sec -= 1;
                sum -= 1;
                moved = true;
            }
        }
        trace!(sum, total, "trimmed clip durations");
        if !moved {
            break;
        }
    }

    while sum + config.tolerance_sec < total {
        let mut moved = false;
        for seg in segments.iter_mut() {
            if sum + config.tolerance_sec >= total {
                break;
            }
            if seg.duration_sec < config.max_clip_sec {
                seg.duration_sec += 1;
                sum += 1;
                moved = true;
            }
        }
        trace!(sum, total, "extended clip durations");
        if !moved {
            break;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
