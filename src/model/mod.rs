//! Step history shared by every puzzle
//!
//! A generator runs its algorithm once, up front, and records a [`Frame`] at
//! every observable point. The resulting [`StepModel`] is never patched; a
//! parameter change throws it away and builds a new one.
//!
//! - [`Frame`]: one immutable snapshot (narration, pseudocode lines, payload)
//! - [`StepModel`]: the ordered frame list, `frames[i].index() == i`
//! - [`StepRecorder`]: append-only builder that assigns indices
//! - [`Timeline`]: anything the playback controller can walk

use std::collections::BTreeSet;
use std::rc::Rc;

/// Snapshot of algorithm state at one step
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<P> {
    index: usize,
    narration: String,
    highlighted_lines: BTreeSet<usize>,
    payload: P,
}

impl<P> Frame<P> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn narration(&self) -> &str {
        &self.narration
    }

    /// 1-based line numbers into the algorithm's pseudocode listing
    pub fn highlighted_lines(&self) -> &BTreeSet<usize> {
        &self.highlighted_lines
    }

    pub fn is_highlighted(&self, line: usize) -> bool {
        self.highlighted_lines.contains(&line)
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }
}

/// Ordered, non-empty frame history produced by a generator
#[derive(Debug, Clone, PartialEq)]
pub struct StepModel<P> {
    frames: Vec<Frame<P>>,
}

impl<P> StepModel<P> {
    /// Start recording a new model
    pub fn recorder() -> StepRecorder<P> {
        StepRecorder { frames: Vec::new() }
    }

    /// Get a frame by index
    pub fn get(&self, index: usize) -> Option<&Frame<P>> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[Frame<P>] {
        &self.frames
    }

    /// Number of frames (always at least one)
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn first(&self) -> &Frame<P> {
        &self.frames[0]
    }

    pub fn last(&self) -> &Frame<P> {
        &self.frames[self.frames.len() - 1]
    }

    /// Frame at `index`, clamped to the last frame
    pub fn at(&self, index: usize) -> &Frame<P> {
        &self.frames[index.min(self.frames.len() - 1)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame<P>> {
        self.frames.iter()
    }
}

/// Append-only frame builder
#[derive(Debug)]
pub struct StepRecorder<P> {
    frames: Vec<Frame<P>>,
}

impl<P> StepRecorder<P> {
    /// Append a frame; its index is its position
    pub fn push(&mut self, narration: impl Into<String>, lines: &[usize], payload: P) {
        let index = self.frames.len();
        self.frames.push(Frame {
            index,
            narration: narration.into(),
            highlighted_lines: lines.iter().copied().collect(),
            payload,
        });
    }

    /// Number of frames recorded so far
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Payload of the most recent frame
    pub fn last_payload(&self) -> Option<&P> {
        self.frames.last().map(|f| &f.payload)
    }

    /// Seal the history.
    ///
    /// Every generator records an initial frame, so an empty recorder is a
    /// generator bug.
    pub fn finish(self) -> StepModel<P> {
        assert!(
            !self.frames.is_empty(),
            "step generator produced no frames"
        );
        StepModel {
            frames: self.frames,
        }
    }
}

/// A finite, indexable history the playback controller can walk
pub trait Timeline {
    /// Number of frames; the last valid cursor is `frame_count() - 1`
    fn frame_count(&self) -> usize;

    fn last_index(&self) -> usize {
        self.frame_count().saturating_sub(1)
    }
}

impl<P> Timeline for StepModel<P> {
    fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl<T: Timeline + ?Sized> Timeline for Rc<T> {
    fn frame_count(&self) -> usize {
        (**self).frame_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_match_positions() {
        let mut rec = StepModel::recorder();
        rec.push("start", &[1], 'a');
        rec.push("middle", &[2, 3], 'b');
        rec.push("end", &[], 'c');
        let model = rec.finish();

        assert_eq!(model.len(), 3);
        for (i, frame) in model.iter().enumerate() {
            assert_eq!(frame.index(), i);
        }
        assert!(model.get(1).is_some_and(|f| f.is_highlighted(3)));
        assert_eq!(model.last().payload(), &'c');
        assert_eq!(model.frame_count(), 3);
        assert_eq!(model.last_index(), 2);
    }

    #[test]
    fn test_at_clamps_to_last_frame() {
        let mut rec = StepModel::recorder();
        rec.push("only", &[], ());
        let model = rec.finish();

        assert_eq!(model.at(10).index(), 0);
        assert_eq!(model.first().narration(), "only");
    }

    #[test]
    #[should_panic(expected = "no frames")]
    fn test_empty_recorder_is_a_defect() {
        let rec: StepRecorder<()> = StepModel::recorder();
        let _ = rec.finish();
    }
}
