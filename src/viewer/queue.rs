// Frame queue - Per-cycle collection of submitted images
//
// The queue accumulates (label, frame) pairs between render cycles and is
// drained in full by every cycle. Submission and draining happen on the
// same thread, so the queue is empty at the start of every cycle by
// construction and needs no locking.

use crate::image::ImageFrame;

/// One (label, frame) pair submitted for display in the current cycle
#[derive(Debug, Clone)]
pub struct FrameEntry {
    /// Window title for this frame
    pub label: String,

    /// The image to display
    pub frame: ImageFrame,
}

/// Ordered, per-cycle collection of submitted frames
///
/// Unlabeled submissions are titled `image:<n>` where `n` counts only the
/// unlabeled submissions of the current cycle, so mixing labeled and
/// unlabeled submissions can neither duplicate nor skip auto-labels. The
/// counter resets when the queue is drained.
#[derive(Debug, Default)]
pub struct FrameQueue {
    entries: Vec<FrameEntry>,
    unlabeled: usize,
}

impl FrameQueue {
    /// Create an empty frame queue
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            unlabeled: 0,
        }
    }

    /// Append a frame with an explicit label
    ///
    /// Labels are not deduplicated; two entries may share a label and will
    /// produce two windows with the same title.
    pub fn submit_labeled<S: Into<String>>(&mut self, label: S, frame: &ImageFrame) {
        self.entries.push(FrameEntry {
            label: label.into(),
            frame: frame.clone(),
        });
    }

    /// Append a frame with an auto-generated label
    pub fn submit(&mut self, frame: &ImageFrame) {
        let label = format!("image:{}", self.unlabeled);
        self.unlabeled += 1;
        self.submit_labeled(label, frame);
    }

    /// Take the full ordered sequence of entries, clearing the queue
    pub fn drain(&mut self) -> Vec<FrameEntry> {
        self.unlabeled = 0;
        std::mem::take(&mut self.entries)
    }

    /// Number of entries currently queued
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_frame() -> ImageFrame {
        ImageFrame::from_bgr(4, 4, vec![0; 4 * 4 * 3]).unwrap()
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = FrameQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.drain().len(), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_submission_order_preserved() {
        let frame = black_frame();
        let mut queue = FrameQueue::new();
        queue.submit_labeled("first", &frame);
        queue.submit_labeled("second", &frame);
        queue.submit_labeled("third", &frame);

        let entries = queue.drain();
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_drain_clears_queue() {
        let frame = black_frame();
        let mut queue = FrameQueue::new();
        queue.submit(&frame);
        queue.submit(&frame);
        assert_eq!(queue.len(), 2);

        queue.drain();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_auto_labels_count_unlabeled_only() {
        let frame = black_frame();
        let mut queue = FrameQueue::new();
        queue.submit(&frame);
        queue.submit_labeled("named", &frame);
        queue.submit(&frame);

        let entries = queue.drain();
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["image:0", "named", "image:1"]);
    }

    #[test]
    fn test_auto_label_counter_resets_per_cycle() {
        let frame = black_frame();
        let mut queue = FrameQueue::new();

        queue.submit(&frame);
        let first_cycle = queue.drain();
        assert_eq!(first_cycle[0].label, "image:0");

        queue.submit(&frame);
        let second_cycle = queue.drain();
        assert_eq!(second_cycle[0].label, "image:0");
    }

    #[test]
    fn test_duplicate_labels_are_kept() {
        let frame = black_frame();
        let mut queue = FrameQueue::new();
        queue.submit_labeled("same", &frame);
        queue.submit_labeled("same", &frame);

        let entries = queue.drain();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].label, "same");
        assert_eq!(entries[1].label, "same");
    }

    #[test]
    fn test_submission_shares_pixels() {
        let frame = black_frame();
        let mut queue = FrameQueue::new();
        queue.submit_labeled("shared", &frame);

        let entries = queue.drain();
        assert!(std::ptr::eq(frame.as_bgr(), entries[0].frame.as_bgr()));
    }
}
