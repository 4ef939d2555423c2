// Frame pipeline integration tests
//
// Exercises the submission queue and image frame layer together, covering
// the drain/clear and labeling invariants of the render cycle. The GPU
// half of the pipeline needs a live window and device, so it is not
// driven here; texture release is enforced structurally by move semantics.

use vidview_rs::image::ImageFrame;
use vidview_rs::viewer::FrameQueue;

fn black_frame(width: u32, height: u32) -> ImageFrame {
    let size = width as usize * height as usize * 3;
    ImageFrame::from_bgr(width, height, vec![0; size]).unwrap()
}

#[test]
fn drain_returns_all_entries_and_clears() {
    let mut queue = FrameQueue::new();
    for n in 0..5 {
        queue.submit_labeled(format!("frame-{}", n), &black_frame(8, 8));
    }
    assert_eq!(queue.len(), 5);

    let entries = queue.drain();
    assert_eq!(entries.len(), 5);
    assert!(queue.is_empty());

    // A second drain yields nothing
    assert!(queue.drain().is_empty());
}

#[test]
fn labeled_black_frame_scenario() {
    // Submit one 4x4 all-black image labeled "half" and run the CPU half
    // of a cycle: exactly one entry with that label, queue empty afterwards
    let frame = black_frame(4, 4);
    let mut queue = FrameQueue::new();
    queue.submit_labeled("half", &frame);

    let entries = queue.drain();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].label, "half");
    assert_eq!(entries[0].frame.dimensions(), (4, 4));
    assert!(queue.is_empty());

    // The upload conversion produces opaque black pixels
    let rgba = entries[0].frame.to_rgba_vec();
    for pixel in rgba.chunks_exact(4) {
        assert_eq!(pixel, &[0, 0, 0, 0xFF]);
    }
}

#[test]
fn unlabeled_auto_labels_reset_each_cycle() {
    let frame = black_frame(2, 2);
    let mut queue = FrameQueue::new();

    // Two consecutive cycles each submit one unlabeled frame
    for _ in 0..2 {
        queue.submit(&frame);
        let entries = queue.drain();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "image:0");
        assert!(queue.is_empty());
    }
}

#[test]
fn interleaved_submissions_keep_deterministic_labels() {
    let frame = black_frame(2, 2);
    let mut queue = FrameQueue::new();

    queue.submit(&frame);
    queue.submit_labeled("overlay", &frame);
    queue.submit(&frame);
    queue.submit_labeled("overlay", &frame);
    queue.submit(&frame);

    let labels: Vec<String> = queue.drain().into_iter().map(|e| e.label).collect();
    assert_eq!(
        labels,
        vec!["image:0", "overlay", "image:1", "overlay", "image:2"]
    );
}

#[test]
fn large_submission_count_is_unbounded() {
    let frame = black_frame(2, 2);
    let mut queue = FrameQueue::new();
    for _ in 0..1000 {
        queue.submit(&frame);
    }
    assert_eq!(queue.len(), 1000);

    let entries = queue.drain();
    assert_eq!(entries.len(), 1000);
    assert_eq!(entries[999].label, "image:999");
}
