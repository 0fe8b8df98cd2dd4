use super::{Direction, LayoutRect, SplitTree};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

fn rect_approx(r: LayoutRect, x: f32, y: f32, w: f32, h: f32) -> bool {
    approx(r.x, x) && approx(r.y, y) && approx(r.width, w) && approx(r.height, h)
}

#[test]
fn single_leaf_tree() {
    let tree = SplitTree::new("p1");
    assert_eq!(tree.leaf_count(), 1);
    assert_eq!(*tree.active_payload(), "p1");
    let layout = tree.layout();
    assert_eq!(layout.len(), 1);
    assert!(rect_approx(layout[0].1, 0.0, 0.0, 1.0, 1.0));
}

#[test]
fn split_makes_new_leaf_active() {
    let mut tree = SplitTree::new("p1");
    tree.split_active(Direction::Vertical, "p2");
    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(*tree.active_payload(), "p2");
    // In-order keeps the pre-existing pane first.
    let leaves = tree.leaves();
    assert_eq!(*tree.payload(leaves[0]).unwrap(), "p1");
    assert_eq!(*tree.payload(leaves[1]).unwrap(), "p2");
}

#[test]
fn vertical_split_places_children_side_by_side() {
    let mut tree = SplitTree::new("p1");
    tree.split_active(Direction::Vertical, "p2");
    let layout = tree.layout();
    assert!(rect_approx(layout[0].1, 0.0, 0.0, 0.5, 1.0));
    assert!(rect_approx(layout[1].1, 0.5, 0.0, 0.5, 1.0));
}

#[test]
fn horizontal_split_stacks_children() {
    let mut tree = SplitTree::new("p1");
    tree.split_active(Direction::Horizontal, "p2");
    let layout = tree.layout();
    assert!(rect_approx(layout[0].1, 0.0, 0.0, 1.0, 0.5));
    assert!(rect_approx(layout[1].1, 0.0, 0.5, 1.0, 0.5));
}

#[test]
fn nested_split_layout() {
    let mut tree = SplitTree::new("p1");
    tree.split_active(Direction::Vertical, "p2");
    tree.split_active(Direction::Horizontal, "p3");
    // p1 left half; p2 top-right quarter; p3 bottom-right quarter.
    let layout = tree.layout();
    assert_eq!(layout.len(), 3);
    assert!(rect_approx(layout[0].1, 0.0, 0.0, 0.5, 1.0));
    assert!(rect_approx(layout[1].1, 0.5, 0.0, 0.5, 0.5));
    assert!(rect_approx(layout[2].1, 0.5, 0.5, 0.5, 0.5));
}

#[test]
fn layout_partitions_unit_square() {
    let mut tree = SplitTree::new(0u32);
    for i in 1..8 {
        if i % 2 == 0 {
            tree.focus_next();
        }
        tree.split_active(
            if i % 2 == 0 { Direction::Vertical } else { Direction::Horizontal },
            i,
        );
    }
    let layout = tree.layout();
    assert_eq!(layout.len(), 8);
    let area: f32 = layout.iter().map(|(_, r)| r.width * r.height).sum();
    assert!(approx(area, 1.0));
    // Pairwise-disjoint interiors.
    for (i, (_, a)) in layout.iter().enumerate() {
        for (_, b) in layout.iter().skip(i + 1) {
            let overlap_w = (a.x + a.width).min(b.x + b.width) - a.x.max(b.x);
            let overlap_h = (a.y + a.height).min(b.y + b.height) - a.y.max(b.y);
            assert!(
                overlap_w <= 1e-6 || overlap_h <= 1e-6,
                "rectangles overlap: {a:?} {b:?}"
            );
        }
    }
}

#[test]
fn close_promotes_sibling_subtree() {
    // The walkthrough: split vertical, split horizontal, close the last.
    let mut tree = SplitTree::new("p1");
    tree.split_active(Direction::Vertical, "p2");
    tree.split_active(Direction::Horizontal, "p3");
    assert_eq!(*tree.active_payload(), "p3");

    let removed = tree.remove_active();
    assert_eq!(removed, Some("p3"));
    assert_eq!(tree.leaf_count(), 2);
    // p2's subtree was promoted; its first in-order leaf is active.
    assert_eq!(*tree.active_payload(), "p2");
    let layout = tree.layout();
    assert!(rect_approx(layout[0].1, 0.0, 0.0, 0.5, 1.0));
    assert!(rect_approx(layout[1].1, 0.5, 0.0, 0.5, 1.0));
}

#[test]
fn close_last_leaf_is_refused() {
    let mut tree = SplitTree::new("p1");
    assert_eq!(tree.remove_active(), None);
    assert_eq!(tree.leaf_count(), 1);
}

#[test]
fn close_first_of_pair_promotes_second() {
    let mut tree = SplitTree::new("p1");
    tree.split_active(Direction::Vertical, "p2");
    tree.focus_next(); // back to p1
    assert_eq!(*tree.active_payload(), "p1");
    assert_eq!(tree.remove_active(), Some("p1"));
    assert_eq!(tree.leaf_count(), 1);
    assert_eq!(*tree.active_payload(), "p2");
    assert!(rect_approx(tree.layout()[0].1, 0.0, 0.0, 1.0, 1.0));
}

#[test]
fn promoted_subtree_keeps_structure() {
    let mut tree = SplitTree::new("p1");
    tree.split_active(Direction::Vertical, "p2");
    tree.split_active(Direction::Horizontal, "p3");
    // Go back to p1 and close it: the right-hand split (p2 over p3) takes
    // over the full square.
    let leaves = tree.leaves();
    tree.set_active(leaves[0]);
    assert_eq!(tree.remove_active(), Some("p1"));
    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(*tree.active_payload(), "p2");
    let layout = tree.layout();
    assert!(rect_approx(layout[0].1, 0.0, 0.0, 1.0, 0.5));
    assert!(rect_approx(layout[1].1, 0.0, 0.5, 1.0, 0.5));
}

#[test]
fn removal_deep_in_tree_reparents_grandchildren() {
    let mut tree = SplitTree::new(1u32);
    tree.split_active(Direction::Vertical, 2);
    tree.split_active(Direction::Horizontal, 3);
    tree.split_active(Direction::Vertical, 4);
    assert_eq!(tree.leaf_count(), 4);
    // Close 4, then 3: back to the original vertical pair.
    tree.remove_active();
    assert_eq!(*tree.active_payload(), 3);
    tree.remove_active();
    assert_eq!(tree.leaf_count(), 2);
    let layout = tree.layout();
    assert!(rect_approx(layout[0].1, 0.0, 0.0, 0.5, 1.0));
    assert!(rect_approx(layout[1].1, 0.5, 0.0, 0.5, 1.0));
    // The tree is still navigable and splittable after promotions.
    tree.focus_next();
    tree.split_active(Direction::Horizontal, 5);
    assert_eq!(tree.leaf_count(), 3);
}

#[test]
fn focus_cycles_in_order() {
    let mut tree = SplitTree::new("p1");
    tree.split_active(Direction::Vertical, "p2");
    tree.split_active(Direction::Horizontal, "p3");
    assert_eq!(*tree.active_payload(), "p3");
    tree.focus_next();
    assert_eq!(*tree.active_payload(), "p1");
    tree.focus_next();
    assert_eq!(*tree.active_payload(), "p2");
    tree.focus_prev();
    assert_eq!(*tree.active_payload(), "p1");
    tree.focus_prev();
    assert_eq!(*tree.active_payload(), "p3");
}

#[test]
fn slots_are_reused_after_removal() {
    let mut tree = SplitTree::new(0u32);
    for i in 1..=8 {
        tree.split_active(Direction::Vertical, i);
    }
    for _ in 0..8 {
        tree.remove_active();
    }
    assert_eq!(tree.leaf_count(), 1);
    let before = tree_slots(&tree);
    for i in 1..=8 {
        tree.split_active(Direction::Vertical, 100 + i);
    }
    assert_eq!(tree.leaf_count(), 9);
    assert_eq!(tree_slots(&tree), before);
}

fn tree_slots<T>(tree: &SplitTree<T>) -> usize {
    // Slot count only grows when the free list is empty; after churn the
    // arena should be fully recycled.
    tree.nodes.len()
}
