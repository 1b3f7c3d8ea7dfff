// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contexts keep their identity for as long as type and path match.

use kurbo::{Rect, Size};
use peniko::Color as Paint;
use sapling_graph::sapling_layout::{
    AnyLayout, HStackLayout, HorizontalAlignment, VStackLayout, VerticalAlignment,
};
use sapling_graph::{
    AnyView, Color, ContextId, DrawCommand, EmptyView, GraphPath, HStack, LayoutView,
    Rectangle, RecordingCanvas, Spacer, VStack, View, ViewExt, ViewGraph,
};

fn path(indices: &[u32]) -> GraphPath {
    GraphPath::from_indices(indices)
}

fn snapshot(graph: &ViewGraph) -> Vec<(ContextId, GraphPath, Rect)> {
    graph
        .contexts()
        .into_iter()
        .map(|id| (id, graph.path(id).unwrap().clone(), graph.frame(id).unwrap()))
        .collect()
}

fn sample(title: Paint) -> impl View {
    VStack::new((
        Color(title).frame(120.0, 24.0),
        HStack::new((Color::RED, Spacer::new(), Color::BLUE.padding_length(4.0))).spacing(2.0),
        Rectangle.layout_priority(1.0),
    ))
}

#[test]
fn reconciling_an_unchanged_root_is_idempotent() {
    let mut graph = ViewGraph::new();
    let first = graph.update(&sample(Paint::BLACK));
    assert_eq!(first.created.len(), graph.len());
    graph.layout(Size::new(320.0, 240.0));
    let before = snapshot(&graph);

    let second = graph.update(&sample(Paint::BLACK));
    assert!(second.is_unchanged());
    assert_eq!(second.updated, graph.len());
    graph.layout(Size::new(320.0, 240.0));
    assert_eq!(snapshot(&graph), before);
}

#[test]
fn value_changes_keep_contexts() {
    let mut graph = ViewGraph::new();
    graph.update(&sample(Paint::BLACK));
    let before: Vec<ContextId> = graph.contexts();
    let report = graph.update(&sample(Paint::WHITE));
    assert!(report.is_unchanged());
    assert_eq!(graph.contexts(), before);
    let title = graph.context_at(&path(&[0, 0])).unwrap();
    let color = graph.try_view::<Color>(title).unwrap();
    assert_eq!(color.0.to_rgba8(), Paint::WHITE.to_rgba8());
}

fn swappable(middle: AnyView) -> impl View {
    HStack::new((Color::RED, middle, Color::BLUE.frame(10.0, 10.0)))
}

#[test]
fn type_swap_replaces_exactly_one_context() {
    let mut graph = ViewGraph::new();
    graph.update(&swappable(AnyView::new(Color::GREEN)));
    let left = graph.context_at(&path(&[0])).unwrap();
    let holder = graph.context_at(&path(&[1])).unwrap();
    let old = graph.context_at(&path(&[1, 0])).unwrap();
    let right = graph.context_at(&path(&[2])).unwrap();
    let right_child = graph.context_at(&path(&[2, 0])).unwrap();

    let report = graph.update(&swappable(AnyView::new(EmptyView)));
    assert_eq!(report.destroyed, vec![path(&[1, 0])]);
    assert_eq!(report.created, vec![path(&[1, 0])]);

    assert!(!graph.is_alive(old));
    for id in [left, holder, right, right_child] {
        assert!(graph.is_alive(id));
    }
    let new = graph.context_at(&path(&[1, 0])).unwrap();
    assert_ne!(new, old);
    assert!(graph.try_view::<EmptyView>(new).is_ok());
}

#[test]
fn teardown_takes_the_whole_subtree() {
    let mut graph = ViewGraph::new();
    graph.update(&swappable(AnyView::new(
        VStack::new((Color::RED, Color::GREEN)).padding(),
    )));
    let report = graph.update(&swappable(AnyView::new(Spacer::new())));
    assert_eq!(
        report.destroyed,
        vec![
            path(&[1, 0, 0, 0]),
            path(&[1, 0, 0, 1]),
            path(&[1, 0, 0]),
            path(&[1, 0]),
        ]
    );
    assert_eq!(report.created, vec![path(&[1, 0])]);
    assert_eq!(graph.len(), 6);
}

#[test]
fn sequences_grow_and_shrink_at_the_tail() {
    let mut graph = ViewGraph::new();
    graph.update(&VStack::new(vec![Color::RED; 2]));
    let first = graph.context_at(&path(&[0])).unwrap();

    let grown = graph.update(&VStack::new(vec![Color::RED; 4]));
    assert_eq!(grown.created, vec![path(&[2]), path(&[3])]);
    assert!(grown.destroyed.is_empty());

    let shrunk = graph.update(&VStack::new(vec![Color::RED; 1]));
    assert_eq!(shrunk.destroyed, vec![path(&[1]), path(&[2]), path(&[3])]);
    assert!(shrunk.created.is_empty());
    assert!(graph.is_alive(first));
    assert_eq!(graph.children(graph.root().unwrap()).count(), 1);
}

fn fill_colors(graph: &ViewGraph) -> Vec<[u8; 4]> {
    let mut canvas = RecordingCanvas::new();
    graph.draw(&mut canvas);
    canvas
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::FillRect { color, .. } => {
                let rgba = color.to_rgba8();
                Some([rgba.r, rgba.g, rgba.b, rgba.a])
            }
            DrawCommand::StrokeRect { .. } => None,
        })
        .collect()
}

fn themed(outer: Paint) -> impl View {
    VStack::new((Rectangle, Rectangle.foreground_color(Paint::WHITE))).foreground_color(outer)
}

#[test]
fn environment_flows_down_and_updates_in_place() {
    let mut graph = ViewGraph::new();
    graph.update(&themed(Paint::BLACK));
    graph.layout(Size::new(50.0, 50.0));
    assert_eq!(fill_colors(&graph), vec![[0, 0, 0, 255], [255, 255, 255, 255]]);

    let report = graph.update(&themed(Paint::from_rgb8(0, 0, 255)));
    assert!(report.is_unchanged());
    assert_eq!(fill_colors(&graph), vec![[0, 0, 255, 255], [255, 255, 255, 255]]);
}

fn switchable(vertical: bool) -> impl View {
    let layout = if vertical {
        AnyLayout::new(VStackLayout::new(HorizontalAlignment::Center, Some(0.0)))
    } else {
        AnyLayout::new(HStackLayout::new(VerticalAlignment::Center, Some(0.0)))
    };
    LayoutView::with_layout(
        layout,
        (
            Color::RED.frame(10.0, 10.0),
            Color::BLUE.frame(10.0, 10.0),
        ),
    )
}

#[test]
fn switching_an_erased_layout_keeps_children() {
    let mut graph = ViewGraph::new();
    graph.update(&switchable(false));
    graph.layout(Size::new(100.0, 100.0));
    let second = graph.context_at(&path(&[1])).unwrap();
    assert_eq!(graph.frame(second), Some(Rect::new(50.0, 45.0, 60.0, 55.0)));

    let report = graph.update(&switchable(true));
    assert!(report.is_unchanged());
    graph.layout(Size::new(100.0, 100.0));
    assert!(graph.is_alive(second));
    assert_eq!(graph.frame(second), Some(Rect::new(45.0, 50.0, 55.0, 60.0)));
}

#[test]
#[should_panic(expected = "no longer resolves")]
fn updating_content_without_validation_fails_fast() {
    let mut graph = ViewGraph::new();
    graph.update(&swappable(AnyView::new(Color::GREEN)));
    let id = graph.context_at(&path(&[1, 0])).unwrap();
    let other = swappable(AnyView::new(EmptyView));
    assert!(!graph.validate_path(id, &other));
    graph.update_content(id, &other);
}

#[test]
fn replacing_the_root_type_remounts() {
    let mut graph = ViewGraph::new();
    graph.update(&Color::RED);
    let old = graph.root().unwrap();
    let report = graph.update(&EmptyView);
    assert_eq!(report.destroyed, vec![GraphPath::root()]);
    assert_eq!(report.created, vec![GraphPath::root()]);
    assert!(!graph.is_alive(old));
    assert_eq!(graph.len(), 1);
}
