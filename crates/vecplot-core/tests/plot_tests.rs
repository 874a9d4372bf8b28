//! Canvas state produced by single-embedding and set plots

use vecplot_core::plot::{parse_color, Aspect, Canvas, PlotKind, PlotOptions, TEXT_OFFSET};
use vecplot_core::{Embedding, EmbeddingSet, Error};

/// Helper to create the five-color fixture set
fn embset() -> EmbeddingSet {
    let rows: [(&str, [f32; 3]); 5] = [
        ("red", [0.61, 0.27, 0.93]),
        ("blue", [0.12, 0.84, 0.35]),
        ("green", [0.77, 0.05, 0.48]),
        ("yellow", [0.33, 0.59, 0.21]),
        ("white", [0.95, 0.71, 0.66]),
    ];
    EmbeddingSet::from_embeddings(
        rows.iter()
            .map(|(name, vector)| Embedding::new(*name, vector.to_vec())),
    )
    .unwrap()
}

fn assert_axes(canvas: &Canvas, x_label: &str, y_label: &str, title: &str, aspect: Option<f32>) {
    assert_eq!(canvas.x_label, x_label);
    assert_eq!(canvas.y_label, y_label);
    assert_eq!(canvas.title, title);
    assert_eq!(canvas.aspect.value(), aspect);
}

#[test]
fn test_scatter_integer_axis() {
    let set = embset();
    let emb = set.get("red").unwrap();
    let mut canvas = Canvas::new();

    emb.plot(&mut canvas, &PlotOptions::new(PlotKind::Scatter).x_axis(0).y_axis(1))
        .unwrap();

    let points = canvas.points();
    assert_eq!(points.len(), 1);
    assert_eq!((points[0].0, points[0].1), (emb.vector()[0], emb.vector()[1]));
    assert_eq!(points[0].2, parse_color("steelblue").unwrap());

    let texts = canvas.texts();
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0], (emb.vector()[0], emb.vector()[1], "red"));

    assert!(canvas.arrows().is_empty());
    assert_axes(&canvas, "Dimension 0", "Dimension 1", "", None);
}

#[test]
fn test_scatter_without_annotation() {
    let set = embset();
    let emb = set.get("red").unwrap();
    let mut canvas = Canvas::new();

    let options = PlotOptions::new(PlotKind::Scatter)
        .x_axis(0)
        .y_axis(1)
        .annotate(false);
    emb.plot(&mut canvas, &options).unwrap();

    assert_eq!(canvas.points().len(), 1);
    assert!(canvas.texts().is_empty());
    assert!(canvas.arrows().is_empty());
}

#[test]
fn test_arrow_integer_axis_with_overrides() {
    let set = embset();
    let emb = set.get("red").unwrap();
    let mut canvas = Canvas::new();

    let options = PlotOptions::new(PlotKind::Arrow)
        .x_axis(0)
        .y_axis(2)
        .color("blue")
        .x_label("xlabel")
        .y_label("ylabel")
        .title("test plot")
        .annotate(false);
    emb.plot(&mut canvas, &options).unwrap();

    let arrows = canvas.arrows();
    assert_eq!(arrows.len(), 1);
    assert_eq!((arrows[0].0, arrows[0].1), (emb.vector()[0], emb.vector()[2]));
    assert_eq!(arrows[0].2, parse_color("blue").unwrap());
    assert!(canvas.texts().is_empty());
    assert!(canvas.points().is_empty());
    assert_axes(&canvas, "xlabel", "ylabel", "test plot", None);
}

#[test]
fn test_text_integer_axis() {
    let set = embset();
    let emb = set.get("red").unwrap();
    let mut canvas = Canvas::new();

    emb.plot(&mut canvas, &PlotOptions::new(PlotKind::Text).x_axis(1).y_axis(2))
        .unwrap();

    assert!(canvas.points().is_empty());
    assert!(canvas.arrows().is_empty());
    let texts = canvas.texts();
    assert_eq!(texts.len(), 1);
    assert_eq!(
        texts[0],
        (emb.vector()[1] + TEXT_OFFSET, emb.vector()[2], "red")
    );
    assert_axes(&canvas, "Dimension 1", "Dimension 2", "", None);
}

#[test]
fn test_scatter_embedding_axis() {
    let set = embset();
    let emb = set.get("red").unwrap();
    let blue = set.get("blue").unwrap();
    let green = set.get("green").unwrap();
    let mut canvas = Canvas::new();

    let options = PlotOptions::new(PlotKind::Scatter)
        .x_axis(blue)
        .y_axis(green);
    emb.plot(&mut canvas, &options).unwrap();

    let expected = (
        emb.scalar_projection(blue).unwrap(),
        emb.scalar_projection(green).unwrap(),
    );
    let points = canvas.points();
    assert_eq!((points[0].0, points[0].1), expected);
    assert_eq!(canvas.texts()[0].2, "red");
    assert_axes(&canvas, "blue", "green", "", None);
}

#[test]
fn test_arrow_embedding_axis_equal_aspect() {
    let set = embset();
    let emb = set.get("red").unwrap();
    let mut canvas = Canvas::new();

    let options = PlotOptions::new(PlotKind::Arrow)
        .x_axis(set.axis("blue").unwrap())
        .y_axis(set.axis("green").unwrap())
        .color("yellow")
        .aspect(Aspect::Equal);
    emb.plot(&mut canvas, &options).unwrap();

    let blue = set.get("blue").unwrap();
    let green = set.get("green").unwrap();
    let (u, v, color) = canvas.arrows()[0];
    assert_eq!(u, emb.scalar_projection(blue).unwrap());
    assert_eq!(v, emb.scalar_projection(green).unwrap());
    assert_eq!(color, parse_color("yellow").unwrap());

    let texts = canvas.texts();
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0], (u + TEXT_OFFSET, v + TEXT_OFFSET, "red"));
    assert_axes(&canvas, "blue", "green", "", Some(1.0));
}

#[test]
fn test_raises_error_when_no_axis() {
    let set = embset();
    let emb = set.get("red").unwrap();
    let mut canvas = Canvas::new();

    let err = emb.plot(&mut canvas, &PlotOptions::default()).unwrap_err();
    assert_eq!(err, Error::MissingAxis("x_axis"));
    assert!(err.to_string().contains("The `x_axis` value cannot be None"));

    let err = emb
        .plot(&mut canvas, &PlotOptions::default().x_axis(0))
        .unwrap_err();
    assert!(err.to_string().contains("The `y_axis` value cannot be None"));

    // Nothing was drawn by the failed calls.
    assert_eq!(canvas, Canvas::new());
}

#[test]
fn test_unknown_color_draws_nothing() {
    let set = embset();
    let mut canvas = Canvas::new();
    let options = PlotOptions::new(PlotKind::Scatter)
        .x_axis(0)
        .y_axis(1)
        .color("not-a-color");

    let err = set.get("red").unwrap().plot(&mut canvas, &options).unwrap_err();
    assert_eq!(err, Error::UnknownColor("not-a-color".into()));
    assert!(canvas.artifacts.is_empty());
}

#[test]
fn test_text_mode_ignores_color() {
    let set = embset();
    let mut canvas = Canvas::new();
    let options = PlotOptions::new(PlotKind::Text)
        .x_axis(0)
        .y_axis(1)
        .color("not-a-color");

    set.get("red").unwrap().plot(&mut canvas, &options).unwrap();
    assert_eq!(canvas.texts().len(), 1);

    set.plot(&mut canvas, &options).unwrap();
    assert_eq!(canvas.texts().len(), 6);
}

#[test]
fn test_set_plot_draws_every_member() {
    let set = embset();
    let mut canvas = Canvas::new();

    let options = PlotOptions::new(PlotKind::Scatter)
        .x_axis(set.axis("white").unwrap())
        .y_axis(0)
        .title("colors");
    set.plot(&mut canvas, &options).unwrap();

    assert_eq!(canvas.points().len(), set.len());
    let labels: Vec<&str> = canvas.texts().iter().map(|t| t.2).collect();
    assert_eq!(labels, vec!["red", "blue", "green", "yellow", "white"]);
    assert_axes(&canvas, "white", "Dimension 0", "colors", None);

    // The axis embedding projects onto itself at exactly 1.
    let white = canvas.points()[4];
    assert!((white.0 - 1.0).abs() < 1e-6);
}

#[test]
fn test_set_plot_is_all_or_nothing() {
    let set = embset();
    let mut canvas = Canvas::new();

    let options = PlotOptions::new(PlotKind::Arrow).x_axis(0).y_axis(3);
    assert!(matches!(
        set.plot(&mut canvas, &options),
        Err(Error::DimensionOutOfRange { index: 3, .. })
    ));
    assert!(canvas.artifacts.is_empty());
}

#[test]
fn test_repeated_plots_accumulate_on_one_canvas() {
    let set = embset();
    let mut canvas = Canvas::new();
    let options = PlotOptions::new(PlotKind::Arrow).x_axis(0).y_axis(1);

    set.get("red").unwrap().plot(&mut canvas, &options).unwrap();
    set.get("blue").unwrap().plot(&mut canvas, &options).unwrap();

    assert_eq!(canvas.arrows().len(), 2);
    assert_eq!(canvas.texts().len(), 2);
}
