//! End-to-end runs of the vecplot commands over JSON files

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde_json::json;
use tempfile::TempDir;
use vecplot_core::EmbeddingSet;
use vecplot_reduce::cli::{parse_option, run, run_plot, run_transform, Cli, Command};

/// Helper to write the color fixture and return its path
fn write_fixture(dir: &TempDir) -> PathBuf {
    let doc = json!({
        "name": "colors",
        "embeddings": [
            { "name": "red",    "vector": [0.9, 0.1, 0.2] },
            { "name": "blue",   "vector": [0.1, 0.2, 0.9] },
            { "name": "green",  "vector": [0.2, 0.8, 0.1] },
            { "name": "yellow", "vector": [0.7, 0.7, 0.1] },
            { "name": "white",  "vector": [0.8, 0.8, 0.8] }
        ]
    });
    let path = dir.path().join("colors.json");
    fs::write(&path, doc.to_string()).unwrap();
    path
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("vecplot").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_parse_option_values() {
    assert_eq!(parse_option("k=15").unwrap(), ("k".to_string(), json!(15)));
    assert_eq!(
        parse_option("metric=cosine").unwrap(),
        ("metric".to_string(), json!("cosine"))
    );
    assert_eq!(
        parse_option("verbose=false").unwrap(),
        ("verbose".to_string(), json!(false))
    );
    assert!(parse_option("novalue").is_err());
    assert!(parse_option("=3").is_err());
}

#[test]
fn test_transform_with_pca() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir);
    let cli = parse(&["transform", "-i", input.to_str().unwrap(), "-n", "2"]);

    let Command::Transform(args) = &cli.command else {
        panic!("expected transform command");
    };
    let out: EmbeddingSet = run_transform(args).unwrap();
    assert_eq!(out.name(), Some("colors.pca(2)"));
    assert_eq!(out.len(), 7);
    assert_eq!(out.dim(), 2);
    assert!(out.contains("pca_0") && out.contains("pca_1"));
}

#[test]
fn test_transform_python_methods_need_feature() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir);
    let cli = parse(&["transform", "-i", input.to_str().unwrap(), "-m", "ivis"]);

    let Command::Transform(args) = &cli.command else {
        panic!("expected transform command");
    };
    if cfg!(not(feature = "python")) {
        let err = run_transform(args).unwrap_err();
        assert!(err.to_string().contains("python"));
    }
}

#[test]
fn test_plot_member_axes() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir);
    let cli = parse(&[
        "plot",
        "-i",
        input.to_str().unwrap(),
        "-k",
        "arrow",
        "-x",
        "white",
        "-y",
        "2",
        "--aspect",
        "equal",
        "--name",
        "red",
    ]);

    let Command::Plot(args) = &cli.command else {
        panic!("expected plot command");
    };
    let canvas = run_plot(args).unwrap();
    assert_eq!(canvas.arrows().len(), 1);
    assert_eq!(canvas.texts()[0].2, "red");
    assert_eq!(canvas.x_label, "white");
    assert_eq!(canvas.y_label, "Dimension 2");
    assert_eq!(canvas.aspect.value(), Some(1.0));
}

#[test]
fn test_plot_without_axes_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir);
    let cli = parse(&["plot", "-i", input.to_str().unwrap()]);

    let Command::Plot(args) = &cli.command else {
        panic!("expected plot command");
    };
    let err = run_plot(args).unwrap_err();
    assert!(err.to_string().contains("The `x_axis` value cannot be None"));
}

#[test]
fn test_plot_unknown_member_axis() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir);
    let cli = parse(&["plot", "-i", input.to_str().unwrap(), "-x", "purple", "-y", "0"]);

    let Command::Plot(args) = &cli.command else {
        panic!("expected plot command");
    };
    assert!(run_plot(args).unwrap_err().to_string().contains("purple"));
}

#[test]
fn test_plot_writes_svg() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir);
    let output = dir.path().join("colors.svg");
    let cli = parse(&[
        "plot",
        "-i",
        input.to_str().unwrap(),
        "-x",
        "0",
        "-y",
        "1",
        "--title",
        "colors",
        "--svg",
        output.to_str().unwrap(),
    ]);

    run(&cli).unwrap();
    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<circle").count(), 5);
    assert!(svg.contains(">colors</text>"));
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");
    let cli = parse(&["transform", "-i", missing.to_str().unwrap()]);
    assert!(run(&cli).is_err());
}
