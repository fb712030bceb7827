use anyhow::Context;
use clap::{Parser, ValueEnum};
use scene_diagram_core::{
    render, tree_to_graph, ConvertOptions, DotStyle, IdScheme, OutputFormat, SceneDocument,
};
use std::io::{Read, Write};
use std::path::PathBuf;

/// scene-diagram - Draw the parent/child structure of a scene-graph JSON tree
#[derive(Parser)]
#[command(name = "scene-diagram")]
#[command(version)] // Auto-pull version from Cargo.toml
#[command(about = "Convert scene-graph JSON into a DOT or JSON node/edge diagram", long_about = None)]
struct Cli {
    /// Scene JSON file (`{"root": ...}`); reads stdin when absent or `-`
    input: Option<PathBuf>,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Dot)]
    format: Format,

    /// How node ids are made unique
    #[arg(long, value_enum, default_value_t = Ids::Sequential)]
    id_scheme: Ids,

    /// Graphviz layout engine
    #[arg(long, default_value = "neato")]
    layout: String,

    /// Node fill color
    #[arg(long, default_value = "skyblue")]
    fill_color: String,

    /// Node label font size
    #[arg(long, default_value_t = 10)]
    font_size: u32,

    /// Label nodes with their full id instead of the mesh name
    #[arg(long)]
    show_ids: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Dot,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum Ids {
    /// Pre-order visitation counter (Cube_1, Sphere_2)
    Sequential,
    /// Child-index path from the root (Cube_0, Sphere_0.1)
    Path,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Dot => OutputFormat::Dot,
            Format::Json => OutputFormat::Json,
        }
    }
}

impl From<Ids> for IdScheme {
    fn from(ids: Ids) -> Self {
        match ids {
            Ids::Sequential => IdScheme::Sequential,
            Ids::Path => IdScheme::Path,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    run(cli, std::io::stdin().lock(), std::io::stdout().lock())
}

/// Load, convert and render according to `cli`
///
/// `stdin` is read when no input path (or `-`) is given; `stdout` receives
/// the diagram when no output path is given.
fn run(cli: Cli, stdin: impl Read, mut stdout: impl Write) -> anyhow::Result<()> {
    let document = match cli.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => SceneDocument::from_path(path)?,
        _ => SceneDocument::from_reader(stdin)?,
    };

    let options = ConvertOptions {
        id_scheme: cli.id_scheme.into(),
    };
    let graph = tree_to_graph(&document.root, &options);

    let style = DotStyle {
        layout: cli.layout,
        fill_color: cli.fill_color,
        font_size: cli.font_size,
        show_ids: cli.show_ids,
    };
    let mut rendered = render(&graph, cli.format.into(), &style)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    match cli.output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote diagram");
        }
        None => {
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write output to stdout")?;
        }
    }

    Ok(())
}

// Logs go to stderr; stdout carries the diagram.
fn init_tracing() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["scene-diagram"]);

        assert!(cli.input.is_none());
        assert!(cli.output.is_none());
        assert_eq!(OutputFormat::from(cli.format), OutputFormat::Dot);
        assert_eq!(IdScheme::from(cli.id_scheme), IdScheme::Sequential);
        assert_eq!(cli.layout, "neato");
        assert_eq!(cli.fill_color, "skyblue");
        assert_eq!(cli.font_size, 10);
        assert!(!cli.show_ids);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "scene-diagram",
            "scene.json",
            "-o",
            "out.dot",
            "-f",
            "json",
            "--id-scheme",
            "path",
            "--layout",
            "fdp",
            "--show-ids",
        ]);

        assert_eq!(cli.input, Some(PathBuf::from("scene.json")));
        assert_eq!(cli.output, Some(PathBuf::from("out.dot")));
        assert_eq!(OutputFormat::from(cli.format), OutputFormat::Json);
        assert_eq!(IdScheme::from(cli.id_scheme), IdScheme::Path);
        assert_eq!(cli.layout, "fdp");
        assert!(cli.show_ids);
    }

    const SCENE: &str = r#"{"root": {"children": [
        {"renderInfo": {"mesh": "Cube"}},
        {"renderInfo": {}, "children": [{"renderInfo": {"mesh": "Sphere"}}]}
    ]}}"#;

    fn run_to_string(args: &[&str], stdin: &str) -> anyhow::Result<String> {
        let cli = Cli::parse_from(std::iter::once("scene-diagram").chain(args.iter().copied()));
        let mut stdout = Vec::new();
        run(cli, stdin.as_bytes(), &mut stdout)?;
        Ok(String::from_utf8(stdout).unwrap())
    }

    #[test]
    fn test_run_reads_stdin_with_dash() {
        let out = run_to_string(&["-"], SCENE).unwrap();

        assert!(out.starts_with("digraph scene {"));
        assert!(out.contains("\"None_2\" -> \"Sphere_3\";"));
        assert!(out.ends_with("}\n"));
        assert!(!out.ends_with("\n\n"));
    }

    #[test]
    fn test_run_reads_stdin_without_input() {
        let out = run_to_string(&["--id-scheme", "path"], SCENE).unwrap();
        assert!(out.contains("\"None_1\" -> \"Sphere_1.0\";"));
    }

    #[test]
    fn test_run_json_gets_one_trailing_newline() {
        let out = run_to_string(&["-f", "json"], SCENE).unwrap();

        assert!(out.ends_with("}\n"));
        assert!(!out.ends_with("\n\n"));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["edges"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("scene.json");
        let output = dir.path().join("scene.dot");
        std::fs::write(&input, SCENE).unwrap();

        let stdout = run_to_string(
            &[input.to_str().unwrap(), "-o", output.to_str().unwrap()],
            "",
        )
        .unwrap();

        assert!(stdout.is_empty());
        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("digraph scene {"));
        assert_eq!(written.matches(" -> ").count(), 3);
    }

    #[test]
    fn test_run_missing_input_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");

        let err = run_to_string(&[missing.to_str().unwrap()], SCENE).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Failed to read scene file"));
        assert!(message.contains("missing.json"));
    }

    #[test]
    fn test_run_rejects_bad_stdin() {
        let err = run_to_string(&[], r#"{"root": []}"#).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse scene document"));
    }

    #[test]
    fn test_value_enums_match_core_names() {
        for format in Format::value_variants() {
            let cli_name = format.to_possible_value().unwrap().get_name().to_string();
            let core_name = serde_json::to_value(OutputFormat::from(*format)).unwrap();
            assert_eq!(core_name, serde_json::Value::String(cli_name));
        }
        for ids in Ids::value_variants() {
            let cli_name = ids.to_possible_value().unwrap().get_name().to_string();
            let core_name = serde_json::to_value(IdScheme::from(*ids)).unwrap();
            assert_eq!(core_name, serde_json::Value::String(cli_name));
        }

        // Every core variant needs a CLI counterpart.
        for format in [OutputFormat::Dot, OutputFormat::Json] {
            let name = match format {
                OutputFormat::Dot => "dot",
                OutputFormat::Json => "json",
            };
            assert!(Format::from_str(name, false).is_ok());
        }
        for scheme in [IdScheme::Sequential, IdScheme::Path] {
            let name = match scheme {
                IdScheme::Sequential => "sequential",
                IdScheme::Path => "path",
            };
            assert!(Ids::from_str(name, false).is_ok());
        }
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
