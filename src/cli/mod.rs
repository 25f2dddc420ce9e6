//! Command-line driver.
//!
//! Reads syntax trees (JSON), runs the external-links transform over them in
//! parallel with one shared instance, and writes HTML or JSON.

mod args;

pub use args::{Cli, Format};

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use autoblank::config::CONFIG_FILE;
use autoblank::hast::{Node, to_html};
use autoblank::{ExternalLinks, Options, debug, log, logger};
use rayon::prelude::*;
use rustc_hash::FxHashSet;

/// Name used for output derived from stdin.
const STDIN_NAME: &str = "stdin";

/// Raw input document.
struct Source {
    /// Display label (path or `<stdin>`).
    label: String,
    /// Output file stem.
    name: String,
    text: String,
}

/// Rendered output document.
struct Output {
    name: String,
    content: String,
}

/// Execute the CLI.
pub fn run(cli: &Cli) -> Result<()> {
    if cli.verbose {
        logger::set_verbose(true);
    }

    let options = load_options(cli)?;
    debug!("config"; "internal domains: {:?}", options.internal_domains);

    let transform = ExternalLinks::new(options);
    let sources = read_sources(&cli.inputs)?;

    let outputs = sources
        .into_par_iter()
        .map(|source| process(source, &transform, cli))
        .collect::<Result<Vec<_>>>()?;

    write_outputs(&outputs, cli)
}

/// Load options from `--config`, else `autoblank.toml` in the working
/// directory if present, else defaults. `--domain` values are appended.
fn load_options(cli: &Cli) -> Result<Options> {
    let mut options = match &cli.config {
        Some(path) => Options::from_path(path)
            .with_context(|| format!("failed to load options from {}", path.display()))?,
        None if Path::new(CONFIG_FILE).is_file() => Options::from_path(Path::new(CONFIG_FILE))
            .with_context(|| format!("failed to load options from {CONFIG_FILE}"))?,
        None => Options::default(),
    };

    options.internal_domains.extend(cli.domains.iter().cloned());
    Ok(options)
}

// ============================================================================
// Input
// ============================================================================

fn read_sources(paths: &[PathBuf]) -> Result<Vec<Source>> {
    if paths.is_empty() {
        return Ok(vec![read_stdin()?]);
    }

    paths
        .iter()
        .map(|path| {
            if path.as_os_str() == "-" {
                read_stdin()
            } else {
                read_file(path)
            }
        })
        .collect()
}

fn read_stdin() -> Result<Source> {
    let mut text = String::new();
    io::stdin()
        .lock()
        .read_to_string(&mut text)
        .context("failed to read stdin")?;

    Ok(Source {
        label: "<stdin>".to_owned(),
        name: STDIN_NAME.to_owned(),
        text,
    })
}

fn read_file(path: &Path) -> Result<Source> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| STDIN_NAME.to_owned());

    Ok(Source {
        label: path.display().to_string(),
        name,
        text,
    })
}

// ============================================================================
// Processing
// ============================================================================

fn process(source: Source, transform: &ExternalLinks, cli: &Cli) -> Result<Output> {
    let mut tree: Node = serde_json::from_str(&source.text)
        .with_context(|| format!("invalid syntax tree in {}", source.label))?;

    transform.transform(&mut tree);
    debug!("transform"; "{}", source.label);

    let content = match cli.format {
        Format::Html => to_html(&tree),
        Format::Json if cli.pretty => serde_json::to_string_pretty(&tree)?,
        Format::Json => serde_json::to_string(&tree)?,
    };

    Ok(Output {
        name: source.name,
        content,
    })
}

// ============================================================================
// Output
// ============================================================================

fn write_outputs(outputs: &[Output], cli: &Cli) -> Result<()> {
    let Some(dir) = &cli.output else {
        let mut stdout = io::stdout().lock();
        for output in outputs {
            writeln!(stdout, "{}", output.content)?;
        }
        return Ok(());
    };

    check_unique_names(outputs)?;
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    for output in outputs {
        let path = dir.join(format!("{}.{}", output.name, cli.format.extension()));
        fs::write(&path, &output.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!("write"; "{}", path.display());
    }

    log!("write"; "{} file(s) to {}", outputs.len(), dir.display());
    Ok(())
}

/// Output files are named by input stem; two inputs sharing a stem would
/// overwrite each other.
fn check_unique_names(outputs: &[Output]) -> Result<()> {
    let mut seen = FxHashSet::default();
    for output in outputs {
        if !seen.insert(output.name.as_str()) {
            bail!(
                "duplicate output name `{}`: inputs sharing a file stem cannot be written to one directory",
                output.name
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    const PAGE: &str = r#"{
        "type": "root",
        "children": [
            {"type": "element", "tagName": "p", "properties": {}, "children": [
                {"type": "element", "tagName": "a", "properties": {"href": "https://google.com"},
                 "children": [{"type": "text", "value": "External"}]},
                {"type": "element", "tagName": "a", "properties": {"href": "https://test.com/about"},
                 "children": [{"type": "text", "value": "Internal Absolute"}]},
                {"type": "element", "tagName": "a", "properties": {"href": "/contact"},
                 "children": [{"type": "text", "value": "Internal Relative"}]}
            ]}
        ]
    }"#;

    /// Temp dir holding `page.json` and an options file.
    fn setup(config: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("page.json"), PAGE).unwrap();
        fs::write(dir.path().join(CONFIG_FILE), config).unwrap();
        dir
    }

    fn cli(dir: &TempDir, extra: &[&str]) -> Cli {
        let input = dir.path().join("page.json");
        let config = dir.path().join(CONFIG_FILE);
        let output = dir.path().join("out");
        let mut args = vec![
            "autoblank".to_owned(),
            "-C".to_owned(),
            config.display().to_string(),
            "-o".to_owned(),
            output.display().to_string(),
        ];
        args.extend(extra.iter().map(|s| (*s).to_owned()));
        args.push(input.display().to_string());
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_run_writes_html() {
        let dir = setup("internal_domains = [\"test.com\"]\n");
        run(&cli(&dir, &[])).unwrap();

        let html = fs::read_to_string(dir.path().join("out/page.html")).unwrap();
        assert!(html.contains(
            r#"<a href="https://google.com" target="_blank" aria-label="Opens in a new tab" rel="noopener noreferrer">"#
        ));
        assert!(html.contains(
            r#"<a href="https://test.com/about" target="_blank" aria-label="Opens in a new tab">Internal Absolute<span aria-hidden="true" data-rehype-icon="true">↗</span></a>"#
        ));
        assert!(html.contains(r#"<a href="/contact">Internal Relative</a>"#));
    }

    #[test]
    fn test_run_domain_flag_and_json() {
        let dir = setup("add_target_to_internal = false\n");
        run(&cli(&dir, &["-d", "test.com", "-f", "json", "--pretty"])).unwrap();

        let json = fs::read_to_string(dir.path().join("out/page.json")).unwrap();
        let tree: Node = serde_json::from_str(&json).unwrap();
        let links: Vec<_> = autoblank::hast::elements(&tree)
            .into_iter()
            .filter(|e| e.is_tag("a"))
            .collect();

        assert_eq!(links[0].get_str("target"), Some("_blank"));
        assert!(!links[1].has_attr("target"));
        assert!(links[1].child_elements().next().is_none());
    }

    #[test]
    fn test_load_options_appends_domains() {
        let dir = setup("internal_domains = [\"a.com\"]\n");
        let options = load_options(&cli(&dir, &["-d", "b.com"])).unwrap();
        assert_eq!(options.internal_domains, ["a.com", "b.com"]);
    }

    #[test]
    fn test_bad_config_is_error() {
        let dir = setup("rel = 3\n");
        assert!(run(&cli(&dir, &[])).is_err());
    }

    #[test]
    fn test_duplicate_stems_rejected() {
        let dir = setup("");
        for sub in ["a", "b"] {
            fs::create_dir(dir.path().join(sub)).unwrap();
            fs::write(dir.path().join(sub).join("page.json"), PAGE).unwrap();
        }
        let config = dir.path().join(CONFIG_FILE);
        let output = dir.path().join("out");
        let cli = Cli::try_parse_from([
            "autoblank".to_owned(),
            "-C".to_owned(),
            config.display().to_string(),
            "-o".to_owned(),
            output.display().to_string(),
            dir.path().join("a/page.json").display().to_string(),
            dir.path().join("b/page.json").display().to_string(),
        ])
        .unwrap();

        let err = run(&cli).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate output name `page`"));
        assert!(!output.join("page.html").exists());
    }

    #[test]
    fn test_invalid_tree_is_error() {
        let dir = setup("");
        fs::write(dir.path().join("page.json"), "{\"type\": \"nope\"}").unwrap();
        let err = run(&cli(&dir, &[])).unwrap_err();
        assert!(format!("{err:#}").contains("invalid syntax tree"));
    }
}
