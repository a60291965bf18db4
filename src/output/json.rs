use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::error::PackError;
use crate::layout::{Item, Layout};

#[derive(Serialize)]
struct JsonOutput<'a> {
    meta: Meta,
    container: Size,
    allow_rotate: bool,
    heuristic: &'static str,
    mode: &'static str,
    occupancy: f64,
    used: Size,
    placed: &'a [Item],
    unplaced: &'a [Item],
}

#[derive(Serialize)]
struct Meta {
    app: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct Size {
    w: u32,
    h: u32,
}

/// Render a layout as pretty JSON
pub fn layout_to_json(layout: &Layout) -> Result<String> {
    let output = JsonOutput {
        meta: Meta {
            app: "rects-bin-pack",
            version: env!("CARGO_PKG_VERSION"),
        },
        container: Size {
            w: layout.width,
            h: layout.height,
        },
        allow_rotate: layout.allow_rotate,
        heuristic: layout.heuristic.name(),
        mode: layout.mode.name(),
        occupancy: layout.occupancy,
        used: Size {
            w: layout.used_width,
            h: layout.used_height,
        },
        placed: &layout.placed,
        unplaced: &layout.unplaced,
    };

    serde_json::to_string_pretty(&output).context("failed to serialize layout to JSON")
}

/// Write layout JSON to `path`, or to stdout when no path is given
pub fn write_json(layout: &Layout, path: Option<&Path>) -> Result<()> {
    let mut content = layout_to_json(layout)?;
    content.push('\n');

    match path {
        Some(path) => {
            fs::write(path, content).map_err(|e| PackError::OutputWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("failed to write layout to stdout")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutBuilder;

    #[test]
    fn test_layout_json_shape() {
        let layout = LayoutBuilder::new(512, 256)
            .build(vec![
                Item::new(20, 100).with_field("id", "1"),
                Item::new(600, 10).with_field("id", "too-wide"),
            ])
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&layout_to_json(&layout).unwrap()).unwrap();

        assert_eq!(json["meta"]["app"], "rects-bin-pack");
        assert_eq!(json["container"]["w"], 512);
        assert_eq!(json["container"]["h"], 256);
        assert_eq!(json["heuristic"], "best-short-side-fit");
        assert_eq!(json["mode"], "batch");
        assert_eq!(json["placed"][0]["id"], "1");
        assert_eq!(json["placed"][0]["x"], 0);
        assert_eq!(json["placed"][0]["y"], 0);
        assert_eq!(json["unplaced"][0]["id"], "too-wide");
        assert!(json["unplaced"][0].get("x").is_none());
    }

    #[test]
    fn test_write_json_to_file() {
        let layout = LayoutBuilder::new(16, 16)
            .build(vec![Item::new(4, 4)])
            .unwrap();

        let path = std::env::temp_dir().join(format!(
            "rects-bin-pack-layout-{}.json",
            std::process::id()
        ));
        write_json(&layout, Some(&path)).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(written.ends_with('\n'));
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["placed"].as_array().unwrap().len(), 1);
    }
}
