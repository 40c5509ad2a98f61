//! SVG writing operations.

use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};

use crate::{
    interact::escape_markup,
    render::{Group, PathElement, Scene},
};

pub(crate) struct SvgWriter {
    writer: BufWriter<File>
}

/// String-based SVG writer for WASM/browser use
pub(crate) struct SvgStringWriter {
    buffer: Vec<u8>
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl Write for SvgWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.writer.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.writer.flush() }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> { self.writer.write_all(buf) }
}

impl Write for SvgStringWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
}

impl SvgStringWriter {
    pub(crate) fn new() -> Self { Self { buffer: Vec::new() } }

    pub(crate) fn into_string(self) -> Result<String> {
        String::from_utf8(self.buffer)
            .context("[io::svg] SVG output is not valid UTF-8")
    }
}

impl SvgWriter {
    /// Create a new SVG writer to a file path
    pub(crate) fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("[io::svg] Failed to create {}", path.display()))?;

        Ok(Self { writer: BufWriter::new(file) })
    }
}

/// Write a scene as a standalone SVG file.
pub fn write_scene_svg(scene: &Scene, path: &Path) -> Result<()> {
    let mut writer = SvgWriter::new(path)?;
    write_scene(&mut writer, scene)?;
    writer.flush()
        .with_context(|| format!("[io::svg] Failed to flush {}", path.display()))?;
    log::info!("[io::svg] wrote {} paths to {}", scene.path_count(), path.display());
    Ok(())
}

/// Render a scene to SVG text.
pub fn scene_to_svg_string(scene: &Scene) -> Result<String> {
    let mut writer = SvgStringWriter::new();
    write_scene(&mut writer, scene)?;
    writer.into_string()
}

/// Write a whole scene to any writer.
pub(crate) fn write_scene<W: Write>(writer: &mut W, scene: &Scene) -> Result<()> {
    write_svg_header(writer, scene.width, scene.height)?;
    write_svg_styles(writer)?;
    for group in &scene.groups {
        write_svg_group(writer, group)?;
    }
    write_svg_footer(writer)
}

/// Write SVG header to any writer (standalone function).
pub(crate) fn write_svg_header<W: Write>(writer: &mut W, width: f64, height: f64) -> Result<()> {
    writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
    writeln!(writer, r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"##)?;
    Ok(())
}

/// Write SVG styles to any writer (standalone function).
pub(crate) fn write_svg_styles<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, r##"<defs>
<style>
    .feature:hover {{ stroke: black; stroke-width: 1.5; }}
</style>
</defs>"##)?;
    Ok(())
}

/// Write SVG footer to any writer (standalone function).
pub(crate) fn write_svg_footer<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}

/// Write one group and its paths.
pub(crate) fn write_svg_group<W: Write>(writer: &mut W, group: &Group) -> Result<()> {
    write!(writer, "<g")?;
    if let Some(transform) = &group.transform {
        write!(writer, r#" transform="{transform}""#)?;
    }
    if let Some(fill) = &group.style.fill {
        write!(writer, r#" fill="{}""#, escape_markup(fill))?;
    }
    if let Some(stroke) = &group.style.stroke {
        write!(writer, r#" stroke="{}""#, escape_markup(stroke))?;
    }
    if let Some(opacity) = group.style.stroke_opacity {
        write!(writer, r#" stroke-opacity="{opacity}""#)?;
    }
    writeln!(writer, ">")?;

    for path in &group.paths {
        write_svg_path(writer, path)?;
    }

    writeln!(writer, "</g>")?;
    Ok(())
}

fn write_svg_path<W: Write>(writer: &mut W, path: &PathElement) -> Result<()> {
    write!(
        writer,
        r#"<path d="{d}" fill="{fill}" fill-rule="evenodd" data-key="{key}""#,
        d = path.d,
        fill = escape_markup(&path.fill),
        key = escape_markup(&path.key),
    )?;
    if let Some(stroke) = &path.stroke {
        write!(writer, r#" stroke="{}" stroke-width="{}""#, escape_markup(&stroke.color), stroke.width)?;
    }

    match &path.title {
        Some(title) => writeln!(writer, r#" class="feature"><title>{}</title></path>"#, escape_markup(title))?,
        None => writeln!(writer, "/>")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{interact::ZoomTransform, render::{GroupStyle, Stroke}};

    use super::*;

    fn scene() -> Scene {
        let group = Group {
            transform: Some(ZoomTransform::new(5.0, 0.0, 2.0)),
            style: GroupStyle::default(),
            paths: vec![
                PathElement {
                    key: "17031".into(),
                    d: "M0.000,0.000 L1.000,0.000 L1.000,1.000Z".into(),
                    fill: "rgb(8,48,107)".into(),
                    stroke: Some(Stroke::hover()),
                    title: Some("GEOID: 17031\nEstimate: <1>".into()),
                },
            ],
        };
        Scene::new(800.0, 600.0).with_group(group)
    }

    #[test]
    fn string_writer_produces_document() {
        let svg = scene_to_svg_string(&scene()).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"width="800" height="600" viewBox="0 0 800 600""#));
        assert!(svg.contains(r#"<g transform="translate(5,0) scale(2)">"#));
        assert!(svg.contains(r#"data-key="17031""#));
        assert!(svg.contains(r#"stroke="black" stroke-width="1.5""#));
        assert!(svg.contains("<title>GEOID: 17031\nEstimate: &lt;1&gt;</title>"));
        assert!(svg.ends_with("</g>\n</svg>\n"));
        assert_eq!(svg.matches("<svg ").count(), svg.matches("</svg>").count());
    }

    #[test]
    fn group_style_becomes_attributes() {
        let group = Group {
            transform: None,
            style: GroupStyle { fill: Some("none".into()), stroke: Some("#fff".into()), stroke_opacity: Some(0.5) },
            paths: vec![],
        };
        let mut out = SvgStringWriter::new();
        write_svg_group(&mut out, &group).unwrap();
        assert_eq!(out.into_string().unwrap(), "<g fill=\"none\" stroke=\"#fff\" stroke-opacity=\"0.5\">\n</g>\n");
    }

    #[test]
    fn file_writer_matches_string_writer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.svg");
        write_scene_svg(&scene(), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), scene_to_svg_string(&scene()).unwrap());
    }
}
