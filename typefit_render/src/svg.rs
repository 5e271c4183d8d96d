// Copyright 2025 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization of a [`Scene`].

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use peniko::{Brush, Color};

use crate::scene::{Background, Scene, TextAnchor, TextBaseline, TextRun};

/// Serializes `scene` as a standalone SVG document.
#[must_use]
pub fn to_svg_string(scene: &Scene) -> String {
    let mut out = String::new();

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!(
        r#"<svg width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">"#,
        scene.width, scene.height
    ));
    out.push('\n');

    for annotation in &scene.annotations {
        out.push_str(&format!("<!-- {} -->\n", escape_xml(annotation)));
    }

    write_defs(&mut out, scene);
    write_background(&mut out, scene);
    if let Some(run) = &scene.text {
        write_text(&mut out, run);
    }

    out.push_str("</svg>\n");
    out
}

/// Serializes `scene` as UTF-8 bytes.
#[must_use]
pub fn to_svg_bytes(scene: &Scene) -> Vec<u8> {
    to_svg_string(scene).into_bytes()
}

fn write_defs(out: &mut String, scene: &Scene) {
    let gradient = matches!(scene.background, Background::LinearGradient { .. });
    if !gradient && scene.font_face.is_none() {
        return;
    }

    out.push_str("<defs>\n");
    if let Some(font) = &scene.font_face {
        out.push_str(&format!(
            "<style>@font-face {{ font-family: '{}'; src: url({}); }}</style>\n",
            escape_xml(&font.family),
            escape_xml(&font.data_uri)
        ));
    }
    if let Background::LinearGradient { start, end } = &scene.background {
        out.push_str(
            r#"<linearGradient id="bg-gradient" x1="0%" y1="0%" x2="100%" y2="100%">"#,
        );
        out.push('\n');
        write_stop(out, 0, *start);
        write_stop(out, 100, *end);
        out.push_str("</linearGradient>\n");
    }
    out.push_str("</defs>\n");
}

fn write_stop(out: &mut String, offset: u8, color: Color) {
    let (value, opacity) = color_attr(color);
    out.push_str(&format!(r#"<stop offset="{offset}%" stop-color="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" stop-opacity="{o}""#));
    }
    out.push_str("/>\n");
}

fn write_background(out: &mut String, scene: &Scene) {
    match &scene.background {
        Background::Image { href } => {
            out.push_str(&format!(
                r#"<image href="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid slice"/>"#,
                escape_xml(href),
                scene.width,
                scene.height
            ));
            out.push('\n');
        }
        background => {
            out.push_str(&format!(
                r#"<rect width="{}" height="{}""#,
                scene.width, scene.height
            ));
            match background {
                Background::Solid(color) => {
                    let (value, opacity) = color_attr(*color);
                    out.push_str(&format!(r#" fill="{value}""#));
                    if let Some(o) = opacity {
                        out.push_str(&format!(r#" fill-opacity="{o}""#));
                    }
                }
                _ => out.push_str(r#" fill="url(#bg-gradient)""#),
            }
            if scene.corner_radius > 0.0 {
                out.push_str(&format!(r#" rx="{}""#, scene.corner_radius));
            }
            out.push_str("/>\n");
        }
    }
}

fn write_text(out: &mut String, run: &TextRun) {
    out.push_str(&format!(
        r#"<text x="{}" y="{}" font-family="{}" font-size="{}""#,
        run.pos.x,
        run.pos.y,
        escape_xml(&run.font_stack),
        run.font_size
    ));
    if run.font_weight != 400 {
        out.push_str(&format!(r#" font-weight="{}""#, run.font_weight));
    }
    write_paint_attr(out, "fill", &run.fill);
    out.push_str(match run.anchor {
        TextAnchor::Start => r#" text-anchor="start""#,
        TextAnchor::Middle => r#" text-anchor="middle""#,
    });
    if run.baseline == TextBaseline::Central {
        out.push_str(r#" dominant-baseline="central""#);
    }
    if run.shadow {
        out.push_str(r#" style="filter: drop-shadow(0px 2px 4px rgba(0,0,0,0.3));""#);
    }
    out.push('>');
    out.push_str(&escape_xml(&run.text));
    out.push_str("</text>\n");
}

fn color_attr(color: Color) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let value = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let opacity = if rgba.a == 255 {
        None
    } else {
        Some(f64::from(rgba.a) / 255.0)
    };
    (value, opacity)
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = match brush {
        Brush::Solid(color) => color_attr(*color),
        _ => ("none".to_string(), None),
    };
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
