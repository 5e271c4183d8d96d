// Copyright 2025 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a gallery of sample cards to `typefit_demo_*.svg` files.
//!
//! Set `TYPEFIT_DEMO_FONT` to a `.ttf`/`.otf` path to exercise the
//! parsed-font measurement path; without it every sample uses the heuristic
//! tables.

use kurbo::Point;
use peniko::Color;
use typefit_font::{FontTextMeasurer, global_store};
use typefit_render::{Background, RenderOptions, generate};
use typefit_text::TextMeasurer;

fn main() {
    env_logger::init();

    match std::env::var("TYPEFIT_DEMO_FONT") {
        Ok(path) => match std::fs::read(&path) {
            Ok(bytes) => {
                global_store().replace(&bytes);
            }
            Err(err) => log::warn!("could not read {path}: {err}"),
        },
        Err(_) => log::info!("TYPEFIT_DEMO_FONT not set, using heuristic measurement"),
    }

    let measurer = FontTextMeasurer::default();
    for (name, options) in samples() {
        write_svg(name, &options, &measurer);
    }
}

fn samples() -> Vec<(&'static str, RenderOptions)> {
    vec![
        ("badge", RenderOptions::new("alice.id")),
        ("badge_long", RenderOptions::new("a-rather-long-name-label.id")),
        ("cjk", RenderOptions::new("你好世界")),
        ("arabic", RenderOptions::new("مرحبا بالعالم")),
        ("emoji", RenderOptions::new("🌍 hello")),
        ("digits", RenderOptions::new("86-75-309")),
        (
            "card",
            RenderOptions::card("Hello World").with_background(Background::Solid(
                Color::from_rgb8(30, 41, 59),
            )),
        ),
        (
            "card_positioned",
            RenderOptions::card("pinned")
                .with_text_position(Point::new(120.0, 80.0))
                .with_font_size(36),
        ),
        (
            "image_background",
            RenderOptions::new("cover").with_background(Background::Image {
                href: "https://picsum.photos/seed/typefit/270".into(),
            }),
        ),
    ]
}

fn write_svg(name: &str, options: &RenderOptions, measurer: &dyn TextMeasurer) {
    let path = format!("typefit_demo_{name}.svg");
    let bytes = generate(options, measurer);
    std::fs::write(&path, bytes).expect("write demo svg");
    println!("wrote {path}");
}
