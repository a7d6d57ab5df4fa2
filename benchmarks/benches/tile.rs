use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tilekit::{
    coords::{TileCoords, ZoomLevel},
    element::{GeometryType, MapElement, Tag, TagSet},
    io::{
        oscimap2::{Oscimap2Decoder, Oscimap2Encoder},
        TileDecoder,
    },
    settings::LoaderSettings,
    theme::{Theme, ThemeMatcher},
    tile::{BucketBuilder, CancellationToken},
};

// https://tile.openstreetmap.org/15/17425/11365.png
const MUNICH_COORDS: TileCoords = TileCoords {
    x: 17425,
    y: 11365,
    z: ZoomLevel::new(15u8),
};

const THEME: &str = r##"{
    "rules": [
        { "e": "way", "k": "natural", "v": "water", "closed": "yes",
          "styles": [{ "type": "area", "color": "#a0c8f0" }] },
        { "e": "way", "k": "highway", "v": "*", "closed": "no",
          "styles": [{ "type": "line", "color": "#ffffff", "width": 2.0 },
                     { "type": "line", "color": "#c0b8b0", "width": 1.0, "outline": true },
                     { "type": "text", "k": "name" }] },
        { "e": "way", "k": "building", "v": "*", "closed": "yes",
          "styles": [{ "type": "area", "color": "#d9d0c9" }] }
    ]
}"##;

/// A grid of streets with a building in every block and a lake in the middle.
fn city_tile() -> Vec<u8> {
    let mut encoder = Oscimap2Encoder::new(256);
    let mut element = MapElement::new();

    for i in 0..16 {
        let offset = i as f32 * 16.0;
        for horizontal in [true, false] {
            element.clear();
            element.start(GeometryType::Line);
            for step in 0..=8 {
                let along = step as f32 * 32.0;
                if horizontal {
                    element.add_point(along, offset);
                } else {
                    element.add_point(offset, along);
                }
            }
            let _ = element.tags.push(Tag::fixed("highway", "residential"));
            let _ = element
                .tags
                .push(Tag::new("name", format!("Street {i}"), true));
            encoder.add_element(&element).unwrap();
        }

        for j in 0..16 {
            let (x, y) = (offset + 4.0, j as f32 * 16.0 + 4.0);
            element.clear();
            element.start(GeometryType::Polygon);
            for (dx, dy) in [(0.0, 0.0), (8.0, 0.0), (8.0, 8.0), (0.0, 8.0)] {
                element.add_point(x + dx, y + dy);
            }
            let _ = element.tags.push(Tag::fixed("building", "yes"));
            encoder.add_element(&element).unwrap();
        }
    }

    element.clear();
    element.start(GeometryType::Polygon);
    for step in 0..64 {
        let angle = step as f32 / 64.0 * std::f32::consts::TAU;
        element.add_point(128.0 + 40.0 * angle.cos(), 128.0 + 40.0 * angle.sin());
    }
    let _ = element.tags.push(Tag::fixed("natural", "water"));
    encoder.add_element(&element).unwrap();

    encoder.finish()
}

fn bench_decode(c: &mut Criterion) {
    let data = city_tile();
    let mut decoder = Oscimap2Decoder::from_settings(&LoaderSettings::default());

    c.bench_function("decode_oscimap2", |b| {
        b.iter(|| {
            let mut points = 0;
            decoder
                .decode(&MUNICH_COORDS, &data, &mut |element: &MapElement| {
                    points += element.num_points();
                })
                .unwrap();
            black_box(points)
        })
    });
}

fn bench_build(c: &mut Criterion) {
    let data = city_tile();
    let settings = LoaderSettings::default();
    let theme = Arc::new(Theme::from_json_str(THEME).unwrap());
    let mut builder = BucketBuilder::new(theme, &settings);
    let mut decoder = Oscimap2Decoder::from_settings(&settings);

    c.bench_function("build_buckets", |b| {
        b.iter(|| {
            builder
                .build(&mut decoder, &MUNICH_COORDS, &data, CancellationToken::new())
                .unwrap()
        })
    });
}

fn bench_match(c: &mut Criterion) {
    let theme = Arc::new(Theme::from_json_str(THEME).unwrap());
    let road: TagSet = [
        Tag::fixed("highway", "residential"),
        Tag::new("name", "Leopoldstraße", true),
    ]
    .into_iter()
    .collect();

    c.bench_function("match_uncached", |b| {
        let mut out = Vec::new();
        b.iter(|| {
            theme.match_element(
                GeometryType::Line,
                road.as_slice(),
                MUNICH_COORDS.z,
                &mut out,
            );
            black_box(out.len())
        })
    });

    c.bench_function("match_cached", |b| {
        let mut matcher = ThemeMatcher::with_capacity(theme.clone(), 512);
        b.iter(|| {
            matcher
                .match_element(GeometryType::Line, &road, MUNICH_COORDS.z)
                .len()
        })
    });
}

criterion_group!(benches, bench_decode, bench_build, bench_match);
criterion_main!(benches);
