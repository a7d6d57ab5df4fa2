//! Turns the elements of one tile into buckets.

use std::sync::Arc;

use crate::{
    coords::{TileCoords, ZoomLevel},
    element::{GeometryType, MapElement, KEY_HEIGHT, KEY_MIN_HEIGHT},
    io::{DecodeError, TileDataSink, TileDecoder},
    render::{
        labels::{LabelIndex, PlacedLabel, SymbolItem, SymbolSource, TextItem},
        line::line_scale,
        text_measure::{FixedWidthMeasure, TextMeasure},
        way_decorator::{render_symbols, render_text, DecoratorSettings},
        Bucket, ExtrusionBucket, ExtrusionColors, LineBucket, LineTexBucket, MeshBucket, PolygonBucket,
        ReservedSlot, SymbolBucket, TextBucket, TileBuckets,
    },
    settings::LoaderSettings,
    tessellation::{LyonTriangulator, TriangulationError, Triangulator},
    theme::{
        style::{
            AreaStyle, CircleStyle, ExtrusionStyle, LineStyle, LineSymbolStyle, RenderStyle,
            StyleId, SymbolStyle, TextStyle,
        },
        Theme, ThemeMatcher,
    },
    tile::{CancellationToken, LoadError},
};

/// Height in meters of buildings which carry neither a height nor a minimum height.
pub const DEFAULT_BUILDING_HEIGHT: i32 = 12;

/// Builds the buckets of tiles, one tile at a time. Each worker owns one builder, so the match
/// cache, the text measure and the triangulator are never shared.
pub struct BucketBuilder {
    matcher: ThemeMatcher,
    decorator: DecoratorSettings,
    tile_size: u32,
    mesh_polygons: bool,
    measure: Box<dyn TextMeasure>,
    triangulator: Box<dyn Triangulator>,

    coords: TileCoords,
    token: CancellationToken,
    buckets: TileBuckets,
    line_scale: f32,
    labels: LabelIndex,
    texts: Vec<TextItem>,
    symbols: Vec<SymbolItem>,
    /// Slot of the last solid line added for the current element, referenced by outlines.
    current_line: Option<u32>,
    ring_lengths: Vec<usize>,
}

impl BucketBuilder {
    pub fn new(theme: Arc<Theme>, settings: &LoaderSettings) -> Self {
        let levels = theme.levels();
        Self {
            matcher: ThemeMatcher::with_capacity(theme, settings.match_cache_capacity),
            decorator: DecoratorSettings {
                tile_size: settings.tile_size as f32,
                symbol_start: settings.symbol_start,
                symbol_spacing: settings.symbol_spacing,
                label_spacing: settings.label_spacing,
                label_slack: settings.label_slack,
            },
            tile_size: settings.tile_size,
            mesh_polygons: settings.mesh_polygons,
            measure: Box::new(FixedWidthMeasure::default()),
            triangulator: Box::new(LyonTriangulator::new()),
            coords: TileCoords::new(0, 0, ZoomLevel::default()),
            token: CancellationToken::new(),
            buckets: TileBuckets::new(levels),
            line_scale: 1.0,
            labels: LabelIndex::new(),
            texts: Vec::new(),
            symbols: Vec::new(),
            current_line: None,
            ring_lengths: Vec::new(),
        }
    }

    pub fn with_text_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    pub fn with_triangulator(mut self, triangulator: impl Triangulator + 'static) -> Self {
        self.triangulator = Box::new(triangulator);
        self
    }

    pub fn theme(&self) -> &Arc<Theme> {
        self.matcher.theme()
    }

    /// Resets the per tile state for `coords`.
    pub fn begin(&mut self, coords: TileCoords, token: CancellationToken) {
        self.coords = coords;
        self.token = token;
        self.buckets = TileBuckets::new(self.matcher.theme().levels());
        self.line_scale = line_scale(coords.z.into(), coords.latitude());
        self.labels = LabelIndex::new();
        self.texts.clear();
        self.symbols.clear();
        self.current_line = None;
    }

    /// Moves labels and symbols into their buckets and returns the finished tile, dropping
    /// buckets which stayed empty.
    pub fn finish(&mut self) -> TileBuckets {
        if !self.symbols.is_empty() {
            let slot = self.buckets.reserved_slot(ReservedSlot::Symbol);
            let items = std::mem::take(&mut self.symbols);
            self.buckets
                .entry(slot)
                .or_insert(Bucket::Symbol(SymbolBucket { items }));
        }
        if !self.texts.is_empty() {
            let slot = self.buckets.reserved_slot(ReservedSlot::Text);
            let items = std::mem::take(&mut self.texts);
            self.buckets
                .entry(slot)
                .or_insert(Bucket::Text(TextBucket { items }));
        }

        let mut buckets = std::mem::take(&mut self.buckets);
        buckets.compact();
        buckets
    }

    /// Decodes `data` through `decoder` and builds its buckets. Nothing is returned for a
    /// cancelled tile.
    pub fn build(
        &mut self,
        decoder: &mut dyn TileDecoder,
        coords: &TileCoords,
        data: &[u8],
        token: CancellationToken,
    ) -> Result<TileBuckets, LoadError> {
        self.begin(*coords, token);
        let result = decoder.decode(coords, data, self);
        let buckets = self.finish();

        match result {
            Ok(()) if self.token.is_cancelled() => Err(LoadError::Cancelled),
            Ok(()) => Ok(buckets),
            Err(DecodeError::Cancelled) => Err(LoadError::Cancelled),
            Err(err) => Err(LoadError::Decode(err)),
        }
    }

    fn render_line(&mut self, element: &MapElement, id: StyleId, line: &LineStyle) {
        if element.geometry_type.is_point() {
            return;
        }
        let slot = self.buckets.slot(element.layer, line.level);
        let scale = self.line_scale;
        let closed = element.is_closed();

        if line.is_stippled() {
            let entry = self
                .buckets
                .entry(slot)
                .or_insert_with(|| Bucket::LineTex(LineTexBucket::new(id, line, scale)));
            let Bucket::LineTex(bucket) = entry else {
                log::debug!("{} slot {slot} holds a {} bucket", self.coords, entry.kind());
                return;
            };
            for ring in element.rings() {
                bucket.add_line(ring);
            }
            return;
        }

        if line.outline {
            let Some(outlined) = self.current_line else {
                log::error!(
                    "{} missing line for outline: {} level {} layer {}",
                    self.coords,
                    element.tags,
                    line.level,
                    element.layer
                );
                return;
            };
            if let Some(bucket) = self.line_bucket(slot, id, line, scale) {
                bucket.add_outline(outlined);
            }
            return;
        }

        let coords = self.coords;
        let Some(bucket) = self.line_bucket(slot, id, line, scale) else {
            return;
        };
        for ring in element.rings() {
            if let Err(err) = bucket.add_line(ring, closed) {
                log::debug!("{coords} skipping line: {err:?}");
            }
        }
        self.current_line = Some(slot);
    }

    fn line_bucket(
        &mut self,
        slot: u32,
        id: StyleId,
        line: &LineStyle,
        scale: f32,
    ) -> Option<&mut LineBucket> {
        let coords = self.coords;
        match self
            .buckets
            .entry(slot)
            .or_insert_with(|| Bucket::Line(LineBucket::new(id, line, scale)))
        {
            Bucket::Line(bucket) => Some(bucket),
            other => {
                log::debug!("{coords} slot {slot} holds a {} bucket", other.kind());
                None
            }
        }
    }

    fn render_area(&mut self, element: &MapElement, id: StyleId, area: &AreaStyle) {
        if !element.geometry_type.is_polygon() {
            return;
        }
        let slot = self.buckets.slot(element.layer, area.level);

        if self.mesh_polygons {
            self.ring_lengths.clear();
            self.ring_lengths.extend(element.rings().map(<[f32]>::len));
            match self
                .triangulator
                .triangulate(&element.points, &self.ring_lengths)
            {
                Ok(triangles) => {
                    match self
                        .buckets
                        .entry(slot)
                        .or_insert_with(|| Bucket::Mesh(MeshBucket::new(id)))
                    {
                        Bucket::Mesh(bucket) => bucket.add(&triangles),
                        other => log::debug!("slot {slot} holds a {} bucket", other.kind()),
                    }
                }
                Err(TriangulationError::Degenerate) => {}
                Err(err) => log::debug!("{} skipping area: {err}", self.coords),
            }
        } else {
            match self
                .buckets
                .entry(slot)
                .or_insert_with(|| Bucket::Polygon(PolygonBucket::new(id)))
            {
                Bucket::Polygon(bucket) => bucket.add(element.rings()),
                other => log::debug!("slot {slot} holds a {} bucket", other.kind()),
            }
        }

        if let Some(outline) = &area.outline {
            let slot = self.buckets.slot(element.layer, outline.level);
            let scale = self.line_scale;
            let coords = self.coords;
            if let Some(bucket) = self.line_bucket(slot, id, outline, scale) {
                for ring in element.rings() {
                    if let Err(err) = bucket.add_line(ring, true) {
                        log::debug!("{coords} skipping area outline: {err:?}");
                    }
                }
            }
        }
    }

    fn render_circle(&mut self, element: &MapElement, id: StyleId, circle: &CircleStyle) {
        if !element.geometry_type.is_point() {
            return;
        }
        let radius = if circle.scale_radius {
            circle.radius * self.line_scale
        } else {
            circle.radius
        };
        for xy in element.points.chunks_exact(2) {
            self.symbols.push(SymbolItem {
                source: SymbolSource::Circle { radius, style: id },
                x: xy[0],
                y: xy[1],
                angle: 0.0,
                align_center: true,
            });
        }
    }

    fn render_symbol(&mut self, element: &MapElement, symbol: &SymbolStyle) {
        if symbol.src.is_empty() {
            log::debug!("{} missing symbol for {}", self.coords, element.tags);
            return;
        }

        let mut push = |x: f32, y: f32| {
            self.symbols.push(SymbolItem {
                source: SymbolSource::Bitmap(symbol.src.clone()),
                x,
                y,
                angle: 0.0,
                align_center: true,
            })
        };
        match element.geometry_type {
            GeometryType::Point => {
                for xy in element.points.chunks_exact(2) {
                    push(xy[0], xy[1]);
                }
            }
            GeometryType::Polygon => {
                if let Some((x, y)) = outer_ring_center(element) {
                    push(x, y);
                }
            }
            GeometryType::Line | GeometryType::None => {}
        }
    }

    fn render_line_symbol(&mut self, element: &MapElement, symbol: &LineSymbolStyle) {
        if element.geometry_type.is_point() || element.num_points() < symbol.min_points {
            return;
        }
        for ring in element.rings() {
            render_symbols(ring, symbol, &self.decorator, &mut self.symbols);
        }
    }

    fn render_text(&mut self, element: &MapElement, id: StyleId, text: &TextStyle) {
        let Some(value) = element.tags.value(&text.key).filter(|value| !value.is_empty()) else {
            return;
        };
        if element.num_points() < text.min_points {
            return;
        }

        match element.geometry_type {
            GeometryType::Point => {
                for xy in element.points.chunks_exact(2) {
                    self.push_point_label(value, id, text, xy[0], xy[1]);
                }
            }
            GeometryType::Polygon => {
                if let Some((x, y)) = outer_ring_center(element) {
                    self.push_point_label(value, id, text, x, y);
                }
            }
            GeometryType::Line => {
                for ring in element.rings().filter(|ring| ring.len() >= 4) {
                    render_text(
                        ring,
                        value,
                        id,
                        text,
                        self.measure.as_ref(),
                        &self.decorator,
                        &mut self.labels,
                        &mut self.texts,
                    );
                }
            }
            GeometryType::None => {}
        }
    }

    /// Places a label centered on its anchor unless the same text or a crossing label was
    /// already placed there.
    fn push_point_label(&mut self, value: &str, id: StyleId, text: &TextStyle, x: f32, y: f32) {
        let width = self.measure.text_width(value, text);
        let y = y + text.dy;
        let placed = PlacedLabel {
            text: value.to_string(),
            x1: x - width / 2.0,
            y1: y,
            x2: x + width / 2.0,
            y2: y,
        };
        if self.labels.collides(&placed, self.decorator.label_slack) {
            return;
        }
        self.labels.insert(placed);

        let item = TextItem::at_point(value, id, x, y, width);
        if text.has_outline() {
            let outline = TextItem {
                outline: true,
                ..item.clone()
            };
            self.texts.push(item);
            self.texts.push(outline);
        } else {
            self.texts.push(item);
        }
    }

    fn render_extrusion(&mut self, element: &MapElement, id: StyleId, extrusion: &ExtrusionStyle) {
        if !element.geometry_type.is_polygon() {
            return;
        }
        let mut height = height_tag(element, KEY_HEIGHT).unwrap_or(element.height);
        let min_height = height_tag(element, KEY_MIN_HEIGHT).unwrap_or(element.min_height);
        if height == 0 && min_height == 0 {
            height = DEFAULT_BUILDING_HEIGHT;
        }

        let slot = self.buckets.reserved_slot(ReservedSlot::Extrusion);
        let ground_scale = self.coords.ground_scale(self.tile_size);
        let entry = self
            .buckets
            .entry(slot)
            .or_insert_with(|| Bucket::Extrusion(ExtrusionBucket::new(ground_scale)));
        let Bucket::Extrusion(bucket) = entry else {
            return;
        };

        self.ring_lengths.clear();
        self.ring_lengths.extend(element.rings().map(<[f32]>::len));
        bucket.add(
            id,
            &ExtrusionColors::from(extrusion),
            &element.points,
            &self.ring_lengths,
            height as f32,
            min_height as f32,
            self.triangulator.as_mut(),
        );
    }
}

fn height_tag(element: &MapElement, key: &str) -> Option<i32> {
    let value = element.tags.value(key)?;
    match value.parse() {
        Ok(height) => Some(height),
        Err(_) => {
            log::debug!("invalid {key} {value:?}");
            None
        }
    }
}

/// Average of the points of the outer ring.
fn outer_ring_center(element: &MapElement) -> Option<(f32, f32)> {
    let ring = element.rings().next()?;
    let n = (ring.len() / 2) as f32;
    if n == 0.0 {
        return None;
    }
    let (x, y) = ring
        .chunks_exact(2)
        .fold((0.0, 0.0), |(x, y), xy| (x + xy[0], y + xy[1]));
    Some((x / n, y / n))
}

impl TileDataSink for BucketBuilder {
    fn process(&mut self, element: &MapElement) {
        self.current_line = None;
        if element.geometry_type == GeometryType::None {
            return;
        }

        let styles = self
            .matcher
            .match_element(element.geometry_type, &element.tags, self.coords.z);
        if styles.is_empty() {
            return;
        }

        let theme = self.matcher.theme().clone();
        for &id in styles.iter() {
            let Some(style) = theme.style(id) else {
                continue;
            };
            match style {
                RenderStyle::Line(line) => self.render_line(element, id, line),
                RenderStyle::Area(area) => self.render_area(element, id, area),
                RenderStyle::Circle(circle) => self.render_circle(element, id, circle),
                RenderStyle::Symbol(symbol) => self.render_symbol(element, symbol),
                RenderStyle::LineSymbol(symbol) => self.render_line_symbol(element, symbol),
                RenderStyle::Text(text) => self.render_text(element, id, text),
                RenderStyle::Extrusion(extrusion) => self.render_extrusion(element, id, extrusion),
            }
        }
        self.current_line = None;
    }

    fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
