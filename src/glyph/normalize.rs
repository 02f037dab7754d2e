use std::borrow::Cow;

use kurbo::ParamCurveArclen;

use crate::{
    foundation::core::{BezPath, Point, ViewBox},
    foundation::error::LoadError,
    glyph::model::{GlyphStrokeSet, StrokeLabel, StrokeRecord},
};

/// Accuracy passed to `kurbo`'s arc length solver, in document units.
pub const ARCLEN_ACCURACY: f64 = 1e-3;

const KVG_NAMESPACE: &str = "http://kanjivg.tagaini.net";

/// Turn a raw glyph document into an ordered stroke set.
///
/// Every `<path d=...>` becomes one stroke, in document order. Text is stripped from the geometry;
/// texts inside a `StrokeNumbers` group are kept as [`StrokeLabel`]s so the engine can draw the
/// numbers itself.
#[tracing::instrument(skip(raw), fields(bytes = raw.len()))]
pub fn normalize(character: char, raw: &str) -> Result<GlyphStrokeSet, LoadError> {
    let xml = sanitize(raw);
    let doc = roxmltree::Document::parse(&xml)
        .map_err(|e| LoadError::malformed(format!("glyph document for '{character}': {e}")))?;

    let root = doc.root_element();
    let view_box = match root.attribute("viewBox") {
        Some(v) => ViewBox::parse(v).map_err(|e| LoadError::malformed(e.to_string()))?,
        None => ViewBox::default(),
    };

    let mut strokes = Vec::new();
    let mut labels = Vec::new();
    let mut dropped_text = 0usize;

    for node in doc.descendants().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "path" => {
                if has_ancestor(node, |a| a.tag_name().name() == "defs") {
                    continue;
                }
                let Some(d) = node.attribute("d").map(str::trim).filter(|d| !d.is_empty()) else {
                    continue;
                };
                let order = strokes.len();
                strokes.push(stroke_record(order, d)?);
            }
            "text" => {
                let in_numbers = has_ancestor(node, |a| {
                    a.attribute("id").is_some_and(|id| id.contains("StrokeNumbers"))
                });
                if in_numbers {
                    let fallback_number = labels.len() + 1;
                    labels.push(stroke_label(node, fallback_number));
                } else {
                    dropped_text += 1;
                }
            }
            _ => {}
        }
    }

    if strokes.is_empty() {
        return Err(LoadError::Empty);
    }

    let stroke_count = strokes.len();
    labels.retain(|l: &StrokeLabel| (1..=stroke_count).contains(&l.number));
    labels.sort_by_key(|l| l.number);
    labels.dedup_by_key(|l| l.number);

    tracing::debug!(
        strokes = stroke_count,
        labels = labels.len(),
        dropped_text,
        "normalized glyph"
    );

    Ok(GlyphStrokeSet {
        character,
        strokes,
        labels,
        view_box,
    })
}

/// Arc length of a path: the sum of each segment's length along the curve.
pub fn path_length(path: &BezPath) -> f64 {
    path.segments().map(|seg| seg.arclen(ARCLEN_ACCURACY)).sum()
}

fn stroke_record(order: usize, d: &str) -> Result<StrokeRecord, LoadError> {
    let path = BezPath::from_svg(d)
        .map_err(|e| LoadError::malformed(format!("stroke {}: invalid path data: {e}", order + 1)))?;
    let length = path_length(&path);
    tracing::trace!(order, length, "stroke");
    Ok(StrokeRecord {
        order,
        geometry: d.to_string(),
        path,
        length,
    })
}

fn stroke_label(node: roxmltree::Node<'_, '_>, fallback_number: usize) -> StrokeLabel {
    let number = node
        .text()
        .and_then(|t| t.trim().parse::<usize>().ok())
        .unwrap_or(fallback_number);

    let position = node
        .attribute("transform")
        .and_then(transform_translation)
        .unwrap_or_else(|| {
            let coord = |name: &str| node.attribute(name).and_then(first_number).unwrap_or(0.0);
            Point::new(coord("x"), coord("y"))
        });

    StrokeLabel { number, position }
}

/// Translation part of `matrix(a b c d e f)` or `translate(x [y])`.
fn transform_translation(transform: &str) -> Option<Point> {
    let t = transform.trim();
    let (name, rest) = t.split_once('(')?;
    let args = numbers(rest.trim_end_matches(')'));
    match (name.trim(), args.as_slice()) {
        ("matrix", [_, _, _, _, e, f]) => Some(Point::new(*e, *f)),
        ("translate", [x]) => Some(Point::new(*x, 0.0)),
        ("translate", [x, y]) => Some(Point::new(*x, *y)),
        _ => None,
    }
}

fn numbers(s: &str) -> Vec<f64> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .filter_map(|p| p.parse::<f64>().ok())
        .collect()
}

fn first_number(s: &str) -> Option<f64> {
    numbers(s).first().copied()
}

fn has_ancestor(
    node: roxmltree::Node<'_, '_>,
    pred: impl Fn(roxmltree::Node<'_, '_>) -> bool,
) -> bool {
    node.ancestors().skip(1).any(|a| a.is_element() && pred(a))
}

/// Make a KanjiVG-style document parseable without DTD processing.
///
/// The DOCTYPE (with its internal subset) is removed, and because KanjiVG declares the `kvg`
/// namespace only through that DTD, the declaration is added to the root `<svg>` element.
pub(crate) fn sanitize(raw: &str) -> Cow<'_, str> {
    let mut out = Cow::Borrowed(raw);

    if let Some(start) = out.find("<!DOCTYPE") {
        let end = doctype_end(&out[start..]).map(|e| start + e);
        let mut s = out.into_owned();
        match end {
            Some(end) => s.replace_range(start..end, ""),
            None => s.truncate(start),
        }
        out = Cow::Owned(s);
    }

    if out.contains("kvg:") && !out.contains("xmlns:kvg") {
        if let Some(at) = svg_tag_name_end(&out) {
            let mut s = out.into_owned();
            s.insert_str(at, &format!(" xmlns:kvg=\"{KVG_NAMESPACE}\""));
            out = Cow::Owned(s);
        }
    }

    out
}

/// Byte length of the DOCTYPE declaration at the start of `s`, including its closing `>`.
fn doctype_end(s: &str) -> Option<usize> {
    let gt = s.find('>')?;
    match s.find('[') {
        Some(open) if open < gt => {
            let close = open + s[open..].find(']')?;
            let gt = close + s[close..].find('>')?;
            Some(gt + 1)
        }
        _ => Some(gt + 1),
    }
}

/// Byte offset just past `<svg` of the root element's start tag.
fn svg_tag_name_end(s: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(pos) = s[from..].find("<svg") {
        let at = from + pos + "<svg".len();
        match s[at..].chars().next() {
            Some(c) if c.is_whitespace() || c == '>' || c == '/' => return Some(at),
            _ => from = at,
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/normalize.rs"]
mod tests;
