//! Debug SVG output for file diagrams.

use crate::diagram::FileDiagram;
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Extra space around the diagram.
    pub viewbox_padding: f64,
    pub include_edges: bool,
    pub include_nodes: bool,
    /// Render the file name above the diagram.
    pub include_title: bool,
    /// Radius of the loop drawn for self-references.
    pub self_loop_radius: f64,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            viewbox_padding: 8.0,
            include_edges: true,
            include_nodes: true,
            include_title: false,
            self_loop_radius: 10.0,
        }
    }
}

pub fn render_file_diagram_svg(diagram: &FileDiagram, options: &SvgRenderOptions) -> String {
    let pad = options.viewbox_padding.max(0.0);
    let loop_r = options.self_loop_radius.max(0.0);
    let has_loops = options.include_edges && diagram.edges.iter().any(|e| e.source == e.target);
    let title_h = if options.include_title { 24.0 } else { 0.0 };

    let min_x = -pad;
    let min_y = -pad - title_h;
    let w = diagram.bounds.width + pad * 2.0 + if has_loops { loop_r * 2.0 } else { 0.0 };
    let h = diagram.bounds.height + pad * 2.0 + title_h + if has_loops { loop_r } else { 0.0 };

    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
        fmt(min_x),
        fmt(min_y),
        fmt(w.max(1.0)),
        fmt(h.max(1.0))
    );
    out.push_str(
        r#"<style>
 .node-box { fill: #ffffff; stroke: #2563eb; stroke-width: 1; }
 .node-label { fill: #1f2937; font-family: ui-sans-serif, system-ui, sans-serif; font-size: 11px; text-anchor: middle; dominant-baseline: middle; }
 .badge { fill: #2563eb; }
 .badge-label { fill: #ffffff; font-family: ui-sans-serif, system-ui, sans-serif; font-size: 9px; text-anchor: middle; dominant-baseline: middle; }
 .edge { fill: none; stroke: #111827; stroke-width: 1; }
 .title { fill: #111827; font-family: ui-sans-serif, system-ui, sans-serif; font-size: 14px; }
 </style>
 "#,
    );
    out.push_str(
        r##"<defs>
  <marker id="arrow" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="8" markerHeight="8" orient="auto-start-reverse">
    <path d="M 0 0 L 10 5 L 0 10 z" fill="#111827" />
  </marker>
</defs>
"##,
    );

    if options.include_title {
        let _ = writeln!(
            &mut out,
            r#"<text class="title" x="0" y="{}">{}</text>"#,
            fmt(-pad - title_h / 2.0 + 4.0),
            escape_xml(&diagram.file)
        );
    }

    if options.include_edges {
        out.push_str(r#"<g class="edges">"#);
        for e in &diagram.edges {
            if e.source == e.target {
                let Some(n) = diagram.node(&e.source) else {
                    continue;
                };
                // Loop on the top-right corner, leaving from the top border and entering the right one.
                let (x0, y0) = (n.x + n.width - loop_r, n.y);
                let (x1, y1) = (n.x + n.width, n.y + loop_r);
                let _ = write!(
                    &mut out,
                    r#"<path class="edge" data-id="{}" marker-end="url(#arrow)" d="M {} {} A {} {} 0 1 1 {} {}" />"#,
                    escape_attr(&e.id),
                    fmt(x0),
                    fmt(y0),
                    fmt(loop_r),
                    fmt(loop_r),
                    fmt(x1),
                    fmt(y1)
                );
                continue;
            }

            let route = diagram.edge_route(e);
            if route.len() < 2 {
                continue;
            }
            let _ = write!(
                &mut out,
                r#"<polyline class="edge" data-id="{}" marker-end="url(#arrow)" points=""#,
                escape_attr(&e.id)
            );
            for (idx, p) in route.iter().enumerate() {
                if idx > 0 {
                    out.push(' ');
                }
                let _ = write!(&mut out, "{},{}", fmt(p.x), fmt(p.y));
            }
            out.push_str(r#"" />"#);
        }
        out.push_str("</g>\n");
    }

    if options.include_nodes {
        out.push_str(r#"<g class="nodes">"#);
        for n in &diagram.nodes {
            let _ = write!(
                &mut out,
                r#"<g class="node" data-id="{}"><rect class="node-box" x="{}" y="{}" width="{}" height="{}" />"#,
                escape_attr(&n.id),
                fmt(n.x),
                fmt(n.y),
                fmt(n.width),
                fmt(n.height)
            );
            let badge = (n.height - 6.0).max(0.0);
            let _ = write!(
                &mut out,
                r#"<rect class="badge" x="{}" y="{}" width="{}" height="{}" rx="2" /><text class="badge-label" x="{}" y="{}">M</text>"#,
                fmt(n.x + 3.0),
                fmt(n.y + 3.0),
                fmt(badge),
                fmt(badge),
                fmt(n.x + 3.0 + badge / 2.0),
                fmt(n.y + n.height / 2.0)
            );
            let _ = write!(
                &mut out,
                r#"<text class="node-label" x="{}" y="{}">{}</text></g>"#,
                fmt(n.x + n.width / 2.0 + badge / 2.0),
                fmt(n.y + n.height / 2.0),
                escape_xml(&n.label)
            );
        }
        out.push_str("</g>\n");
    }

    out.push_str("</svg>\n");
    out
}

fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(text: &str) -> String {
    escape_xml(text)
}
