use protodoc_core::{DiagramConfig, Documentation};
use protodoc_render::{SvgRenderOptions, layout_file, render_file_diagram_svg, render_svg};

const EXAMPLE: &str = include_str!("../../../fixtures/example.json");

#[test]
fn svg_draws_every_node_and_reference() {
    let doc = Documentation::from_json_str(EXAMPLE).expect("fixture parses");
    let file = doc.file("booking.proto").expect("booking.proto");
    let diagram = layout_file(file, &DiagramConfig::default());

    let svg = render_file_diagram_svg(&diagram, &SvgRenderOptions::default());

    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("class=\"node\"").count(), 4);
    assert_eq!(svg.matches("<polyline class=\"edge\"").count(), 3);
    assert_eq!(svg.matches("<path class=\"edge\"").count(), 1);
    assert!(svg.contains(">Customer.Address</text>"));
    assert!(svg.contains("data-id=\"com.example.Booking-com.example.Booking\""));
}

#[test]
fn svg_escapes_labels_and_can_skip_edges() {
    let doc = Documentation::from_json_str(
        r#"{ "files": [ { "name": "a<b>.proto", "messages": [
            { "fullName": "x.A", "longName": "A<T> & \"B\"", "fields": [ { "fullType": "x.A" } ] }
        ] } ] }"#,
    )
    .expect("descriptor parses");
    let options = SvgRenderOptions {
        include_edges: false,
        include_title: true,
        ..Default::default()
    };

    let svg = render_svg(&doc, &DiagramConfig::default(), None, &options).expect("svg");

    assert!(svg.contains("A&lt;T&gt; &amp; &quot;B&quot;"));
    assert!(svg.contains("a&lt;b&gt;.proto"));
    assert!(!svg.contains("class=\"edges\""));
}

#[test]
fn an_empty_descriptor_renders_an_empty_svg() {
    let svg = render_svg(
        &Documentation::default(),
        &DiagramConfig::default(),
        None,
        &SvgRenderOptions::default(),
    )
    .expect("svg");
    assert!(svg.contains("<g class=\"nodes\"></g>"));
}
