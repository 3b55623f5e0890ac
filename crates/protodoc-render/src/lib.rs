#![forbid(unsafe_code)]

//! Reference diagrams for protobuf documentation.
//!
//! [`graph_builder`] turns a file's messages into a reference graph, [`diagram`] lays it out with
//! `protodoc-layout` and [`svg`] draws the result.

pub mod diagram;
pub mod graph_builder;
pub mod svg;

pub use diagram::{
    DiagramBounds, DiagramEdge, DiagramNode, FileDiagram, layout_documentation, layout_file,
};
pub use graph_builder::{SchemaEdge, SchemaGraph, SchemaNode};
pub use svg::{SvgRenderOptions, render_file_diagram_svg};

use protodoc_core::{DiagramConfig, Documentation};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] protodoc_core::Error),
    #[error("diagram JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reference graphs of every file (or of the one named `file`), serialized as a JSON array of
/// `{ file, graph }` objects.
pub fn graphs_json(
    doc: &Documentation,
    config: &DiagramConfig,
    file: Option<&str>,
    pretty: bool,
) -> Result<String> {
    #[derive(serde::Serialize)]
    struct FileGraph<'a> {
        file: &'a str,
        graph: SchemaGraph,
    }

    let files: Vec<&protodoc_core::File> = match file {
        Some(name) => vec![doc.file(name)?],
        None => doc.files.iter().collect(),
    };
    let graphs: Vec<FileGraph<'_>> = files
        .into_iter()
        .map(|f| FileGraph {
            file: &f.name,
            graph: graph_builder::build(&f.messages, config),
        })
        .collect();
    to_json(&graphs, pretty)
}

/// Laid out diagrams of every file (or of the one named `file`) as JSON.
pub fn diagrams_json(
    doc: &Documentation,
    config: &DiagramConfig,
    file: Option<&str>,
    pretty: bool,
) -> Result<String> {
    let diagrams = match file {
        Some(name) => vec![layout_file(doc.file(name)?, config)],
        None => layout_documentation(doc, config),
    };
    to_json(&diagrams, pretty)
}

/// SVG of the file named `file`, or of the first file.
///
/// A descriptor without files renders an empty diagram.
pub fn render_svg(
    doc: &Documentation,
    config: &DiagramConfig,
    file: Option<&str>,
    options: &SvgRenderOptions,
) -> Result<String> {
    let diagram = match file {
        Some(name) => layout_file(doc.file(name)?, config),
        None => match doc.files.first() {
            Some(f) => layout_file(f, config),
            None => diagram::layout_graph("", &SchemaGraph::default(), config),
        },
    };
    Ok(render_file_diagram_svg(&diagram, options))
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}
