use std::collections::HashMap;

use log::info;
use thiserror::Error;

use super::types::{GraphModel, Link, LinkRecord, Node, NodeData, ShowRecord};

/// Why graph construction was aborted. Any of these is fatal to the session:
/// no partial graph is ever produced.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphBuildError {
	/// A relationship row names a show absent from the entity table.
	#[error("relationship references unknown show \"{0}\"")]
	UnresolvedShow(String),
	/// Two entity rows share a name; show ids must be unique.
	#[error("duplicate show \"{0}\" in entity table")]
	DuplicateShow(String),
	/// A required field is empty in one of the input tables.
	#[error("row {row}: missing required field `{field}`")]
	RowParse { row: usize, field: &'static str },
}

/// Builds the session graph from the two parsed tables.
///
/// Show nodes come first, cast nodes follow in first-encounter order. Every
/// relationship row (repeats included) appends its show name to the target
/// cast member's `shows` sequence and produces one resolved link.
pub fn build_graph(
	shows: &[ShowRecord],
	links: &[LinkRecord],
) -> Result<GraphModel, GraphBuildError> {
	let mut nodes: Vec<Node> = Vec::with_capacity(shows.len());
	let mut show_index: HashMap<String, usize> = HashMap::with_capacity(shows.len());

	for (row, record) in shows.iter().enumerate() {
		if record.name.is_empty() {
			return Err(GraphBuildError::RowParse { row, field: "name" });
		}
		if show_index.insert(record.name.clone(), nodes.len()).is_some() {
			return Err(GraphBuildError::DuplicateShow(record.name.clone()));
		}
		nodes.push(Node::new(
			record.name.clone(),
			NodeData::Show {
				genre: record.genre.clone(),
				description: record.description.clone(),
				cast: record.cast.clone(),
			},
		));
	}

	// One scan of the relationship rows: a cast member materializes on first
	// encounter, and every row (repeats included) appends to its shows list.
	let mut cast_order: Vec<String> = Vec::new();
	let mut cast_shows: HashMap<String, Vec<String>> = HashMap::new();
	for (row, record) in links.iter().enumerate() {
		if record.source.is_empty() {
			return Err(GraphBuildError::RowParse { row, field: "source" });
		}
		if record.target.is_empty() {
			return Err(GraphBuildError::RowParse { row, field: "target" });
		}
		cast_shows
			.entry(record.target.clone())
			.or_insert_with(|| {
				cast_order.push(record.target.clone());
				Vec::new()
			})
			.push(record.source.clone());
	}

	let mut cast_index: HashMap<String, usize> = HashMap::with_capacity(cast_order.len());
	for id in cast_order {
		let shows_acted = cast_shows.remove(&id).unwrap_or_default();
		cast_index.insert(id.clone(), nodes.len());
		nodes.push(Node::new(id, NodeData::Cast { shows: shows_acted }));
	}

	let mut resolved: Vec<Link> = Vec::with_capacity(links.len());
	for record in links {
		let Some(&source) = show_index.get(&record.source) else {
			return Err(GraphBuildError::UnresolvedShow(record.source.clone()));
		};
		let target = cast_index[&record.target];
		resolved.push(Link { source, target });
	}

	info!(
		"graph built: {} shows, {} cast members, {} links",
		show_index.len(),
		nodes.len() - show_index.len(),
		resolved.len()
	);
	Ok(GraphModel::new(nodes, resolved))
}
