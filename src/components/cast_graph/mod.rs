mod builder;
mod component;
mod interaction;
mod render;
pub mod scale;
mod simulation;
mod state;
mod types;

pub use builder::{GraphBuildError, build_graph};
pub use component::CastGraphCanvas;
pub use interaction::{Highlight, InputEvent, InteractionState, PanelContent};
pub use types::{GraphModel, Link, LinkRecord, Node, NodeKey, NodeKind, ShowRecord};
