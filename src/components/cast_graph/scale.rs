//! Ordinal presentation scales keyed by node kind.

use super::types::NodeKind;

/// Marker radius: shows render larger than cast members.
pub fn radius_of(kind: NodeKind) -> f64 {
	match kind {
		NodeKind::Show => 9.0,
		NodeKind::Cast => 5.0,
	}
}

/// Fill accent per kind.
pub fn color_of(kind: NodeKind) -> &'static str {
	match kind {
		NodeKind::Show => "#32cc6f",
		NodeKind::Cast => "#3297d6",
	}
}
