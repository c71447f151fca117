/// Route declarations, flattening and matching
///
/// - `declaration`: the author-facing tree
/// - `chain`: pre-order flattening into root-to-node chains
/// - `pattern`: the segment pattern dialect and the matcher seam
/// - `table`: the flattened table with first-match lookup

pub mod chain;
pub mod declaration;
pub mod pattern;
pub mod table;

pub use chain::{flatten, Chain};
pub use declaration::{BoxFuture, RouteDeclaration, ViewConstructor, ViewFactory};
pub use pattern::{classify_segment, match_pattern, Params, PatternMatcher, PatternSegment, SegmentMatcher};
pub use table::{RouteMatch, RouteTable};
