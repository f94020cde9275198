//! Equivalent-circuit trees: composition, evaluation, equality and ordering.
//!
//! A circuit is an owned tree of [`Piece`]s, each an element or a nested
//! circuit. Trees are built through the [`series`] and [`parallel`]
//! composition functions, which flatten same-kind operands and specialize
//! the resistor/capacitor and resistor/CPE parallel motifs into [`RcCircuit`]
//! and [`RqCircuit`] nodes.

mod algebra;
mod canonical;
mod tree;

pub use algebra::{parallel, series};
pub use canonical::canonical_cmp;
pub use tree::{Circuit, ParallelCircuit, Piece, RcCircuit, RqCircuit, SeriesCircuit};
