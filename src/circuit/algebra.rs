//! Composition of elements and circuits into series/parallel trees.
//!
//! Both operators consume their operands and never mutate existing nodes;
//! callers clone a piece if they need to reuse it. Generic operands of the
//! operator's own kind are spliced into the result so that repeated
//! composition yields a single flat node. RC and RQ nodes are opaque: they
//! are never unwrapped by flattening.

use crate::element::Element;

use super::tree::{Circuit, ParallelCircuit, Piece, RcCircuit, RqCircuit, SeriesCircuit};

/// Compose two pieces in series.
pub fn series(left: impl Into<Piece>, right: impl Into<Piece>) -> Piece {
    let mut pieces = Vec::new();
    splice_series(left.into(), &mut pieces);
    splice_series(right.into(), &mut pieces);
    Piece::Circuit(Circuit::Series(SeriesCircuit::from_pieces(pieces, None)))
}

/// Compose two pieces in parallel.
///
/// A bare resistor paired with a bare capacitor or CPE specializes into an
/// [`RcCircuit`] or [`RqCircuit`] node regardless of operand order. The
/// specialization applies only to direct element operands; it is never
/// re-detected inside nested circuits.
pub fn parallel(left: impl Into<Piece>, right: impl Into<Piece>) -> Piece {
    match try_specialize(left.into(), right.into()) {
        Ok(motif) => Piece::Circuit(motif),
        Err((left, right)) => {
            let mut pieces = Vec::new();
            splice_parallel(left, &mut pieces);
            splice_parallel(right, &mut pieces);
            Piece::Circuit(Circuit::Parallel(ParallelCircuit::from_pieces(pieces, None)))
        }
    }
}

/// Try to build an RC/RQ motif from two bare elements, handing the operands
/// back unchanged when they do not match.
fn try_specialize(left: Piece, right: Piece) -> Result<Circuit, (Piece, Piece)> {
    match (left, right) {
        (Piece::Element(Element::Resistor(r)), Piece::Element(Element::Cpe(q)))
        | (Piece::Element(Element::Cpe(q)), Piece::Element(Element::Resistor(r))) => {
            Ok(Circuit::Rq(RqCircuit::new(r, q)))
        }
        (Piece::Element(Element::Resistor(r)), Piece::Element(Element::Capacitor(c)))
        | (Piece::Element(Element::Capacitor(c)), Piece::Element(Element::Resistor(r))) => {
            Ok(Circuit::Rc(RcCircuit::new(r, c)))
        }
        (left, right) => Err((left, right)),
    }
}

fn splice_series(piece: Piece, pieces: &mut Vec<Piece>) {
    match piece {
        Piece::Circuit(Circuit::Series(s)) => pieces.extend(s.into_pieces()),
        other => pieces.push(other),
    }
}

fn splice_parallel(piece: Piece, pieces: &mut Vec<Piece>) {
    match piece {
        Piece::Circuit(Circuit::Parallel(p)) => pieces.extend(p.into_pieces()),
        other => pieces.push(other),
    }
}
