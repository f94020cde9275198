//! Structural equality and canonical ordering of circuit trees.
//!
//! Equality is storage-order-insensitive: two composites are equal when
//! they have the same association kind and their children can be matched
//! one-to-one as equal pieces. RC/RQ motifs count as parallel circuits, so
//! an RC node equals a generic two-branch parallel of the same resistor and
//! capacitor. Labels and fixed/free flags never participate.
//!
//! [`canonical_cmp`] defines a deterministic total order over pieces used
//! by [`Piece::canonicalized`] to sort children recursively, giving every
//! tree a unique normal form: elements before motifs before generic
//! circuits, then by characteristic value within each group.

use std::cmp::Ordering;

use crate::element::Element;

use super::tree::{Circuit, ParallelCircuit, Piece, RcCircuit, RqCircuit, SeriesCircuit};

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Piece::Element(a), Piece::Element(b)) => a == b,
            (Piece::Circuit(a), Piece::Circuit(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq for Circuit {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Circuit::Series(a), Circuit::Series(b)) => multiset_eq(a.pieces(), b.pieces()),
            (Circuit::Parallel(a), Circuit::Parallel(b)) => multiset_eq(a.pieces(), b.pieces()),
            (Circuit::Rc(a), Circuit::Rc(b)) => {
                a.resistor() == b.resistor() && a.capacitor() == b.capacitor()
            }
            (Circuit::Rq(a), Circuit::Rq(b)) => a.resistor() == b.resistor() && a.cpe() == b.cpe(),
            (Circuit::Rc(rc), Circuit::Parallel(p)) | (Circuit::Parallel(p), Circuit::Rc(rc)) => {
                rc_matches_parallel(rc, p)
            }
            (Circuit::Rq(rq), Circuit::Parallel(p)) | (Circuit::Parallel(p), Circuit::Rq(rq)) => {
                rq_matches_parallel(rq, p)
            }
            _ => false,
        }
    }
}

/// Order-insensitive one-to-one matching of two child lists.
fn multiset_eq(left: &[Piece], right: &[Piece]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut used = vec![false; right.len()];
    'next: for piece in left {
        for (i, candidate) in right.iter().enumerate() {
            if !used[i] && piece == candidate {
                used[i] = true;
                continue 'next;
            }
        }
        return false;
    }
    true
}

fn rc_matches_parallel(rc: &RcCircuit, parallel: &ParallelCircuit) -> bool {
    match parallel.pieces() {
        [a, b] => {
            (is_resistor(a, rc) && is_capacitor(b, rc)) || (is_resistor(b, rc) && is_capacitor(a, rc))
        }
        _ => false,
    }
}

fn rq_matches_parallel(rq: &RqCircuit, parallel: &ParallelCircuit) -> bool {
    match parallel.pieces() {
        [a, b] => {
            (is_rq_resistor(a, rq) && is_cpe(b, rq)) || (is_rq_resistor(b, rq) && is_cpe(a, rq))
        }
        _ => false,
    }
}

fn is_resistor(piece: &Piece, rc: &RcCircuit) -> bool {
    matches!(piece, Piece::Element(Element::Resistor(r)) if r == rc.resistor())
}

fn is_capacitor(piece: &Piece, rc: &RcCircuit) -> bool {
    matches!(piece, Piece::Element(Element::Capacitor(c)) if c == rc.capacitor())
}

fn is_rq_resistor(piece: &Piece, rq: &RqCircuit) -> bool {
    matches!(piece, Piece::Element(Element::Resistor(r)) if r == rq.resistor())
}

fn is_cpe(piece: &Piece, rq: &RqCircuit) -> bool {
    matches!(piece, Piece::Element(Element::Cpe(q)) if q == rq.cpe())
}

/// Sort rank of a piece: elements by type, then RC/RQ motifs, then generic
/// parallel, then generic series.
fn rank(piece: &Piece) -> u8 {
    match piece {
        Piece::Element(Element::Resistor(_)) => 0,
        Piece::Element(Element::Capacitor(_)) => 1,
        Piece::Element(Element::Cpe(_)) => 2,
        Piece::Element(Element::Inductor(_)) => 3,
        Piece::Circuit(Circuit::Rc(_) | Circuit::Rq(_)) => 4,
        Piece::Circuit(Circuit::Parallel(_)) => 5,
        Piece::Circuit(Circuit::Series(_)) => 6,
    }
}

/// Deterministic total order over pieces.
///
/// Pieces compare by rank first; within a rank, elements compare by their
/// characteristic value, motifs by relaxation frequency and generic
/// circuits by child count, with remaining numeric fields and children as
/// tie-breaks. NaN values order through `f64::total_cmp`.
pub fn canonical_cmp(left: &Piece, right: &Piece) -> Ordering {
    let by_rank = rank(left).cmp(&rank(right));
    if by_rank != Ordering::Equal {
        return by_rank;
    }
    match (left, right) {
        (Piece::Element(a), Piece::Element(b)) => element_cmp(a, b),
        (Piece::Circuit(a), Piece::Circuit(b)) => circuit_cmp(a, b),
        _ => Ordering::Equal,
    }
}

fn element_cmp(left: &Element, right: &Element) -> Ordering {
    match (left, right) {
        (Element::Resistor(a), Element::Resistor(b)) => a.resistance().total_cmp(&b.resistance()),
        (Element::Capacitor(a), Element::Capacitor(b)) => {
            a.capacitance().total_cmp(&b.capacitance())
        }
        (Element::Cpe(a), Element::Cpe(b)) => a
            .t()
            .total_cmp(&b.t())
            .then_with(|| a.p().total_cmp(&b.p())),
        (Element::Inductor(a), Element::Inductor(b)) => a.inductance().total_cmp(&b.inductance()),
        _ => Ordering::Equal,
    }
}

fn circuit_cmp(left: &Circuit, right: &Circuit) -> Ordering {
    match (left, right) {
        (Circuit::Rc(a), Circuit::Rc(b)) => {
            relaxation_cmp(a.relaxation_frequency(), b.relaxation_frequency())
                .then_with(|| a.resistor().resistance().total_cmp(&b.resistor().resistance()))
                .then_with(|| {
                    a.capacitor()
                        .capacitance()
                        .total_cmp(&b.capacitor().capacitance())
                })
        }
        (Circuit::Rq(a), Circuit::Rq(b)) => {
            relaxation_cmp(a.relaxation_frequency(), b.relaxation_frequency())
                .then_with(|| a.resistor().resistance().total_cmp(&b.resistor().resistance()))
                .then_with(|| a.cpe().t().total_cmp(&b.cpe().t()))
                .then_with(|| a.cpe().p().total_cmp(&b.cpe().p()))
        }
        (Circuit::Rc(a), Circuit::Rq(b)) => {
            relaxation_cmp(a.relaxation_frequency(), b.relaxation_frequency()).then(Ordering::Less)
        }
        (Circuit::Rq(a), Circuit::Rc(b)) => {
            relaxation_cmp(a.relaxation_frequency(), b.relaxation_frequency())
                .then(Ordering::Greater)
        }
        (Circuit::Parallel(a), Circuit::Parallel(b)) => pieces_cmp(a.pieces(), b.pieces()),
        (Circuit::Series(a), Circuit::Series(b)) => pieces_cmp(a.pieces(), b.pieces()),
        _ => Ordering::Equal,
    }
}

fn relaxation_cmp(left: f64, right: f64) -> Ordering {
    left.total_cmp(&right)
}

fn pieces_cmp(left: &[Piece], right: &[Piece]) -> Ordering {
    let by_len = left.len().cmp(&right.len());
    if by_len != Ordering::Equal {
        return by_len;
    }
    for (a, b) in left.iter().zip(right) {
        let ord = canonical_cmp(a, b);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

impl Piece {
    /// Return a copy of this piece with every composite's children sorted
    /// into canonical order, recursively.
    pub fn canonicalized(&self) -> Piece {
        match self {
            Piece::Element(e) => Piece::Element(e.clone()),
            Piece::Circuit(c) => Piece::Circuit(c.canonicalized()),
        }
    }
}

impl Circuit {
    /// Return a copy of this circuit with every composite's children sorted
    /// into canonical order, recursively. RC/RQ motifs keep their fixed
    /// two-element shape.
    pub fn canonicalized(&self) -> Circuit {
        match self {
            Circuit::Series(s) => {
                let mut pieces: Vec<Piece> = s.pieces().iter().map(Piece::canonicalized).collect();
                pieces.sort_by(canonical_cmp);
                Circuit::Series(SeriesCircuit::from_pieces(pieces, s.label.clone()))
            }
            Circuit::Parallel(p) => {
                let mut pieces: Vec<Piece> = p.pieces().iter().map(Piece::canonicalized).collect();
                pieces.sort_by(canonical_cmp);
                Circuit::Parallel(ParallelCircuit::from_pieces(pieces, p.label.clone()))
            }
            Circuit::Rc(rc) => Circuit::Rc(rc.clone()),
            Circuit::Rq(rq) => Circuit::Rq(rq.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{parallel, series};
    use crate::element::{Capacitor, Cpe, Inductor, Resistor};

    #[test]
    fn test_equality_is_order_insensitive() {
        let ab = parallel(Resistor::new(1.0), Inductor::new(2.0));
        let ba = parallel(Inductor::new(2.0), Resistor::new(1.0));
        assert_eq!(ab, ba);

        let s_ab = series(Resistor::new(1.0), Capacitor::new(2.0));
        let s_ba = series(Capacitor::new(2.0), Resistor::new(1.0));
        assert_eq!(s_ab, s_ba);
    }

    #[test]
    fn test_equality_with_repeated_values() {
        let left = parallel(
            parallel(Resistor::new(1.0), Resistor::new(2.0)),
            Resistor::new(1.0),
        );
        let right = parallel(
            Resistor::new(1.0),
            parallel(Resistor::new(1.0), Resistor::new(2.0)),
        );
        assert_eq!(left, right);

        let different_multiset = parallel(
            parallel(Resistor::new(1.0), Resistor::new(2.0)),
            Resistor::new(2.0),
        );
        assert_ne!(different_multiset, left);
    }

    #[test]
    fn test_series_and_parallel_never_compare_equal() {
        let s = series(Resistor::new(1.0), Capacitor::new(2.0));
        let p = parallel(Resistor::new(1.0), Inductor::new(2.0));
        assert_ne!(s, p);
    }

    #[test]
    fn test_element_never_equals_circuit() {
        let element = Piece::from(Resistor::new(1.0));
        let circuit = series(Resistor::new(1.0), Resistor::new(1.0));
        assert_ne!(element, circuit);
    }

    #[test]
    fn test_rc_equals_equivalent_generic_parallel() {
        let rc = Piece::Circuit(Circuit::Rc(RcCircuit::new(
            Resistor::new(1000.0),
            Capacitor::new(1e-6),
        )));
        let generic = Piece::Circuit(Circuit::Parallel(ParallelCircuit::from_pieces(
            vec![Capacitor::new(1e-6).into(), Resistor::new(1000.0).into()],
            None,
        )));
        assert_eq!(rc, generic);
        assert_eq!(generic, rc);

        let other_c = Piece::Circuit(Circuit::Parallel(ParallelCircuit::from_pieces(
            vec![Capacitor::new(2e-6).into(), Resistor::new(1000.0).into()],
            None,
        )));
        assert_ne!(rc, other_c);
    }

    #[test]
    fn test_rq_equals_equivalent_generic_parallel() {
        let rq = Piece::Circuit(Circuit::Rq(RqCircuit::new(
            Resistor::new(1000.0),
            Cpe::new(1e-9, 0.8),
        )));
        let generic = Piece::Circuit(Circuit::Parallel(ParallelCircuit::from_pieces(
            vec![Cpe::new(1e-9, 0.8).into(), Resistor::new(1000.0).into()],
            None,
        )));
        assert_eq!(rq, generic);
    }

    #[test]
    fn test_rc_and_rq_are_distinct() {
        let rc = parallel(Resistor::new(1000.0), Capacitor::new(1e-6));
        let rq = parallel(Resistor::new(1000.0), Cpe::new(1e-6, 1.0));
        assert_ne!(rc, rq);
    }

    #[test]
    fn test_labels_do_not_affect_equality() {
        let plain = parallel(Resistor::new(1000.0), Capacitor::new(1e-6));
        let labeled = parallel(
            Resistor::new(1000.0).with_label("R_gb"),
            Capacitor::new(1e-6).with_label("C_gb"),
        );
        assert_eq!(plain, labeled);
    }

    #[test]
    fn test_canonical_order_ranks_types() {
        let tree = series(
            series(
                series(Inductor::new(1e-6), Cpe::new(1e-9, 0.8)),
                Capacitor::new(1e-6),
            ),
            Resistor::new(10.0),
        );
        let canonical = tree.canonicalized();
        match canonical {
            Piece::Circuit(Circuit::Series(s)) => {
                let ranks: Vec<u8> = s.pieces().iter().map(rank).collect();
                assert_eq!(ranks, vec![0, 1, 2, 3]);
            }
            other => panic!("expected a series circuit, got {other:?}"),
        }
    }

    #[test]
    fn test_canonical_order_sorts_by_value_within_type() {
        let tree = series(
            series(Resistor::new(300.0), Resistor::new(100.0)),
            Resistor::new(200.0),
        );
        let canonical = tree.canonicalized();
        match canonical {
            Piece::Circuit(Circuit::Series(s)) => {
                let values: Vec<f64> = s
                    .pieces()
                    .iter()
                    .map(|p| match p {
                        Piece::Element(Element::Resistor(r)) => r.resistance(),
                        other => panic!("expected resistors, got {other:?}"),
                    })
                    .collect();
                assert_eq!(values, vec![100.0, 200.0, 300.0]);
            }
            other => panic!("expected a series circuit, got {other:?}"),
        }
    }

    #[test]
    fn test_canonical_order_sorts_motifs_by_relaxation_frequency() {
        let slow = parallel(Resistor::new(10_000.0), Capacitor::new(1e-6));
        let fast = parallel(Resistor::new(10.0), Capacitor::new(1e-9));
        let tree = series(slow, fast);
        let canonical = tree.canonicalized();
        match canonical {
            Piece::Circuit(Circuit::Series(s)) => {
                let freqs: Vec<f64> = s
                    .pieces()
                    .iter()
                    .map(|p| match p {
                        Piece::Circuit(Circuit::Rc(rc)) => rc.relaxation_frequency(),
                        other => panic!("expected RC motifs, got {other:?}"),
                    })
                    .collect();
                assert!(freqs[0] < freqs[1]);
            }
            other => panic!("expected a series circuit, got {other:?}"),
        }
    }

    #[test]
    fn test_construction_order_vanishes_after_canonicalization() {
        let one = series(
            series(Capacitor::new(1e-6), Resistor::new(50.0)),
            parallel(Resistor::new(1000.0), Capacitor::new(1e-9)),
        );
        let two = series(
            parallel(Capacitor::new(1e-9), Resistor::new(1000.0)),
            series(Resistor::new(50.0), Capacitor::new(1e-6)),
        );
        let c_one = one.canonicalized();
        let c_two = two.canonicalized();
        assert_eq!(c_one, c_two);
        assert_eq!(c_one.label(), c_two.label());
    }

    #[test]
    fn test_canonicalization_preserves_impedance() {
        let tree = series(
            parallel(Resistor::new(1000.0), Cpe::new(1e-9, 0.8)),
            series(Inductor::new(1e-6), Resistor::new(5.0)),
        );
        let canonical = tree.canonicalized();
        for f in [1.0, 1e3, 1e6] {
            let z = tree.impedance(f);
            let zc = canonical.impedance(f);
            approx::assert_relative_eq!(z.re, zc.re, max_relative = 1e-12);
            approx::assert_relative_eq!(z.im, zc.im, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_canonical_cmp_is_deterministic_on_ties() {
        let rc = Piece::Circuit(Circuit::Rc(RcCircuit::new(
            Resistor::new(1000.0),
            Capacitor::new(1e-6),
        )));
        // Same nominal relaxation frequency, different element values.
        let rc_other = Piece::Circuit(Circuit::Rc(RcCircuit::new(
            Resistor::new(100.0),
            Capacitor::new(1e-5),
        )));
        let forward = canonical_cmp(&rc, &rc_other);
        let backward = canonical_cmp(&rc_other, &rc);
        assert_eq!(forward, backward.reverse());
        assert_ne!(forward, Ordering::Equal);
    }
}
