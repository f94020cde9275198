//! Circuit tree types and impedance evaluation.

use num_complex::Complex64;

use crate::element::{Capacitor, Cpe, Element, Inductor, Resistor};
use crate::sweep::frequency;

/// Combined impedance of parallel branches: `Z = 1 / (1/Z_1 + 1/Z_2 + ...)`.
fn parallel_impedance(branches: impl Iterator<Item = Complex64>) -> Complex64 {
    branches.map(|z| z.inv()).sum::<Complex64>().inv()
}

/// A child of a circuit node: either a bare element or a nested circuit.
#[derive(Debug, Clone)]
pub enum Piece {
    Element(Element),
    Circuit(Circuit),
}

impl Piece {
    /// Complex impedance at the given frequency in Hz.
    pub fn impedance(&self, frequency: f64) -> Complex64 {
        match self {
            Piece::Element(e) => e.impedance(frequency),
            Piece::Circuit(c) => c.impedance(frequency),
        }
    }

    /// Complex impedances over a frequency table.
    pub fn impedances(&self, frequencies: &[f64]) -> Vec<Complex64> {
        frequencies.iter().map(|&f| self.impedance(f)).collect()
    }

    /// Display label. For circuits this is derived from the children
    /// unless an explicit label was set.
    pub fn label(&self) -> String {
        match self {
            Piece::Element(e) => e.label().to_string(),
            Piece::Circuit(c) => c.label(),
        }
    }
}

impl From<Element> for Piece {
    fn from(element: Element) -> Self {
        Piece::Element(element)
    }
}

impl From<Circuit> for Piece {
    fn from(circuit: Circuit) -> Self {
        Piece::Circuit(circuit)
    }
}

impl From<Resistor> for Piece {
    fn from(r: Resistor) -> Self {
        Piece::Element(Element::Resistor(r))
    }
}

impl From<Capacitor> for Piece {
    fn from(c: Capacitor) -> Self {
        Piece::Element(Element::Capacitor(c))
    }
}

impl From<Cpe> for Piece {
    fn from(q: Cpe) -> Self {
        Piece::Element(Element::Cpe(q))
    }
}

impl From<Inductor> for Piece {
    fn from(l: Inductor) -> Self {
        Piece::Element(Element::Inductor(l))
    }
}

/// A composite circuit node.
///
/// The RC and RQ motifs carry their own variants so that derived quantities
/// (time constant, relaxation frequency) stay available after composition,
/// but they evaluate through the same parallel formula as the generic case.
#[derive(Debug, Clone)]
pub enum Circuit {
    Series(SeriesCircuit),
    Parallel(ParallelCircuit),
    Rc(RcCircuit),
    Rq(RqCircuit),
}

impl Circuit {
    /// Complex impedance at the given frequency in Hz.
    pub fn impedance(&self, frequency: f64) -> Complex64 {
        match self {
            Circuit::Series(s) => s.pieces.iter().map(|p| p.impedance(frequency)).sum(),
            Circuit::Parallel(p) => {
                parallel_impedance(p.pieces.iter().map(|piece| piece.impedance(frequency)))
            }
            Circuit::Rc(rc) => rc.impedance(frequency),
            Circuit::Rq(rq) => rq.impedance(frequency),
        }
    }

    /// Complex impedances over a frequency table.
    pub fn impedances(&self, frequencies: &[f64]) -> Vec<Complex64> {
        frequencies.iter().map(|&f| self.impedance(f)).collect()
    }

    /// Display label.
    ///
    /// RC and RQ nodes are always labeled "RC" and "RQ". Generic nodes
    /// derive their label by joining child labels with "-" (series) or
    /// "//" (parallel), parenthesizing nested generic circuits.
    pub fn label(&self) -> String {
        match self {
            Circuit::Series(s) => s.label(),
            Circuit::Parallel(p) => p.label(),
            Circuit::Rc(_) => "RC".to_string(),
            Circuit::Rq(_) => "RQ".to_string(),
        }
    }
}

impl From<SeriesCircuit> for Circuit {
    fn from(s: SeriesCircuit) -> Self {
        Circuit::Series(s)
    }
}

impl From<ParallelCircuit> for Circuit {
    fn from(p: ParallelCircuit) -> Self {
        Circuit::Parallel(p)
    }
}

impl From<RcCircuit> for Circuit {
    fn from(rc: RcCircuit) -> Self {
        Circuit::Rc(rc)
    }
}

impl From<RqCircuit> for Circuit {
    fn from(rq: RqCircuit) -> Self {
        Circuit::Rq(rq)
    }
}

impl From<SeriesCircuit> for Piece {
    fn from(s: SeriesCircuit) -> Self {
        Piece::Circuit(Circuit::Series(s))
    }
}

impl From<ParallelCircuit> for Piece {
    fn from(p: ParallelCircuit) -> Self {
        Piece::Circuit(Circuit::Parallel(p))
    }
}

impl From<RcCircuit> for Piece {
    fn from(rc: RcCircuit) -> Self {
        Piece::Circuit(Circuit::Rc(rc))
    }
}

impl From<RqCircuit> for Piece {
    fn from(rq: RqCircuit) -> Self {
        Piece::Circuit(Circuit::Rq(rq))
    }
}

/// Derived label for a generic circuit: child labels joined with the
/// association symbol, with nested generic circuits parenthesized.
fn derived_label(pieces: &[Piece], separator: &str) -> String {
    let labels: Vec<String> = pieces
        .iter()
        .map(|piece| match piece {
            Piece::Element(e) => e.label().to_string(),
            Piece::Circuit(c @ (Circuit::Rc(_) | Circuit::Rq(_))) => c.label(),
            Piece::Circuit(c) => format!("({})", c.label()),
        })
        .collect();
    labels.join(separator)
}

/// Two or more pieces in series.
#[derive(Debug, Clone)]
pub struct SeriesCircuit {
    pub(crate) pieces: Vec<Piece>,
    pub(crate) label: Option<String>,
}

impl SeriesCircuit {
    pub(crate) fn from_pieces(pieces: Vec<Piece>, label: Option<String>) -> Self {
        Self { pieces, label }
    }

    /// Set an explicit label, overriding the derived one.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Child pieces in construction order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub(crate) fn into_pieces(self) -> Vec<Piece> {
        self.pieces
    }

    /// Display label, derived with "-" unless set explicitly.
    pub fn label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => derived_label(&self.pieces, "-"),
        }
    }
}

/// Two or more pieces in parallel.
#[derive(Debug, Clone)]
pub struct ParallelCircuit {
    pub(crate) pieces: Vec<Piece>,
    pub(crate) label: Option<String>,
}

impl ParallelCircuit {
    pub(crate) fn from_pieces(pieces: Vec<Piece>, label: Option<String>) -> Self {
        Self { pieces, label }
    }

    /// Set an explicit label, overriding the derived one.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Child pieces in construction order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub(crate) fn into_pieces(self) -> Vec<Piece> {
        self.pieces
    }

    /// Display label, derived with "//" unless set explicitly.
    pub fn label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => derived_label(&self.pieces, "//"),
        }
    }
}

/// A resistor and a capacitor in parallel.
///
/// The defining quantities of the motif are the time constant `tau = R·C`
/// and the relaxation frequency `f = 1/(2π·tau)` at which the imaginary
/// part of the impedance peaks.
#[derive(Debug, Clone)]
pub struct RcCircuit {
    resistor: Resistor,
    capacitor: Capacitor,
}

impl RcCircuit {
    /// Create an RC motif from its two elements.
    pub fn new(resistor: Resistor, capacitor: Capacitor) -> Self {
        Self {
            resistor,
            capacitor,
        }
    }

    /// The resistor branch.
    pub fn resistor(&self) -> &Resistor {
        &self.resistor
    }

    /// The capacitor branch.
    pub fn capacitor(&self) -> &Capacitor {
        &self.capacitor
    }

    /// Time constant `tau = R·C` in seconds.
    pub fn tau(&self) -> f64 {
        self.resistor.resistance() * self.capacitor.capacitance()
    }

    /// Relaxation frequency `1/(2π·tau)` in Hz.
    pub fn relaxation_frequency(&self) -> f64 {
        frequency(1.0 / self.tau())
    }

    /// Complex impedance at the given frequency in Hz.
    pub fn impedance(&self, f: f64) -> Complex64 {
        parallel_impedance([self.resistor.impedance(f), self.capacitor.impedance(f)].into_iter())
    }
}

/// A resistor and a constant-phase element in parallel.
///
/// The CPE acts as a distorted capacitor; the motif's effective capacitance
/// is `C_eff = (R·T)^(1/p) / R`, from which `tau` and the relaxation
/// frequency follow as for an RC.
#[derive(Debug, Clone)]
pub struct RqCircuit {
    resistor: Resistor,
    cpe: Cpe,
}

impl RqCircuit {
    /// Create an RQ motif from its two elements.
    pub fn new(resistor: Resistor, cpe: Cpe) -> Self {
        Self { resistor, cpe }
    }

    /// The resistor branch.
    pub fn resistor(&self) -> &Resistor {
        &self.resistor
    }

    /// The CPE branch.
    pub fn cpe(&self) -> &Cpe {
        &self.cpe
    }

    /// Effective capacitance `(R·T)^(1/p) / R` in farad.
    pub fn effective_capacitance(&self) -> f64 {
        let r = self.resistor.resistance();
        (r * self.cpe.t()).powf(1.0 / self.cpe.p()) / r
    }

    /// Time constant `tau = R·C_eff` in seconds.
    pub fn tau(&self) -> f64 {
        self.resistor.resistance() * self.effective_capacitance()
    }

    /// Relaxation frequency `1/(2π·tau)` in Hz.
    pub fn relaxation_frequency(&self) -> f64 {
        frequency(1.0 / self.tau())
    }

    /// Complex impedance at the given frequency in Hz.
    pub fn impedance(&self, f: f64) -> Complex64 {
        parallel_impedance([self.resistor.impedance(f), self.cpe.impedance(f)].into_iter())
    }
}
