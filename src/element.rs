//! Passive impedance elements: Resistor, Capacitor, CPE, Inductor.
//!
//! Each element owns its parameter values, an optional display label
//! (falling back to the conventional symbol "R", "C", "Q" or "L"), and
//! per-parameter fixed/free flags used by downstream fitting tools.
//! Parameters are immutable after construction; equality compares element
//! kind and numeric values only, never labels or flags.

use num_complex::Complex64;

use crate::sweep::angular_frequency;

/// An ideal resistor.
///
/// Impedance is frequency-independent: `Z = R`.
#[derive(Debug, Clone)]
pub struct Resistor {
    resistance: f64,
    label: Option<String>,
    fixed: bool,
}

impl Resistor {
    /// Create a resistor with the given resistance in ohm.
    pub fn new(resistance: f64) -> Self {
        Self {
            resistance,
            label: None,
            fixed: false,
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Mark the resistance as fixed for fitting purposes.
    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    /// Resistance in ohm.
    pub fn resistance(&self) -> f64 {
        self.resistance
    }

    /// Display label, defaulting to "R".
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("R")
    }

    /// Whether the resistance is held fixed during fitting.
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Complex impedance at the given frequency in Hz.
    pub fn impedance(&self, _frequency: f64) -> Complex64 {
        Complex64::new(self.resistance, 0.0)
    }
}

impl PartialEq for Resistor {
    fn eq(&self, other: &Self) -> bool {
        self.resistance == other.resistance
    }
}

/// An ideal capacitor.
///
/// `Z = 1 / (jωC)` with `ω = 2πf`.
#[derive(Debug, Clone)]
pub struct Capacitor {
    capacitance: f64,
    label: Option<String>,
    fixed: bool,
}

impl Capacitor {
    /// Create a capacitor with the given capacitance in farad.
    pub fn new(capacitance: f64) -> Self {
        Self {
            capacitance,
            label: None,
            fixed: false,
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Mark the capacitance as fixed for fitting purposes.
    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    /// Capacitance in farad.
    pub fn capacitance(&self) -> f64 {
        self.capacitance
    }

    /// Display label, defaulting to "C".
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("C")
    }

    /// Whether the capacitance is held fixed during fitting.
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Complex impedance at the given frequency in Hz.
    pub fn impedance(&self, frequency: f64) -> Complex64 {
        (Complex64::i() * angular_frequency(frequency) * self.capacitance).inv()
    }
}

impl PartialEq for Capacitor {
    fn eq(&self, other: &Self) -> bool {
        self.capacitance == other.capacitance
    }
}

/// A constant-phase element.
///
/// `Z = 1 / (T · (jω)^p)`. With `p = 1` the CPE degenerates into an ideal
/// capacitor of capacitance `T`; with `p = 0` into a resistor of `1/T`.
#[derive(Debug, Clone)]
pub struct Cpe {
    t: f64,
    p: f64,
    label: Option<String>,
    t_fixed: bool,
    p_fixed: bool,
}

impl Cpe {
    /// Create a CPE from its pseudo-capacitance `T` (in F·s^(p-1)) and
    /// exponent `p`.
    pub fn new(t: f64, p: f64) -> Self {
        Self {
            t,
            p,
            label: None,
            t_fixed: false,
            p_fixed: false,
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Mark `T` and `p` as fixed for fitting purposes.
    pub fn with_fixed(mut self, t_fixed: bool, p_fixed: bool) -> Self {
        self.t_fixed = t_fixed;
        self.p_fixed = p_fixed;
        self
    }

    /// Pseudo-capacitance `T`.
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Exponent `p`.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Display label, defaulting to "Q".
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("Q")
    }

    /// Whether `T` is held fixed during fitting.
    pub fn is_t_fixed(&self) -> bool {
        self.t_fixed
    }

    /// Whether `p` is held fixed during fitting.
    pub fn is_p_fixed(&self) -> bool {
        self.p_fixed
    }

    /// Complex impedance at the given frequency in Hz.
    pub fn impedance(&self, frequency: f64) -> Complex64 {
        let jw = Complex64::i() * angular_frequency(frequency);
        (jw.powf(self.p) * self.t).inv()
    }
}

impl PartialEq for Cpe {
    fn eq(&self, other: &Self) -> bool {
        self.t == other.t && self.p == other.p
    }
}

/// An ideal inductor.
///
/// `Z = jωL` with `ω = 2πf`.
#[derive(Debug, Clone)]
pub struct Inductor {
    inductance: f64,
    label: Option<String>,
    fixed: bool,
}

impl Inductor {
    /// Create an inductor with the given inductance in henry.
    pub fn new(inductance: f64) -> Self {
        Self {
            inductance,
            label: None,
            fixed: false,
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Mark the inductance as fixed for fitting purposes.
    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    /// Inductance in henry.
    pub fn inductance(&self) -> f64 {
        self.inductance
    }

    /// Display label, defaulting to "L".
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("L")
    }

    /// Whether the inductance is held fixed during fitting.
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Complex impedance at the given frequency in Hz.
    pub fn impedance(&self, frequency: f64) -> Complex64 {
        Complex64::new(0.0, angular_frequency(frequency) * self.inductance)
    }
}

impl PartialEq for Inductor {
    fn eq(&self, other: &Self) -> bool {
        self.inductance == other.inductance
    }
}

/// A passive circuit element.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Resistor(Resistor),
    Capacitor(Capacitor),
    Cpe(Cpe),
    Inductor(Inductor),
}

impl Element {
    /// Complex impedance at the given frequency in Hz.
    pub fn impedance(&self, frequency: f64) -> Complex64 {
        match self {
            Element::Resistor(r) => r.impedance(frequency),
            Element::Capacitor(c) => c.impedance(frequency),
            Element::Cpe(q) => q.impedance(frequency),
            Element::Inductor(l) => l.impedance(frequency),
        }
    }

    /// Complex impedances over a frequency table.
    pub fn impedances(&self, frequencies: &[f64]) -> Vec<Complex64> {
        frequencies.iter().map(|&f| self.impedance(f)).collect()
    }

    /// Display label, defaulting to the element symbol.
    pub fn label(&self) -> &str {
        match self {
            Element::Resistor(r) => r.label(),
            Element::Capacitor(c) => c.label(),
            Element::Cpe(q) => q.label(),
            Element::Inductor(l) => l.label(),
        }
    }
}

impl From<Resistor> for Element {
    fn from(r: Resistor) -> Self {
        Element::Resistor(r)
    }
}

impl From<Capacitor> for Element {
    fn from(c: Capacitor) -> Self {
        Element::Capacitor(c)
    }
}

impl From<Cpe> for Element {
    fn from(q: Cpe) -> Self {
        Element::Cpe(q)
    }
}

impl From<Inductor> for Element {
    fn from(l: Inductor) -> Self {
        Element::Inductor(l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_resistor_impedance_is_frequency_independent() {
        let r = Resistor::new(1000.0);
        let z_low = r.impedance(0.1);
        let z_high = r.impedance(1e6);
        assert_relative_eq!(z_low.re, 1000.0);
        assert_relative_eq!(z_low.im, 0.0);
        assert_eq!(z_low, z_high);
    }

    #[test]
    fn test_capacitor_impedance_is_negative_imaginary() {
        let c = Capacitor::new(1e-6);
        let f = 1000.0;
        let z = c.impedance(f);
        let expected = -1.0 / (angular_frequency(f) * 1e-6);
        assert_relative_eq!(z.re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(z.im, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_cpe_with_unit_exponent_matches_capacitor() {
        let q = Cpe::new(1e-6, 1.0);
        let c = Capacitor::new(1e-6);
        for f in [0.5, 42.0, 1e4] {
            let zq = q.impedance(f);
            let zc = c.impedance(f);
            assert_relative_eq!(zq.re, zc.re, epsilon = 1e-9);
            assert_relative_eq!(zq.im, zc.im, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_cpe_with_zero_exponent_is_resistive() {
        let q = Cpe::new(0.01, 0.0);
        let z = q.impedance(123.0);
        assert_relative_eq!(z.re, 100.0, max_relative = 1e-12);
        assert_relative_eq!(z.im, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_inductor_impedance_is_positive_imaginary() {
        let l = Inductor::new(1e-3);
        let f = 50.0;
        let z = l.impedance(f);
        assert_relative_eq!(z.re, 0.0);
        assert_relative_eq!(z.im, angular_frequency(f) * 1e-3, max_relative = 1e-12);
    }

    #[test]
    fn test_equality_ignores_labels_and_flags() {
        let plain = Resistor::new(470.0);
        let decorated = Resistor::new(470.0).with_label("R_ct").with_fixed(true);
        assert_eq!(plain, decorated);

        let q1 = Cpe::new(1e-9, 0.8);
        let q2 = Cpe::new(1e-9, 0.8).with_label("Q_dl").with_fixed(true, true);
        assert_eq!(q1, q2);
    }

    #[test]
    fn test_equality_is_exact_on_values() {
        assert_ne!(Resistor::new(100.0), Resistor::new(100.0 + 1e-9));
        assert_ne!(Cpe::new(1e-9, 0.8), Cpe::new(1e-9, 0.81));
        assert_ne!(
            Element::from(Resistor::new(100.0)),
            Element::from(Inductor::new(100.0))
        );
    }

    #[test]
    fn test_default_labels_use_element_symbols() {
        assert_eq!(Resistor::new(1.0).label(), "R");
        assert_eq!(Capacitor::new(1.0).label(), "C");
        assert_eq!(Cpe::new(1.0, 0.5).label(), "Q");
        assert_eq!(Inductor::new(1.0).label(), "L");
        assert_eq!(Capacitor::new(1.0).with_label("C_dl").label(), "C_dl");
    }
}
