//! Impedance tables and their text writers.
//!
//! [`ZData`] pairs a frequency table with the complex impedances a circuit
//! produced over it. Tables serialize to the two formats downstream fitting
//! tools accept: ZView input (tab separated, no header) and plain CSV with
//! an `f,Z_re,Z_im` header. Electrochemists usually plot `-Im(Z)` upward;
//! `minus_imag` flips the sign of the imaginary column (and renames the CSV
//! header to `-Z_im`) so the table can feed such plots directly.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use num_complex::Complex64;

use crate::circuit::Piece;
use crate::error::{Result, ZircuitError};

/// A frequency/impedance table.
#[derive(Debug, Clone, PartialEq)]
pub struct ZData {
    frequencies: Vec<f64>,
    impedances: Vec<Complex64>,
}

impl ZData {
    /// Create a table from parallel frequency and impedance vectors.
    ///
    /// Panics if the columns differ in length.
    pub fn new(frequencies: Vec<f64>, impedances: Vec<Complex64>) -> Self {
        assert_eq!(
            frequencies.len(),
            impedances.len(),
            "frequency and impedance columns must be the same length"
        );
        Self {
            frequencies,
            impedances,
        }
    }

    /// Evaluate a circuit over a frequency table.
    pub fn from_piece(piece: &Piece, frequencies: &[f64]) -> Self {
        Self::new(frequencies.to_vec(), piece.impedances(frequencies))
    }

    /// Assemble a table from separate real and imaginary columns.
    ///
    /// Panics if the columns differ in length.
    pub fn from_parts(frequencies: Vec<f64>, real: Vec<f64>, imaginary: Vec<f64>) -> Self {
        assert_eq!(
            real.len(),
            imaginary.len(),
            "real and imaginary columns must be the same length"
        );
        let impedances = real
            .into_iter()
            .zip(imaginary)
            .map(|(re, im)| Complex64::new(re, im))
            .collect();
        Self::new(frequencies, impedances)
    }

    /// Frequencies in Hz.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Complex impedances in ohm.
    pub fn impedances(&self) -> &[Complex64] {
        &self.impedances
    }

    /// Real parts of the impedance column.
    pub fn real_parts(&self) -> Vec<f64> {
        self.impedances.iter().map(|z| z.re).collect()
    }

    /// Imaginary parts of the impedance column.
    pub fn imaginary_parts(&self) -> Vec<f64> {
        self.impedances.iter().map(|z| z.im).collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Write the table as a ZView input file: `f`, `Z_re` and `Z_im` columns
    /// separated by tabs, no header.
    pub fn write_zview<W: Write>(&self, writer: W, minus_imag: bool) -> io::Result<()> {
        self.write_rows(writer, '\t', false, minus_imag)
    }

    /// Write the table as CSV with an `f,Z_re,Z_im` header (`-Z_im` when the
    /// imaginary column is negated).
    pub fn write_csv<W: Write>(&self, writer: W, minus_imag: bool) -> io::Result<()> {
        self.write_rows(writer, ',', true, minus_imag)
    }

    fn write_rows<W: Write>(
        &self,
        mut writer: W,
        separator: char,
        header: bool,
        minus_imag: bool,
    ) -> io::Result<()> {
        let sign = if minus_imag { -1.0 } else { 1.0 };
        if header {
            let im_column = if minus_imag { "-Z_im" } else { "Z_im" };
            writeln!(writer, "f{separator}Z_re{separator}{im_column}")?;
        }
        for (f, z) in self.frequencies.iter().zip(&self.impedances) {
            writeln!(writer, "{f}{separator}{}{separator}{}", z.re, sign * z.im)?;
        }
        Ok(())
    }

    /// Write a ZView input file at `path`.
    pub fn to_zview(&self, path: impl AsRef<Path>, minus_imag: bool) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|source| ZircuitError::file_write(path.display().to_string(), source))?;
        self.write_zview(BufWriter::new(file), minus_imag)
            .map_err(|source| ZircuitError::file_write(path.display().to_string(), source))
    }

    /// Write a CSV file at `path`.
    pub fn to_csv(&self, path: impl AsRef<Path>, minus_imag: bool) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|source| ZircuitError::file_write(path.display().to_string(), source))?;
        self.write_csv(BufWriter::new(file), minus_imag)
            .map_err(|source| ZircuitError::file_write(path.display().to_string(), source))
    }
}

impl Piece {
    /// Evaluate this circuit over a frequency table.
    pub fn zdata(&self, frequencies: &[f64]) -> ZData {
        ZData::from_piece(self, frequencies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::parallel;
    use crate::element::{Capacitor, Resistor};

    fn sample() -> ZData {
        ZData::from_parts(vec![1.0, 10.0], vec![100.0, 80.0], vec![-50.0, -20.0])
    }

    #[test]
    fn test_from_piece_matches_pointwise_evaluation() {
        let circuit = parallel(Resistor::new(1000.0), Capacitor::new(1e-6));
        let frequencies = [1.0, 100.0, 10_000.0];
        let data = circuit.zdata(&frequencies);
        assert_eq!(data.len(), 3);
        for (i, &f) in frequencies.iter().enumerate() {
            assert_eq!(data.impedances()[i], circuit.impedance(f));
        }
    }

    #[test]
    fn test_zview_output_is_tab_separated_without_header() {
        let mut out = Vec::new();
        sample().write_zview(&mut out, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1\t100\t-50\n10\t80\t-20\n"
        );
    }

    #[test]
    fn test_csv_output_carries_a_header() {
        let mut out = Vec::new();
        sample().write_csv(&mut out, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "f,Z_re,Z_im\n1,100,-50\n10,80,-20\n"
        );
    }

    #[test]
    fn test_minus_imag_flips_the_imaginary_column() {
        let mut out = Vec::new();
        sample().write_csv(&mut out, true).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "f,Z_re,-Z_im\n1,100,50\n10,80,20\n"
        );

        let mut out = Vec::new();
        sample().write_zview(&mut out, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1\t100\t50\n10\t80\t20\n");
    }

    #[test]
    fn test_real_and_imaginary_accessors() {
        let data = sample();
        assert_eq!(data.real_parts(), vec![100.0, 80.0]);
        assert_eq!(data.imaginary_parts(), vec![-50.0, -20.0]);
        assert_eq!(data.frequencies(), &[1.0, 10.0]);
        assert!(!data.is_empty());
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_mismatched_impedance_column_is_rejected() {
        ZData::new(vec![1.0, 10.0], vec![Complex64::new(100.0, -50.0)]);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_ragged_component_columns_are_rejected() {
        ZData::from_parts(vec![1.0, 10.0], vec![100.0, 80.0], vec![-50.0]);
    }

    #[test]
    fn test_write_to_missing_directory_reports_the_path() {
        let data = sample();
        let err = data
            .to_csv("/zircuit-no-such-dir/table.csv", false)
            .unwrap_err();
        match err {
            ZircuitError::FileWriteError { path, .. } => assert!(path.contains("table.csv")),
            other => panic!("expected a file write error, got {other:?}"),
        }
    }
}
