//! Dense gain matrix
//!
//! `output[o] = Σ_i gain(o, i) * input[i]` for every frame. Storage is
//! row-major so the mixing kernel walks one contiguous row per output
//! channel.

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::channel::Layout;

/// Frozen output × input table of mixing coefficients
#[derive(Debug, Clone, PartialEq)]
pub struct GainMatrix {
    input: Layout,
    output: Layout,
    coefficients: Box<[f64]>,
    table_version: u32,
    passthrough: bool,
}

impl GainMatrix {
    /// Assemble a matrix from row-major coefficients
    ///
    /// Only the builder creates matrices; `coefficients` must hold
    /// `output.channels() * input.channels()` entries.
    pub(crate) fn from_parts(
        input: Layout,
        output: Layout,
        coefficients: Vec<f64>,
        table_version: u32,
    ) -> Self {
        debug_assert_eq!(coefficients.len(), input.channels() * output.channels());
        let passthrough = is_identity(&coefficients, input.channels(), output.channels());
        Self {
            input,
            output,
            coefficients: coefficients.into_boxed_slice(),
            table_version,
            passthrough,
        }
    }

    #[inline]
    pub fn input_channels(&self) -> usize {
        self.input.channels()
    }

    #[inline]
    pub fn output_channels(&self) -> usize {
        self.output.channels()
    }

    pub fn input_layout(&self) -> &Layout {
        &self.input
    }

    pub fn output_layout(&self) -> &Layout {
        &self.output
    }

    /// Version of the coefficient table the matrix was resolved with
    pub fn table_version(&self) -> u32 {
        self.table_version
    }

    /// Coefficient mixing input channel `input` into output channel `output`
    ///
    /// # Panics
    /// If either index is out of range.
    #[inline]
    pub fn get(&self, output: usize, input: usize) -> f64 {
        assert!(output < self.output_channels(), "output index out of range");
        assert!(input < self.input_channels(), "input index out of range");
        self.coefficients[output * self.input_channels() + input]
    }

    /// All coefficients feeding one output channel, indexed by input channel
    #[inline]
    pub fn row(&self, output: usize) -> &[f64] {
        let width = self.input_channels();
        &self.coefficients[output * width..(output + 1) * width]
    }

    /// Rows in output-channel order
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.coefficients.chunks_exact(self.input_channels())
    }

    /// Coefficients in one input channel's column, indexed by output channel
    pub fn column(&self, input: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows().map(move |row| row[input])
    }

    /// True when mixing copies input to output unchanged
    ///
    /// That is the case for a square matrix with unity on the diagonal and
    /// zero elsewhere (so no Silence role on either side).
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.passthrough
    }

    /// True if no output channel receives anything from `input`
    pub fn is_input_dropped(&self, input: usize) -> bool {
        self.column(input).all(|gain| gain == 0.0)
    }

    /// True if output channel `output` is always written as zero
    pub fn is_output_silent(&self, output: usize) -> bool {
        self.row(output).iter().all(|&gain| gain == 0.0)
    }
}

fn is_identity(coefficients: &[f64], inputs: usize, outputs: usize) -> bool {
    inputs == outputs
        && coefficients
            .chunks_exact(inputs)
            .enumerate()
            .all(|(o, row)| {
                row.iter()
                    .enumerate()
                    .all(|(i, &gain)| gain == if i == o { 1.0 } else { 0.0 })
            })
}

impl Serialize for GainMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<&[f64]> = self.rows().collect();
        let mut state = serializer.serialize_struct("GainMatrix", 4)?;
        state.serialize_field("table_version", &self.table_version)?;
        state.serialize_field("input", &self.input)?;
        state.serialize_field("output", &self.output)?;
        state.serialize_field("rows", &rows)?;
        state.end()
    }
}

impl fmt::Display for GainMatrix {
    /// One line per output channel, coefficients aligned by input channel
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>5} |", "")?;
        for role in self.input.roles() {
            write!(f, " {:>7}", role.short_name())?;
        }
        writeln!(f)?;
        for (role, row) in self.output.roles().iter().zip(self.rows()) {
            write!(f, "{:>5} |", role.short_name())?;
            for gain in row {
                write!(f, " {:>7.4}", gain)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
