use serde::{Deserialize, Serialize};

use super::symmetry::Symmetry;

/// A dense observation tensor laid out as `[height, width, channels]`, channels last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    shape: [usize; 3],
    data: Vec<f32>,
}

impl Observation {
    pub fn new(shape: [usize; 3], data: Vec<f32>) -> Self {
        let observation = Self { shape, data };

        observation.assert_well_formed();

        observation
    }

    pub(crate) fn assert_well_formed(&self) {
        assert_eq!(
            self.shape.iter().product::<usize>(),
            self.data.len(),
            "Observation data length must match its shape {:?}",
            self.shape
        );
    }

    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    pub fn height(&self) -> usize {
        self.shape[0]
    }

    pub fn width(&self) -> usize {
        self.shape[1]
    }

    pub fn channels(&self) -> usize {
        self.shape[2]
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn get(&self, row: usize, column: usize, channel: usize) -> f32 {
        self.data[self.offset(row, column, channel)]
    }

    /// Reverses the height axis.
    pub fn flip_rows(&self) -> Self {
        self.remap(|row, column| (self.height() - 1 - row, column))
    }

    /// Reverses the width axis.
    pub fn flip_columns(&self) -> Self {
        self.remap(|row, column| (row, self.width() - 1 - column))
    }

    pub fn transformed(&self, symmetry: Symmetry) -> Self {
        match symmetry {
            Symmetry::Horizontal => self.flip_rows(),
            Symmetry::Vertical => self.flip_columns(),
            Symmetry::Diagonal => self.remap(|row, column| {
                (self.height() - 1 - row, self.width() - 1 - column)
            }),
        }
    }

    // `source` maps a destination cell to the cell it is copied from.
    fn remap<F>(&self, source: F) -> Self
    where
        F: Fn(usize, usize) -> (usize, usize),
    {
        let channels = self.channels();
        let mut data = Vec::with_capacity(self.data.len());

        for row in 0..self.height() {
            for column in 0..self.width() {
                let (src_row, src_column) = source(row, column);
                let start = self.offset(src_row, src_column, 0);
                data.extend_from_slice(&self.data[start..start + channels]);
            }
        }

        Self {
            shape: self.shape,
            data,
        }
    }

    fn offset(&self, row: usize, column: usize, channel: usize) -> usize {
        (row * self.width() + column) * self.channels() + channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2 rows, 3 columns, 2 channels. Each cell holds (row * 10 + column) and its negation.
    fn observation() -> Observation {
        let mut data = vec![];
        for row in 0..2 {
            for column in 0..3 {
                let v = (row * 10 + column) as f32;
                data.push(v);
                data.push(-v);
            }
        }

        Observation::new([2, 3, 2], data)
    }

    #[test]
    fn test_get_reads_channels_last() {
        let observation = observation();

        assert_eq!(observation.get(1, 2, 0), 12.0);
        assert_eq!(observation.get(1, 2, 1), -12.0);
        assert_eq!(observation.get(0, 1, 0), 1.0);
    }

    #[test]
    fn test_flip_rows() {
        let flipped = observation().flip_rows();

        assert_eq!(flipped.shape(), [2, 3, 2]);
        assert_eq!(flipped.get(0, 0, 0), 10.0);
        assert_eq!(flipped.get(0, 2, 1), -12.0);
        assert_eq!(flipped.get(1, 1, 0), 1.0);
    }

    #[test]
    fn test_flip_columns() {
        let flipped = observation().flip_columns();

        assert_eq!(flipped.get(0, 0, 0), 2.0);
        assert_eq!(flipped.get(0, 2, 0), 0.0);
        assert_eq!(flipped.get(1, 0, 1), -12.0);
    }

    #[test]
    fn test_diagonal_is_both_flips() {
        let observation = observation();

        assert_eq!(
            observation.transformed(Symmetry::Diagonal),
            observation.flip_rows().flip_columns()
        );
        assert_eq!(observation.transformed(Symmetry::Diagonal).get(0, 0, 0), 12.0);
    }

    #[test]
    fn test_flips_are_involutions() {
        let observation = observation();

        assert_eq!(observation.flip_rows().flip_rows(), observation);
        assert_eq!(observation.flip_columns().flip_columns(), observation);
    }

    #[test]
    fn test_transformed_does_not_mutate_source() {
        let observation = observation();
        let before = observation.clone();

        let _ = observation.transformed(Symmetry::Horizontal);

        assert_eq!(observation, before);
    }

    #[test]
    #[should_panic(expected = "Observation data length must match its shape")]
    fn test_new_rejects_mismatched_shape() {
        Observation::new([2, 2, 1], vec![0.0; 3]);
    }
}
