//! Extraction of compensated coefficient sets into solver triplet arrays
use crate::model::expression::Slot;

/// Extract linear entries into parallel (column, value) arrays.
///
/// An elided entry is materialized as a zero valued placeholder on column 0
/// instead of being omitted, preserving the positional sizing of the
/// destination arrays.
pub fn extract_linear(entries: &[(Slot, f64)]) -> (Vec<usize>, Vec<f64>) {
    let mut columns = Vec::with_capacity(entries.len());
    let mut values = Vec::with_capacity(entries.len());
    for &(slot, value) in entries {
        match slot {
            Slot::Column(column) => {
                columns.push(column);
                values.push(value);
            }
            Slot::Elided => {
                columns.push(0);
                values.push(0.0);
            }
        }
    }
    (columns, values)
}

/// Fold quadratic entries into the canonical triangular triplet form.
///
/// The destination stores one triangular half of the symmetric form and
/// evaluates `0.5 * x'Qx`: an off-diagonal entry is moved to
/// (max, min) with its value unchanged, a diagonal entry keeps its position
/// with its value doubled. Getting either rule wrong changes the
/// mathematical expression by up to a factor of two. A pair with an elided
/// side becomes a zero valued placeholder at (0, 0).
pub fn canonicalize_quadratic(
    entries: &[((Slot, Slot), f64)],
) -> (Vec<usize>, Vec<usize>, Vec<f64>) {
    let mut rows = Vec::with_capacity(entries.len());
    let mut columns = Vec::with_capacity(entries.len());
    let mut values = Vec::with_capacity(entries.len());
    for &((row_slot, column_slot), value) in entries {
        match (row_slot, column_slot) {
            (Slot::Column(row), Slot::Column(column)) => {
                if row == column {
                    rows.push(row);
                    columns.push(column);
                    values.push(2.0 * value);
                } else {
                    rows.push(row.max(column));
                    columns.push(row.min(column));
                    values.push(value);
                }
            }
            _ => {
                rows.push(0);
                columns.push(0);
                values.push(0.0);
            }
        }
    }
    (rows, columns, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Evaluate the source map's `sum c * x_i * x_j` convention
    fn evaluate_source(entries: &[((usize, usize), f64)], point: &[f64]) -> f64 {
        entries
            .iter()
            .map(|&((i, j), value)| value * point[i] * point[j])
            .sum()
    }

    /// Evaluate `0.5 * x'Qx` where Q is the symmetric completion of the
    /// stored triangle
    fn evaluate_canonical(rows: &[usize], columns: &[usize], values: &[f64], point: &[f64]) -> f64 {
        let mut total = 0.0;
        for ((&row, &column), &value) in rows.iter().zip(columns).zip(values) {
            if row == column {
                total += 0.5 * value * point[row] * point[column];
            } else {
                total += value * point[row] * point[column];
            }
        }
        total
    }

    fn live(entries: &[((usize, usize), f64)]) -> Vec<((Slot, Slot), f64)> {
        entries
            .iter()
            .map(|&((i, j), value)| ((Slot::Column(i), Slot::Column(j)), value))
            .collect()
    }

    #[test]
    fn linear_passthrough() {
        let entries = vec![(Slot::Column(2), 1.5), (Slot::Column(0), -3.0)];
        let (columns, values) = extract_linear(&entries);
        assert_eq!(columns, vec![2, 0]);
        assert_eq!(values, vec![1.5, -3.0]);
    }

    #[test]
    fn elided_linear_becomes_zero_placeholder() {
        let entries = vec![(Slot::Elided, 4.0), (Slot::Column(1), 2.0)];
        let (columns, values) = extract_linear(&entries);
        // The slot is kept, the coefficient is not
        assert_eq!(columns, vec![0, 1]);
        assert_eq!(values, vec![0.0, 2.0]);
    }

    #[test]
    fn off_diagonal_already_lower_is_untouched() {
        let (rows, columns, values) =
            canonicalize_quadratic(&live(&[((1, 0), 2.0)]));
        assert_eq!(rows, vec![1]);
        assert_eq!(columns, vec![0]);
        assert_eq!(values, vec![2.0]);
    }

    #[test]
    fn off_diagonal_upper_is_swapped() {
        let (rows, columns, values) =
            canonicalize_quadratic(&live(&[((0, 3), -1.5)]));
        assert_eq!(rows, vec![3]);
        assert_eq!(columns, vec![0]);
        assert_eq!(values, vec![-1.5]);
    }

    #[test]
    fn diagonal_is_doubled() {
        let (rows, columns, values) =
            canonicalize_quadratic(&live(&[((2, 2), 1.5)]));
        assert_eq!(rows, vec![2]);
        assert_eq!(columns, vec![2]);
        assert_eq!(values, vec![3.0]);
    }

    #[test]
    fn elided_quadratic_becomes_zero_placeholder() {
        let entries = vec![
            ((Slot::Column(1), Slot::Elided), 5.0),
            ((Slot::Elided, Slot::Elided), 1.0),
        ];
        let (rows, columns, values) = canonicalize_quadratic(&entries);
        assert_eq!(rows, vec![0, 0]);
        assert_eq!(columns, vec![0, 0]);
        assert_eq!(values, vec![0.0, 0.0]);
    }

    #[test]
    fn canonical_form_preserves_quadratic_value() {
        let source = [
            ((0usize, 0usize), 1.5),
            ((1, 0), 2.0),
            ((0, 2), -0.75),
            ((2, 2), 4.0),
            ((1, 2), 0.25),
        ];
        let (rows, columns, values) = canonicalize_quadratic(&live(&source));

        for point in [
            [0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0],
            [1.0, -2.0, 3.0],
            [-0.5, 0.25, 7.0],
        ] {
            let expected = evaluate_source(&source, &point);
            let actual = evaluate_canonical(&rows, &columns, &values, &point);
            assert!(
                (expected - actual).abs() < 1e-12,
                "canonicalization changed the form at {point:?}: {expected} vs {actual}"
            );
        }
    }
}
