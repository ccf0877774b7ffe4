use crate::matrix::{Element, Matrix};
use crate::partition::Partition;

/// Dot product of row `i` of A and column `j` of B.
///
/// Uses the i-j-k order: A is read along its row, B with stride `p`.
/// Arithmetic wraps on overflow.
#[inline]
pub fn dot(a: &Matrix, b: &Matrix, i: usize, j: usize) -> Element {
    let p = b.cols();
    let a_row = a.row(i);
    let b_data = b.as_slice();

    let mut sum: Element = 0;
    for (k, &a_ik) in a_row.iter().enumerate() {
        sum = sum.wrapping_add(a_ik.wrapping_mul(b_data[k * p + j]));
    }
    sum
}

/// Computes the cells `(row, col_start..col_start + out.len())` into `out`.
///
/// This is what each worker runs on the row segments it owns.
pub fn multiply_segment(
    a: &Matrix,
    b: &Matrix,
    row: usize,
    col_start: usize,
    out: &mut [Element],
) {
    for (offset, cell) in out.iter_mut().enumerate() {
        *cell = dot(a, b, row, col_start + offset);
    }
}

/// Computes every cell of `region` in C, overwriting what was there.
///
/// Cells outside `region` are left untouched.
///
/// # Arguments
///
/// * `a` - Matrix A (m × n)
/// * `b` - Matrix B (n × p)
/// * `c` - Matrix C (m × p)
/// * `region` - Sub-range of C to compute
pub fn multiply_region(a: &Matrix, b: &Matrix, c: &mut Matrix, region: &Partition) {
    debug_assert_eq!(a.cols(), b.rows());
    debug_assert_eq!(c.shape(), (a.rows(), b.cols()));

    for i in region.rows() {
        let c_row = c.row_mut(i);
        multiply_segment(a, b, i, region.col_start, &mut c_row[region.cols()]);
    }
}
