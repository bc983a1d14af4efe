//! LaTeX rendering of a solve.
//!
//! Each recorded iteration becomes an `alignat*` block in dictionary form,
//! one equation per basic variable plus one for the objective:
//!
//! ```text
//! x_b = rhs - a_1 x_1 - ... - a_k x_k
//! z   = value + c_1 x_1 + ... + c_k x_k
//! ```
//!
//! Variables are numbered from 1. Zero coefficients and the basic variable
//! of a row leave an empty cell so the columns stay aligned.

use tabula_solver::{Iteration, IterationTrace, Rational, Solution};

const EMPTY_CELL: &str = "&{}&    ";

/// Renders every iteration of `trace` followed by the optimal solution.
pub fn render_report(trace: &IterationTrace, solution: &Solution) -> String {
    let mut out = String::new();
    for (k, iteration) in trace.iter().enumerate() {
        render_iteration(&mut out, k + 1, iteration);
    }
    render_solution(&mut out, solution);
    out
}

/// Writes an integer as-is and anything else as `\frac{n}{d}`.
pub fn format_coefficient(value: &Rational) -> String {
    if value.is_integer() {
        value.to_string()
    } else if value.is_negative() {
        let abs = value.abs();
        format!("-\\frac{{{}}}{{{}}}", abs.numer(), abs.denom())
    } else {
        format!("\\frac{{{}}}{{{}}}", value.numer(), value.denom())
    }
}

fn render_iteration(out: &mut String, number: usize, iteration: &Iteration) {
    let tableau = &iteration.tableau;
    let rhs_col = tableau.rhs_column();

    out.push_str(&format!("\\textbf{{Iteration {}}}\n", number));
    out.push_str(&format!(
        "\\begin{{alignat*}}{{{}}}\n",
        tableau.column_count() + 1
    ));

    for (i, &basic) in iteration.basis.iter().enumerate() {
        let row = tableau.row(i);
        out.push_str(&format!(
            "\tx_{{{}}} &={{}}& {} ",
            basic + 1,
            format_coefficient(tableau.rhs(i))
        ));
        for (j, coefficient) in row.iter().take(rhs_col).enumerate() {
            if j == basic {
                out.push_str(EMPTY_CELL);
            } else {
                // Moving the term to the right-hand side flips its sign.
                push_term(out, &-coefficient, j);
            }
        }
        out.push_str("\\\\\n");
    }

    out.push_str(&format!(
        "\tz &={{}}& {} ",
        format_coefficient(&tableau.objective_value())
    ));
    for (j, coefficient) in tableau.objective_row().iter().take(rhs_col).enumerate() {
        push_term(out, coefficient, j);
    }
    out.push('\n');
    out.push_str("\\end{alignat*}\n\n");
}

fn push_term(out: &mut String, coefficient: &Rational, index: usize) {
    if coefficient.is_zero() {
        out.push_str(EMPTY_CELL);
        return;
    }
    let sign = if coefficient.is_negative() { '-' } else { '+' };
    let magnitude = coefficient.abs();
    if magnitude.is_one() {
        out.push_str(&format!("&{}{{}}&   x_{{{}}} ", sign, index + 1));
    } else {
        out.push_str(&format!(
            "&{}{{}}&   {}x_{{{}}} ",
            sign,
            format_coefficient(&magnitude),
            index + 1
        ));
    }
}

fn render_solution(out: &mut String, solution: &Solution) {
    out.push_str("\\textbf{The optimal solution}\n");
    out.push_str("\\begin{equation*}\n");
    let assignments: Vec<String> = solution
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| format!("x_{} = {}", i + 1, format_coefficient(v)))
        .collect();
    out.push_str(&format!("\t{}\n", assignments.join(", \\quad ")));
    out.push_str("\\end{equation*}\n");
    out.push_str(&format!(
        "and it yields $z = {}$.",
        format_coefficient(&solution.objective_value)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_solver::{LinearProgram, solve};

    #[test]
    fn test_format_coefficient() {
        assert_eq!(format_coefficient(&Rational::from_integer(-7)), "-7");
        assert_eq!(format_coefficient(&Rational::new(3, 4).unwrap()), "\\frac{3}{4}");
        assert_eq!(format_coefficient(&Rational::new(-3, 4).unwrap()), "-\\frac{3}{4}");
    }

    #[test]
    fn test_render_single_pivot_report() {
        // max x + y s.t. x + y <= 4
        let program = LinearProgram::from_rows(2, 1, vec![vec![1, 1, 4], vec![1, 1, 0]]);
        let outcome = solve(&program).unwrap();
        let report = render_report(&outcome.trace, &outcome.solution);

        let expected = concat!(
            "\\textbf{Iteration 1}\n",
            "\\begin{alignat*}{5}\n",
            "\tx_{3} &={}& 4 &-{}&   x_{1} &-{}&   x_{2} &{}&    \\\\\n",
            "\tz &={}& 0 &+{}&   x_{1} &+{}&   x_{2} &{}&    \n",
            "\\end{alignat*}\n",
            "\n",
            "\\textbf{Iteration 2}\n",
            "\\begin{alignat*}{5}\n",
            "\tx_{1} &={}& 4 &{}&    &-{}&   x_{2} &-{}&   x_{3} \\\\\n",
            "\tz &={}& 4 &{}&    &{}&    &-{}&   x_{3} \n",
            "\\end{alignat*}\n",
            "\n",
            "\\textbf{The optimal solution}\n",
            "\\begin{equation*}\n",
            "\tx_1 = 4, \\quad x_2 = 0\n",
            "\\end{equation*}\n",
            "and it yields $z = 4$.",
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_render_fractions() {
        let program = LinearProgram::from_rows(1, 1, vec![vec![3, 2], vec![1, 0]]);
        let outcome = solve(&program).unwrap();
        let report = render_report(&outcome.trace, &outcome.solution);

        let row = "\tx_{1} &={}& \\frac{2}{3} &{}&    &-{}&   \\frac{1}{3}x_{2} \\\\\n";
        assert!(report.contains(row));
        assert!(report.ends_with("and it yields $z = \\frac{2}{3}$."));
    }
}
