pub mod latex;
pub mod parser;
pub mod template;

pub use latex::{format_coefficient, render_report};
pub use parser::{ParseError, parse_program, read_interactive};
pub use template::{DEFAULT_MARKER, ReportError, substitute, write_report};
