// Constants for the simulated C runner

/// Hard upper bound on the iterations of any single loop
pub const ITERATION_CAP: usize = 1000;

/// Maximum nesting of bodies executed through the splitter
pub const MAX_NESTING_DEPTH: usize = 64;

/// Values handed out by `scanf`, indexed by the number of variables declared
/// so far (wrapping around)
pub const SAMPLE_INPUTS: [i64; 10] = [10, 20, 5, 15, 8, 12, 25, 30, 3, 7];

/// Precision used by `%f`/`%g` when the format gives none
pub const DEFAULT_FLOAT_PRECISION: usize = 2;

/// Maximum nesting of parentheses, casts and operands inside one expression
pub const MAX_EXPRESSION_DEPTH: usize = 256;

/// Largest width or precision a `printf` directive may ask for; anything
/// wider is left in the output unconverted
pub const MAX_FORMAT_FIELD: usize = 1024;
