use crate::f;

/// Extends primitives with more specific formatting options
pub trait ValueExt {
    /// Better scientific number formatting
    ///
    /// Always signs and pads the exponent, unlike the default `{:e}` output.
    ///
    /// Works for anything that can be represented as scientific using the
    /// `LowerExp` trait, which is pretty much every numerical primitive.
    ///
    /// ```rust
    /// # use mmtools_utils::ValueExt;
    /// let cell_size: f64 = 5e-9;
    /// assert_eq!(cell_size.sci(3, 2), "5.000e-09".to_string());
    /// assert_eq!(1.0_f64.sci(5, 2), "1.00000e+00".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: std::fmt::LowerExp> ValueExt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let num = f!("{:.precision$e}", &self, precision = precision);

        // `LowerExp` output always contains an 'e', fall back to raw otherwise
        let Some(split) = num.find('e') else {
            return num;
        };

        let (mantissa, exp) = num.split_at(split);
        let (sign, exp) = match exp.strip_prefix("e-") {
            Some(exp) => ('-', exp),
            None => ('+', &exp[1..]),
        };

        f!("{mantissa}e{sign}{exp:0>exp_pad$}")
    }
}

/// Extends 3-component vectors with consistent formatting
pub trait VectorExt {
    /// Format as `(x, y, z)` with every component in scientific notation
    ///
    /// ```rust
    /// # use mmtools_utils::VectorExt;
    /// let m = [0.0, -1.0, 0.5];
    /// assert_eq!(
    ///     m.display_sci(2),
    ///     "(0.00e+00, -1.00e+00, 5.00e-01)".to_string()
    /// );
    /// ```
    fn display_sci(&self, precision: usize) -> String;
}

impl VectorExt for [f64; 3] {
    fn display_sci(&self, precision: usize) -> String {
        let [x, y, z] = self.map(|v| v.sci(precision, 2));
        f!("({x}, {y}, {z})")
    }
}
