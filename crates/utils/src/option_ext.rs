use crate::f;

/// Extends Option for easy display formatting
pub trait OptionExt {
    /// Display the contained value, or "none" for the `None` variant
    ///
    /// ```rust
    /// # use mmtools_utils::OptionExt;
    /// let nz: Option<usize> = Some(2);
    /// assert_eq!(nz.display(), "2");
    ///
    /// let nz: Option<usize> = None;
    /// assert_eq!(nz.display(), "none");
    /// ```
    fn display(&self) -> String {
        self.display_or("none")
    }

    /// Display the contained value, or a custom `fallback` for `None`
    ///
    /// Useful for derived quantities that are legitimately absent, where
    /// "none" reads badly in a summary.
    ///
    /// ```rust
    /// # use mmtools_utils::OptionExt;
    /// let time: Option<f64> = None;
    /// assert_eq!(time.display_or("unknown"), "unknown");
    /// ```
    fn display_or(&self, fallback: &str) -> String;
}

impl<T: std::fmt::Display> OptionExt for Option<T> {
    fn display_or(&self, fallback: &str) -> String {
        match self {
            Some(value) => f!("{value}"),
            None => fallback.to_string(),
        }
    }
}
