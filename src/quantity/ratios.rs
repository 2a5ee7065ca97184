quantity!(Percentage, via: f64, suffix: "%", precision: 0);

impl Percentage {
    /// Convert the percentage into `0.0..=1.0`.
    pub const fn to_ratio(self) -> f64 {
        0.01 * self.0
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_to_ratio() {
        assert_abs_diff_eq!(Percentage(15.0).to_ratio(), 0.15);
    }
}
