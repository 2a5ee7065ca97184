quantity!(Hours, via: f64, suffix: "h", precision: 1);

quantity!(Minutes, via: u16, suffix: "min", precision: 0);

quantity!(
    /// Payback duration.
    Months, via: f64, suffix: "mo", precision: 1
);

impl From<Minutes> for Hours {
    fn from(minutes: Minutes) -> Self {
        Self(f64::from(minutes.0) / 60.0)
    }
}
