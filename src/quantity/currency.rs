use crate::quantity::time::Hours;

quantity!(Euros, via: f64, suffix: "€", precision: 2);

quantity!(
    /// Labour rate.
    EurosPerHour, via: f64, suffix: "€/h", precision: 2
);

implement_mul!(EurosPerHour, Hours, Euros);
